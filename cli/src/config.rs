// Copyright (c) 2026 task-maker developers
// SPDX-License-Identifier: AGPL-3.0

// Layers command line overrides on top of the file configuration.

use anyhow::{Context, Result};
use taskmaker_core::domain::endpoint::{CoordinatorEndpoint, DEFAULT_COORDINATOR_PORT};
use taskmaker_core::ClientConfig;

use crate::cli::Cli;

pub fn resolve(cli: &Cli) -> Result<ClientConfig> {
    let mut config = ClientConfig::load_or_default(cli.config.as_deref())
        .context("Failed to load configuration")?;

    if let Some(server) = &cli.server {
        let endpoint = CoordinatorEndpoint::parse_with_default(server, DEFAULT_COORDINATOR_PORT)
            .with_context(|| format!("Invalid --server address '{}'", server))?;
        config.coordinator.host = endpoint.host().to_string();
        config.coordinator.port = endpoint.port();
    }

    config.coordinator.args.extend(role_args(cli));
    config.validate().context("Invalid configuration")?;

    if config.coordinator.spawn && !config.should_spawn() {
        tracing::debug!(
            "Coordinator at {} is remote, it will not be spawned",
            config.endpoint()
        );
    }

    Ok(config)
}

/// Per-role options forwarded to a spawned coordinator.
fn role_args(cli: &Cli) -> Vec<String> {
    let mut args = Vec::new();
    let paths = [
        ("--logfile", &cli.manager_logfile),
        ("--pidfile", &cli.manager_pidfile),
        ("--worker-logfile", &cli.worker_logfile),
        ("--worker-pidfile", &cli.worker_pidfile),
    ];
    for (flag, path) in paths {
        if let Some(path) = path {
            args.push(flag.to_string());
            args.push(path.display().to_string());
        }
    }
    if cli.manager_verbose {
        args.push("--verbose".to_string());
    }
    if cli.worker_verbose {
        args.push("--worker-verbose".to_string());
    }
    args
}
