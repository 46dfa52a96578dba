// Copyright (c) 2026 task-maker developers
// SPDX-License-Identifier: AGPL-3.0

//! Command dispatch
//!
//! Setup failures (configuration, request file, signal handlers) are
//! returned as errors before any session starts. Once a session runs, its
//! outcome is turned into the process exit status.

pub mod clean;
pub mod evaluate;

use anyhow::{Context, Result};
use taskmaker_core::infrastructure::{spawn_signal_listener, DetachedSpawner, GrpcConnector};
use taskmaker_core::{ClientConfig, Orchestrator};

use crate::cli::Cli;
use crate::config;

pub type ClientOrchestrator = Orchestrator<GrpcConnector, DetachedSpawner>;

pub async fn run(cli: Cli) -> Result<i32> {
    let config = config::resolve(&cli)?;
    let signals = spawn_signal_listener().context("Failed to install signal handlers")?;
    let orchestrator = build_orchestrator(config);

    if cli.clean {
        clean::execute(&cli, &orchestrator, signals).await
    } else {
        evaluate::execute(&cli, &orchestrator, signals).await
    }
}

fn build_orchestrator(config: ClientConfig) -> ClientOrchestrator {
    let spawner = DetachedSpawner::new(config.spawn_command());
    tracing::debug!(
        endpoint = %config.endpoint(),
        program = %spawner.command().program.display(),
        spawn = config.should_spawn(),
        "Coordinator settings"
    );
    Orchestrator::new(config, GrpcConnector, spawner)
}
