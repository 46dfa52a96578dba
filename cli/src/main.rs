// Copyright (c) 2026 task-maker developers
// SPDX-License-Identifier: AGPL-3.0

//! # task-maker
//!
//! Evaluates the solutions of a competitive programming task through the
//! coordinator service, launching the coordinator in the background when it
//! is not running yet.
//!
//! ## Modes
//!
//! - **Default**: evaluate the pre-built request of the task directory and
//!   render progress with the selected UI
//! - **Clean** (`--clean`): drop the coordinator's cached data and exit
//!
//! ## Exit status
//!
//! `0` on success, `1` on any failure, `128 + N` when interrupted by
//! signal `N`.

use anyhow::{Context, Result};
use clap::Parser;

mod cli;
mod commands;
mod config;
mod request;
mod ui;

use cli::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(&cli.log_level)?;

    let code = commands::run(cli).await?;
    std::process::exit(code);
}

/// Initialize tracing subscriber for logging.
///
/// Logs go to stderr so they never interleave with UI output on stdout.
fn init_logging(level: &str) -> Result<()> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .or_else(|_| tracing_subscriber::EnvFilter::try_new(level))
        .context("Failed to create log filter")?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .init();

    Ok(())
}
