// Copyright (c) 2026 task-maker developers
// SPDX-License-Identifier: AGPL-3.0

use anyhow::{Context, Result};
use taskmaker_core::application::cancellation::SignalReceiver;

use super::ClientOrchestrator;
use crate::cli::Cli;
use crate::ui;

/// Drop the coordinator's cached data; never opens an event stream.
pub async fn execute(
    cli: &Cli,
    orchestrator: &ClientOrchestrator,
    mut signals: SignalReceiver,
) -> Result<i32> {
    let store_dir = std::path::absolute(cli.store_dir()).context("Failed to resolve --storedir")?;
    let temp_dir = std::path::absolute(cli.temp_dir()).context("Failed to resolve --tempdir")?;

    let mut ui = ui::create(cli.ui, &[]);
    let outcome = orchestrator
        .clean(
            &store_dir.display().to_string(),
            &temp_dir.display().to_string(),
            ui.as_mut(),
            &mut signals,
        )
        .await;
    Ok(outcome.exit_code())
}
