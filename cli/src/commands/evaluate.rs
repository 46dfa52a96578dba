// Copyright (c) 2026 task-maker developers
// SPDX-License-Identifier: AGPL-3.0

use anyhow::Result;
use taskmaker_core::application::cancellation::SignalReceiver;
use tracing::info;

use super::ClientOrchestrator;
use crate::cli::Cli;
use crate::request::{self, RequestOptions};
use crate::ui;

/// Evaluate the task's solutions and return the process exit status.
pub async fn execute(
    cli: &Cli,
    orchestrator: &ClientOrchestrator,
    mut signals: SignalReceiver,
) -> Result<i32> {
    let mut request = request::load(&cli.request_path())?;
    request::absolutize_solutions(&mut request, &cli.task_dir)?;
    request::filter_solutions(&mut request, &cli.solutions)?;
    request::apply_options(&mut request, &RequestOptions::from_cli(cli))?;

    info!(
        solutions = request.solutions.len(),
        cache = %cli.cache,
        dry_run = request.dry_run,
        "Evaluating task"
    );

    let mut ui = ui::create(cli.ui, &request::solution_names(&request));
    let outcome = orchestrator
        .evaluate(request, ui.as_mut(), &mut signals)
        .await;
    Ok(outcome.exit_code())
}
