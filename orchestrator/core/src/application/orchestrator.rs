// Copyright (c) 2026 task-maker developers
// SPDX-License-Identifier: AGPL-3.0

//! Evaluation session orchestrator
//!
//! Composes the lifecycle manager, the session controller and the
//! cancellation handler into the two runs a client invocation can make:
//! evaluating a task or cleaning its cached data.
//!
//! Every run ends with exactly one of [`UiAdapter::print_final_status`] or
//! [`UiAdapter::fatal_error`].

use tracing::{debug, warn};

use crate::application::cancellation::{CancellationHandler, SignalReceiver, TerminationSignal};
use crate::application::lifecycle::{ensure_coordinator, CoordinatorConnector, CoordinatorSpawner};
use crate::application::session_controller::{SessionController, StreamOutcome};
use crate::application::ui::UiAdapter;
use crate::domain::client_config::ClientConfig;
use crate::domain::errors::SessionError;
use crate::domain::session::Session;
use crate::proto::EvaluateTaskRequest;

/// How a run ended.
#[derive(Debug)]
pub enum SessionOutcome {
    Completed,
    Failed(SessionError),
    Aborted(TerminationSignal),
}

impl SessionOutcome {
    pub fn exit_code(&self) -> i32 {
        match self {
            SessionOutcome::Completed => 0,
            SessionOutcome::Failed(_) => 1,
            SessionOutcome::Aborted(signal) => signal.exit_code(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, SessionOutcome::Completed)
    }
}

pub struct Orchestrator<K, S> {
    session: Session,
    connector: K,
    spawner: S,
    config: ClientConfig,
}

impl<K, S> Orchestrator<K, S>
where
    K: CoordinatorConnector,
    S: CoordinatorSpawner,
{
    pub fn new(config: ClientConfig, connector: K, spawner: S) -> Self {
        Self {
            session: Session::new(),
            connector,
            spawner,
            config,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Evaluate `request` and render its events through `ui`.
    pub async fn evaluate(
        &self,
        request: EvaluateTaskRequest,
        ui: &mut dyn UiAdapter,
        signals: &mut SignalReceiver,
    ) -> SessionOutcome {
        let outcome = self.run_evaluation(request, ui, signals).await;
        let outcome = settle(outcome, signals);
        report(&outcome, ui);
        outcome
    }

    /// Drop the coordinator's cached data for the given directories.
    pub async fn clean(
        &self,
        store_dir: &str,
        temp_dir: &str,
        ui: &mut dyn UiAdapter,
        signals: &mut SignalReceiver,
    ) -> SessionOutcome {
        let outcome = self.run_clean(store_dir, temp_dir, ui, signals).await;
        let outcome = settle(outcome, signals);
        report(&outcome, ui);
        outcome
    }

    async fn run_evaluation(
        &self,
        request: EvaluateTaskRequest,
        ui: &mut dyn UiAdapter,
        signals: &mut SignalReceiver,
    ) -> SessionOutcome {
        let controller = match self.connect(ui, signals).await {
            Ok(controller) => controller,
            Err(outcome) => return outcome,
        };

        let opened = tokio::select! {
            biased;
            Some(signal) = signals.recv() => Err(signal),
            opened = controller.open(request, ui) => Ok(opened),
        };
        let mut stream = match opened {
            Ok(Ok(stream)) => stream,
            Ok(Err(err)) => return SessionOutcome::Failed(err),
            Err(signal) => return self.abort(signal, Some(&controller), ui, signals).await,
        };

        match controller.consume(&mut stream, ui, signals).await {
            Ok(StreamOutcome::Finished) => SessionOutcome::Completed,
            Ok(StreamOutcome::Interrupted(signal)) => {
                // Keep the stream open until the stop request is sent.
                let outcome = self.abort(signal, Some(&controller), ui, signals).await;
                drop(stream);
                outcome
            }
            Err(err) => SessionOutcome::Failed(err),
        }
    }

    async fn run_clean(
        &self,
        store_dir: &str,
        temp_dir: &str,
        ui: &mut dyn UiAdapter,
        signals: &mut SignalReceiver,
    ) -> SessionOutcome {
        let controller = match self.connect(ui, signals).await {
            Ok(controller) => controller,
            Err(outcome) => return outcome,
        };

        let cleaned = tokio::select! {
            biased;
            Some(signal) = signals.recv() => Err(signal),
            cleaned = controller.clean_task(store_dir, temp_dir) => Ok(cleaned),
        };
        match cleaned {
            Ok(Ok(())) => SessionOutcome::Completed,
            Ok(Err(err)) => SessionOutcome::Failed(err),
            Err(signal) => self.abort(signal, Some(&controller), ui, signals).await,
        }
    }

    /// Reach the coordinator, giving up early when a signal arrives.
    async fn connect(
        &self,
        ui: &mut dyn UiAdapter,
        signals: &mut SignalReceiver,
    ) -> Result<SessionController<K::Client>, SessionOutcome> {
        let endpoint = self.config.endpoint();
        let connected = tokio::select! {
            biased;
            Some(signal) = signals.recv() => Err(signal),
            connected = ensure_coordinator(
                &self.session,
                &self.connector,
                &self.spawner,
                &endpoint,
                &self.config.retry,
                self.config.should_spawn(),
            ) => Ok(connected),
        };

        match connected {
            Ok(Ok(client)) => Ok(SessionController::new(self.session.clone(), client)),
            Ok(Err(err)) => Err(SessionOutcome::Failed(err)),
            Err(signal) => {
                let none: Option<&SessionController<K::Client>> = None;
                Err(self.abort(signal, none, ui, signals).await)
            }
        }
    }

    async fn abort(
        &self,
        signal: TerminationSignal,
        controller: Option<&SessionController<K::Client>>,
        ui: &mut dyn UiAdapter,
        signals: &mut SignalReceiver,
    ) -> SessionOutcome {
        let handler = CancellationHandler::new(self.session.clone(), self.config.stop_timeout);
        let stop = handler
            .handle(signal, controller.map(|c| c.client()), ui, signals)
            .await;
        debug!(signal = %signal, stop = ?stop, "Run aborted");
        SessionOutcome::Aborted(signal)
    }
}

/// A signal that arrived after the last await point still aborts the run.
fn settle(outcome: SessionOutcome, signals: &mut SignalReceiver) -> SessionOutcome {
    match outcome {
        SessionOutcome::Completed => match signals.try_recv() {
            Ok(signal) => {
                warn!(signal = %signal, "Termination signal received as the run finished");
                SessionOutcome::Aborted(signal)
            }
            Err(_) => SessionOutcome::Completed,
        },
        other => other,
    }
}

fn report(outcome: &SessionOutcome, ui: &mut dyn UiAdapter) {
    match outcome {
        SessionOutcome::Completed => ui.print_final_status(),
        SessionOutcome::Failed(err) => {
            debug!(error = ?err, "Run failed");
            ui.fatal_error(&err.to_string());
        }
        SessionOutcome::Aborted(signal) => ui.fatal_error(&format!("Aborted with {}", signal)),
    }
}
