// Copyright (c) 2026 task-maker developers
// SPDX-License-Identifier: AGPL-3.0

//! Cancellation handler
//!
//! Termination signals reach the session as messages on a channel. The
//! handler reads the active evaluation id, asks the coordinator to stop it
//! and never waits longer than the configured timeout. A second signal cuts
//! the wait short.

use std::fmt;
use std::time::Duration;

use tokio::sync::mpsc;
use tonic::Code;
use tracing::{debug, warn};

use crate::application::session_controller::CoordinatorClient;
use crate::application::ui::UiAdapter;
use crate::domain::session::{EvaluationId, Session};

/// Message shown while the coordinator winds the evaluation down.
pub const STOP_NOTICE: &str = "Waiting the manager to complete the last job";

/// Process termination signals the client reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TerminationSignal {
    Interrupt,
    Terminate,
}

impl TerminationSignal {
    pub fn number(self) -> i32 {
        match self {
            TerminationSignal::Interrupt => 2,
            TerminationSignal::Terminate => 15,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            TerminationSignal::Interrupt => "SIGINT",
            TerminationSignal::Terminate => "SIGTERM",
        }
    }

    /// Conventional shell exit status for a process ended by this signal.
    pub fn exit_code(self) -> i32 {
        128 + self.number()
    }
}

impl fmt::Display for TerminationSignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

pub type SignalSender = mpsc::UnboundedSender<TerminationSignal>;
pub type SignalReceiver = mpsc::UnboundedReceiver<TerminationSignal>;

pub fn signal_channel() -> (SignalSender, SignalReceiver) {
    mpsc::unbounded_channel()
}

/// Result of the best-effort stop request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopOutcome {
    /// No evaluation was in flight.
    NotNeeded,
    Acknowledged(EvaluationId),
    /// The evaluation had already ended on the coordinator side.
    AlreadyEnded(EvaluationId),
    Failed(EvaluationId),
    TimedOut(EvaluationId),
    /// A further signal arrived before the stop request completed.
    Forced(TerminationSignal),
}

#[derive(Debug, Clone)]
pub struct CancellationHandler {
    session: Session,
    stop_timeout: Duration,
}

impl CancellationHandler {
    pub fn new(session: Session, stop_timeout: Duration) -> Self {
        Self {
            session,
            stop_timeout,
        }
    }

    /// React to `signal`. The caller reports the abort and exits afterwards.
    pub async fn handle<C>(
        &self,
        signal: TerminationSignal,
        client: Option<&C>,
        ui: &mut dyn UiAdapter,
        signals: &mut SignalReceiver,
    ) -> StopOutcome
    where
        C: CoordinatorClient + ?Sized,
    {
        warn!(signal = %signal, "Received termination signal");

        let (Some(evaluation), Some(client)) = (self.session.active_evaluation(), client) else {
            debug!("No evaluation in flight, skipping stop request");
            return StopOutcome::NotNeeded;
        };

        ui.stop(STOP_NOTICE);

        let outcome = tokio::select! {
            biased;
            Some(next) = signals.recv() => {
                warn!(signal = %next, "Second termination signal, not waiting for the coordinator");
                StopOutcome::Forced(next)
            }
            result = tokio::time::timeout(self.stop_timeout, client.stop(evaluation)) => {
                match result {
                    Ok(Ok(())) => StopOutcome::Acknowledged(evaluation),
                    Ok(Err(status))
                        if matches!(status.code(), Code::NotFound | Code::FailedPrecondition) =>
                    {
                        StopOutcome::AlreadyEnded(evaluation)
                    }
                    Ok(Err(status)) => {
                        debug!(error = %status, "Stop request failed");
                        StopOutcome::Failed(evaluation)
                    }
                    Err(_) => StopOutcome::TimedOut(evaluation),
                }
            }
        };

        debug!(evaluation = %evaluation, outcome = ?outcome, "Stop request finished");
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signal_exit_codes() {
        assert_eq!(TerminationSignal::Interrupt.exit_code(), 130);
        assert_eq!(TerminationSignal::Terminate.exit_code(), 143);
        assert_eq!(TerminationSignal::Terminate.to_string(), "SIGTERM");
    }
}
