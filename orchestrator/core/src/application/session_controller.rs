// Copyright (c) 2026 task-maker developers
// SPDX-License-Identifier: AGPL-3.0

//! Session controller
//!
//! Owns the coordinator client for the duration of a session. Opens the
//! event stream, keeps the active evaluation id in sync with the lifecycle
//! events and forwards every event to the UI in delivery order.
//!
//! # Architecture
//!
//! - **Layer:** Application Layer
//! - **Purpose:** Receive loop of one evaluation

use std::pin::Pin;

use async_trait::async_trait;
use futures::{Stream, StreamExt};
use tonic::Status;
use tracing::{debug, info, warn};

use crate::application::cancellation::{SignalReceiver, TerminationSignal};
use crate::application::ui::{TaskMetadata, UiAdapter};
use crate::domain::errors::SessionError;
use crate::domain::events::{self, Lifecycle};
use crate::domain::session::{EvaluationId, Session};
use crate::proto::{EvaluateTaskRequest, Event};

pub type EventStream = Pin<Box<dyn Stream<Item = Result<Event, Status>> + Send>>;

/// Remote operations of the coordinator service.
#[async_trait]
pub trait CoordinatorClient: Send + Sync {
    async fn evaluate_task(&self, request: EvaluateTaskRequest) -> Result<EventStream, Status>;

    async fn stop(&self, evaluation: EvaluationId) -> Result<(), Status>;

    async fn clean_task(&self, store_dir: &str, temp_dir: &str) -> Result<(), Status>;
}

/// How a receive loop ended without an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamOutcome {
    /// The coordinator closed the stream after the evaluation ended.
    Finished,
    /// A termination signal arrived; the stream is left open.
    Interrupted(TerminationSignal),
}

pub struct SessionController<C> {
    session: Session,
    client: C,
}

impl<C: CoordinatorClient> SessionController<C> {
    pub fn new(session: Session, client: C) -> Self {
        Self { session, client }
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Announce the task metadata, then open the event stream.
    pub async fn open(
        &self,
        request: EvaluateTaskRequest,
        ui: &mut dyn UiAdapter,
    ) -> Result<EventStream, SessionError> {
        TaskMetadata::from_request(&request).announce(ui);
        let stream = self.client.evaluate_task(request).await?;
        Ok(stream)
    }

    /// Update the active evaluation id for `event`.
    ///
    /// Returns `true` when the event ended the live evaluation.
    pub fn observe(&self, event: &Event) -> bool {
        match events::lifecycle(event) {
            Lifecycle::Started(id) => {
                if self.session.begin_evaluation(id) {
                    info!(evaluation = %id, "Evaluation started");
                } else {
                    warn!(
                        evaluation = %id,
                        active = ?self.session.active_evaluation(),
                        "Ignoring start of a second evaluation"
                    );
                }
                false
            }
            Lifecycle::Ended(id) => {
                if self.session.end_evaluation(id) {
                    info!(evaluation = %id, "Evaluation ended");
                    true
                } else {
                    warn!(
                        evaluation = %id,
                        active = ?self.session.active_evaluation(),
                        "End event does not match the active evaluation"
                    );
                    false
                }
            }
            Lifecycle::Progress => false,
        }
    }

    /// Consume `stream` until it closes or a signal arrives.
    ///
    /// A signal already pending is handled before the next event. A stream
    /// that fails, or closes without an end event or with an evaluation
    /// still live, is an error; the active evaluation id is cleared in that
    /// case.
    pub async fn consume(
        &self,
        stream: &mut EventStream,
        ui: &mut dyn UiAdapter,
        signals: &mut SignalReceiver,
    ) -> Result<StreamOutcome, SessionError> {
        let mut ended = false;
        loop {
            let item = tokio::select! {
                biased;
                Some(signal) = signals.recv() => {
                    return Ok(StreamOutcome::Interrupted(signal));
                }
                item = stream.next() => item,
            };

            match item {
                Some(Ok(event)) => {
                    debug!(kind = events::kind(&event), "Received event");
                    ended |= self.observe(&event);
                    ui.from_event(&event);
                }
                Some(Err(status)) => {
                    let lost = self.session.clear_evaluation();
                    warn!(evaluation = ?lost, code = ?status.code(), "Event stream failed");
                    return Err(SessionError::StreamTerminatedEarly {
                        reason: status.message().to_string(),
                    });
                }
                None => {
                    // Closing the stream implicitly ends whatever is still live.
                    let lost = self.session.clear_evaluation();
                    if ended && lost.is_none() {
                        return Ok(StreamOutcome::Finished);
                    }
                    warn!(evaluation = ?lost, "Event stream closed before the evaluation ended");
                    return Err(SessionError::stream_closed());
                }
            }
        }
    }

    /// Single request/response; never opens an event stream.
    pub async fn clean_task(&self, store_dir: &str, temp_dir: &str) -> Result<(), SessionError> {
        info!(store_dir, temp_dir, "Cleaning task data");
        self.client.clean_task(store_dir, temp_dir).await?;
        Ok(())
    }
}
