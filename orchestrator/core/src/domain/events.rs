// Copyright (c) 2026 task-maker developers
// SPDX-License-Identifier: AGPL-3.0

// Classification of coordinator events for the session state machine.
//
// Events are forwarded to the UI untouched; this module only answers the
// questions the session controller asks about them.

use crate::domain::session::EvaluationId;
use crate::proto::event::EventOneof;
use crate::proto::{
    Event, EvaluationEnded, EvaluationStarted, EventStatus, TestcaseOutcome,
};

/// What an event means for the active-evaluation slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lifecycle {
    Started(EvaluationId),
    Ended(EvaluationId),
    Progress,
}

pub fn lifecycle(event: &Event) -> Lifecycle {
    match &event.event_oneof {
        Some(EventOneof::EvaluationStarted(started)) => {
            Lifecycle::Started(EvaluationId(started.id))
        }
        Some(EventOneof::EvaluationEnded(ended)) => Lifecycle::Ended(EvaluationId(ended.id)),
        _ => Lifecycle::Progress,
    }
}

/// Short name of the event variant, used in logs.
pub fn kind(event: &Event) -> &'static str {
    match &event.event_oneof {
        Some(EventOneof::EvaluationStarted(_)) => "evaluation_started",
        Some(EventOneof::EvaluationEnded(_)) => "evaluation_ended",
        Some(EventOneof::FatalError(_)) => "fatal_error",
        Some(EventOneof::CompilationStatus(_)) => "compilation_status",
        Some(EventOneof::GenerationStatus(_)) => "generation_status",
        Some(EventOneof::TestcaseOutcome(_)) => "testcase_outcome",
        Some(EventOneof::SubtaskScore(_)) => "subtask_score",
        Some(EventOneof::TaskScore(_)) => "task_score",
        None => "empty",
    }
}

pub fn started(id: i64) -> Event {
    Event {
        event_oneof: Some(EventOneof::EvaluationStarted(EvaluationStarted { id })),
    }
}

pub fn ended(id: i64) -> Event {
    Event {
        event_oneof: Some(EventOneof::EvaluationEnded(EvaluationEnded { id })),
    }
}

/// Terminal status of a testcase run, if the outcome carries one.
pub fn is_final_status(outcome: &TestcaseOutcome) -> bool {
    matches!(
        EventStatus::try_from(outcome.status),
        Ok(EventStatus::Done) | Ok(EventStatus::Failure)
    )
}
