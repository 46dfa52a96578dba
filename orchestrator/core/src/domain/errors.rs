// Copyright (c) 2026 task-maker developers
// SPDX-License-Identifier: AGPL-3.0

//! Session error taxonomy
//!
//! Every fatal condition of a run is one of these. The orchestrator reports
//! it to the UI exactly once before the process exits.

use std::path::PathBuf;

use thiserror::Error;

use crate::domain::endpoint::CoordinatorEndpoint;

/// Launching the coordinator process failed.
#[derive(Debug, Error)]
#[error("failed to spawn coordinator '{}': {source}", .program.display())]
pub struct SpawnError {
    pub program: PathBuf,
    #[source]
    pub source: std::io::Error,
}

/// A single connection attempt failed.
#[derive(Debug, Error)]
pub enum ConnectError {
    #[error("connection attempt timed out")]
    Timeout,
    #[error("connection refused: {0}")]
    Refused(String),
    #[error("invalid coordinator address: {0}")]
    InvalidEndpoint(String),
}

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("coordinator at {endpoint} unreachable after {attempts} attempts")]
    CoordinatorUnreachable {
        endpoint: CoordinatorEndpoint,
        attempts: u32,
    },

    #[error(transparent)]
    SpawnFailure(#[from] SpawnError),

    #[error("event stream terminated before the evaluation ended: {reason}")]
    StreamTerminatedEarly { reason: String },

    #[error("coordinator rejected the request: {0}")]
    Rpc(#[from] tonic::Status),
}

impl SessionError {
    pub fn stream_closed() -> Self {
        SessionError::StreamTerminatedEarly {
            reason: "stream closed by the coordinator".to_string(),
        }
    }
}
