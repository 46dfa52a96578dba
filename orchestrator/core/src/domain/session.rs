// Copyright (c) 2026 task-maker developers
// SPDX-License-Identifier: AGPL-3.0

//! Session state
//!
//! One [`Session`] exists per invocation. It owns the connection state, the
//! currently active evaluation id and the spawned flag. The receive loop
//! mutates it; the cancellation path reads it concurrently through a cloned
//! handle.
//!
//! # Architecture
//!
//! - **Layer:** Domain Layer
//! - **Purpose:** Shared, lock-guarded state of one evaluation session

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;
use tracing::warn;

/// Correlation token assigned by the coordinator when an evaluation starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EvaluationId(pub i64);

impl fmt::Display for EvaluationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Connection lifecycle.
///
/// Progression is monotonic except that `Connecting` and `Spawning` may
/// alternate across retries until `Ready` or `Failed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    Disconnected,
    Connecting,
    Spawning,
    Ready,
    Failed,
}

impl ConnectionState {
    pub fn can_transition_to(self, next: ConnectionState) -> bool {
        use ConnectionState::*;
        if self.is_terminal() {
            return false;
        }
        matches!(
            (self, next),
            (Disconnected, Connecting)
                | (Connecting, Spawning)
                | (Connecting, Connecting)
                | (Spawning, Connecting)
                | (Connecting, Ready)
                | (Connecting, Failed)
                | (Spawning, Failed)
        )
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, ConnectionState::Ready | ConnectionState::Failed)
    }
}

#[derive(Debug)]
struct SessionInner {
    connection: Mutex<ConnectionState>,
    active_evaluation: Mutex<Option<EvaluationId>>,
    spawned: AtomicBool,
}

/// Cheaply cloneable handle to the state of one session.
#[derive(Debug, Clone)]
pub struct Session {
    inner: Arc<SessionInner>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(SessionInner {
                connection: Mutex::new(ConnectionState::Disconnected),
                active_evaluation: Mutex::new(None),
                spawned: AtomicBool::new(false),
            }),
        }
    }

    pub fn connection_state(&self) -> ConnectionState {
        *self.inner.connection.lock()
    }

    /// Move to `next`. Invalid transitions are refused and logged; the
    /// current state is kept.
    pub fn transition(&self, next: ConnectionState) -> bool {
        let mut state = self.inner.connection.lock();
        if state.can_transition_to(next) {
            *state = next;
            true
        } else {
            warn!(from = ?*state, to = ?next, "Refusing invalid connection state transition");
            false
        }
    }

    pub fn active_evaluation(&self) -> Option<EvaluationId> {
        *self.inner.active_evaluation.lock()
    }

    /// Record a started evaluation. Returns `false` (and keeps the current
    /// value) when another evaluation is already live.
    pub fn begin_evaluation(&self, id: EvaluationId) -> bool {
        let mut active = self.inner.active_evaluation.lock();
        match *active {
            None => {
                *active = Some(id);
                true
            }
            Some(_) => false,
        }
    }

    /// Clear the active evaluation if it is `id`.
    pub fn end_evaluation(&self, id: EvaluationId) -> bool {
        let mut active = self.inner.active_evaluation.lock();
        if *active == Some(id) {
            *active = None;
            true
        } else {
            false
        }
    }

    /// Clear whatever evaluation is live. Used when the stream breaks.
    pub fn clear_evaluation(&self) -> Option<EvaluationId> {
        self.inner.active_evaluation.lock().take()
    }

    pub fn has_spawned(&self) -> bool {
        self.inner.spawned.load(Ordering::Acquire)
    }

    /// Claim the single spawn attempt of this session. Only the first caller
    /// gets `true`; the flag is never reset.
    pub fn claim_spawn(&self) -> bool {
        self.inner
            .spawned
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connection_state_transitions() {
        use ConnectionState::*;
        assert!(Disconnected.can_transition_to(Connecting));
        assert!(Connecting.can_transition_to(Spawning));
        assert!(Spawning.can_transition_to(Connecting));
        assert!(Connecting.can_transition_to(Ready));
        assert!(Connecting.can_transition_to(Failed));

        assert!(Ready.is_terminal() && Failed.is_terminal());
        assert!(!Spawning.is_terminal());
        assert!(!Ready.can_transition_to(Connecting));
        assert!(!Ready.can_transition_to(Failed));
        assert!(!Failed.can_transition_to(Connecting));
        assert!(!Disconnected.can_transition_to(Ready));
        assert!(!Spawning.can_transition_to(Ready));
    }

    #[test]
    fn test_session_refuses_backwards_transition() {
        let session = Session::new();
        assert!(session.transition(ConnectionState::Connecting));
        assert!(session.transition(ConnectionState::Ready));
        assert!(!session.transition(ConnectionState::Connecting));
        assert_eq!(session.connection_state(), ConnectionState::Ready);
    }

    #[test]
    fn test_single_live_evaluation() {
        let session = Session::new();
        assert_eq!(session.active_evaluation(), None);

        assert!(session.begin_evaluation(EvaluationId(7)));
        assert!(!session.begin_evaluation(EvaluationId(8)));
        assert_eq!(session.active_evaluation(), Some(EvaluationId(7)));

        assert!(!session.end_evaluation(EvaluationId(8)));
        assert_eq!(session.active_evaluation(), Some(EvaluationId(7)));

        assert!(session.end_evaluation(EvaluationId(7)));
        assert_eq!(session.active_evaluation(), None);
    }

    #[test]
    fn test_clear_evaluation() {
        let session = Session::new();
        session.begin_evaluation(EvaluationId(3));
        assert_eq!(session.clear_evaluation(), Some(EvaluationId(3)));
        assert_eq!(session.clear_evaluation(), None);
    }

    #[test]
    fn test_spawn_claimed_once() {
        let session = Session::new();
        let other = session.clone();
        assert!(!session.has_spawned());
        assert!(session.claim_spawn());
        assert!(!other.claim_spawn());
        assert!(other.has_spawned());
    }
}
