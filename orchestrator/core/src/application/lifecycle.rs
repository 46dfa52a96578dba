// Copyright (c) 2026 task-maker developers
// SPDX-License-Identifier: AGPL-3.0

//! Coordinator lifecycle manager
//!
//! Makes sure a coordinator is reachable before a session starts. The
//! coordinator is launched at most once per session, as a detached process,
//! and only when the first connection attempts fail.
//!
//! # Architecture
//!
//! - **Layer:** Application Layer
//! - **Purpose:** Bounded connect/spawn/retry loop over the transport ports

use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, info, warn};

use crate::application::session_controller::CoordinatorClient;
use crate::domain::client_config::RetryPolicy;
use crate::domain::endpoint::CoordinatorEndpoint;
use crate::domain::errors::{ConnectError, SessionError, SpawnError};
use crate::domain::session::{ConnectionState, Session};

/// Opens a connection to the coordinator.
#[async_trait]
pub trait CoordinatorConnector: Send + Sync {
    type Client: CoordinatorClient;

    /// One attempt, bounded by `timeout`.
    async fn connect(
        &self,
        endpoint: &CoordinatorEndpoint,
        timeout: Duration,
    ) -> Result<Self::Client, ConnectError>;
}

/// Launches the coordinator as a process that outlives the caller.
///
/// Must not block waiting for the child.
pub trait CoordinatorSpawner: Send + Sync {
    fn spawn(&self, endpoint: &CoordinatorEndpoint) -> Result<(), SpawnError>;
}

/// Connect to `endpoint`, launching the coordinator once if needed.
///
/// Up to `policy.max_attempts` attempts are made. After the first failure
/// the coordinator is spawned, unless `spawn_enabled` is false or this
/// session already spawned it. A spawn failure is returned immediately.
pub async fn ensure_coordinator<K, S>(
    session: &Session,
    connector: &K,
    spawner: &S,
    endpoint: &CoordinatorEndpoint,
    policy: &RetryPolicy,
    spawn_enabled: bool,
) -> Result<K::Client, SessionError>
where
    K: CoordinatorConnector + ?Sized,
    S: CoordinatorSpawner + ?Sized,
{
    session.transition(ConnectionState::Connecting);

    for attempt in 1..=policy.max_attempts {
        debug!(
            attempt,
            max_attempts = policy.max_attempts,
            endpoint = %endpoint,
            "Connecting to coordinator"
        );

        let err = match connector.connect(endpoint, policy.connect_timeout).await {
            Ok(client) => {
                session.transition(ConnectionState::Ready);
                debug!(attempt, "Connected to coordinator at {}", endpoint);
                return Ok(client);
            }
            Err(err) => err,
        };

        debug!(attempt, error = %err, "Connection attempt failed");

        if let ConnectError::InvalidEndpoint(_) = err {
            session.transition(ConnectionState::Failed);
            return Err(SessionError::CoordinatorUnreachable {
                endpoint: endpoint.clone(),
                attempts: attempt,
            });
        }

        if spawn_enabled && session.claim_spawn() {
            session.transition(ConnectionState::Spawning);
            info!("Spawning coordinator for {}", endpoint);
            if let Err(err) = spawner.spawn(endpoint) {
                session.transition(ConnectionState::Failed);
                return Err(err.into());
            }
            session.transition(ConnectionState::Connecting);
        }

        if attempt < policy.max_attempts {
            tokio::time::sleep(policy.retry_delay).await;
        }
    }

    session.transition(ConnectionState::Failed);
    warn!(
        attempts = policy.max_attempts,
        spawned = session.has_spawned(),
        "Coordinator at {} unreachable",
        endpoint
    );
    Err(SessionError::CoordinatorUnreachable {
        endpoint: endpoint.clone(),
        attempts: policy.max_attempts,
    })
}
