// Copyright (c) 2026 task-maker developers
// SPDX-License-Identifier: AGPL-3.0
//! Evaluation session orchestrator for the task-maker client.
//!
//! Makes sure a coordinator service is reachable (spawning it detached when
//! it is not), streams the lifecycle events of one evaluation to a UI
//! adapter, and turns termination signals into a best-effort stop request.
//!
//! # Architecture
//!
//! - **Layer:** Core System
//! - **Purpose:** `domain` holds session state and value types,
//!   `application` the lifecycle/session/cancellation logic behind traits,
//!   `infrastructure` the tonic transport, process spawner and signal
//!   listener.

pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod proto;

pub use application::orchestrator::{Orchestrator, SessionOutcome};
pub use application::ui::UiAdapter;
pub use domain::client_config::ClientConfig;
pub use domain::errors::SessionError;
pub use domain::session::Session;
