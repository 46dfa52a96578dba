// Copyright (c) 2026 task-maker developers
// SPDX-License-Identifier: AGPL-3.0
//! Domain types of an evaluation session.
//!
//! # Architecture
//!
//! - **Layer:** Domain Layer
//! - **Purpose:** Session state, endpoint, option groups, configuration and
//!   the error taxonomy

pub mod client_config;
pub mod endpoint;
pub mod errors;
pub mod events;
pub mod options;
pub mod session;
