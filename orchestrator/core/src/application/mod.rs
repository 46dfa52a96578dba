// Copyright (c) 2026 task-maker developers
// SPDX-License-Identifier: AGPL-3.0
//! Use cases of an evaluation session.
//!
//! # Architecture
//!
//! - **Layer:** Application Layer
//! - **Purpose:** Coordinator lifecycle, event streaming, cancellation and
//!   the UI contract they report to

pub mod cancellation;
pub mod lifecycle;
pub mod orchestrator;
pub mod session_controller;
pub mod ui;
