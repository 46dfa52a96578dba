// Copyright (c) 2026 task-maker developers
// SPDX-License-Identifier: AGPL-3.0
//! Infrastructure adapters: tonic transport, process spawning and OS
//! signal delivery.

pub mod grpc_client;
pub mod signals;
pub mod spawner;

pub use grpc_client::{GrpcConnector, GrpcCoordinator};
pub use signals::spawn_signal_listener;
pub use spawner::DetachedSpawner;
