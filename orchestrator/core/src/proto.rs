// Copyright (c) 2026 task-maker developers
// SPDX-License-Identifier: AGPL-3.0

// Generated protobuf code for the coordinator service (see build.rs)

pub mod manager {
    pub mod v1 {
        tonic::include_proto!("taskmaker.manager.v1");
    }
}

pub use manager::v1::*;
