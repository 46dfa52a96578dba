// Copyright (c) 2026 task-maker developers
// SPDX-License-Identifier: AGPL-3.0
//! Build Script for taskmaker-orchestrator-core
//!
//! Compiles the coordinator service contract (`../../proto/manager.proto`)
//! into Rust client and server stubs with `tonic-prost-build`. The server
//! half is only used by the in-process test coordinator.
//!
//! Generated code is placed in `OUT_DIR` and included via
//! `tonic::include_proto!` in `src/proto.rs`.
//!
//! # Dependencies
//!
//! - **protoc**: Protocol buffer compiler (vendored via `protoc-bin-vendored`)
//! - **tonic-prost-build**: Code generator for Rust gRPC stubs

const PROTO: &str = "../../proto/manager.proto";

/// Messages the CLI reads from a pre-built request file.
const SERDE_MESSAGES: &[&str] = &[
    ".taskmaker.manager.v1.EvaluateTaskRequest",
    ".taskmaker.manager.v1.Task",
    ".taskmaker.manager.v1.Subtask",
    ".taskmaker.manager.v1.TestCase",
    ".taskmaker.manager.v1.SourceFile",
];

fn main() -> Result<(), Box<dyn std::error::Error>> {
    std::env::set_var("PROTOC", protoc_bin_vendored::protoc_bin_path()?);

    let mut builder = tonic_prost_build::configure()
        .build_server(true)
        .build_client(true);

    for message in SERDE_MESSAGES {
        builder = builder.type_attribute(
            message,
            "#[derive(serde::Serialize, serde::Deserialize)] #[serde(default)]",
        );
    }

    builder.compile_protos(&[PROTO], &["../../proto"])?;

    println!("cargo:rerun-if-changed={}", PROTO);

    Ok(())
}
