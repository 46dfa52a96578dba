// Copyright (c) 2026 task-maker developers
// SPDX-License-Identifier: AGPL-3.0

//! Detached coordinator launcher
//!
//! The coordinator is started in its own process group with all standard
//! streams closed and `/` as working directory. The child is never waited
//! on: it outlives the client and is not torn down by it.

use std::process::{Command, Stdio};

use tracing::info;

use crate::application::lifecycle::CoordinatorSpawner;
use crate::domain::client_config::SpawnCommand;
use crate::domain::endpoint::CoordinatorEndpoint;
use crate::domain::errors::SpawnError;

#[derive(Debug, Clone)]
pub struct DetachedSpawner {
    command: SpawnCommand,
}

impl DetachedSpawner {
    pub fn new(command: SpawnCommand) -> Self {
        Self { command }
    }

    pub fn command(&self) -> &SpawnCommand {
        &self.command
    }

    fn build(&self, endpoint: &CoordinatorEndpoint) -> Command {
        let mut cmd = Command::new(&self.command.program);
        cmd.args(self.command.args_for(endpoint));

        #[cfg(unix)]
        {
            use std::os::unix::process::CommandExt;
            cmd.process_group(0);
        }

        cmd.current_dir("/")
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null());
        cmd
    }
}

impl CoordinatorSpawner for DetachedSpawner {
    fn spawn(&self, endpoint: &CoordinatorEndpoint) -> Result<(), SpawnError> {
        let child = self.build(endpoint).spawn().map_err(|source| SpawnError {
            program: self.command.program.clone(),
            source,
        })?;
        info!(
            pid = child.id(),
            program = %self.command.program.display(),
            "Coordinator spawned"
        );
        // Dropping the handle neither kills nor waits for the child.
        drop(child);
        Ok(())
    }
}
