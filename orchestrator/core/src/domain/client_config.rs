// Copyright (c) 2026 task-maker developers
// SPDX-License-Identifier: AGPL-3.0

// Client Configuration Types
//
// Defines how the client reaches (and, if needed, launches) the coordinator:
// - Coordinator endpoint and spawn command
// - Connection retry policy
// - Upper bound for the best-effort stop request
//
// Loaded from YAML with serde defaults for every field, so an empty file is
// a valid configuration.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

use crate::domain::endpoint::{CoordinatorEndpoint, DEFAULT_COORDINATOR_PORT};

/// Environment variable pointing at a configuration file.
pub const CONFIG_ENV_VAR: &str = "TASK_MAKER_CONFIG";

/// File name looked up in the working directory.
pub const LOCAL_CONFIG_FILE: &str = "task-maker.yaml";

/// Coordinator binary looked up next to the running executable.
pub const DEFAULT_COORDINATOR_PROGRAM: &str = "task-maker-manager";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("configuration file not found: {0}")]
    NotFound(PathBuf),
    #[error("failed to read configuration file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse configuration file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    #[serde(default)]
    pub coordinator: CoordinatorConfig,

    #[serde(default)]
    pub retry: RetryPolicy,

    /// Maximum time spent waiting for the stop request on cancellation
    #[serde(default = "default_stop_timeout", with = "humantime_serde")]
    pub stop_timeout: Duration,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoordinatorConfig {
    /// Address the coordinator listens on
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Coordinator executable. Defaults to `task-maker-manager` next to the
    /// running binary.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub program: Option<PathBuf>,

    /// Extra arguments passed before the listen-port flag
    #[serde(default)]
    pub args: Vec<String>,

    #[serde(default = "default_port_flag")]
    pub port_flag: String,

    /// Launch the coordinator when it cannot be reached
    #[serde(default = "default_true")]
    pub spawn: bool,
}

/// Connection retry policy for reaching the coordinator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetryPolicy {
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    /// Per-attempt connection timeout
    #[serde(default = "default_connect_timeout", with = "humantime_serde")]
    pub connect_timeout: Duration,

    /// Pause after a failed attempt
    #[serde(default = "default_retry_delay", with = "humantime_serde")]
    pub retry_delay: Duration,
}

/// Command line used to launch the coordinator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpawnCommand {
    pub program: PathBuf,
    pub args: Vec<String>,
    pub port_flag: String,
}

impl SpawnCommand {
    /// Arguments for a coordinator listening on `endpoint`.
    pub fn args_for(&self, endpoint: &CoordinatorEndpoint) -> Vec<String> {
        let mut args = self.args.clone();
        args.push(self.port_flag.clone());
        args.push(endpoint.port().to_string());
        args
    }
}

// Default value functions
fn default_true() -> bool {
    true
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    DEFAULT_COORDINATOR_PORT
}

fn default_port_flag() -> String {
    "--port".to_string()
}

fn default_max_attempts() -> u32 {
    10
}

fn default_connect_timeout() -> Duration {
    Duration::from_secs(1)
}

fn default_retry_delay() -> Duration {
    Duration::from_millis(500)
}

fn default_stop_timeout() -> Duration {
    Duration::from_secs(5)
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            coordinator: CoordinatorConfig::default(),
            retry: RetryPolicy::default(),
            stop_timeout: default_stop_timeout(),
        }
    }
}

impl Default for CoordinatorConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            program: None,
            args: Vec::new(),
            port_flag: default_port_flag(),
            spawn: true,
        }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
            connect_timeout: default_connect_timeout(),
            retry_delay: default_retry_delay(),
        }
    }
}

impl ClientConfig {
    /// Load configuration from a YAML file.
    pub fn from_yaml_file(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.to_path_buf()));
        }
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml_str(&content).map_err(|err| match err {
            ConfigError::Parse { source, .. } => ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            },
            other => other,
        })
    }

    pub fn from_yaml_str(content: &str) -> Result<Self, ConfigError> {
        // An empty document deserializes to unit, not to an empty mapping.
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: ClientConfig =
            serde_yaml::from_str(content).map_err(|source| ConfigError::Parse {
                path: PathBuf::new(),
                source,
            })?;
        config.validate()?;
        Ok(config)
    }

    /// Load from an explicit path (which must exist) or discover a file;
    /// fall back to defaults when nothing is found.
    pub fn load_or_default(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            return Self::from_yaml_file(path);
        }
        match Self::discover() {
            Some(path) => {
                tracing::debug!("Loading configuration from {:?}", path);
                Self::from_yaml_file(&path)
            }
            None => Ok(Self::default()),
        }
    }

    /// Discovery order: `$TASK_MAKER_CONFIG`, `./task-maker.yaml`,
    /// `<config dir>/task-maker/config.yaml`.
    pub fn discover() -> Option<PathBuf> {
        let mut candidates = Vec::new();
        if let Ok(path) = std::env::var(CONFIG_ENV_VAR) {
            candidates.push(PathBuf::from(path));
        }
        candidates.push(PathBuf::from(LOCAL_CONFIG_FILE));
        if let Some(dir) = dirs::config_dir() {
            candidates.push(dir.join("task-maker").join("config.yaml"));
        }
        candidates.into_iter().find(|path| path.is_file())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.retry.max_attempts == 0 {
            return Err(ConfigError::Invalid(
                "retry.max_attempts must be at least 1".to_string(),
            ));
        }
        if self.coordinator.host.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "coordinator.host must not be empty".to_string(),
            ));
        }
        if self.coordinator.port_flag.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "coordinator.port_flag must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    pub fn endpoint(&self) -> CoordinatorEndpoint {
        CoordinatorEndpoint::new(self.coordinator.host.clone(), self.coordinator.port)
    }

    /// Whether a missing coordinator should be launched locally. Never for
    /// endpoints on another machine.
    pub fn should_spawn(&self) -> bool {
        self.coordinator.spawn && self.endpoint().is_loopback()
    }

    pub fn spawn_command(&self) -> SpawnCommand {
        let program = self
            .coordinator
            .program
            .clone()
            .unwrap_or_else(default_coordinator_program);
        SpawnCommand {
            program,
            args: self.coordinator.args.clone(),
            port_flag: self.coordinator.port_flag.clone(),
        }
    }
}

fn default_coordinator_program() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(|dir| dir.join(DEFAULT_COORDINATOR_PROGRAM)))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_COORDINATOR_PROGRAM))
}
