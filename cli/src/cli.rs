// Copyright (c) 2026 task-maker developers
// SPDX-License-Identifier: AGPL-3.0

//! Command line surface.

use std::path::PathBuf;

use clap::Parser;
use taskmaker_core::domain::options::{CacheMode, UiKind};

/// File holding the pre-built evaluation request inside a task directory.
pub const DEFAULT_REQUEST_FILE: &str = "task-request.json";

/// Evaluate the solutions of a task
#[derive(Debug, Parser)]
#[command(name = "task-maker")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Solutions to evaluate, by file name (default: all of them)
    #[arg(value_name = "SOLUTION")]
    pub solutions: Vec<String>,

    /// Directory of the task to evaluate
    #[arg(long, value_name = "DIR", default_value = ".", help_heading = "Generic options")]
    pub task_dir: PathBuf,

    /// Pre-built evaluation request (default: <task-dir>/task-request.json)
    #[arg(long, value_name = "FILE", help_heading = "Generic options")]
    pub request: Option<PathBuf>,

    /// UI to use: interactive, plain or silent
    #[arg(long, env = "TASK_MAKER_UI", default_value = "plain", help_heading = "Generic options")]
    pub ui: UiKind,

    /// Cache policy to use: all, reevaluate or nothing
    #[arg(long, default_value = "all", help_heading = "Generic options")]
    pub cache: CacheMode,

    /// Execute everything but do not touch the task directory
    #[arg(long, help_heading = "Generic options")]
    pub dry_run: bool,

    /// Clear the cached data of the task and exit
    #[arg(long, help_heading = "Generic options")]
    pub clean: bool,

    /// address[:port] of the coordinator to connect to
    #[arg(long, env = "TASK_MAKER_SERVER", value_name = "HOST[:PORT]", help_heading = "Remote options")]
    pub server: Option<String>,

    /// Path where the files should be stored
    #[arg(long, value_name = "DIR", help_heading = "Remote options")]
    pub storedir: Option<PathBuf>,

    /// Path where the sandboxes should be stored
    #[arg(long, value_name = "DIR", help_heading = "Remote options")]
    pub tempdir: Option<PathBuf>,

    /// Maximum size of the cache, in megabytes. 0 means unlimited
    #[arg(long, value_name = "MB", help_heading = "Remote options")]
    pub cache_size: Option<u64>,

    /// Number of cores to use
    #[arg(
        long,
        value_name = "N",
        value_parser = clap::value_parser!(u32).range(1..),
        help_heading = "Execution options"
    )]
    pub num_cores: Option<u32>,

    /// Evaluate the solutions one at a time
    #[arg(long, help_heading = "Execution options")]
    pub exclusive: bool,

    /// Extra time, in seconds, given to every execution
    #[arg(long, value_name = "SECONDS", help_heading = "Execution options")]
    pub extra_time: Option<f64>,

    /// Path where the log file of the coordinator should be stored
    #[arg(long, value_name = "FILE", help_heading = "Coordinator options")]
    pub manager_logfile: Option<PathBuf>,

    /// Path where the pidfile of the coordinator should be stored
    #[arg(long, value_name = "FILE", help_heading = "Coordinator options")]
    pub manager_pidfile: Option<PathBuf>,

    /// Verbose logging for the coordinator
    #[arg(long, help_heading = "Coordinator options")]
    pub manager_verbose: bool,

    /// Path where the log file of the worker should be stored
    #[arg(long, value_name = "FILE", help_heading = "Worker options")]
    pub worker_logfile: Option<PathBuf>,

    /// Path where the pidfile of the worker should be stored
    #[arg(long, value_name = "FILE", help_heading = "Worker options")]
    pub worker_pidfile: Option<PathBuf>,

    /// Verbose logging for the worker
    #[arg(long, help_heading = "Worker options")]
    pub worker_verbose: bool,

    /// Path to configuration file (overrides discovery)
    #[arg(short, long, env = "TASK_MAKER_CONFIG", value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "TASK_MAKER_LOG_LEVEL", default_value = "warn")]
    pub log_level: String,
}

impl Cli {
    pub fn request_path(&self) -> PathBuf {
        self.request
            .clone()
            .unwrap_or_else(|| self.task_dir.join(DEFAULT_REQUEST_FILE))
    }

    pub fn store_dir(&self) -> PathBuf {
        self.storedir
            .clone()
            .unwrap_or_else(|| default_data_dir().join("store"))
    }

    pub fn temp_dir(&self) -> PathBuf {
        self.tempdir
            .clone()
            .unwrap_or_else(|| default_data_dir().join("temp"))
    }
}

fn default_data_dir() -> PathBuf {
    dirs::cache_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join("task-maker")
}
