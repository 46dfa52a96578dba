// Copyright (c) 2026 task-maker developers
// SPDX-License-Identifier: AGPL-3.0

//! Evaluation request loading
//!
//! The request is produced by the task-format tooling and stored as JSON.
//! The client only fills in the run options from the command line, makes
//! paths absolute and narrows the solution list.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use taskmaker_core::domain::options::CacheMode;
use taskmaker_core::proto::{self, EvaluateTaskRequest, SourceFile};

use crate::cli::Cli;

/// Run options applied on top of the stored request.
#[derive(Debug, Clone)]
pub struct RequestOptions {
    pub cache_mode: CacheMode,
    pub dry_run: bool,
    pub store_dir: PathBuf,
    pub temp_dir: PathBuf,
    pub num_cores: Option<u32>,
    pub exclusive: bool,
    pub extra_time: Option<f64>,
    pub cache_size_mb: Option<u64>,
}

impl RequestOptions {
    pub fn from_cli(cli: &Cli) -> Self {
        Self {
            cache_mode: cli.cache,
            dry_run: cli.dry_run,
            store_dir: cli.store_dir(),
            temp_dir: cli.temp_dir(),
            num_cores: cli.num_cores,
            exclusive: cli.exclusive,
            extra_time: cli.extra_time,
            cache_size_mb: cli.cache_size,
        }
    }
}

pub fn load(path: &Path) -> Result<EvaluateTaskRequest> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read request file {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse request file {}", path.display()))
}

pub fn apply_options(request: &mut EvaluateTaskRequest, options: &RequestOptions) -> Result<()> {
    request.cache_mode = proto::CacheMode::from(options.cache_mode) as i32;
    request.dry_run = options.dry_run;
    request.store_dir = absolute(&options.store_dir)?;
    request.temp_dir = absolute(&options.temp_dir)?;
    request.exclusive |= options.exclusive;
    if let Some(cores) = options.num_cores {
        request.num_cores = cores;
    }
    if let Some(extra) = options.extra_time {
        request.extra_time = extra;
    }
    if let Some(size) = options.cache_size_mb {
        request.cache_size_mb = size;
    }
    Ok(())
}

/// Resolve relative solution paths against the task directory.
pub fn absolutize_solutions(request: &mut EvaluateTaskRequest, task_dir: &Path) -> Result<()> {
    for solution in &mut request.solutions {
        let path = Path::new(&solution.path);
        if path.is_relative() {
            solution.path = absolute(&task_dir.join(path))?;
        }
    }
    Ok(())
}

/// Keep only the solutions named in `names`, matched by file name.
pub fn filter_solutions(request: &mut EvaluateTaskRequest, names: &[String]) -> Result<()> {
    if names.is_empty() {
        return Ok(());
    }

    let available: Vec<String> = request.solutions.iter().map(solution_name).collect();
    let unknown: Vec<&String> = names.iter().filter(|n| !available.contains(n)).collect();
    if !unknown.is_empty() {
        let unknown: Vec<&str> = unknown.iter().map(|s| s.as_str()).collect();
        bail!(
            "Unknown solution(s): {} (available: {})",
            unknown.join(", "),
            available.join(", ")
        );
    }

    request
        .solutions
        .retain(|solution| names.contains(&solution_name(solution)));
    Ok(())
}

pub fn solution_name(solution: &SourceFile) -> String {
    Path::new(&solution.path)
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| solution.path.clone())
}

pub fn solution_names(request: &EvaluateTaskRequest) -> Vec<String> {
    request.solutions.iter().map(solution_name).collect()
}

fn absolute(path: &Path) -> Result<String> {
    let path = std::path::absolute(path)
        .with_context(|| format!("Failed to resolve {}", path.display()))?;
    Ok(path.display().to_string())
}
