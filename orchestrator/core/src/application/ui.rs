// Copyright (c) 2026 task-maker developers
// SPDX-License-Identifier: AGPL-3.0

//! UI adapter contract
//!
//! The orchestrator drives any rendering backend through [`UiAdapter`]. The
//! static task metadata is announced exactly once, before the first event
//! is forwarded; events are then forwarded one by one in delivery order.

use crate::proto::{EvaluateTaskRequest, Event};

/// Capability set of a rendering backend.
pub trait UiAdapter: Send {
    fn set_task_name(&mut self, name: &str);

    /// Time limit in seconds.
    fn set_time_limit(&mut self, seconds: f64);

    /// Memory limit in KiB.
    fn set_memory_limit(&mut self, kib: u64);

    /// Called once per subtask, with testcase ids in ascending order.
    fn set_subtask_info(&mut self, subtask: u32, max_score: f64, testcases: &[u32]);

    fn from_event(&mut self, event: &Event);

    /// The run is being aborted while an evaluation is in flight.
    fn stop(&mut self, reason: &str);

    /// Final diagnostic of a failed or aborted run.
    fn fatal_error(&mut self, reason: &str);

    /// Final summary of a successful run.
    fn print_final_status(&mut self);
}

#[derive(Debug, Clone, PartialEq)]
pub struct SubtaskInfo {
    pub id: u32,
    pub max_score: f64,
    pub testcases: Vec<u32>,
}

/// Static task description shown before streaming begins.
#[derive(Debug, Clone, PartialEq)]
pub struct TaskMetadata {
    pub name: String,
    pub time_limit: f64,
    pub memory_limit_kb: u64,
    pub subtasks: Vec<SubtaskInfo>,
}

impl TaskMetadata {
    pub fn from_request(request: &EvaluateTaskRequest) -> Self {
        let task = request.task.clone().unwrap_or_default();

        let name = match (task.title.is_empty(), task.name.is_empty()) {
            (false, false) => format!("{} ({})", task.title, task.name),
            (true, _) => task.name.clone(),
            (false, true) => task.title.clone(),
        };

        let mut subtasks: Vec<SubtaskInfo> = task
            .subtasks
            .iter()
            .map(|(id, subtask)| {
                let mut testcases: Vec<u32> = subtask.testcases.keys().copied().collect();
                testcases.sort_unstable();
                SubtaskInfo {
                    id: *id,
                    max_score: subtask.max_score,
                    testcases,
                }
            })
            .collect();
        subtasks.sort_by_key(|subtask| subtask.id);

        Self {
            name,
            time_limit: task.time_limit,
            memory_limit_kb: task.memory_limit_kb,
            subtasks,
        }
    }

    pub fn announce(&self, ui: &mut dyn UiAdapter) {
        ui.set_task_name(&self.name);
        ui.set_time_limit(self.time_limit);
        ui.set_memory_limit(self.memory_limit_kb);
        for subtask in &self.subtasks {
            ui.set_subtask_info(subtask.id, subtask.max_score, &subtask.testcases);
        }
    }

    pub fn testcase_count(&self) -> usize {
        self.subtasks.iter().map(|s| s.testcases.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::proto::{Subtask, Task, TestCase};
    use std::collections::HashMap;

    fn request() -> EvaluateTaskRequest {
        let subtask = |max_score: f64, ids: &[u32]| Subtask {
            max_score,
            testcases: ids
                .iter()
                .map(|id| (*id, TestCase::default()))
                .collect::<HashMap<_, _>>(),
        };
        EvaluateTaskRequest {
            task: Some(Task {
                name: "poldo".to_string(),
                title: "Dieta di Poldo".to_string(),
                time_limit: 1.5,
                memory_limit_kb: 262144,
                subtasks: [(2, subtask(60.0, &[5, 3, 4])), (1, subtask(40.0, &[2, 0, 1]))]
                    .into_iter()
                    .collect(),
            }),
            ..Default::default()
        }
    }

    #[test]
    fn test_metadata_is_sorted() {
        let metadata = TaskMetadata::from_request(&request());
        assert_eq!(metadata.name, "Dieta di Poldo (poldo)");
        assert_eq!(metadata.time_limit, 1.5);
        assert_eq!(metadata.memory_limit_kb, 262144);
        assert_eq!(
            metadata.subtasks,
            vec![
                SubtaskInfo { id: 1, max_score: 40.0, testcases: vec![0, 1, 2] },
                SubtaskInfo { id: 2, max_score: 60.0, testcases: vec![3, 4, 5] },
            ]
        );
        assert_eq!(metadata.testcase_count(), 6);
    }

    #[test]
    fn test_missing_task_yields_empty_metadata() {
        let metadata = TaskMetadata::from_request(&EvaluateTaskRequest::default());
        assert!(metadata.name.is_empty());
        assert!(metadata.subtasks.is_empty());
    }
}
