// Copyright (c) 2026 task-maker developers
// SPDX-License-Identifier: AGPL-3.0

use taskmaker_core::application::ui::UiAdapter;
use taskmaker_core::proto::Event;

/// Prints nothing but the final error, if any.
#[derive(Debug, Default)]
pub struct SilentUi;

impl UiAdapter for SilentUi {
    fn set_task_name(&mut self, _name: &str) {}

    fn set_time_limit(&mut self, _seconds: f64) {}

    fn set_memory_limit(&mut self, _kib: u64) {}

    fn set_subtask_info(&mut self, _subtask: u32, _max_score: f64, _testcases: &[u32]) {}

    fn from_event(&mut self, _event: &Event) {}

    fn stop(&mut self, _reason: &str) {}

    fn fatal_error(&mut self, reason: &str) {
        eprintln!("{}", reason);
    }

    fn print_final_status(&mut self) {}
}
