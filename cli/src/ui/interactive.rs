// Copyright (c) 2026 task-maker developers
// SPDX-License-Identifier: AGPL-3.0

//! Progress-bar UI
//!
//! One bar over every (solution, testcase) pair. Failures are printed above
//! the bar; the score table is printed once the bar is gone.

use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use taskmaker_core::application::ui::UiAdapter;
use taskmaker_core::domain::events::is_final_status;
use taskmaker_core::proto::event::EventOneof;
use taskmaker_core::proto::{Event, EventStatus};

use super::plain::describe;
use super::summary::{Summary, SubtaskEntry};

const TEMPLATE: &str = "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}";

pub struct InteractiveUi {
    summary: Summary,
    bar: Option<ProgressBar>,
}

impl InteractiveUi {
    pub fn new(solutions: &[String]) -> Self {
        Self {
            summary: Summary::new(solutions),
            bar: None,
        }
    }

    fn bar(&mut self) -> &ProgressBar {
        self.bar.get_or_insert_with(|| {
            let total = self.summary.solutions().len().max(1) * self.summary.testcase_count();
            let bar = ProgressBar::new(total as u64);
            if let Ok(style) = ProgressStyle::default_bar().template(TEMPLATE) {
                bar.set_style(style.progress_chars("#>-"));
            }
            bar.println(self.summary.header().trim_end());
            bar
        })
    }

    fn finish(&mut self) {
        if let Some(bar) = self.bar.take() {
            bar.finish_and_clear();
        }
    }
}

impl UiAdapter for InteractiveUi {
    fn set_task_name(&mut self, name: &str) {
        self.summary.task_name = name.to_string();
    }

    fn set_time_limit(&mut self, seconds: f64) {
        self.summary.time_limit = seconds;
    }

    fn set_memory_limit(&mut self, kib: u64) {
        self.summary.memory_limit_kb = kib;
    }

    fn set_subtask_info(&mut self, subtask: u32, max_score: f64, testcases: &[u32]) {
        self.summary.subtasks.insert(
            subtask,
            SubtaskEntry {
                max_score,
                testcases: testcases.to_vec(),
            },
        );
    }

    fn from_event(&mut self, event: &Event) {
        self.summary.record(event);
        let bar = self.bar();
        match &event.event_oneof {
            Some(EventOneof::TestcaseOutcome(outcome)) if is_final_status(outcome) => {
                bar.inc(1);
                bar.set_message(format!(
                    "{} {}.{}",
                    outcome.solution, outcome.subtask, outcome.testcase
                ));
            }
            Some(EventOneof::CompilationStatus(status)) => {
                bar.set_message(format!("compiling {}", status.filename));
                if status.status == EventStatus::Failure as i32 {
                    if let Some(line) = describe(event) {
                        bar.println(line);
                    }
                }
            }
            Some(EventOneof::GenerationStatus(_))
            | Some(EventOneof::FatalError(_))
            | Some(EventOneof::TaskScore(_)) => {
                if let Some(line) = describe(event) {
                    bar.println(line);
                }
            }
            _ => {}
        }
    }

    fn stop(&mut self, reason: &str) {
        match &self.bar {
            Some(bar) => bar.set_message(reason.yellow().to_string()),
            None => eprintln!("{}", reason.yellow()),
        }
    }

    fn fatal_error(&mut self, reason: &str) {
        self.finish();
        eprintln!("{} {}", "Error:".red().bold(), reason);
    }

    fn print_final_status(&mut self) {
        self.finish();
        let table = self.summary.render();
        if !table.is_empty() {
            print!("{}", table);
        }
    }
}
