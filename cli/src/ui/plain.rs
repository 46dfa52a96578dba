// Copyright (c) 2026 task-maker developers
// SPDX-License-Identifier: AGPL-3.0

//! Line-oriented UI
//!
//! Prints the task header once the metadata is complete, one line per
//! noteworthy event and the score table at the end.

use colored::Colorize;
use taskmaker_core::application::ui::UiAdapter;
use taskmaker_core::domain::events::is_final_status;
use taskmaker_core::proto::event::EventOneof;
use taskmaker_core::proto::{Event, EventStatus};

use super::summary::{colorize_score, status_name, Summary, SubtaskEntry};

pub struct PlainUi {
    summary: Summary,
    header_printed: bool,
}

impl PlainUi {
    pub fn new(solutions: &[String]) -> Self {
        Self {
            summary: Summary::new(solutions),
            header_printed: false,
        }
    }

    fn print_header(&mut self) {
        if !self.header_printed && !self.summary.task_name.is_empty() {
            print!("{}", self.summary.header());
            self.header_printed = true;
        }
    }
}

/// One-line description of `event`, or `None` when it is not worth a line.
pub fn describe(event: &Event) -> Option<String> {
    match event.event_oneof.as_ref()? {
        EventOneof::EvaluationStarted(started) => {
            Some(format!("Evaluation {} started", started.id).dimmed().to_string())
        }
        EventOneof::EvaluationEnded(_) => None,
        EventOneof::FatalError(fatal) => Some(format!("{} {}", "Fatal:".red().bold(), fatal.msg)),
        EventOneof::CompilationStatus(status) => {
            let mut line = format!("Compilation of {}: {}", status.filename, status_name(status.status));
            if status.status == EventStatus::Failure as i32 {
                line = line.red().to_string();
                if !status.stderr.is_empty() {
                    line.push('\n');
                    line.push_str(status.stderr.trim_end());
                }
            }
            Some(line)
        }
        EventOneof::GenerationStatus(status) => {
            if status.status == EventStatus::Failure as i32 {
                Some(
                    format!(
                        "Generation of testcase {}.{} failed: {}",
                        status.subtask, status.testcase, status.error
                    )
                    .red()
                    .to_string(),
                )
            } else {
                None
            }
        }
        EventOneof::TestcaseOutcome(outcome) => {
            if !is_final_status(outcome) {
                return None;
            }
            Some(format!(
                "{} {:>3}.{:<3} {} {:>6.3}s {:>7} KiB  {}",
                outcome.solution,
                outcome.subtask,
                outcome.testcase,
                colorize_score(outcome.score, 1.0, 5),
                outcome.cpu_time,
                outcome.memory_kb,
                outcome.message
            ))
        }
        EventOneof::SubtaskScore(score) => Some(format!(
            "{} subtask {}: {:.2}",
            score.solution, score.subtask, score.score
        )),
        EventOneof::TaskScore(score) => Some(
            format!("{} total: {:.2}", score.solution, score.score)
                .bold()
                .to_string(),
        ),
    }
}

impl UiAdapter for PlainUi {
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
        self.print_header();
        self.summary.record(event);
        if let Some(line) = describe(event) {
            println!("{}", line);
        }
    }

    fn stop(&mut self, reason: &str) {
        eprintln!("{}", reason.yellow());
    }

    fn fatal_error(&mut self, reason: &str) {
        eprintln!("{} {}", "Error:".red().bold(), reason);
    }

    fn print_final_status(&mut self) {
        self.print_header();
        let table = self.summary.render();
        if !table.is_empty() {
            println!();
            print!("{}", table);
        }
    }
}
