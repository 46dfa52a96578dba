// Copyright (c) 2026 task-maker developers
// SPDX-License-Identifier: AGPL-3.0

// Score bookkeeping shared by the plain and interactive UIs.

use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::path::Path;

use colored::Colorize;
use taskmaker_core::proto::event::EventOneof;
use taskmaker_core::proto::{Event, EventStatus};

#[derive(Debug, Clone, Default)]
pub struct SubtaskEntry {
    pub max_score: f64,
    pub testcases: Vec<u32>,
}

#[derive(Debug, Clone, Default)]
pub struct Summary {
    pub task_name: String,
    pub time_limit: f64,
    pub memory_limit_kb: u64,
    pub subtasks: BTreeMap<u32, SubtaskEntry>,
    solutions: Vec<String>,
    task_scores: BTreeMap<String, f64>,
    subtask_scores: BTreeMap<String, BTreeMap<u32, f64>>,
    compilation_failures: Vec<String>,
}

impl Summary {
    pub fn new(solutions: &[String]) -> Self {
        Self {
            solutions: solutions.to_vec(),
            ..Default::default()
        }
    }

    pub fn max_score(&self) -> f64 {
        self.subtasks.values().map(|s| s.max_score).sum()
    }

    pub fn testcase_count(&self) -> usize {
        self.subtasks.values().map(|s| s.testcases.len()).sum()
    }

    pub fn solutions(&self) -> &[String] {
        &self.solutions
    }

    /// Record scores carried by `event`.
    pub fn record(&mut self, event: &Event) {
        match &event.event_oneof {
            Some(EventOneof::TaskScore(score)) => {
                self.note_solution(&score.solution);
                self.task_scores.insert(score.solution.clone(), score.score);
            }
            Some(EventOneof::SubtaskScore(score)) => {
                self.note_solution(&score.solution);
                self.subtask_scores
                    .entry(score.solution.clone())
                    .or_default()
                    .insert(score.subtask, score.score);
            }
            Some(EventOneof::CompilationStatus(status))
                if status.status == EventStatus::Failure as i32 =>
            {
                let name = Path::new(&status.filename)
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_else(|| status.filename.clone());
                self.compilation_failures.push(name);
            }
            _ => {}
        }
    }

    fn note_solution(&mut self, solution: &str) {
        if !self.solutions.iter().any(|s| s == solution) {
            self.solutions.push(solution.to_string());
        }
    }

    pub fn header(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "{}", self.task_name.bold());
        let _ = writeln!(
            out,
            "Time limit: {}s  Memory limit: {} MiB",
            self.time_limit,
            self.memory_limit_kb / 1024
        );
        for (id, subtask) in &self.subtasks {
            let _ = writeln!(
                out,
                "  Subtask {:>2}: {:>6.2} points, {} testcases",
                id,
                subtask.max_score,
                subtask.testcases.len()
            );
        }
        out
    }

    /// Final score table.
    pub fn render(&self) -> String {
        let mut out = String::new();
        if self.solutions.is_empty() {
            return out;
        }

        let width = self.solutions.iter().map(|s| s.len()).max().unwrap_or(0).max(8);
        let max_score = self.max_score();
        let _ = write!(out, "{:<width$}  {:>7}", "Solution".bold(), "Total".bold());
        for id in self.subtasks.keys() {
            let _ = write!(out, "  {:>6}", format!("ST{}", id).bold());
        }
        out.push('\n');

        for solution in &self.solutions {
            let _ = write!(out, "{:<width$}  ", solution);
            match self.task_scores.get(solution) {
                Some(score) => {
                    let _ = write!(out, "{}", colorize_score(*score, max_score, 7));
                }
                None if self.compilation_failures.contains(solution) => {
                    let _ = write!(out, "{:>7}", "CE".red());
                }
                None => {
                    let _ = write!(out, "{:>7}", "-");
                }
            }
            let scores = self.subtask_scores.get(solution);
            for (id, subtask) in &self.subtasks {
                match scores.and_then(|s| s.get(id)) {
                    Some(score) => {
                        let _ = write!(out, "  {}", colorize_score(*score, subtask.max_score, 6));
                    }
                    None => {
                        let _ = write!(out, "  {:>6}", "-");
                    }
                }
            }
            out.push('\n');
        }
        out
    }
}

pub fn colorize_score(score: f64, max: f64, width: usize) -> String {
    let text = format!("{:>width$.2}", score, width = width);
    if score <= 0.0 {
        text.red().to_string()
    } else if max > 0.0 && score >= max {
        text.green().to_string()
    } else {
        text.yellow().to_string()
    }
}

pub fn status_name(status: i32) -> String {
    EventStatus::try_from(status)
        .map(|s| s.as_str_name().to_ascii_lowercase())
        .unwrap_or_else(|_| format!("unknown({})", status))
}

#[cfg(test)]
mod tests {
    use super::*;
    use taskmaker_core::proto::{SubtaskScore, TaskScore};

    fn score_events() -> Vec<Event> {
        vec![
            Event {
                event_oneof: Some(EventOneof::SubtaskScore(SubtaskScore {
                    solution: "a.cpp".to_string(),
                    subtask: 1,
                    score: 40.0,
                })),
            },
            Event {
                event_oneof: Some(EventOneof::TaskScore(TaskScore {
                    solution: "a.cpp".to_string(),
                    score: 40.0,
                })),
            },
        ]
    }

    #[test]
    fn test_render_table() {
        colored::control::set_override(false);
        let mut summary = Summary::new(&["a.cpp".to_string(), "b.py".to_string()]);
        summary.subtasks.insert(1, SubtaskEntry { max_score: 40.0, testcases: vec![0, 1] });
        summary.subtasks.insert(2, SubtaskEntry { max_score: 60.0, testcases: vec![2] });
        for event in score_events() {
            summary.record(&event);
        }

        let table = summary.render();
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("Solution"));
        assert!(lines[1].starts_with("a.cpp"));
        assert!(lines[1].contains("40.00"));
        assert!(lines[2].starts_with("b.py"));
        assert!(lines[2].contains('-'));
        assert!(!lines[2].contains("40.00"));
        assert_eq!(summary.max_score(), 100.0);
        assert_eq!(summary.testcase_count(), 3);
    }

    #[test]
    fn test_status_name() {
        assert_eq!(status_name(EventStatus::Executing as i32), "executing");
        assert_eq!(status_name(42), "unknown(42)");
    }
}
