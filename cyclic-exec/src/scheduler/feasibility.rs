/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Structural feasibility of a frame size for the cyclic-executive model.
//!
//! # Theory
//! For a frame size `f` and a task set `{(Tᵢ, Cᵢ)}` (period, execution time)
//! the classic cyclic-executive constraints are:
//!
//! | # | Constraint | Meaning |
//! |---|---|---|
//! | 1 | `f ≥ max Cᵢ` | every job fits inside one frame |
//! | 2 | `2f − gcd(f, Tᵢ) ≤ Tᵢ` | a whole frame lies between each job's release and deadline (implicit deadline `Dᵢ = Tᵢ`) |
//! | 3 | `Tᵢ mod f = 0` | frames tile each period exactly, so a task recurs every `Tᵢ / f` frames |
//!
//! Rules 2 and 3 are evaluated per task in input order, rule 1 after all
//! tasks; the first failure decides the verdict.  With `f = gcd(Tᵢ)` rules 2
//! and 3 always hold, so in the normal pipeline only rule 1 can fail.  They
//! are still checked because [`check_with_minor`] accepts any candidate frame.

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::cycle::math::gcd;
use crate::cycle::CycleLengths;
use crate::task::Task;

// ── Verdict types ─────────────────────────────────────────────────────────────

/// The first cyclic-executive constraint a task set broke.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "rule", rename_all = "snake_case")]
pub enum Violation {
    /// The longest job does not fit inside a single frame.
    FrameTooSmall {
        task: String,
        execution_time: u64,
        minor: u64,
    },

    /// No frame boundary falls inside the task's release-to-deadline window.
    NoFrameInWindow { task: String, period: u64, minor: u64 },

    /// The frame size does not divide the task's period.
    PeriodNotFrameMultiple { task: String, period: u64, minor: u64 },
}

impl Violation {
    /// Identifier of the task that broke the constraint.
    pub fn task(&self) -> &str {
        match self {
            Violation::FrameTooSmall { task, .. }
            | Violation::NoFrameInWindow { task, .. }
            | Violation::PeriodNotFrameMultiple { task, .. } => task,
        }
    }
}

impl std::fmt::Display for Violation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Violation::FrameTooSmall {
                task,
                execution_time,
                minor,
            } => write!(
                f,
                "task '{}' needs {} time units but a frame is only {} long",
                task, execution_time, minor
            ),
            Violation::NoFrameInWindow {
                task,
                period,
                minor,
            } => write!(
                f,
                "no full frame of size {} fits between release and deadline of task '{}' (period {})",
                minor, task, period
            ),
            Violation::PeriodNotFrameMultiple {
                task,
                period,
                minor,
            } => write!(
                f,
                "frame size {} does not divide period {} of task '{}'",
                minor, period, task
            ),
        }
    }
}

/// Outcome of the feasibility check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeasibilityVerdict {
    Schedulable,
    NotSchedulable(Violation),
}

impl FeasibilityVerdict {
    pub fn is_schedulable(&self) -> bool {
        matches!(self, FeasibilityVerdict::Schedulable)
    }

    /// The violation behind a `NotSchedulable` verdict.
    pub fn violation(&self) -> Option<&Violation> {
        match self {
            FeasibilityVerdict::Schedulable => None,
            FeasibilityVerdict::NotSchedulable(v) => Some(v),
        }
    }
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Check `tasks` against the minor cycle in `cycles`.
pub fn check(tasks: &[Task], cycles: &CycleLengths) -> FeasibilityVerdict {
    check_with_minor(tasks, cycles.minor)
}

/// Check `tasks` against an arbitrary candidate frame size `minor`.
///
/// An empty task set is trivially schedulable.  A zero frame size is never
/// schedulable for a non-empty set.
pub fn check_with_minor(tasks: &[Task], minor: u64) -> FeasibilityVerdict {
    debug!(minor, task_count = tasks.len(), "Checking frame feasibility");

    for task in tasks {
        if !frame_fits_window(minor, task.period) {
            return not_schedulable(Violation::NoFrameInWindow {
                task: task.id.clone(),
                period: task.period,
                minor,
            });
        }
        if task.frames_per_period(minor).is_none() {
            return not_schedulable(Violation::PeriodNotFrameMultiple {
                task: task.id.clone(),
                period: task.period,
                minor,
            });
        }
    }

    if let Some(longest) = longest_task(tasks) {
        if minor < longest.execution_time {
            return not_schedulable(Violation::FrameTooSmall {
                task: longest.id.clone(),
                execution_time: longest.execution_time,
                minor,
            });
        }
    }

    info!(minor, "Frame size satisfies all cyclic-executive constraints");
    FeasibilityVerdict::Schedulable
}

/// Task with the largest execution time; the first one in input order wins
/// a tie.
pub fn longest_task(tasks: &[Task]) -> Option<&Task> {
    tasks.iter().reduce(|best, t| {
        if t.execution_time > best.execution_time {
            t
        } else {
            best
        }
    })
}

/// `2f − gcd(f, T) ≤ T`.
fn frame_fits_window(minor: u64, period: u64) -> bool {
    minor.saturating_mul(2).saturating_sub(gcd(minor, period)) <= period
}

fn not_schedulable(violation: Violation) -> FeasibilityVerdict {
    warn!(task = violation.task(), %violation, "NOT SCHEDULABLE");
    FeasibilityVerdict::NotSchedulable(violation)
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cycle::minor_cycle;

    fn make_task(id: &str, period: u64, execution_time: u64) -> Task {
        Task::new(id, period, execution_time, 0)
    }

    #[test]
    fn execution_longer_than_frame_is_not_schedulable() {
        // minor = gcd(10, 15) = 5; C = 6 > 5
        let tasks = vec![make_task("A", 10, 2), make_task("B", 15, 6)];
        let verdict = check_with_minor(&tasks, 5);
        assert_eq!(
            verdict,
            FeasibilityVerdict::NotSchedulable(Violation::FrameTooSmall {
                task: "B".into(),
                execution_time: 6,
                minor: 5,
            })
        );
    }

    #[test]
    fn execution_equal_to_frame_is_schedulable() {
        let tasks = vec![make_task("A", 10, 5), make_task("B", 15, 5)];
        assert!(check_with_minor(&tasks, 5).is_schedulable());
    }

    #[test]
    fn gcd_frame_always_satisfies_window_and_divisibility() {
        let sets: &[&[u64]] = &[&[4, 8], &[10, 15], &[6, 10, 15], &[4, 5, 20]];
        for periods in sets {
            let tasks: Vec<Task> = periods
                .iter()
                .enumerate()
                .map(|(i, &p)| make_task(&format!("T{i}"), p, 1))
                .collect();
            let minor = minor_cycle(&tasks).unwrap();
            assert!(
                check_with_minor(&tasks, minor).is_schedulable(),
                "periods {periods:?} with frame {minor}"
            );
        }
    }

    #[test]
    fn frame_larger_than_period_has_no_frame_in_window() {
        // f = 8, T = 6: 2*8 - gcd(8, 6) = 14 > 6
        let tasks = vec![make_task("A", 6, 1)];
        let verdict = check_with_minor(&tasks, 8);
        assert!(matches!(
            verdict,
            FeasibilityVerdict::NotSchedulable(Violation::NoFrameInWindow { .. })
        ));
    }

    #[test]
    fn window_rule_passes_but_divisibility_fails() {
        // f = 4, T = 10: 2*4 - gcd(4, 10) = 6 <= 10, but 10 % 4 != 0
        let tasks = vec![make_task("A", 10, 1)];
        let verdict = check_with_minor(&tasks, 4);
        assert_eq!(
            verdict,
            FeasibilityVerdict::NotSchedulable(Violation::PeriodNotFrameMultiple {
                task: "A".into(),
                period: 10,
                minor: 4,
            })
        );
    }

    #[test]
    fn per_task_rules_are_reported_before_frame_size() {
        // Both the frame-size bound (C = 9 > 4) and divisibility fail;
        // per-task rules are evaluated first.
        let tasks = vec![make_task("A", 10, 9)];
        let verdict = check_with_minor(&tasks, 4);
        assert!(matches!(
            verdict.violation(),
            Some(Violation::PeriodNotFrameMultiple { .. })
        ));
    }

    #[test]
    fn zero_frame_is_not_schedulable() {
        let tasks = vec![make_task("A", 10, 1)];
        assert!(!check_with_minor(&tasks, 0).is_schedulable());
    }

    #[test]
    fn empty_task_set_is_trivially_schedulable() {
        assert!(check_with_minor(&[], 5).is_schedulable());
    }

    #[test]
    fn longest_task_prefers_first_among_equals() {
        let tasks = vec![
            make_task("A", 10, 3),
            make_task("B", 10, 7),
            make_task("C", 10, 7),
        ];
        assert_eq!(longest_task(&tasks).unwrap().id, "B");
        assert!(longest_task(&[]).is_none());
    }

    #[test]
    fn violation_names_its_task() {
        let v = Violation::NoFrameInWindow {
            task: "X".into(),
            period: 3,
            minor: 4,
        };
        assert_eq!(v.task(), "X");
    }
}
