/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Periodic task record consumed by the cyclic-executive scheduler.
//!
//! ```text
//! task-set file ──(config loader)──►  Vec<Task>  ──(CyclicScheduler)──►  Schedule<'_>
//!                                      ↑ owned by caller                   ↑ borrows &Task
//! ```
//!
//! # Ownership model
//! The caller owns the `Vec<Task>` for the whole run.  The scheduler only
//! ever borrows `&[Task]`; frames hold `&Task` references, so a task that
//! runs in twenty frames is still stored exactly once.

use std::collections::HashSet;

use crate::scheduler::error::{SchedulerError, TaskDefect};

// ── Task ──────────────────────────────────────────────────────────────────────

/// One periodic task of the cyclic executive.
///
/// All timing values share a single abstract time unit; the scheduler never
/// converts between units.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Task {
    /// Unique task identifier within a task set.
    pub id: String,

    /// Release period, in time units.  Must be non-zero.
    pub period: u64,

    /// Worst-case execution time, in time units.  Must be non-zero and no
    /// larger than `period`.
    pub execution_time: u64,

    /// Display priority.  Carried through to the report; the scheduler does
    /// not order by it.
    pub priority: i32,
}

impl Task {
    /// Convenience constructor used heavily by tests and examples.
    pub fn new(id: impl Into<String>, period: u64, execution_time: u64, priority: i32) -> Self {
        Self {
            id: id.into(),
            period,
            execution_time,
            priority,
        }
    }

    /// Periodicity rate `1 / period`.
    ///
    /// Returns `0.0` when `period` is zero to avoid division by zero.
    pub fn rate(&self) -> f64 {
        if self.period == 0 {
            0.0
        } else {
            1.0 / self.period as f64
        }
    }

    /// Processor demand fraction: `execution_time / period`.
    ///
    /// Returns `0.0` when `period` is zero to avoid division by zero.
    pub fn utilization(&self) -> f64 {
        if self.period == 0 {
            0.0
        } else {
            self.execution_time as f64 / self.period as f64
        }
    }

    /// Number of minor frames that make up one period of this task (always
    /// `>= 1`), or `None` if either value is zero or `minor` does not divide
    /// the period.
    pub fn frames_per_period(&self, minor: u64) -> Option<u64> {
        if minor == 0 || self.period == 0 || self.period % minor != 0 {
            None
        } else {
            Some(self.period / minor)
        }
    }

    /// Check the per-task domain constraints.
    pub fn check(&self) -> Result<(), TaskDefect> {
        if self.id.trim().is_empty() {
            return Err(TaskDefect::EmptyId);
        }
        if self.period == 0 {
            return Err(TaskDefect::ZeroPeriod);
        }
        if self.execution_time == 0 {
            return Err(TaskDefect::ZeroExecutionTime);
        }
        if self.execution_time > self.period {
            return Err(TaskDefect::ExecutionExceedsPeriod {
                execution_time: self.execution_time,
                period: self.period,
            });
        }
        Ok(())
    }
}

// ── Task-set validation ───────────────────────────────────────────────────────

/// Validate a whole task set before any cycle arithmetic runs.
///
/// Rejects, in this order: an empty set, the first task that breaks a
/// per-task constraint (see [`Task::check`]), and the first repeated id.
pub fn validate_task_set(tasks: &[Task]) -> Result<(), SchedulerError> {
    if tasks.is_empty() {
        return Err(SchedulerError::NoTasks);
    }

    for task in tasks {
        task.check().map_err(|reason| SchedulerError::InvalidTask {
            task: task.id.clone(),
            reason,
        })?;
    }

    let mut seen = HashSet::with_capacity(tasks.len());
    for task in tasks {
        if !seen.insert(task.id.as_str()) {
            return Err(SchedulerError::DuplicateTaskId {
                task: task.id.clone(),
            });
        }
    }

    Ok(())
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    // ── Task ──────────────────────────────────────────────────────────────────

    #[test]
    fn rate_is_inverse_period() {
        let task = Task::new("t", 4, 1, 0);
        assert!((task.rate() - 0.25).abs() < 1e-12);
    }

    #[test]
    fn rate_zero_period_returns_zero() {
        let task = Task::new("t", 0, 1, 0);
        assert_eq!(task.rate(), 0.0);
    }

    #[test]
    fn utilization_is_correct() {
        let task = Task::new("t", 10, 3, 0);
        assert!((task.utilization() - 0.3).abs() < 1e-12);
    }

    #[test]
    fn frames_per_period_requires_exact_division() {
        let task = Task::new("t", 20, 1, 0);
        assert_eq!(task.frames_per_period(5), Some(4));
        assert_eq!(task.frames_per_period(20), Some(1));
        assert_eq!(task.frames_per_period(3), None);
        assert_eq!(task.frames_per_period(0), None);
        // Frame larger than the period never divides it
        assert_eq!(task.frames_per_period(40), None);
        // Zero period divides evenly but spans no frame
        assert_eq!(Task::new("z", 0, 1, 0).frames_per_period(4), None);
    }

    // ── Task::check ───────────────────────────────────────────────────────────

    #[test]
    fn check_accepts_well_formed_task() {
        assert!(Task::new("ok", 10, 10, 1).check().is_ok());
    }

    #[test]
    fn check_rejects_zero_period() {
        assert_eq!(Task::new("t", 0, 1, 0).check(), Err(TaskDefect::ZeroPeriod));
    }

    #[test]
    fn check_rejects_zero_execution_time() {
        assert_eq!(
            Task::new("t", 5, 0, 0).check(),
            Err(TaskDefect::ZeroExecutionTime)
        );
    }

    #[test]
    fn check_rejects_execution_longer_than_period() {
        assert_eq!(
            Task::new("t", 5, 6, 0).check(),
            Err(TaskDefect::ExecutionExceedsPeriod {
                execution_time: 6,
                period: 5
            })
        );
    }

    #[test]
    fn check_rejects_blank_id() {
        assert_eq!(Task::new("  ", 5, 1, 0).check(), Err(TaskDefect::EmptyId));
    }

    // ── validate_task_set ─────────────────────────────────────────────────────

    #[test]
    fn empty_set_is_rejected() {
        assert!(matches!(
            validate_task_set(&[]),
            Err(SchedulerError::NoTasks)
        ));
    }

    #[test]
    fn invalid_task_is_named_in_error() {
        let tasks = vec![Task::new("good", 4, 1, 0), Task::new("bad", 0, 1, 0)];
        match validate_task_set(&tasks) {
            Err(SchedulerError::InvalidTask { task, reason }) => {
                assert_eq!(task, "bad");
                assert_eq!(reason, TaskDefect::ZeroPeriod);
            }
            other => panic!("expected InvalidTask, got {other:?}"),
        }
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let tasks = vec![
            Task::new("A", 4, 1, 0),
            Task::new("B", 8, 1, 0),
            Task::new("A", 8, 2, 0),
        ];
        assert!(matches!(
            validate_task_set(&tasks),
            Err(SchedulerError::DuplicateTaskId { task }) if task == "A"
        ));
    }

    #[test]
    fn valid_set_passes() {
        let tasks = vec![Task::new("A", 4, 1, 0), Task::new("B", 8, 2, 0)];
        assert!(validate_task_set(&tasks).is_ok());
    }
}
