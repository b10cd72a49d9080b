/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Structured error types for the cyclic-executive scheduler.
//!
//! Two types model the two failure layers:
//!
//! * [`TaskDefect`]: why a single task record is malformed (low-level,
//!   carries the offending values).
//! * [`SchedulerError`]: top-level failure returned from
//!   [`CyclicScheduler::analyze()`](super::CyclicScheduler::analyze).
//!
//! An infeasible task set is **not** an error.  It is reported as
//! [`FeasibilityVerdict::NotSchedulable`](super::feasibility::FeasibilityVerdict)
//! inside a successful analysis, so the caller decides what to do with it.

use thiserror::Error;

use crate::cycle::CycleError;

// ── Per-task defects ──────────────────────────────────────────────────────────

/// Reason a task record was rejected before cycle computation.
///
/// Carried inside [`SchedulerError::InvalidTask`] so the caller always knows
/// both *which* task failed and *why*.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskDefect {
    /// The identifier is empty or whitespace only.
    EmptyId,

    /// `period == 0`.
    ZeroPeriod,

    /// `execution_time == 0`.
    ZeroExecutionTime,

    /// The task needs more processor time than one period provides.
    ExecutionExceedsPeriod { execution_time: u64, period: u64 },
}

impl std::fmt::Display for TaskDefect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TaskDefect::EmptyId => write!(f, "task identifier is empty"),

            TaskDefect::ZeroPeriod => write!(f, "period must be greater than zero"),

            TaskDefect::ZeroExecutionTime => {
                write!(f, "execution time must be greater than zero")
            }

            TaskDefect::ExecutionExceedsPeriod {
                execution_time,
                period,
            } => write!(
                f,
                "execution time {} exceeds period {}",
                execution_time, period
            ),
        }
    }
}

// ── Top-level scheduler errors ────────────────────────────────────────────────

/// Top-level error type returned by
/// [`CyclicScheduler::analyze()`](super::CyclicScheduler::analyze).
///
/// | Variant | Layer |
/// |---|---|
/// | `NoTasks` / `InvalidTask` / `DuplicateTaskId` | input validation |
/// | `Overflow` | major-cycle (LCM) arithmetic |
/// | `TooManyFrames` | frame-count guard |
#[derive(Debug, Error)]
pub enum SchedulerError {
    /// `analyze()` was called with an empty task list.
    #[error("no tasks provided: task list is empty")]
    NoTasks,

    /// A task violates a basic domain constraint.
    #[error("task '{task}' is invalid: {reason}")]
    InvalidTask { task: String, reason: TaskDefect },

    /// Two tasks share the same identifier.
    #[error("task id '{task}' appears more than once")]
    DuplicateTaskId { task: String },

    /// The major cycle does not fit in a `u64`.
    #[error("major cycle overflow computing lcm({a}, {b})")]
    Overflow { a: u64, b: u64 },

    /// `major / minor` exceeds the configured frame limit.
    #[error("schedule would need {frames} frames (limit {limit})")]
    TooManyFrames { frames: u64, limit: u64 },
}

impl From<CycleError> for SchedulerError {
    fn from(e: CycleError) -> Self {
        match e {
            CycleError::NoPeriods => SchedulerError::NoTasks,
            CycleError::Overflow { a, b } => SchedulerError::Overflow { a, b },
            CycleError::TooManyFrames { frames, limit } => {
                SchedulerError::TooManyFrames { frames, limit }
            }
        }
    }
}
