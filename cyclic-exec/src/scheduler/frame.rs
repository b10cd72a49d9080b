/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Frame assignment: turning an ordered task list into a per-frame table.
//!
//! A task with period `T` spans `k = T / f` frames of size `f`, so it is
//! released in every `k`-th frame: frame `i` runs the task iff `i mod k == 0`.
//! Over a major cycle `H` that places the task in exactly `H / T` frames.

use tracing::{debug, warn};

use crate::cycle::CycleLengths;
use crate::task::Task;

use super::heuristic::Heuristic;

// ── Frame ─────────────────────────────────────────────────────────────────────

/// One minor-cycle slot of the schedule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame<'a> {
    /// Zero-based frame index within the major cycle.
    pub index: u64,

    /// Start time of the frame (`index * minor`).
    pub start: u64,

    /// Tasks released in this frame, in heuristic order.
    pub tasks: Vec<&'a Task>,
}

impl Frame<'_> {
    /// Sum of the execution times of the tasks in this frame.
    pub fn load(&self) -> u64 {
        self.tasks.iter().map(|t| t.execution_time).sum()
    }

    /// Idle time left in a frame of size `minor`; `0` when overloaded.
    pub fn slack(&self, minor: u64) -> u64 {
        minor.saturating_sub(self.load())
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}

// ── Schedule ──────────────────────────────────────────────────────────────────

/// Frame table for one major cycle.  Borrows the caller's tasks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schedule<'a> {
    /// Frame size the table was built for.
    pub minor: u64,

    pub frames: Vec<Frame<'a>>,
}

impl Schedule<'_> {
    /// Number of frames in the table (`major / minor`).
    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    /// Total task instances across all frames.
    pub fn placements(&self) -> usize {
        self.frames.iter().map(|f| f.tasks.len()).sum()
    }

    /// Number of frames that run task `id`.
    pub fn occurrences(&self, id: &str) -> usize {
        self.frames
            .iter()
            .filter(|f| f.tasks.iter().any(|t| t.id == id))
            .count()
    }

    /// Indices of frames whose load exceeds the frame size.
    pub fn overloaded_frames(&self) -> Vec<u64> {
        self.frames
            .iter()
            .filter(|f| f.load() > self.minor)
            .map(|f| f.index)
            .collect()
    }
}

// ── Builder ───────────────────────────────────────────────────────────────────

/// Build the frame table for `tasks`.
///
/// Tasks are ordered once by `heuristic` (stable), then each frame collects
/// the tasks released in it.  The caller must have checked feasibility: a
/// task whose period is not a multiple of `cycles.minor` is never placed.
pub fn build_schedule<'a>(
    tasks: &'a [Task],
    cycles: &CycleLengths,
    heuristic: Heuristic,
) -> Schedule<'a> {
    let minor = cycles.minor;
    let frame_count = cycles.frame_count();

    // (task, frames-per-period) in heuristic order
    let ordered: Vec<(&Task, u64)> = heuristic
        .order(tasks)
        .into_iter()
        .filter_map(|t| match t.frames_per_period(minor) {
            Some(k) => Some((t, k)),
            None => {
                warn!(
                    task = %t.id,
                    period = t.period,
                    minor,
                    "period is not a frame multiple, task not placed"
                );
                None
            }
        })
        .collect();

    let frames: Vec<Frame<'a>> = (0..frame_count)
        .map(|index| Frame {
            index,
            start: index * minor,
            tasks: ordered
                .iter()
                .filter(|(_, k)| index % k == 0)
                .map(|(t, _)| *t)
                .collect(),
        })
        .collect();

    for frame in &frames {
        debug!(
            frame = frame.index,
            start = frame.start,
            tasks = ?frame.tasks.iter().map(|t| t.id.as_str()).collect::<Vec<_>>(),
            load = frame.load(),
            "  frame"
        );
    }

    Schedule { minor, frames }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
