/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Aggregate statistics over a built schedule.
//!
//! `utilization` keeps the historical definition `task_count / frame_count`
//! so reports stay comparable with earlier runs.  It ignores how many frames
//! each task actually occupies; `frame_placements` and `processor_demand`
//! are reported next to it for that reason.

use serde::Serialize;
use tracing::{info, warn};

use crate::cycle::CycleLengths;
use crate::task::Task;

use super::frame::Schedule;

/// Summary of one schedule.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    /// `major / minor`.
    pub total_frames: u64,

    /// Number of input tasks.
    pub total_placements: usize,

    /// `total_placements / total_frames`.
    pub utilization: f64,

    /// Task instances actually placed across all frames.
    pub frame_placements: usize,

    /// `Σ Cᵢ / Tᵢ`: long-run fraction of processor time the set needs.
    pub processor_demand: f64,

    /// Frames whose summed execution time exceeds the frame size.
    pub overloaded_frames: Vec<u64>,
}

impl Summary {
    /// `utilization` as a percentage.
    pub fn utilization_percent(&self) -> f64 {
        self.utilization * 100.0
    }
}

/// Summarise `schedule`.
pub fn summarize(tasks: &[Task], cycles: &CycleLengths, schedule: &Schedule<'_>) -> Summary {
    let total_frames = cycles.frame_count();
    let total_placements = tasks.len();
    let utilization = if total_frames == 0 {
        0.0
    } else {
        total_placements as f64 / total_frames as f64
    };
    let processor_demand: f64 = tasks.iter().map(Task::utilization).sum();
    let overloaded_frames = schedule.overloaded_frames();

    if !overloaded_frames.is_empty() {
        warn!(
            frames = ?overloaded_frames,
            minor = cycles.minor,
            "frame load exceeds frame size"
        );
    }
    if processor_demand > 1.0 {
        warn!(
            processor_demand,
            "task set demands more than 100% of the processor"
        );
    }

    let summary = Summary {
        total_frames,
        total_placements,
        utilization,
        frame_placements: schedule.placements(),
        processor_demand,
        overloaded_frames,
    };

    info!(
        total_frames = summary.total_frames,
        total_placements = summary.total_placements,
        frame_placements = summary.frame_placements,
        utilization_pct = summary.utilization_percent(),
        "Schedule summary"
    );

    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cycle::CycleCalculator;
    use crate::scheduler::frame::build_schedule;
    use crate::scheduler::heuristic::Heuristic;

    fn summary_for(tasks: &[Task]) -> Summary {
        let cycles = CycleCalculator::new().calculate(tasks).unwrap();
        let schedule = build_schedule(tasks, &cycles, Heuristic::Setf);
        summarize(tasks, &cycles, &schedule)
    }

    #[test]
    fn two_task_example_is_full_utilization() {
        let s = summary_for(&[Task::new("A", 4, 1, 0), Task::new("B", 8, 2, 0)]);
        assert_eq!(s.total_frames, 2);
        assert_eq!(s.total_placements, 2);
        assert!((s.utilization - 1.0).abs() < 1e-12);
        assert!((s.utilization_percent() - 100.0).abs() < 1e-9);
    }

    #[test]
    fn utilization_uses_task_count_not_placements() {
        // minor 1, major 20 → 20 frames; A runs 5×, B 4×, C 1×
        let tasks = [
            Task::new("A", 4, 1, 0),
            Task::new("B", 5, 1, 0),
            Task::new("C", 20, 1, 0),
        ];
        let s = summary_for(&tasks);
        assert_eq!(s.total_frames, 20);
        assert_eq!(s.total_placements, 3);
        assert_eq!(s.frame_placements, 10);
        assert!((s.utilization - 3.0 / 20.0).abs() < 1e-12);
    }

    #[test]
    fn processor_demand_sums_task_utilizations() {
        let s = summary_for(&[Task::new("A", 4, 1, 0), Task::new("B", 8, 2, 0)]);
        assert!((s.processor_demand - 0.5).abs() < 1e-12);
        assert!(s.overloaded_frames.is_empty());
    }

    #[test]
    fn overloaded_frames_are_listed() {
        let s = summary_for(&[Task::new("A", 4, 3, 0), Task::new("B", 8, 2, 0)]);
        assert_eq!(s.overloaded_frames, vec![0]);
    }
}
