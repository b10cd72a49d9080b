/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Task-ordering heuristics for frame assignment.
//!
//! The heuristic is chosen once per run from the mean periodicity rate
//! `mean(1 / Tᵢ)`:
//!
//! | Mean rate | Heuristic | Order inside a frame |
//! |---|---|---|
//! | `< 1` | [`Heuristic::Setf`] | ascending execution time |
//! | `≥ 1` | [`Heuristic::Hrf`] | descending rate (ascending period) |
//!
//! Because every period is a positive integer, the mean rate only reaches
//! `1` when every period is `1`.

use std::cmp::Ordering;
use std::str::FromStr;

use serde::Serialize;
use tracing::debug;

use crate::task::Task;

// ── Heuristic ─────────────────────────────────────────────────────────────────

/// Ordering strategy applied to the tasks of every frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Heuristic {
    /// Shortest Execution Time First.
    Setf,
    /// Highest Rate First.
    Hrf,
}

impl Heuristic {
    /// Select a heuristic from the mean periodicity rate of `tasks`.
    ///
    /// An empty slice selects `Setf`.
    pub fn select(tasks: &[Task]) -> Self {
        let mean = mean_rate(tasks);
        let heuristic = if mean < 1.0 {
            Heuristic::Setf
        } else {
            Heuristic::Hrf
        };
        debug!(mean_rate = mean, heuristic = %heuristic, "Selected ordering heuristic");
        heuristic
    }

    /// Comparator for this heuristic.
    ///
    /// HRF compares periods as integers (shorter period = higher rate), so
    /// no floating-point rounding can reorder two tasks.
    pub fn compare(self, a: &Task, b: &Task) -> Ordering {
        match self {
            Heuristic::Setf => a.execution_time.cmp(&b.execution_time),
            Heuristic::Hrf => a.period.cmp(&b.period),
        }
    }

    /// Stable sort of task references by this heuristic.  Equal keys keep
    /// their input order.
    pub fn order<'a>(self, tasks: &'a [Task]) -> Vec<&'a Task> {
        let mut ordered: Vec<&Task> = tasks.iter().collect();
        ordered.sort_by(|a, b| self.compare(a, b));
        ordered
    }

    /// Short tag, e.g. `"SETF"`.
    pub fn abbreviation(self) -> &'static str {
        match self {
            Heuristic::Setf => "SETF",
            Heuristic::Hrf => "HRF",
        }
    }

    /// Human-readable name used in the text report.
    pub fn full_name(self) -> &'static str {
        match self {
            Heuristic::Setf => "Shortest Execution Time First",
            Heuristic::Hrf => "Highest Rate First",
        }
    }
}

impl std::fmt::Display for Heuristic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.abbreviation())
    }
}

/// Mean of `1 / period` over `tasks`.  `0.0` for an empty slice.
pub fn mean_rate(tasks: &[Task]) -> f64 {
    if tasks.is_empty() {
        return 0.0;
    }
    tasks.iter().map(Task::rate).sum::<f64>() / tasks.len() as f64
}

// ── HeuristicChoice ───────────────────────────────────────────────────────────

/// Caller preference: let the scheduler pick, or force one heuristic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HeuristicChoice {
    #[default]
    Auto,
    Forced(Heuristic),
}

impl HeuristicChoice {
    /// Resolve the choice against a concrete task set.
    pub fn resolve(self, tasks: &[Task]) -> Heuristic {
        match self {
            HeuristicChoice::Auto => Heuristic::select(tasks),
            HeuristicChoice::Forced(h) => h,
        }
    }
}

impl FromStr for HeuristicChoice {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "auto" => Ok(HeuristicChoice::Auto),
            "setf" => Ok(HeuristicChoice::Forced(Heuristic::Setf)),
            "hrf" => Ok(HeuristicChoice::Forced(Heuristic::Hrf)),
            other => Err(format!(
                "unknown heuristic '{other}' (valid: auto, setf, hrf)"
            )),
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
