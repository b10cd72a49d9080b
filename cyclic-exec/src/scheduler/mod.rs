//! Cyclic-executive scheduler.
//!
//! [`CyclicScheduler::analyze`] runs the whole pipeline over a borrowed task
//! slice:
//!
//! ```text
//! &[Task] ─► validate ─► CycleCalculator ─► feasibility ─┬─► NotSchedulable
//!                                                        └─► heuristic ─► frames ─► summary
//! ```
//!
//! # Design decisions
//!
//! | Topic | Choice |
//! |---|---|
//! | State | Stateless `analyze()`: settings are immutable, all per-run data is local |
//! | Infeasibility | A [`FeasibilityVerdict`] value inside `Ok(Analysis)`, never an error or exit |
//! | Heuristic | Tagged [`Heuristic`] enum carrying its comparator, resolved once per run |
//! | Frames | Hold `&Task` borrowed from the caller's slice, never copied |
//! | Runaway frame counts | Rejected by the frame limit before any frame is built |
//!
//! # Example
//! ```rust
//! use cyclic_exec::scheduler::{CyclicScheduler, Heuristic};
//! use cyclic_exec::task::Task;
//!
//! let tasks = vec![Task::new("A", 4, 1, 1), Task::new("B", 8, 2, 2)];
//! let analysis = CyclicScheduler::new().analyze(&tasks).unwrap();
//!
//! assert!(analysis.verdict.is_schedulable());
//! assert_eq!(analysis.heuristic, Some(Heuristic::Setf));
//! assert_eq!(analysis.schedule.as_ref().unwrap().frame_count(), 2);
//! assert_eq!(analysis.summary.as_ref().unwrap().utilization, 1.0);
//! ```

pub mod error;
pub mod feasibility;
pub mod frame;
pub mod heuristic;
pub mod summary;

pub use error::{SchedulerError, TaskDefect};
pub use feasibility::{FeasibilityVerdict, Violation};
pub use frame::{Frame, Schedule};
pub use heuristic::{Heuristic, HeuristicChoice};
pub use summary::Summary;

use tracing::info;

use crate::cycle::{CycleCalculator, CycleLengths, DEFAULT_FRAME_LIMIT};
use crate::task::{validate_task_set, Task};

// ── Settings ──────────────────────────────────────────────────────────────────

/// Tunables for one [`CyclicScheduler`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SchedulerSettings {
    /// Upper bound on `major / minor`.
    pub frame_limit: u64,

    /// Heuristic selection policy.
    pub heuristic: HeuristicChoice,
}

impl Default for SchedulerSettings {
    fn default() -> Self {
        Self {
            frame_limit: DEFAULT_FRAME_LIMIT,
            heuristic: HeuristicChoice::Auto,
        }
    }
}

// ── Analysis ──────────────────────────────────────────────────────────────────

/// Result of one scheduling run.
///
/// `schedule` and `summary` are `Some` exactly when `verdict` is
/// [`FeasibilityVerdict::Schedulable`].
#[derive(Debug, Clone, PartialEq)]
pub struct Analysis<'a> {
    pub cycles: CycleLengths,

    /// Ordering heuristic used to build the frames; `None` when the set was
    /// rejected before frame assignment.
    pub heuristic: Option<Heuristic>,

    pub verdict: FeasibilityVerdict,

    pub schedule: Option<Schedule<'a>>,

    pub summary: Option<Summary>,
}

impl<'a> Analysis<'a> {
    pub fn is_schedulable(&self) -> bool {
        self.verdict.is_schedulable()
    }

    /// Split into `(verdict, schedule, summary)`.
    pub fn into_parts(self) -> (FeasibilityVerdict, Option<Schedule<'a>>, Option<Summary>) {
        (self.verdict, self.schedule, self.summary)
    }
}

// ── CyclicScheduler ───────────────────────────────────────────────────────────

/// The cyclic-executive scheduler.
///
/// Holds only immutable settings, so one instance can be shared freely
/// between threads and reused for any number of task sets.
#[derive(Debug, Clone, Copy, Default)]
pub struct CyclicScheduler {
    settings: SchedulerSettings,
}

impl CyclicScheduler {
    /// Scheduler with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_settings(settings: SchedulerSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &SchedulerSettings {
        &self.settings
    }

    // ── Public entry point ────────────────────────────────────────────────────

    /// Analyse `tasks` and, when feasible, build the frame table.
    ///
    /// # Errors
    /// Returns a [`SchedulerError`] for malformed input (empty set, invalid
    /// or duplicate task) and for cycle arithmetic that cannot be carried out
    /// (overflow, frame limit).  An infeasible but well-formed task set is
    /// **not** an error: it yields `Ok` with a `NotSchedulable` verdict.
    pub fn analyze<'a>(&self, tasks: &'a [Task]) -> Result<Analysis<'a>, SchedulerError> {
        // ── Preconditions ─────────────────────────────────────────────────────
        validate_task_set(tasks)?;

        let calculator = CycleCalculator::with_limit(self.settings.frame_limit);
        info!(
            task_count = tasks.len(),
            frame_limit = calculator.frame_limit(),
            "=== CyclicScheduler::analyze() ==="
        );

        // ── Cycle lengths ─────────────────────────────────────────────────────
        let cycles = calculator.calculate(tasks)?;

        // ── Feasibility ───────────────────────────────────────────────────────
        let verdict = feasibility::check(tasks, &cycles);
        if !verdict.is_schedulable() {
            return Ok(Analysis {
                cycles,
                heuristic: None,
                verdict,
                schedule: None,
                summary: None,
            });
        }

        // ── Frame assignment ──────────────────────────────────────────────────
        let heuristic = self.settings.heuristic.resolve(tasks);
        info!(heuristic = %heuristic, name = heuristic.full_name(), "Ordering tasks");

        let schedule = frame::build_schedule(tasks, &cycles, heuristic);
        let summary = summary::summarize(tasks, &cycles, &schedule);

        info!(
            frames = schedule.frame_count(),
            placements = schedule.placements(),
            "=== Scheduling complete ==="
        );

        Ok(Analysis {
            cycles,
            heuristic: Some(heuristic),
            verdict,
            schedule: Some(schedule),
            summary: Some(summary),
        })
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    // ── Test helpers ──────────────────────────────────────────────────────────

    fn make_task(id: &str, period: u64, execution_time: u64) -> Task {
        Task::new(id, period, execution_time, 0)
    }

    fn frame_ids<'a>(analysis: &'a Analysis<'_>) -> Vec<Vec<&'a str>> {
        analysis
            .schedule
            .as_ref()
            .unwrap()
            .frames
            .iter()
            .map(|f| f.tasks.iter().map(|t| t.id.as_str()).collect())
            .collect()
    }

    // ── Happy path ────────────────────────────────────────────────────────────

    #[test]
    fn schedulable_set_produces_schedule_and_summary() {
        let tasks = vec![make_task("A", 4, 1), make_task("B", 8, 2)];
        let analysis = CyclicScheduler::new().analyze(&tasks).unwrap();

        assert_eq!(analysis.cycles.minor, 4);
        assert_eq!(analysis.cycles.major, 8);
        assert!(analysis.is_schedulable());
        assert_eq!(frame_ids(&analysis), vec![vec!["A", "B"], vec!["A"]]);

        let summary = analysis.summary.unwrap();
        assert_eq!(summary.total_frames, 2);
        assert!((summary.utilization - 1.0).abs() < 1e-12);
    }

    #[test]
    fn forced_heuristic_is_used() {
        let tasks = vec![make_task("slow", 8, 1), make_task("fast", 4, 3)];
        let settings = SchedulerSettings {
            heuristic: HeuristicChoice::Forced(Heuristic::Hrf),
            ..Default::default()
        };
        let analysis = CyclicScheduler::with_settings(settings)
            .analyze(&tasks)
            .unwrap();
        assert_eq!(analysis.heuristic, Some(Heuristic::Hrf));
        assert_eq!(frame_ids(&analysis)[0], vec!["fast", "slow"]);
    }

    #[test]
    fn all_unit_periods_select_hrf() {
        let tasks = vec![make_task("A", 1, 1), make_task("B", 1, 1)];
        let analysis = CyclicScheduler::new().analyze(&tasks).unwrap();
        assert_eq!(analysis.heuristic, Some(Heuristic::Hrf));
    }

    // ── Infeasible ────────────────────────────────────────────────────────────

    #[test]
    fn infeasible_set_has_no_schedule() {
        // minor = gcd(10, 15) = 5, C = 6
        let tasks = vec![make_task("A", 10, 1), make_task("B", 15, 6)];
        let analysis = CyclicScheduler::new().analyze(&tasks).unwrap();

        assert!(!analysis.is_schedulable());
        assert_eq!(analysis.heuristic, None);
        let (verdict, schedule, summary) = analysis.into_parts();
        assert!(matches!(
            verdict,
            FeasibilityVerdict::NotSchedulable(Violation::FrameTooSmall { ref task, .. }) if task == "B"
        ));
        assert!(schedule.is_none());
        assert!(summary.is_none());
    }

    // ── Errors ────────────────────────────────────────────────────────────────

    #[test]
    fn empty_tasks_returns_no_tasks_error() {
        let err = CyclicScheduler::new().analyze(&[]).unwrap_err();
        assert!(matches!(err, SchedulerError::NoTasks));
    }

    #[test]
    fn execution_longer_than_period_is_input_error() {
        let tasks = vec![make_task("A", 4, 5)];
        let err = CyclicScheduler::new().analyze(&tasks).unwrap_err();
        assert!(matches!(
            err,
            SchedulerError::InvalidTask {
                reason: TaskDefect::ExecutionExceedsPeriod { .. },
                ..
            }
        ));
    }

    #[test]
    fn frame_limit_is_enforced() {
        let tasks = vec![make_task("A", 7, 1), make_task("B", 11, 1)];
        let settings = SchedulerSettings {
            frame_limit: 50,
            ..Default::default()
        };
        let err = CyclicScheduler::with_settings(settings)
            .analyze(&tasks)
            .unwrap_err();
        assert!(matches!(
            err,
            SchedulerError::TooManyFrames {
                frames: 77,
                limit: 50
            }
        ));
    }

    #[test]
    fn overflow_is_an_error() {
        let tasks: Vec<Task> = [65_537u64, 65_539, 65_543, 65_551, 65_557]
            .iter()
            .enumerate()
            .map(|(i, &p)| make_task(&format!("T{i}"), p, 1))
            .collect();
        let settings = SchedulerSettings {
            frame_limit: u64::MAX,
            ..Default::default()
        };
        let err = CyclicScheduler::with_settings(settings)
            .analyze(&tasks)
            .unwrap_err();
        assert!(matches!(err, SchedulerError::Overflow { .. }));
    }

    // ── General ───────────────────────────────────────────────────────────────

    #[test]
    fn scheduler_is_deterministic() {
        let tasks = vec![
            make_task("t1", 10, 2),
            make_task("t2", 20, 2),
            make_task("t3", 40, 1),
            make_task("t4", 20, 1),
        ];
        let sched = CyclicScheduler::new();
        let reference = sched.analyze(&tasks).unwrap();

        for _ in 0..20 {
            assert_eq!(
                sched.analyze(&tasks).unwrap(),
                reference,
                "scheduler produced different output on repeated identical input"
            );
        }
    }
}
