//! Major / minor cycle calculation.
//!
//! The **major cycle** of a set of periodic tasks is the Least Common Multiple
//! (LCM) of all their periods: the smallest window after which the whole
//! schedule repeats.  The **minor cycle** (frame size) is their Greatest
//! Common Divisor (GCD): the scheduling quantum the major cycle is cut into.
//!
//! # Numeric range
//!
//! All arithmetic is `u64`.  Every LCM step is checked, so the largest
//! representable major cycle is `u64::MAX` (≈1.8 × 10¹⁹ time units); a task
//! set whose reduced period product goes beyond that yields
//! [`CycleError::Overflow`] instead of a wrapped value.  Independently, the
//! number of frames `major / minor` is capped by a configurable limit so that
//! highly incommensurate periods cannot make the schedule builder iterate
//! for hours.

pub mod math;

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::task::Task;
use math::{gcd_of_slice, lcm_of_slice};

// ── Constants ─────────────────────────────────────────────────────────────────

/// Default upper limit on the number of frames in one major cycle.
pub const DEFAULT_FRAME_LIMIT: u64 = 100_000;

// ── Error type ────────────────────────────────────────────────────────────────

/// Errors that can occur during cycle calculation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CycleError {
    /// The task slice was empty (or every period was zero).
    NoPeriods,

    /// LCM calculation overflowed `u64`.
    ///
    /// Contains the two operands that caused the overflow so the caller can
    /// log a useful message.
    Overflow { a: u64, b: u64 },

    /// `major / minor` exceeded the configured frame limit.
    TooManyFrames { frames: u64, limit: u64 },
}

impl std::fmt::Display for CycleError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CycleError::NoPeriods => write!(f, "no tasks with a valid (non-zero) period"),
            CycleError::Overflow { a, b } => write!(f, "LCM overflow computing lcm({a}, {b})"),
            CycleError::TooManyFrames { frames, limit } => {
                write!(f, "major cycle spans {frames} frames, limit is {limit}")
            }
        }
    }
}

impl std::error::Error for CycleError {}

// ── CycleLengths ──────────────────────────────────────────────────────────────

/// Derived cycle lengths for one task set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CycleLengths {
    /// Major cycle (LCM of all periods).
    pub major: u64,

    /// Minor cycle / frame size (GCD of all periods).
    pub minor: u64,

    /// Distinct periods present in the task set (sorted, deduplicated).
    pub periods: Vec<u64>,
}

impl CycleLengths {
    /// Number of frames in one major cycle.
    pub fn frame_count(&self) -> u64 {
        if self.minor == 0 {
            0
        } else {
            self.major / self.minor
        }
    }
}

// ── CycleCalculator ───────────────────────────────────────────────────────────

/// Computes [`CycleLengths`] for a task set, enforcing a frame-count limit.
///
/// # Example
/// ```rust
/// use cyclic_exec::cycle::CycleCalculator;
/// use cyclic_exec::task::Task;
///
/// let tasks = vec![
///     Task::new("A", 4, 1, 0),
///     Task::new("B", 5, 1, 0),
///     Task::new("C", 20, 2, 0),
/// ];
///
/// let cycles = CycleCalculator::new().calculate(&tasks).unwrap();
/// assert_eq!(cycles.major, 20);
/// assert_eq!(cycles.minor, 1);
/// assert_eq!(cycles.frame_count(), 20);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct CycleCalculator {
    /// Upper bound on `major / minor`.  A calculated value above this limit
    /// causes [`CycleError::TooManyFrames`] to be returned.
    frame_limit: u64,
}

impl CycleCalculator {
    /// Create a calculator with [`DEFAULT_FRAME_LIMIT`].
    pub fn new() -> Self {
        Self {
            frame_limit: DEFAULT_FRAME_LIMIT,
        }
    }

    /// Create a calculator with a custom frame limit.
    pub fn with_limit(frame_limit: u64) -> Self {
        Self { frame_limit }
    }

    /// Largest frame count [`calculate`](Self::calculate) accepts.
    pub fn frame_limit(&self) -> u64 {
        self.frame_limit
    }

    /// Calculate major and minor cycle for `tasks`.
    ///
    /// Tasks with `period == 0` are ignored here; input validation rejects
    /// them before this point in the normal pipeline.
    ///
    /// # Errors
    /// * [`CycleError::NoPeriods`] – no task with a non-zero period.
    /// * [`CycleError::Overflow`] – LCM computation exceeded `u64`.
    /// * [`CycleError::TooManyFrames`] – frame count exceeds the limit.
    pub fn calculate(&self, tasks: &[Task]) -> Result<CycleLengths, CycleError> {
        // Unique periods (sorted for deterministic output)
        let mut periods = nonzero_periods(tasks);
        periods.sort_unstable();
        periods.dedup();

        if periods.is_empty() {
            warn!("No tasks with valid periods found");
            return Err(CycleError::NoPeriods);
        }

        let major = major_cycle(tasks)?;
        let minor = minor_cycle(tasks).ok_or(CycleError::NoPeriods)?;

        let cycles = CycleLengths {
            major,
            minor,
            periods,
        };

        let frames = cycles.frame_count();
        if frames > self.frame_limit {
            warn!(
                major,
                minor,
                frames,
                limit = self.frame_limit,
                "Frame count exceeds configured limit"
            );
            return Err(CycleError::TooManyFrames {
                frames,
                limit: self.frame_limit,
            });
        }

        info!(
            task_count = tasks.len(),
            unique_periods = cycles.periods.len(),
            major,
            minor,
            frames,
            "Calculated cycle lengths"
        );
        for p in &cycles.periods {
            debug!(period = p, frames_per_period = p / minor, "  unique period");
        }

        Ok(cycles)
    }
}

impl Default for CycleCalculator {
    fn default() -> Self {
        Self::new()
    }
}

/// Major cycle (LCM of all non-zero periods), without the frame-count guard.
pub fn major_cycle(tasks: &[Task]) -> Result<u64, CycleError> {
    let periods = nonzero_periods(tasks);
    if periods.is_empty() {
        return Err(CycleError::NoPeriods);
    }
    lcm_of_slice(&periods)
}

/// Minor cycle (GCD of all non-zero periods).  `None` when there is none.
pub fn minor_cycle(tasks: &[Task]) -> Option<u64> {
    match gcd_of_slice(&nonzero_periods(tasks)) {
        0 => None,
        g => Some(g),
    }
}

fn nonzero_periods(tasks: &[Task]) -> Vec<u64> {
    tasks.iter().map(|t| t.period).filter(|&p| p > 0).collect()
}

// ── Tests ─────────────────────────────────────────────────────────────────────
