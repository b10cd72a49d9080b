/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Integer number theory behind the cycle lengths.
//!
//! The major cycle folds [`lcm`] over the task periods and the minor cycle
//! folds [`gcd`].  Frame feasibility also calls [`gcd`] directly, which is
//! why these live outside [`CycleCalculator`](super::CycleCalculator).

use super::CycleError;

/// Greatest common divisor by Euclid's remainder loop.
///
/// `0` acts as the identity: `gcd(0, n) == n`, so folding from `0` over a
/// list of periods yields the GCD of the list.
pub fn gcd(mut a: u64, mut b: u64) -> u64 {
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a
}

/// Least common multiple, or [`CycleError::Overflow`] naming both operands
/// when it does not fit in a `u64`.
///
/// `lcm(0, n)` is `0`.
pub fn lcm(a: u64, b: u64) -> Result<u64, CycleError> {
    if a == 0 || b == 0 {
        return Ok(0);
    }
    (a / gcd(a, b))
        .checked_mul(b)
        .ok_or(CycleError::Overflow { a, b })
}

/// LCM of every value in `periods`; `0` if the slice is empty.
pub fn lcm_of_slice(periods: &[u64]) -> Result<u64, CycleError> {
    match periods.split_first() {
        None => Ok(0),
        Some((&first, rest)) => rest.iter().try_fold(first, |acc, &p| lcm(acc, p)),
    }
}

/// GCD of every value in `periods`; `0` if the slice is empty.
pub fn gcd_of_slice(periods: &[u64]) -> u64 {
    periods.iter().fold(0, |acc, &p| gcd(acc, p))
}

// ── Tests ─────────────────────────────────────────────────────────────────────
