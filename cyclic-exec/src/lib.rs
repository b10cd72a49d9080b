/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Cyclic-executive schedule builder.
//!
//! Module layout:
//!
//! ```text
//! lib.rs
//! ├── task          – periodic task record + input validation
//! ├── cycle/        – major / minor cycle (LCM / GCD helpers)
//! ├── scheduler/    – feasibility, SETF / HRF ordering, frame table, summary
//! ├── config/       – JSON / YAML task-set loading
//! └── report        – text and JSON rendering
//! ```

pub mod config;
pub mod cycle;
pub mod report;
pub mod scheduler;
pub mod task;
