//! Task-set file loading.
//!
//! Task sets are read from JSON or YAML.  The expected structure is:
//! ```yaml
//! tasks:
//!   - id: T1
//!     period: 4
//!     execution_time: 1
//!     priority: 1
//!   - id: T2
//!     period: 8
//!     execution_time: 2
//! ```
//!
//! The legacy Portuguese layout (`tarefas`, `periodo`, `tempo_execucao`,
//! `prioridade`) is accepted as well, so existing `tarefas.json` files load
//! unchanged.
//!
//! This layer only checks that the numbers are representable.  Scheduling
//! invariants (non-zero period, `execution_time <= period`, unique ids) are
//! enforced by [`CyclicScheduler::analyze`](crate::scheduler::CyclicScheduler::analyze).

use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::{debug, info};

use crate::task::Task;

// ── Private deserialization types ─────────────────────────────────────────────

/// Top-level wrapper that maps directly onto the file layout.
#[derive(Debug, Deserialize)]
struct TaskSetFile {
    #[serde(alias = "tarefas")]
    tasks: Vec<TaskEntry>,
}

/// Per-task fields as they appear in the file.
///
/// Numbers are read as signed integers so that a negative value produces a
/// message naming the task instead of a bare serde type error.
#[derive(Debug, Deserialize)]
struct TaskEntry {
    id: String,
    #[serde(alias = "periodo")]
    period: i64,
    #[serde(alias = "tempo_execucao")]
    execution_time: i64,
    #[serde(default, alias = "prioridade")]
    priority: i64,
}

impl TaskEntry {
    fn into_task(self) -> Result<Task> {
        let period = u64::try_from(self.period)
            .with_context(|| format!("task '{}': period {} is negative", self.id, self.period))?;
        let execution_time = u64::try_from(self.execution_time).with_context(|| {
            format!(
                "task '{}': execution time {} is negative",
                self.id, self.execution_time
            )
        })?;
        let priority = i32::try_from(self.priority).with_context(|| {
            format!(
                "task '{}': priority {} is out of range",
                self.id, self.priority
            )
        })?;

        Ok(Task {
            id: self.id,
            period,
            execution_time,
            priority,
        })
    }
}

// ── Format ────────────────────────────────────────────────────────────────────

/// Serialization format of a task-set file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskSetFormat {
    Json,
    Yaml,
    /// Unknown extension: try JSON, then YAML.
    Auto,
}

impl TaskSetFormat {
    /// Pick the format from the file extension.
    pub fn from_path(path: &Path) -> Self {
        match path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .as_deref()
        {
            Some("json") => TaskSetFormat::Json,
            Some("yaml") | Some("yml") => TaskSetFormat::Yaml,
            _ => TaskSetFormat::Auto,
        }
    }
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Read and parse the task set at `path`.
///
/// # Errors
/// Returns an error if the file cannot be read, is structurally invalid, or
/// contains a negative or out-of-range number.
pub fn load_task_set(path: &Path) -> Result<Vec<Task>> {
    info!("Loading task set from: {}", path.display());

    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Cannot open task-set file: {}", path.display()))?;

    let tasks = parse_task_set(&content, TaskSetFormat::from_path(path))
        .with_context(|| format!("Failed to parse task-set file: {}", path.display()))?;

    info!("Loaded {} task(s)", tasks.len());
    Ok(tasks)
}

/// Parse a task set from an in-memory string.
pub fn parse_task_set(content: &str, format: TaskSetFormat) -> Result<Vec<Task>> {
    let file: TaskSetFile = match format {
        TaskSetFormat::Json => serde_json::from_str(content).context("invalid JSON task set")?,
        TaskSetFormat::Yaml => serde_yaml::from_str(content).context("invalid YAML task set")?,
        TaskSetFormat::Auto => match serde_json::from_str(content) {
            Ok(file) => file,
            Err(json_err) => {
                debug!(error = %json_err, "not JSON, retrying as YAML");
                serde_yaml::from_str(content)
                    .context("task set is neither valid JSON nor valid YAML")?
            }
        },
    };

    file.tasks
        .into_iter()
        .map(|entry| -> Result<Task> {
            let task = entry.into_task()?;
            debug!(
                "  Task: {} | period: {} | exec: {} | priority: {}",
                task.id, task.period, task.execution_time, task.priority
            );
            Ok(task)
        })
        .collect()
}

// ── Tests ─────────────────────────────────────────────────────────────────────
