/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

use std::path::PathBuf;
use std::process;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use tracing::{error, info, warn};

use cyclic_exec::config::load_task_set;
use cyclic_exec::cycle::DEFAULT_FRAME_LIMIT;
use cyclic_exec::report::{render_json, render_text};
use cyclic_exec::scheduler::{CyclicScheduler, HeuristicChoice, SchedulerSettings};

// ── CLI argument definition ───────────────────────────────────────────────────

/// Output format for the schedule report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

/// Cyclic-executive schedule builder.
///
/// Exit status: 0 schedulable, 1 not schedulable, 2 invalid input.
///
/// Example:
///   cyclic-exec demos/tasks.yaml --heuristic hrf --format json
#[derive(Debug, Parser)]
#[command(
    name = "cyclic-exec",
    about = "Cyclic-executive schedule builder",
    long_about = None,
)]
struct Cli {
    /// Task-set file (JSON or YAML).
    #[arg(default_value = "tarefas.json")]
    tasks: PathBuf,

    /// Report format written to stdout.
    #[arg(short = 'f', long = "format", value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Ordering heuristic: auto, setf or hrf.
    #[arg(short = 'H', long = "heuristic", default_value = "auto")]
    heuristic: HeuristicChoice,

    /// Maximum number of frames in one major cycle.
    #[arg(short = 'm', long = "max-frames", default_value_t = DEFAULT_FRAME_LIMIT)]
    max_frames: u64,
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() {
    // Initialise structured logging on stderr; stdout carries the report.
    // Level is controlled by the RUST_LOG env-var (e.g. RUST_LOG=debug).
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    info!(
        tasks      = %cli.tasks.display(),
        format     = ?cli.format,
        heuristic  = ?cli.heuristic,
        max_frames = cli.max_frames,
        "Configuration"
    );

    match run(&cli) {
        Ok(true) => {}
        Ok(false) => process::exit(1),
        Err(e) => {
            error!("{:#}", e);
            process::exit(2);
        }
    }
}

/// Load, analyse and print.  Returns whether the task set is schedulable.
fn run(cli: &Cli) -> Result<bool> {
    let tasks = load_task_set(&cli.tasks)?;

    let scheduler = CyclicScheduler::with_settings(SchedulerSettings {
        frame_limit: cli.max_frames,
        heuristic: cli.heuristic,
    });
    let analysis = scheduler
        .analyze(&tasks)
        .with_context(|| format!("Cannot schedule task set {}", cli.tasks.display()))?;

    match cli.format {
        OutputFormat::Text => print!("{}", render_text(&analysis)),
        OutputFormat::Json => println!(
            "{}",
            render_json(&analysis).context("Failed to serialise report")?
        ),
    }

    if !analysis.is_schedulable() {
        warn!("Task set is not schedulable");
    }
    Ok(analysis.is_schedulable())
}
