/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Rendering of an [`Analysis`] for humans (text) and tools (JSON).

use std::fmt;

use serde::Serialize;

use crate::cycle::CycleLengths;
use crate::scheduler::{Analysis, FeasibilityVerdict, Heuristic, Summary, Violation};

// ── Text ──────────────────────────────────────────────────────────────────────

/// `Display` adapter that prints the console report for an analysis.
pub struct TextReport<'r, 'a>(pub &'r Analysis<'a>);

impl fmt::Display for TextReport<'_, '_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let analysis = self.0;

        writeln!(f, "Cyclic Executive Cycle Calculation:")?;
        writeln!(f, "-----------------------------------")?;
        writeln!(f, "Major cycle: {} time units", analysis.cycles.major)?;
        writeln!(f, "Minor cycle: {} time units", analysis.cycles.minor)?;
        writeln!(f)?;

        if let FeasibilityVerdict::NotSchedulable(violation) = &analysis.verdict {
            writeln!(f, "NOT SCHEDULABLE")?;
            return writeln!(f, "  {violation}");
        }

        if let (Some(heuristic), Some(schedule)) = (analysis.heuristic, &analysis.schedule) {
            writeln!(
                f,
                "Suggested schedule (heuristic: {} - {}):",
                heuristic.full_name(),
                heuristic
            )?;
            writeln!(f, "{}", "-".repeat(70))?;
            for frame in &schedule.frames {
                writeln!(f, "Frame {} (t = {}):", frame.index + 1, frame.start)?;
                if frame.is_empty() {
                    writeln!(f, "  (idle)")?;
                }
                for task in &frame.tasks {
                    writeln!(
                        f,
                        "  - {}: execution time = {}, period = {}, priority = {}",
                        task.id, task.execution_time, task.period, task.priority
                    )?;
                }
            }
        }

        if let Some(summary) = &analysis.summary {
            write_summary(f, summary)?;
        }
        Ok(())
    }
}

fn write_summary(f: &mut fmt::Formatter<'_>, summary: &Summary) -> fmt::Result {
    writeln!(f)?;
    writeln!(f, "Summary:")?;
    writeln!(f, "-------")?;
    writeln!(f, "Total frames: {}", summary.total_frames)?;
    writeln!(f, "Task interchanges per cycle: {}", summary.total_placements)?;
    writeln!(f, "CPU utilization: {:.1}%", summary.utilization_percent())?;
    writeln!(f, "Frame placements: {}", summary.frame_placements)?;
    writeln!(
        f,
        "Processor demand: {:.1}%",
        summary.processor_demand * 100.0
    )?;
    if !summary.overloaded_frames.is_empty() {
        let frames: Vec<String> = summary
            .overloaded_frames
            .iter()
            .map(|i| (i + 1).to_string())
            .collect();
        writeln!(f, "Overloaded frames: {}", frames.join(", "))?;
    }
    Ok(())
}

/// Render the console report.
pub fn render_text(analysis: &Analysis<'_>) -> String {
    TextReport(analysis).to_string()
}

// ── JSON ──────────────────────────────────────────────────────────────────────

/// Serializable view of an analysis.  Frames list task ids only.
#[derive(Debug, Serialize)]
pub struct Report<'r> {
    pub schedulable: bool,
    pub cycles: &'r CycleLengths,
    pub heuristic: Option<Heuristic>,
    /// `"schedulable"` or `"not_schedulable"`.
    pub verdict: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub violation: Option<&'r Violation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub frames: Option<Vec<FrameView<'r>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<&'r Summary>,
}

#[derive(Debug, Serialize)]
pub struct FrameView<'r> {
    pub index: u64,
    pub start: u64,
    pub load: u64,
    pub slack: u64,
    pub tasks: Vec<&'r str>,
}

impl<'r> Report<'r> {
    pub fn new(analysis: &'r Analysis<'_>) -> Self {
        let frames = analysis.schedule.as_ref().map(|schedule| {
            schedule
                .frames
                .iter()
                .map(|frame| FrameView {
                    index: frame.index,
                    start: frame.start,
                    load: frame.load(),
                    slack: frame.slack(schedule.minor),
                    tasks: frame.tasks.iter().map(|t| t.id.as_str()).collect(),
                })
                .collect()
        });

        Self {
            schedulable: analysis.is_schedulable(),
            cycles: &analysis.cycles,
            heuristic: analysis.heuristic,
            verdict: match analysis.verdict {
                FeasibilityVerdict::Schedulable => "schedulable",
                FeasibilityVerdict::NotSchedulable(_) => "not_schedulable",
            },
            violation: analysis.verdict.violation(),
            frames,
            summary: analysis.summary.as_ref(),
        }
    }
}

/// Render the analysis as pretty-printed JSON.
pub fn render_json(analysis: &Analysis<'_>) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&Report::new(analysis))
}

// ── Tests ─────────────────────────────────────────────────────────────────────
