//! Run reports and the statistics summary printer
//!
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

use std::io::{self, Write};
use std::time::Duration;

use serde::Serialize;

use flowbench_core::{Capacity, MaxFlowResult, MinCut, StatisticsSummary};

/// Everything reported about one strategy run
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub strategy: String,
    /// Heap fan-out, for the fattest-path strategy only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub arity: Option<usize>,
    pub max_flow: Capacity,
    pub seconds: f64,
    pub summary: StatisticsSummary,
    /// Cut certificate, present when verification ran
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_cut: Option<MinCut>,
    /// Per-iteration counters, present with `--stats`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub iterations: Option<IterationTrace>,
}

/// Per-iteration sequences from the engine statistics
#[derive(Debug, Clone, Serialize)]
pub struct IterationTrace {
    pub vertices: Vec<u64>,
    pub edges: Vec<u64>,
    pub path_lengths: Vec<u64>,
    pub path_flows: Vec<Capacity>,
}

impl RunReport {
    pub fn new(result: &MaxFlowResult, arity: Option<usize>, elapsed: Duration, with_iterations: bool) -> Self {
        let statistics = &result.statistics;
        let iterations = with_iterations.then(|| IterationTrace {
            vertices: statistics.iteration_vertices.clone(),
            edges: statistics.iteration_edges.clone(),
            path_lengths: statistics.path_lengths.clone(),
            path_flows: statistics.path_flows.clone(),
        });

        Self {
            strategy: result.strategy.clone(),
            arity,
            max_flow: result.max_flow,
            seconds: elapsed.as_secs_f64(),
            summary: statistics.summary(),
            min_cut: None,
            iterations,
        }
    }

    /// Strategy name with its fan-out when relevant
    pub fn label(&self) -> String {
        match self.arity {
            Some(k) => format!("{} (k={k})", self.strategy),
            None => self.strategy.clone(),
        }
    }
}

/// Print the outcome of one run
pub fn write_result<W: Write>(out: &mut W, report: &RunReport) -> io::Result<()> {
    writeln!(out, "Maximum flow: {}", report.max_flow)?;
    writeln!(out, "Time taken: {:.6} seconds", report.seconds)?;
    if let Some(cut) = &report.min_cut {
        writeln!(
            out,
            "Verified: min cut of {} arcs with capacity {}",
            cut.arcs.len(),
            cut.capacity
        )?;
    }
    Ok(())
}

/// Print the statistics summary of one run
pub fn write_summary<W: Write>(out: &mut W, summary: &StatisticsSummary) -> io::Result<()> {
    writeln!(out, "Total iterations: {}", summary.iterations)?;
    writeln!(out, "Total vertices visited: {}", summary.vertices_visited)?;
    writeln!(out, "Total edges visited: {}", summary.edges_visited)?;
    if summary.iterations > 0 {
        writeln!(out, "Average vertices per iteration: {:.3}", summary.average_vertices)?;
        writeln!(out, "Average edges per iteration: {:.3}", summary.average_edges)?;
        writeln!(out, "Average path length: {:.3}", summary.average_path_length)?;
        writeln!(out, "Longest path: {}", summary.longest_path)?;
    }
    Ok(())
}

/// One line per run comparing flow, iterations and time
pub fn write_comparison<W: Write>(out: &mut W, reports: &[RunReport]) -> io::Result<()> {
    let width = reports.iter().map(|report| report.label().len()).max().unwrap_or(0);
    writeln!(
        out,
        "{:<width$}  {:>12}  {:>10}  {:>12}",
        "strategy", "max flow", "iterations", "seconds"
    )?;
    for report in reports {
        writeln!(
            out,
            "{:<width$}  {:>12}  {:>10}  {:>12.6}",
            report.label(),
            report.max_flow,
            report.summary.iterations,
            report.seconds
        )?;
    }
    Ok(())
}
