//! The externally visible result of a coordinator run.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::metrics::ConvergenceMetrics;
use super::solution::{Solution, SolutionPayload};

/// Floor on elapsed time when computing efficiency, in seconds.
pub const MIN_ELAPSED_SECS: f64 = 0.001;

/// Timing and size statistics for a run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ComputationalStats {
    /// Wall time of the run in seconds.
    pub total_time: f64,
    /// Nominal parameter count derived from the configured state dimensions.
    pub parameters_used: u64,
    /// Final performance per second of wall time.
    pub efficiency: f64,
}

impl ComputationalStats {
    pub fn new(total_time: f64, parameters_used: u64, performance: f64) -> Self {
        Self {
            total_time,
            parameters_used,
            efficiency: performance / total_time.max(MIN_ELAPSED_SECS),
        }
    }
}

/// Summary of how the planner and executor cooperated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lineage {
    /// Feedback updates the planner absorbed.
    pub planner_updates: u64,
    /// Global checks performed against a real solution.
    pub executor_cycles: u32,
    /// Outer iterations executed.
    pub global_iterations: u32,
    /// Total executor `compute` calls across all cycles.
    pub inner_iterations_total: u64,
    /// Planner re-planning cadence at the end of the run.
    pub planner_cadence: u32,
    pub architecture_label: String,
}

/// Final result of [`Coordinator::reason`](crate::services::Coordinator::reason).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReasoningOutcome {
    pub run_id: Uuid,
    pub converged: bool,
    /// Payload of the last solution, or an empty payload if the executor never ran.
    pub solution: SolutionPayload,
    pub performance: f64,
    pub quality: f64,
    pub convergence_metrics: ConvergenceMetrics,
    pub computational_stats: ComputationalStats,
    pub lineage: Lineage,
}

impl ReasoningOutcome {
    /// Assemble the outcome from the last solution of the run, if any.
    pub fn assemble(
        run_id: Uuid,
        converged: bool,
        last: Option<&Solution>,
        metrics: ConvergenceMetrics,
        total_time: f64,
        parameters_used: u64,
        lineage: Lineage,
    ) -> Self {
        let (solution, performance, quality) = last.map_or_else(
            || (SolutionPayload::default(), 0.0, 0.0),
            |s| (s.result.clone(), s.performance, s.quality),
        );
        Self {
            run_id,
            converged,
            solution,
            performance,
            quality,
            convergence_metrics: metrics,
            computational_stats: ComputationalStats::new(total_time, parameters_used, performance),
            lineage,
        }
    }
}
