//! Global convergence metrics.
//!
//! A single [`ConvergenceMetrics`] instance is owned by the coordinator for the
//! duration of a run. Only the global-convergence check writes to it; the
//! final outcome carries a snapshot.

use serde::{Deserialize, Serialize};

/// Latest stability/coherence readings and the global iteration counter.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ConvergenceMetrics {
    /// Quality of the most recently checked solution. Range: 0.0 to 1.0.
    pub local_stability: f64,

    /// Performance of the most recently checked solution. Range: 0.0 to 1.0.
    pub global_coherence: f64,

    /// Number of global checks performed against an actual solution.
    #[serde(rename = "iterations")]
    pub iteration_count: u32,

    /// Fraction of the global budget consumed when convergence was reached.
    /// Stays at 0.0 if the run never converged.
    pub convergence_rate: f64,
}

impl ConvergenceMetrics {
    /// Record one global check.
    pub fn record(&mut self, performance: f64, quality: f64) {
        self.local_stability = quality;
        self.global_coherence = performance;
        self.iteration_count += 1;
    }

    /// Mark the run converged against a budget of `max_global_iterations`.
    pub fn mark_converged(&mut self, max_global_iterations: u32) {
        self.convergence_rate = if max_global_iterations == 0 {
            1.0
        } else {
            f64::from(self.iteration_count) / f64::from(max_global_iterations)
        };
    }
}
