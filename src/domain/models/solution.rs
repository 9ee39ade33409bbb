//! Candidate solutions produced by the fast executor.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Score used in place of a missing or non-finite reading.
pub const NEUTRAL_SCORE: f64 = 0.5;

/// Clamp a reading into [0, 1], replacing NaN and infinities with `fallback`.
pub fn unit_interval(value: f64, fallback: f64) -> f64 {
    if value.is_finite() {
        value.clamp(0.0, 1.0)
    } else {
        fallback
    }
}

/// Output of a strategy's local search step.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Candidate {
    /// Domain payload. The executor blends its own state toward it.
    pub vector: Vec<f64>,
    pub explored_nodes: u32,
    pub search_depth: usize,
    /// Fraction of the search space covered. Range: 0.0 to 1.0.
    pub exploration_coverage: f64,
}

/// Output of a strategy's tactical evaluation step.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TacticalScores {
    /// Fraction of plan constraints satisfied. Range: 0.0 to 1.0.
    #[serde(default = "neutral")]
    pub constraint_satisfaction: f64,
    /// Range: 0.0 to 1.0.
    #[serde(default = "neutral")]
    pub optimization_score: f64,
    /// Fraction of the resource budget consumed. Range: 0.0 to 1.0.
    #[serde(default = "neutral")]
    pub resource_usage: f64,
}

const fn neutral() -> f64 {
    NEUTRAL_SCORE
}

impl Default for TacticalScores {
    fn default() -> Self {
        Self {
            constraint_satisfaction: NEUTRAL_SCORE,
            optimization_score: NEUTRAL_SCORE,
            resource_usage: NEUTRAL_SCORE,
        }
    }
}

impl TacticalScores {
    pub const fn new(constraint_satisfaction: f64, optimization_score: f64, resource_usage: f64) -> Self {
        Self {
            constraint_satisfaction,
            optimization_score,
            resource_usage,
        }
    }

    /// Every score forced into [0, 1].
    #[must_use]
    pub fn sanitized(self) -> Self {
        Self {
            constraint_satisfaction: unit_interval(self.constraint_satisfaction, NEUTRAL_SCORE),
            optimization_score: unit_interval(self.optimization_score, NEUTRAL_SCORE),
            resource_usage: unit_interval(self.resource_usage, NEUTRAL_SCORE),
        }
    }

    /// Mean of optimization, constraint satisfaction and resource efficiency.
    pub fn progress(&self) -> f64 {
        let efficiency = 1.0 - self.resource_usage;
        unit_interval(
            (self.optimization_score + self.constraint_satisfaction + efficiency) / 3.0,
            0.0,
        )
    }

    /// Optimization score plus a bonus of up to 0.2 for unused resources.
    pub fn performance(&self) -> f64 {
        let bonus = (1.0 - self.resource_usage) * 0.2;
        unit_interval((self.optimization_score + bonus).min(1.0), 0.0)
    }

    /// Optimization score discounted by constraint violations.
    pub fn quality(&self) -> f64 {
        unit_interval(self.optimization_score * self.constraint_satisfaction, 0.0)
    }
}

/// The domain-opaque part of a solution.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SolutionPayload {
    pub candidate: Candidate,
    pub scores: TacticalScores,
    pub actions_taken: Vec<String>,
}

/// One refined candidate, scored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Solution {
    pub result: SolutionPayload,
    /// Range: 0.0 to 1.0.
    pub progress: f64,
    /// Inner iteration that produced this solution, restarting every outer cycle.
    pub iteration: u32,
    /// Range: 0.0 to 1.0.
    pub performance: f64,
    /// Range: 0.0 to 1.0.
    pub quality: f64,
    pub created_at: DateTime<Utc>,
}

impl Solution {
    /// Score a candidate and wrap it as the solution for `iteration`.
    pub fn scored(candidate: Candidate, scores: TacticalScores, iteration: u32) -> Self {
        let scores = scores.sanitized();
        let action_count = (candidate.explored_nodes / 10).min(5);
        let actions_taken = (0..action_count).map(|i| format!("action_{i}")).collect();
        Self {
            progress: scores.progress(),
            performance: scores.performance(),
            quality: scores.quality(),
            iteration,
            result: SolutionPayload {
                candidate,
                scores,
                actions_taken,
            },
            created_at: Utc::now(),
        }
    }
}
