//! Deterministic improving strategy.
//!
//! Each call closes a fixed share of the gap between the current scores and
//! a perfect result: after `n` calls the optimization score is
//! `1 - 0.3 * decay^n` and resource usage is `0.3 * decay^n`. Constraint
//! satisfaction is always 1. Useful for demos that should converge.

use crate::domain::models::{Candidate, Constraint, Plan, TacticalScores};
use crate::domain::ports::SearchStrategy;

const INITIAL_GAP: f64 = 0.3;

#[derive(Debug, Clone)]
pub struct GeometricStrategy {
    decay: f64,
    gap: f64,
    calls: u64,
}

impl GeometricStrategy {
    /// `decay` is clamped into [0, 1]; 1 never improves, 0 is perfect at once.
    pub fn new(decay: f64) -> Self {
        let decay = if decay.is_finite() { decay.clamp(0.0, 1.0) } else { 1.0 };
        Self {
            decay,
            gap: INITIAL_GAP,
            calls: 0,
        }
    }

    pub const fn calls(&self) -> u64 {
        self.calls
    }
}

impl SearchStrategy for GeometricStrategy {
    fn local_search(&mut self, plan: &Plan) -> Candidate {
        Candidate {
            vector: plan.context.iter().map(|v| v * (1.0 - self.gap)).collect(),
            explored_nodes: 10 * u32::try_from(plan.strategy.branching_factor).unwrap_or(u32::MAX).min(10),
            search_depth: plan.strategy.depth_limit,
            exploration_coverage: 1.0 - self.gap,
        }
    }

    fn tactical_evaluate(&mut self, _candidate: &Candidate, _constraints: &[Constraint]) -> TacticalScores {
        self.calls += 1;
        self.gap *= self.decay;
        TacticalScores {
            constraint_satisfaction: 1.0,
            optimization_score: 1.0 - self.gap,
            resource_usage: self.gap,
        }
    }

    fn name(&self) -> &str {
        "geometric"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scores_improve_monotonically() {
        let mut s = GeometricStrategy::new(0.8);
        let plan = Plan::default();
        let mut last = 0.0;
        for _ in 0..20 {
            let c = s.local_search(&plan);
            let scores = s.tactical_evaluate(&c, &plan.constraints);
            assert!(scores.optimization_score > last);
            last = scores.optimization_score;
        }
        assert!(last > 0.99);
        assert_eq!(s.calls(), 20);
    }

    #[test]
    fn test_first_call_values() {
        let mut s = GeometricStrategy::new(0.5);
        let c = s.local_search(&Plan::default());
        let scores = s.tactical_evaluate(&c, &[]);
        assert!((scores.optimization_score - 0.85).abs() < 1e-12);
        assert!((scores.resource_usage - 0.15).abs() < 1e-12);
    }

    #[test]
    fn test_decay_is_clamped() {
        let mut s = GeometricStrategy::new(f64::NAN);
        let c = s.local_search(&Plan::default());
        let scores = s.tactical_evaluate(&c, &[]);
        assert!((scores.optimization_score - 0.7).abs() < 1e-12);
    }
}
