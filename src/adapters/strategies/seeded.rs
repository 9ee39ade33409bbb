//! Seeded sampling strategy.
//!
//! Draws every reading uniformly from a fixed range, the way a placeholder
//! search would, but from a seeded generator so a run can be replayed
//! exactly.

use std::ops::Range;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::domain::models::{Candidate, Constraint, Plan, TacticalScores};
use crate::domain::ports::SearchStrategy;

const EXPLORED_NODES: Range<u32> = 10..100;
const COVERAGE: Range<f64> = 0.6..0.95;
const OPTIMIZATION: Range<f64> = 0.7..0.98;
const RESOURCE_USAGE: Range<f64> = 0.3..0.8;
const CANDIDATE_SPREAD: f64 = 0.5;

/// Probability that any single constraint is satisfied.
const SATISFACTION_ODDS: f64 = 0.9;

/// Default candidate vector length when the plan carries no context.
const DEFAULT_CANDIDATE_LEN: usize = 256;

#[derive(Debug, Clone)]
pub struct SeededStrategy {
    rng: StdRng,
    candidate_len: usize,
}

impl SeededStrategy {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            candidate_len: DEFAULT_CANDIDATE_LEN,
        }
    }

    /// Length of the candidate vectors produced.
    #[must_use]
    pub const fn with_candidate_len(mut self, len: usize) -> Self {
        self.candidate_len = len;
        self
    }
}

impl SearchStrategy for SeededStrategy {
    fn local_search(&mut self, plan: &Plan) -> Candidate {
        let vector = (0..self.candidate_len)
            .map(|_| self.rng.gen_range(-CANDIDATE_SPREAD..CANDIDATE_SPREAD))
            .collect();
        Candidate {
            vector,
            explored_nodes: self.rng.gen_range(EXPLORED_NODES),
            search_depth: plan.strategy.depth_limit,
            exploration_coverage: self.rng.gen_range(COVERAGE),
        }
    }

    fn tactical_evaluate(&mut self, _candidate: &Candidate, constraints: &[Constraint]) -> TacticalScores {
        let satisfied = constraints
            .iter()
            .filter(|_| self.rng.gen_bool(SATISFACTION_ODDS))
            .count();
        let constraint_satisfaction = if constraints.is_empty() {
            1.0
        } else {
            satisfied as f64 / constraints.len() as f64
        };
        TacticalScores {
            constraint_satisfaction,
            optimization_score: self.rng.gen_range(OPTIMIZATION),
            resource_usage: self.rng.gen_range(RESOURCE_USAGE),
        }
    }

    fn name(&self) -> &str {
        "seeded"
    }
}
