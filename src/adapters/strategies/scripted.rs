use crate::domain::models::{Candidate, Constraint, Plan, TacticalScores};
use crate::domain::ports::SearchStrategy;

/// Replays a fixed list of scores, cycling when it runs out.
///
/// Every call returns the same candidate. An empty script yields neutral
/// scores.
#[derive(Debug, Clone)]
pub struct ScriptedStrategy {
    script: Vec<TacticalScores>,
    cursor: usize,
    candidate: Candidate,
    evaluations: u64,
}

impl ScriptedStrategy {
    pub fn new(script: Vec<TacticalScores>) -> Self {
        Self {
            script,
            cursor: 0,
            candidate: Candidate {
                vector: Vec::new(),
                explored_nodes: 50,
                search_depth: 5,
                exploration_coverage: 0.8,
            },
            evaluations: 0,
        }
    }

    /// A script that always returns the same scores.
    pub fn constant(scores: TacticalScores) -> Self {
        Self::new(vec![scores])
    }

    /// Replace the candidate returned by `local_search`.
    #[must_use]
    pub fn with_candidate(mut self, candidate: Candidate) -> Self {
        self.candidate = candidate;
        self
    }

    /// Number of `tactical_evaluate` calls so far.
    pub const fn evaluations(&self) -> u64 {
        self.evaluations
    }
}

impl SearchStrategy for ScriptedStrategy {
    fn local_search(&mut self, plan: &Plan) -> Candidate {
        Candidate {
            search_depth: plan.strategy.depth_limit,
            ..self.candidate.clone()
        }
    }

    fn tactical_evaluate(&mut self, _candidate: &Candidate, _constraints: &[Constraint]) -> TacticalScores {
        self.evaluations += 1;
        if self.script.is_empty() {
            return TacticalScores::default();
        }
        let scores = self.script[self.cursor % self.script.len()];
        self.cursor += 1;
        scores
    }

    fn name(&self) -> &str {
        "scripted"
    }
}
