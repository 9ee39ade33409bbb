//! Fast executor.
//!
//! The executor refines candidate solutions under a fixed plan, one
//! [`compute`](FastExecutor::compute) call per inner iteration, and keeps the
//! last `stability_window` solutions to judge whether it has settled.
//!
//! # Convergence contract
//!
//! [`converged`](FastExecutor::converged) is not a pure query. When it
//! returns `true` it also resets the executor for the next outer cycle: the
//! iteration counter drops to 0 and the solution window is cleared. Callers
//! must treat a `true` answer as a one-shot observation and keep their own
//! copy of the latest solution; asking again without an intervening
//! `compute` reflects the reset state.

use tracing::{debug, trace};

use crate::domain::models::solution::unit_interval;
use crate::domain::models::{BoundedHistory, ExecutorConfig, Plan, Solution};
use crate::domain::ports::SearchStrategy;

/// Population standard deviation. Zero for fewer than two samples.
pub fn population_stddev(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
    variance.sqrt()
}

/// The fast, tactical half of the coordinator.
pub struct FastExecutor<S> {
    config: ExecutorConfig,
    strategy: S,
    state: Vec<f64>,
    iteration: u32,
    window: BoundedHistory<Solution>,
    cycles_completed: u64,
}

impl<S: SearchStrategy> FastExecutor<S> {
    pub fn new(config: ExecutorConfig, strategy: S) -> Self {
        Self {
            state: vec![0.0; config.state_dim],
            window: BoundedHistory::new(config.stability_window),
            iteration: 0,
            cycles_completed: 0,
            strategy,
            config,
        }
    }

    /// Run one inner iteration under `plan` and return the scored solution.
    pub fn compute(&mut self, plan: &Plan) -> Solution {
        self.iteration += 1;

        let candidate = self.strategy.local_search(plan);
        let mut scores = if plan.constraints.is_empty() {
            let mut scores = self.strategy.tactical_evaluate(&candidate, &[]);
            scores.constraint_satisfaction = 1.0;
            scores
        } else {
            self.strategy.tactical_evaluate(&candidate, &plan.constraints)
        };
        scores = scores.sanitized();

        self.refine(&candidate.vector);

        let solution = Solution::scored(candidate, scores, self.iteration);
        trace!(
            iteration = self.iteration,
            performance = solution.performance,
            quality = solution.quality,
            progress = solution.progress,
            "executor iteration"
        );

        self.window.push(solution.clone());
        solution
    }

    /// Move the state toward the candidate over their shared prefix.
    fn refine(&mut self, candidate: &[f64]) {
        let rate = unit_interval(self.config.refinement_rate, 0.0);
        for (slot, target) in self.state.iter_mut().zip(candidate) {
            if target.is_finite() {
                *slot += rate * (target - *slot);
            }
        }
    }

    /// Stability of the current window: `1 - stddev(performance)`.
    ///
    /// `None` until the window holds `stability_window` solutions.
    pub fn stability(&self) -> Option<f64> {
        if self.window.len() < self.config.stability_window {
            return None;
        }
        let performances: Vec<f64> = self.window.iter().map(|s| s.performance).collect();
        Some(1.0 - population_stddev(&performances))
    }

    /// Whether the executor has locally converged.
    ///
    /// Converged when the iteration count reached `max_iterations`, or when a
    /// full window is both stable and of high quality. Below
    /// `max_iterations`, a window shorter than `stability_window` never
    /// converges. A `true` result resets the iteration counter and clears the
    /// window; see the module docs.
    pub fn converged(&mut self) -> bool {
        let threshold = self.config.convergence_threshold;
        let exhausted = self.iteration >= self.config.max_iterations;
        let stability = self.stability();
        let settled = stability.is_some_and(|stability| {
            self.window
                .latest()
                .is_some_and(|last| stability > threshold && last.quality > threshold)
        });

        if settled || exhausted {
            debug!(
                iteration = self.iteration,
                stability = ?stability,
                settled,
                exhausted,
                "executor converged"
            );
            self.reset_cycle();
            return true;
        }
        false
    }

    /// Start a fresh cycle: iteration counter to 0 and an empty window.
    pub fn reset_cycle(&mut self) {
        self.iteration = 0;
        self.window.clear();
        self.cycles_completed += 1;
    }

    pub const fn iteration(&self) -> u32 {
        self.iteration
    }

    /// Solutions in the stability window, oldest first.
    pub fn recent_solutions(&self) -> impl Iterator<Item = &Solution> {
        self.window.iter()
    }

    pub fn history_len(&self) -> usize {
        self.window.len()
    }

    pub fn state(&self) -> &[f64] {
        &self.state
    }

    /// Cycles ended by convergence or by [`reset_cycle`](Self::reset_cycle).
    pub const fn cycles_completed(&self) -> u64 {
        self.cycles_completed
    }

    pub const fn config(&self) -> &ExecutorConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::strategies::ScriptedStrategy;
    use crate::domain::models::{Candidate, Constraint, TacticalScores};

    fn executor(config: ExecutorConfig, scores: Vec<TacticalScores>) -> FastExecutor<ScriptedStrategy> {
        FastExecutor::new(config, ScriptedStrategy::new(scores))
    }

    fn perfect() -> TacticalScores {
        TacticalScores::new(1.0, 0.99, 1.0)
    }

    #[test]
    fn test_stddev() {
        assert!(population_stddev(&[]).abs() < f64::EPSILON);
        assert!(population_stddev(&[0.3]).abs() < f64::EPSILON);
        assert!((population_stddev(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]) - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_not_converged_below_window() {
        let mut ex = executor(ExecutorConfig::default(), vec![perfect()]);
        let plan = Plan::default();
        for _ in 0..4 {
            ex.compute(&plan);
            assert!(!ex.converged());
        }
        assert_eq!(ex.history_len(), 4);
    }

    #[test]
    fn test_converges_when_stable_and_good() {
        let mut ex = executor(ExecutorConfig::default(), vec![perfect()]);
        let plan = Plan::default();
        for _ in 0..5 {
            ex.compute(&plan);
        }
        assert!(ex.stability().is_some_and(|s| s > 0.999_999));
        assert!(ex.converged());
    }

    #[test]
    fn test_convergence_is_one_shot() {
        let mut ex = executor(ExecutorConfig::default(), vec![perfect()]);
        let plan = Plan::default();
        for _ in 0..5 {
            ex.compute(&plan);
        }
        assert!(ex.converged());
        assert_eq!(ex.iteration(), 0);
        assert_eq!(ex.history_len(), 0);
        assert!(!ex.converged());
        assert_eq!(ex.cycles_completed(), 1);

        let next = ex.compute(&plan);
        assert_eq!(next.iteration, 1);
    }

    #[test]
    fn test_max_iterations_forces_convergence() {
        let config = ExecutorConfig {
            max_iterations: 3,
            stability_window: 5,
            ..Default::default()
        };
        let mut ex = executor(config, vec![TacticalScores::new(0.2, 0.1, 0.9)]);
        let plan = Plan::default();
        for _ in 0..2 {
            ex.compute(&plan);
            assert!(!ex.converged());
        }
        ex.compute(&plan);
        assert_eq!(ex.history_len(), 3);
        assert!(ex.converged());
        assert_eq!(ex.iteration(), 0);
    }

    #[test]
    fn test_max_iterations_with_small_window() {
        let config = ExecutorConfig {
            max_iterations: 3,
            stability_window: 2,
            ..Default::default()
        };
        let mut ex = executor(config, vec![TacticalScores::new(0.2, 0.1, 0.9)]);
        let plan = Plan::default();
        ex.compute(&plan);
        ex.compute(&plan);
        assert!(!ex.converged());
        ex.compute(&plan);
        assert!(ex.converged());
    }

    #[test]
    fn test_unstable_window_does_not_converge() {
        let scripted = vec![
            TacticalScores::new(1.0, 0.99, 1.0),
            TacticalScores::new(1.0, 0.5, 1.0),
        ];
        let mut ex = executor(ExecutorConfig::default(), scripted);
        let plan = Plan::default();
        for _ in 0..10 {
            ex.compute(&plan);
            assert!(!ex.converged());
        }
    }

    #[test]
    fn test_history_bounded_by_window() {
        let mut ex = executor(ExecutorConfig::default(), vec![TacticalScores::new(0.5, 0.5, 0.5)]);
        let plan = Plan::default();
        for _ in 0..12 {
            ex.compute(&plan);
            assert!(ex.history_len() <= 5);
        }
        let iterations: Vec<u32> = ex.recent_solutions().map(|s| s.iteration).collect();
        assert_eq!(iterations, vec![8, 9, 10, 11, 12]);
    }

    #[test]
    fn test_empty_constraints_are_fully_satisfied() {
        let mut ex = executor(ExecutorConfig::default(), vec![TacticalScores::new(0.0, 0.8, 0.5)]);
        let plan = Plan {
            constraints: vec![],
            ..Default::default()
        };
        let solution = ex.compute(&plan);
        assert!((solution.result.scores.constraint_satisfaction - 1.0).abs() < f64::EPSILON);
        assert!((solution.quality - 0.8).abs() < 1e-12);

        let constrained = Plan {
            constraints: vec![Constraint::limit("time", 1.0)],
            ..Default::default()
        };
        let solution = ex.compute(&constrained);
        assert!(solution.quality.abs() < f64::EPSILON);
    }

    #[test]
    fn test_scores_clamped() {
        let mut ex = executor(
            ExecutorConfig::default(),
            vec![TacticalScores::new(3.0, f64::NAN, -2.0)],
        );
        let solution = ex.compute(&Plan::default());
        for v in [solution.performance, solution.quality, solution.progress] {
            assert!((0.0..=1.0).contains(&v));
        }
    }

    #[test]
    fn test_state_moves_toward_candidate() {
        let config = ExecutorConfig {
            state_dim: 3,
            ..Default::default()
        };
        let strategy = ScriptedStrategy::new(vec![perfect()]).with_candidate(Candidate {
            vector: vec![1.0, -1.0],
            explored_nodes: 10,
            search_depth: 5,
            exploration_coverage: 0.5,
        });
        let mut ex = FastExecutor::new(config, strategy);
        ex.compute(&Plan::default());
        assert_eq!(ex.state(), &[0.1, -0.1, 0.0]);
        ex.compute(&Plan::default());
        assert!((ex.state()[0] - 0.19).abs() < 1e-12);
    }

    #[test]
    fn test_zero_window_only_iteration_cap_applies() {
        let config = ExecutorConfig {
            stability_window: 0,
            max_iterations: 0,
            ..Default::default()
        };
        let mut ex = executor(config, vec![perfect()]);
        assert!(ex.converged());
        assert_eq!(ex.history_len(), 0);
    }
}
