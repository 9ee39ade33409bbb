//! Slow planner.
//!
//! The planner holds a state vector that only its own refinement step
//! touches. Each outer iteration it turns the problem into a [`Plan`] whose
//! context is read from that state, and after the executor settles it folds
//! the resulting solution back into the state as a small feedback step.
//!
//! The planner also tracks a re-planning *cadence*: consistently poor
//! feedback tightens it toward `min_cadence`, consistently strong feedback
//! relaxes it toward `max_cadence`.

use chrono::Utc;
use tracing::{debug, instrument};

use crate::domain::models::plan::{default_priority_areas, default_success_criteria};
use crate::domain::models::{
    BoundedHistory, Constraint, Plan, PlannerConfig, Problem, Solution, StrategyDescriptor,
};

/// Tokens of problem complexity per context entry.
const CONTEXT_ENTRIES_PER_TOKEN: usize = 10;

/// Divisor mapping an inner iteration count to a convergence-speed reading.
const ITERATION_SCALE: f64 = 100.0;

/// Iteration count assumed when no solution was produced.
const DEFAULT_FEEDBACK_ITERATIONS: u32 = 10;

/// Mean feedback below which the cadence tightens.
const LOW_FEEDBACK: f64 = 0.5;

/// Mean feedback above which the cadence relaxes.
const HIGH_FEEDBACK: f64 = 0.8;

/// Feedback distilled from one executor outcome.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Feedback {
    pub performance: f64,
    pub convergence_speed: f64,
    pub solution_quality: f64,
}

impl Default for Feedback {
    fn default() -> Self {
        Self {
            performance: 0.5,
            convergence_speed: f64::from(DEFAULT_FEEDBACK_ITERATIONS) / ITERATION_SCALE,
            solution_quality: 0.5,
        }
    }
}

impl Feedback {
    /// Distill a solution; an absent solution yields [`Feedback::default`].
    pub fn from_solution(solution: Option<&Solution>) -> Self {
        solution.map_or_else(Self::default, |s| Self {
            performance: s.performance,
            convergence_speed: f64::from(s.iteration) / ITERATION_SCALE,
            solution_quality: s.quality,
        })
    }

    pub const fn as_array(&self) -> [f64; 3] {
        [self.performance, self.convergence_speed, self.solution_quality]
    }

    pub fn mean(&self) -> f64 {
        self.as_array().iter().sum::<f64>() / 3.0
    }
}

/// The slow, strategic half of the coordinator.
#[derive(Debug, Clone)]
pub struct SlowPlanner {
    config: PlannerConfig,
    state: Vec<f64>,
    cadence: u32,
    history: BoundedHistory<Plan>,
    plans_produced: u64,
    updates_applied: u64,
}

impl SlowPlanner {
    pub fn new(config: PlannerConfig) -> Self {
        let cadence = config
            .initial_cadence
            .clamp(config.min_cadence.min(config.max_cadence), config.max_cadence.max(config.min_cadence));
        Self {
            state: vec![0.0; config.state_dim],
            history: BoundedHistory::new(config.history_capacity),
            cadence,
            plans_produced: 0,
            updates_applied: 0,
            config,
        }
    }

    /// Produce a plan for `problem`.
    ///
    /// Records the plan in the capped history. Leaves the state vector alone.
    #[instrument(skip(self, problem), fields(problem_type = %problem.kind()))]
    pub fn plan(&mut self, problem: &Problem) -> Plan {
        let context_len = problem
            .complexity()
            .saturating_mul(CONTEXT_ENTRIES_PER_TOKEN)
            .min(self.config.state_dim);
        let context = self.state[..context_len].to_vec();

        self.plans_produced += 1;
        let plan = Plan {
            sequence: self.plans_produced,
            strategy: StrategyDescriptor::for_context(context.len()),
            context,
            priority_areas: default_priority_areas(),
            constraints: problem.declared_constraints().unwrap_or_else(Constraint::defaults),
            success_criteria: default_success_criteria(),
            created_at: Utc::now(),
        };

        debug!(
            sequence = plan.sequence,
            context_len = plan.context.len(),
            depth_limit = plan.strategy.depth_limit,
            constraints = plan.constraints.len(),
            "plan produced"
        );

        self.history.push(plan.clone());
        plan
    }

    /// Fold an executor outcome into the planner state.
    ///
    /// `None` is treated exactly like a solution carrying the default
    /// feedback readings.
    pub fn update(&mut self, solution: Option<&Solution>) {
        let feedback = Feedback::from_solution(solution);
        self.refine(&feedback);
        self.adapt_cadence(&feedback);
        self.updates_applied += 1;

        debug!(
            performance = feedback.performance,
            convergence_speed = feedback.convergence_speed,
            quality = feedback.solution_quality,
            cadence = self.cadence,
            "planner updated"
        );
    }

    /// `state += learning_rate * feedback`, with the feedback zero-padded or
    /// truncated to the state dimension.
    fn refine(&mut self, feedback: &Feedback) {
        let rate = self.config.learning_rate;
        for (slot, value) in self.state.iter_mut().zip(feedback.as_array()) {
            *slot += rate * value;
        }
    }

    fn adapt_cadence(&mut self, feedback: &Feedback) {
        let mean = feedback.mean();
        if mean < LOW_FEEDBACK {
            self.cadence = self.cadence.saturating_sub(1).max(self.config.min_cadence);
        } else if mean > HIGH_FEEDBACK {
            self.cadence = (self.cadence + 1).min(self.config.max_cadence);
        }
    }

    pub fn state(&self) -> &[f64] {
        &self.state
    }

    pub const fn cadence(&self) -> u32 {
        self.cadence
    }

    pub const fn plans_produced(&self) -> u64 {
        self.plans_produced
    }

    pub const fn updates_applied(&self) -> u64 {
        self.updates_applied
    }

    /// Most recent plans, oldest first.
    pub fn recent_plans(&self) -> impl Iterator<Item = &Plan> {
        self.history.iter()
    }

    pub const fn config(&self) -> &PlannerConfig {
        &self.config
    }
}
