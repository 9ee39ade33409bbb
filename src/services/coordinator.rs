//! Two-timescale coordinator.
//!
//! One run of [`Coordinator::reason`] walks this state machine:
//!
//! ```text
//! Planning -> Executing (repeat until local convergence or inner cap)
//!          -> Feedback -> GlobalCheck -> Planning | Done
//! ```
//!
//! - **Planning**: the slow planner turns the problem into a fresh plan.
//! - **Executing**: the fast executor refines candidates under that plan
//!   until it reports local convergence or `inner_iteration_cap` inner
//!   iterations have run.
//! - **Feedback**: the planner absorbs the cycle's latest solution.
//! - **GlobalCheck**: convergence metrics are updated and the run stops if
//!   performance and quality both clear `global_convergence_threshold`.
//!
//! The run ends after at most `max_global_iterations` outer iterations.
//! Running out of budget is not an error: the outcome is assembled from the
//! last solution available. Nothing in a run returns an error or panics; every
//! run yields a well-formed [`ReasoningOutcome`].

use std::fmt;
use std::time::Instant;

use chrono::Utc;
use tracing::{debug, instrument};
use uuid::Uuid;

use super::executor::FastExecutor;
use super::planner::SlowPlanner;
use crate::domain::models::config::parameter_count;
use crate::domain::models::{
    Config, ConvergenceMetrics, CoordinatorConfig, CoordinatorEvent, Lineage, Plan, Problem,
    ReasoningOutcome, Solution,
};
use crate::domain::ports::{EventSink, SearchStrategy};

/// Where the coordinator is in its state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoordinatorPhase {
    Idle,
    Planning,
    Executing,
    Feedback,
    GlobalCheck,
    Done,
}

impl fmt::Display for CoordinatorPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Idle => write!(f, "idle"),
            Self::Planning => write!(f, "planning"),
            Self::Executing => write!(f, "executing"),
            Self::Feedback => write!(f, "feedback"),
            Self::GlobalCheck => write!(f, "global_check"),
            Self::Done => write!(f, "done"),
        }
    }
}

/// Result of one inner loop.
#[derive(Debug, Clone)]
struct CycleOutcome {
    latest: Option<Solution>,
    iterations: u32,
}

/// Drives a [`SlowPlanner`] and a [`FastExecutor`] to global convergence.
pub struct Coordinator<S> {
    planner: SlowPlanner,
    executor: FastExecutor<S>,
    config: CoordinatorConfig,
    parameters_used: u64,
    metrics: ConvergenceMetrics,
    phase: CoordinatorPhase,
    sinks: Vec<Box<dyn EventSink>>,
}

impl<S: SearchStrategy> Coordinator<S> {
    /// Build a coordinator from the full configuration and a search strategy.
    pub fn new(config: &Config, strategy: S) -> Self {
        Self::from_parts(
            SlowPlanner::new(config.planner.clone()),
            FastExecutor::new(config.executor.clone(), strategy),
            config.coordinator.clone(),
        )
    }

    /// Build a coordinator around an existing planner and executor.
    ///
    /// The reported parameter count follows [`parameter_count`].
    pub fn from_parts(
        planner: SlowPlanner,
        executor: FastExecutor<S>,
        config: CoordinatorConfig,
    ) -> Self {
        let parameters_used =
            parameter_count(planner.config().state_dim, executor.config().state_dim);
        Self {
            planner,
            executor,
            config,
            parameters_used,
            metrics: ConvergenceMetrics::default(),
            phase: CoordinatorPhase::Idle,
            sinks: Vec::new(),
        }
    }

    /// Add an event subscriber.
    pub fn subscribe(&mut self, sink: impl EventSink + 'static) {
        self.sinks.push(Box::new(sink));
    }

    /// Builder form of [`subscribe`](Self::subscribe).
    #[must_use]
    pub fn with_sink(mut self, sink: impl EventSink + 'static) -> Self {
        self.subscribe(sink);
        self
    }

    fn emit(&self, event: &CoordinatorEvent) {
        for sink in &self.sinks {
            sink.emit(event);
        }
    }

    fn enter(&mut self, phase: CoordinatorPhase) {
        debug!(from = %self.phase, to = %phase, "phase transition");
        self.phase = phase;
    }

    /// Run the nested loops on `problem` until global convergence or the
    /// outer budget runs out.
    #[instrument(skip_all, fields(problem_type = %problem.kind()))]
    pub fn reason(&mut self, problem: &Problem) -> ReasoningOutcome {
        let run_id = Uuid::new_v4();
        let started = Instant::now();
        let max_global = self.config.max_global_iterations;
        let updates_before = self.planner.updates_applied();

        self.metrics = ConvergenceMetrics::default();
        self.emit(&CoordinatorEvent::RunStarted {
            run_id,
            problem_type: problem.kind().to_string(),
            max_global_iterations: max_global,
            timestamp: Utc::now(),
        });

        let mut global_iteration = 0;
        let mut inner_total: u64 = 0;
        let mut last: Option<Solution> = None;
        let mut converged = false;

        while global_iteration < max_global {
            global_iteration += 1;

            self.enter(CoordinatorPhase::Planning);
            let plan = self.planner.plan(problem);
            self.emit(&CoordinatorEvent::PlanProduced {
                run_id,
                global_iteration,
                plan_sequence: plan.sequence,
                context_len: plan.context.len(),
                depth_limit: plan.strategy.depth_limit,
                constraint_count: plan.constraints.len(),
                timestamp: Utc::now(),
            });

            self.enter(CoordinatorPhase::Executing);
            let cycle = self.run_cycle(run_id, global_iteration, &plan);
            inner_total += u64::from(cycle.iterations);

            self.enter(CoordinatorPhase::Feedback);
            self.planner.update(cycle.latest.as_ref());

            self.enter(CoordinatorPhase::GlobalCheck);
            let cycle_converged = self.check_global_convergence(cycle.latest.as_ref());
            if cycle.latest.is_some() {
                last = cycle.latest;
            }

            if cycle_converged {
                converged = true;
                self.emit(&CoordinatorEvent::GlobalConverged {
                    run_id,
                    global_iteration,
                    convergence_rate: self.metrics.convergence_rate,
                    timestamp: Utc::now(),
                });
                break;
            }
        }

        if !converged {
            self.emit(&CoordinatorEvent::BudgetExhausted {
                run_id,
                global_iterations: global_iteration,
                timestamp: Utc::now(),
            });
        }

        self.enter(CoordinatorPhase::Done);
        let total_time = started.elapsed().as_secs_f64();
        let lineage = Lineage {
            planner_updates: self.planner.updates_applied() - updates_before,
            executor_cycles: self.metrics.iteration_count,
            global_iterations: global_iteration,
            inner_iterations_total: inner_total,
            planner_cadence: self.planner.cadence(),
            architecture_label: self.config.architecture_label.clone(),
        };
        let outcome = ReasoningOutcome::assemble(
            run_id,
            converged,
            last.as_ref(),
            self.metrics,
            total_time,
            self.parameters_used,
            lineage,
        );

        self.emit(&CoordinatorEvent::RunCompleted {
            run_id,
            converged,
            metrics: self.metrics,
            total_time_secs: total_time,
            timestamp: Utc::now(),
        });
        outcome
    }

    /// Drive the executor until it converges locally or the hard cap hits.
    fn run_cycle(&mut self, run_id: Uuid, global_iteration: u32, plan: &Plan) -> CycleOutcome {
        let cap = self.config.inner_iteration_cap;
        let interval = self.config.progress_interval;
        let mut latest: Option<Solution> = None;
        let mut iterations = 0;

        loop {
            if self.executor.converged() {
                let (performance, quality) =
                    latest.as_ref().map_or((0.0, 0.0), |s| (s.performance, s.quality));
                self.emit(&CoordinatorEvent::CycleConverged {
                    run_id,
                    global_iteration,
                    inner_iterations: iterations,
                    performance,
                    quality,
                    timestamp: Utc::now(),
                });
                break;
            }

            if iterations >= cap {
                self.executor.reset_cycle();
                self.emit(&CoordinatorEvent::InnerCapReached {
                    run_id,
                    global_iteration,
                    inner_iterations: iterations,
                    timestamp: Utc::now(),
                });
                break;
            }

            let solution = self.executor.compute(plan);
            iterations += 1;

            if interval > 0 && iterations % interval == 0 {
                self.emit(&CoordinatorEvent::InnerProgress {
                    run_id,
                    global_iteration,
                    inner_iteration: iterations,
                    performance: solution.performance,
                    quality: solution.quality,
                    timestamp: Utc::now(),
                });
            }
            latest = Some(solution);
        }

        CycleOutcome { latest, iterations }
    }

    /// Record the cycle's solution and decide global convergence.
    ///
    /// An absent solution never converges and leaves the metrics untouched.
    fn check_global_convergence(&mut self, solution: Option<&Solution>) -> bool {
        let Some(solution) = solution else {
            return false;
        };

        self.metrics.record(solution.performance, solution.quality);
        let threshold = self.config.global_convergence_threshold;
        let converged = solution.performance > threshold && solution.quality > threshold;
        if converged {
            self.metrics
                .mark_converged(self.config.max_global_iterations);
        }
        converged
    }

    /// Metrics of the current or most recent run.
    pub const fn metrics(&self) -> &ConvergenceMetrics {
        &self.metrics
    }

    pub const fn phase(&self) -> CoordinatorPhase {
        self.phase
    }

    pub const fn planner(&self) -> &SlowPlanner {
        &self.planner
    }

    pub const fn executor(&self) -> &FastExecutor<S> {
        &self.executor
    }

    pub const fn config(&self) -> &CoordinatorConfig {
        &self.config
    }
}
