//! Coordinator events for observability.
//!
//! The coordinator narrates a run through these events instead of writing to
//! any output. Subscribed [`EventSink`](crate::domain::ports::EventSink)s
//! receive them synchronously, in emission order.
//!
//! - **Lifecycle**: `RunStarted`, `RunCompleted`.
//! - **Outer loop**: `PlanProduced`, `CycleConverged`, `GlobalConverged`,
//!   `BudgetExhausted`.
//! - **Inner loop**: `InnerProgress`, `InnerCapReached`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::metrics::ConvergenceMetrics;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum CoordinatorEvent {
    /// A run has begun.
    RunStarted {
        run_id: Uuid,
        problem_type: String,
        max_global_iterations: u32,
        timestamp: DateTime<Utc>,
    },

    /// The planner produced a plan for an outer iteration.
    PlanProduced {
        run_id: Uuid,
        global_iteration: u32,
        plan_sequence: u64,
        context_len: usize,
        depth_limit: usize,
        constraint_count: usize,
        timestamp: DateTime<Utc>,
    },

    /// Periodic inner-loop progress.
    InnerProgress {
        run_id: Uuid,
        global_iteration: u32,
        inner_iteration: u32,
        performance: f64,
        quality: f64,
        timestamp: DateTime<Utc>,
    },

    /// The inner loop hit the hard safety cap and was force-exited.
    InnerCapReached {
        run_id: Uuid,
        global_iteration: u32,
        inner_iterations: u32,
        timestamp: DateTime<Utc>,
    },

    /// The executor reported local convergence for this cycle.
    CycleConverged {
        run_id: Uuid,
        global_iteration: u32,
        inner_iterations: u32,
        performance: f64,
        quality: f64,
        timestamp: DateTime<Utc>,
    },

    /// Global convergence reached; the run stops.
    GlobalConverged {
        run_id: Uuid,
        global_iteration: u32,
        convergence_rate: f64,
        timestamp: DateTime<Utc>,
    },

    /// The outer budget ran out without global convergence.
    BudgetExhausted {
        run_id: Uuid,
        global_iterations: u32,
        timestamp: DateTime<Utc>,
    },

    /// The run finished and the outcome is assembled.
    RunCompleted {
        run_id: Uuid,
        converged: bool,
        metrics: ConvergenceMetrics,
        total_time_secs: f64,
        timestamp: DateTime<Utc>,
    },
}

impl CoordinatorEvent {
    pub const fn run_id(&self) -> Uuid {
        match self {
            Self::RunStarted { run_id, .. }
            | Self::PlanProduced { run_id, .. }
            | Self::InnerProgress { run_id, .. }
            | Self::InnerCapReached { run_id, .. }
            | Self::CycleConverged { run_id, .. }
            | Self::GlobalConverged { run_id, .. }
            | Self::BudgetExhausted { run_id, .. }
            | Self::RunCompleted { run_id, .. } => *run_id,
        }
    }

    /// Stable snake_case name of the variant.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::RunStarted { .. } => "run_started",
            Self::PlanProduced { .. } => "plan_produced",
            Self::InnerProgress { .. } => "inner_progress",
            Self::InnerCapReached { .. } => "inner_cap_reached",
            Self::CycleConverged { .. } => "cycle_converged",
            Self::GlobalConverged { .. } => "global_converged",
            Self::BudgetExhausted { .. } => "budget_exhausted",
            Self::RunCompleted { .. } => "run_completed",
        }
    }
}
