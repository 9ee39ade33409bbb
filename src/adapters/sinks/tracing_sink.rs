//! Forwards coordinator events to `tracing`.

use tracing::{debug, info, warn};

use crate::domain::models::CoordinatorEvent;
use crate::domain::ports::EventSink;

/// Logs every event as a structured `tracing` record.
///
/// Inner progress goes out at debug level, force-exits and budget
/// exhaustion at warn, everything else at info.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingEventSink;

impl TracingEventSink {
    pub const fn new() -> Self {
        Self
    }
}

impl EventSink for TracingEventSink {
    fn emit(&self, event: &CoordinatorEvent) {
        match event {
            CoordinatorEvent::RunStarted {
                run_id,
                problem_type,
                max_global_iterations,
                ..
            } => info!(%run_id, %problem_type, max_global_iterations, "reasoning run started"),
            CoordinatorEvent::PlanProduced {
                run_id,
                global_iteration,
                plan_sequence,
                context_len,
                depth_limit,
                constraint_count,
                ..
            } => info!(
                %run_id,
                global_iteration,
                plan_sequence,
                context_len,
                depth_limit,
                constraint_count,
                "plan produced"
            ),
            CoordinatorEvent::InnerProgress {
                run_id,
                global_iteration,
                inner_iteration,
                performance,
                quality,
                ..
            } => debug!(
                %run_id,
                global_iteration,
                inner_iteration,
                performance,
                quality,
                "inner loop progress"
            ),
            CoordinatorEvent::InnerCapReached {
                run_id,
                global_iteration,
                inner_iterations,
                ..
            } => warn!(
                %run_id,
                global_iteration,
                inner_iterations,
                "inner iteration cap reached, forcing cycle end"
            ),
            CoordinatorEvent::CycleConverged {
                run_id,
                global_iteration,
                inner_iterations,
                performance,
                quality,
                ..
            } => info!(
                %run_id,
                global_iteration,
                inner_iterations,
                performance,
                quality,
                "executor converged"
            ),
            CoordinatorEvent::GlobalConverged {
                run_id,
                global_iteration,
                convergence_rate,
                ..
            } => info!(%run_id, global_iteration, convergence_rate, "global convergence reached"),
            CoordinatorEvent::BudgetExhausted {
                run_id,
                global_iterations,
                ..
            } => warn!(%run_id, global_iterations, "global iteration budget exhausted"),
            CoordinatorEvent::RunCompleted {
                run_id,
                converged,
                metrics,
                total_time_secs,
                ..
            } => info!(
                %run_id,
                converged,
                iterations = metrics.iteration_count,
                convergence_rate = metrics.convergence_rate,
                total_time_secs,
                "reasoning run completed"
            ),
        }
    }
}
