//! Terminal progress for coordinator runs, driven by the event stream.

use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::time::Duration;

use crate::domain::models::CoordinatorEvent;
use crate::domain::ports::EventSink;

const SPINNER_TEMPLATE: &str = "[{elapsed_precise}] {spinner:.green} {msg}";
const SPINNER_CHARS: &str = "⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏";

/// Create a spinner for indeterminate operations, drawn on stderr.
pub fn create_spinner(message: impl Into<String>) -> ProgressBar {
    let spinner = ProgressBar::with_draw_target(None, ProgressDrawTarget::stderr());
    let style = ProgressStyle::with_template(SPINNER_TEMPLATE)
        .unwrap_or_else(|_| ProgressStyle::default_spinner())
        .tick_chars(SPINNER_CHARS);
    spinner.set_style(style);
    spinner.set_message(message.into());
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner
}

/// Event sink that narrates a run on a spinner.
#[derive(Clone)]
pub struct SpinnerEventSink {
    spinner: ProgressBar,
}

impl SpinnerEventSink {
    pub fn new(spinner: ProgressBar) -> Self {
        Self { spinner }
    }

    /// Status line for an event, or `None` when the spinner should not change.
    pub fn message_for(event: &CoordinatorEvent) -> Option<String> {
        match event {
            CoordinatorEvent::RunStarted { problem_type, .. } => {
                Some(format!("reasoning on {problem_type}"))
            }
            CoordinatorEvent::PlanProduced {
                global_iteration,
                depth_limit,
                ..
            } => Some(format!(
                "cycle {global_iteration}: planning (depth limit {depth_limit})"
            )),
            CoordinatorEvent::InnerProgress {
                global_iteration,
                inner_iteration,
                performance,
                quality,
                ..
            } => Some(format!(
                "cycle {global_iteration}: step {inner_iteration} perf {performance:.3} quality {quality:.3}"
            )),
            CoordinatorEvent::InnerCapReached { .. } => None,
            CoordinatorEvent::CycleConverged {
                global_iteration,
                inner_iterations,
                ..
            } => Some(format!(
                "cycle {global_iteration}: settled after {inner_iterations} steps"
            )),
            CoordinatorEvent::GlobalConverged {
                global_iteration, ..
            } => Some(format!("converged at cycle {global_iteration}")),
            CoordinatorEvent::BudgetExhausted {
                global_iterations, ..
            } => Some(format!("budget exhausted after {global_iterations} cycles")),
            CoordinatorEvent::RunCompleted { .. } => None,
        }
    }
}

impl EventSink for SpinnerEventSink {
    fn emit(&self, event: &CoordinatorEvent) {
        if let CoordinatorEvent::RunCompleted {
            converged,
            total_time_secs,
            ..
        } = event
        {
            let verdict = if *converged { "converged" } else { "not converged" };
            self.spinner
                .finish_with_message(format!("{verdict} in {total_time_secs:.2}s"));
            return;
        }
        if let Some(message) = Self::message_for(event) {
            self.spinner.set_message(message);
        }
    }
}
