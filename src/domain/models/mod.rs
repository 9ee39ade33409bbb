pub mod config;
pub mod events;
pub mod history;
pub mod metrics;
pub mod outcome;
pub mod plan;
pub mod problem;
pub mod solution;

pub use config::{
    Config, CoordinatorConfig, ExecutorConfig, LoggingConfig, PlannerConfig, StrategyConfig,
    StrategyKind,
};
pub use events::CoordinatorEvent;
pub use history::BoundedHistory;
pub use metrics::ConvergenceMetrics;
pub use outcome::{ComputationalStats, Lineage, ReasoningOutcome};
pub use plan::{Constraint, Plan, StrategyDescriptor};
pub use problem::Problem;
pub use solution::{Candidate, Solution, SolutionPayload, TacticalScores};
