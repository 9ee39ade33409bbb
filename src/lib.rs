//! Hierarch - two-timescale convergence coordinator
//!
//! Hierarch couples a slow, strategic planner with a fast, tactical executor.
//! The planner turns a problem description into a plan; the executor refines
//! candidate solutions under that plan until it settles; the planner absorbs
//! the outcome and re-plans. A coordinator repeats this until both
//! performance and quality clear a global threshold or the outer budget runs
//! out.
//!
//! # Architecture
//!
//! This crate follows Clean Architecture / Hexagonal Architecture principles:
//!
//! - **Domain Layer** (`domain`): Data model, port traits and error types
//! - **Service Layer** (`services`): Planner, executor and coordinator
//! - **Adapters** (`adapters`): Built-in search strategies and event sinks
//! - **Infrastructure Layer** (`infrastructure`): Configuration and logging
//! - **CLI Layer** (`cli`): Command-line interface
//!
//! # Example
//!
//! ```
//! use hierarch::adapters::strategies::GeometricStrategy;
//! use hierarch::{Config, Coordinator, Problem};
//!
//! let mut coordinator = Coordinator::new(&Config::default(), GeometricStrategy::new(0.5));
//! let outcome = coordinator.reason(&Problem::new("sudoku").with_field("grid_size", 9));
//! assert!(outcome.convergence_metrics.iteration_count <= 20);
//! ```

pub mod adapters;
pub mod cli;
pub mod domain;
pub mod infrastructure;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::models::{
    Config, ConvergenceMetrics, CoordinatorEvent, Plan, Problem, ReasoningOutcome, Solution,
    TacticalScores,
};
pub use domain::ports::{EventSink, SearchStrategy};
pub use domain::{DomainError, DomainResult};
pub use infrastructure::config::{ConfigError, ConfigLoader};
pub use services::{Coordinator, FastExecutor, SlowPlanner};
