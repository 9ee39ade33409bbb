//! Core services: the two timescales and the loop that couples them.

pub mod coordinator;
pub mod executor;
pub mod planner;

pub use coordinator::{Coordinator, CoordinatorPhase};
pub use executor::{population_stddev, FastExecutor};
pub use planner::{Feedback, SlowPlanner};
