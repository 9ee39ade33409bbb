//! Built-in search strategies.
//!
//! - [`SeededStrategy`]: pseudo-random sampling over fixed score ranges,
//!   reproducible from a seed.
//! - [`GeometricStrategy`]: deterministic scores that close a fixed share of
//!   the remaining gap on every call.
//! - [`ScriptedStrategy`]: replays a fixed score script; a stand-in for
//!   tests and stubs.

pub mod geometric;
pub mod scripted;
pub mod seeded;

pub use geometric::GeometricStrategy;
pub use scripted::ScriptedStrategy;
pub use seeded::SeededStrategy;

use crate::domain::models::{StrategyConfig, StrategyKind};
use crate::domain::ports::SearchStrategy;

/// Build the strategy selected in configuration.
pub fn from_config(config: &StrategyConfig) -> Box<dyn SearchStrategy> {
    match config.kind {
        StrategyKind::Seeded => Box::new(SeededStrategy::new(config.seed)),
        StrategyKind::Geometric => Box::new(GeometricStrategy::new(config.decay)),
    }
}
