//! Common test utilities for integration tests
//!
//! Shared configurations and score scripts used across the scenario and
//! property suites.

#![allow(dead_code)]

use hierarch::adapters::strategies::ScriptedStrategy;
use hierarch::domain::models::{Config, TacticalScores};

/// Scores whose performance and quality both sit at 0.99.
pub fn excellent_scores() -> TacticalScores {
    // performance = 0.99 + 0.2 * 0.0, quality = 0.99 * 1.0
    TacticalScores::new(1.0, 0.99, 1.0)
}

/// Scores that never clear a 0.95 threshold.
pub fn mediocre_scores() -> TacticalScores {
    TacticalScores::new(0.5, 0.6, 0.5)
}

pub fn excellent() -> ScriptedStrategy {
    ScriptedStrategy::constant(excellent_scores())
}

pub fn mediocre() -> ScriptedStrategy {
    ScriptedStrategy::constant(mediocre_scores())
}

/// Default configuration with small state vectors so runs stay cheap.
pub fn small_config() -> Config {
    let mut config = Config::default();
    config.planner.state_dim = 32;
    config.executor.state_dim = 16;
    config
}
