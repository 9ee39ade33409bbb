use anyhow::{Context, Result};
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Yaml};
use std::path::Path;
use thiserror::Error;

use crate::domain::models::config::{Config, StrategyKind};

/// Project directory holding configuration files.
pub const CONFIG_DIR: &str = ".hierarch";

/// Prefix of environment variable overrides.
pub const ENV_PREFIX: &str = "HIERARCH_";

/// Configuration error types
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid {field}: {value}. State dimensions must be at least 1")]
    InvalidDimension { field: &'static str, value: usize },

    #[error("Invalid {field}: {value}. Must be in (0, 1]")]
    InvalidThreshold { field: &'static str, value: f64 },

    #[error("Invalid {field}: {value}. Must be in (0, 1]")]
    InvalidRate { field: &'static str, value: f64 },

    #[error("Invalid stability_window: {0}. Must be at least 1")]
    InvalidStabilityWindow(usize),

    #[error("Invalid {field}: {value}. Iteration budgets must be at least 1")]
    InvalidIterationBudget { field: &'static str, value: u32 },

    #[error(
        "Invalid cadence bounds: min_cadence ({min}) <= initial_cadence ({initial}) <= max_cadence ({max}) must hold"
    )]
    InvalidCadence { min: u32, initial: u32, max: u32 },

    #[error("Invalid decay: {0}. Must be in (0, 1)")]
    InvalidDecay(f64),

    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    #[error("Invalid log format: {0}. Must be one of: json, pretty")]
    InvalidLogFormat(String),

    #[error("Invalid log rotation: {0}. Must be one of: daily, hourly, never")]
    InvalidLogRotation(String),
}

/// Configuration loader with hierarchical merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration with hierarchical merging
    ///
    /// Precedence (lowest to highest):
    /// 1. Programmatic defaults (Serialized)
    /// 2. .hierarch/config.yaml (project config)
    /// 3. .hierarch/local.yaml (project local overrides, optional)
    /// 4. Environment variables (HIERARCH_* prefix, `__` separates sections)
    pub fn load() -> Result<Config> {
        let config = Self::extract(None)?;
        Self::validate(&config)?;
        Ok(config)
    }

    /// Load configuration from a specific file.
    ///
    /// Environment overrides still apply on top of the file.
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Config> {
        let config = Self::extract(Some(path.as_ref()))?;
        Self::validate(&config)?;
        Ok(config)
    }

    /// Merge the layers without validating the result.
    ///
    /// With `path`, that file replaces the two project files. Only fails when
    /// a layer cannot be read or deserialized.
    pub fn extract(path: Option<&Path>) -> Result<Config> {
        match path {
            Some(path) => Figment::new()
                .merge(Serialized::defaults(Config::default()))
                .merge(Yaml::file(path))
                .merge(Env::prefixed(ENV_PREFIX).split("__"))
                .extract()
                .context(format!("Failed to load config from {}", path.display())),
            None => Self::figment()
                .extract()
                .context("Failed to extract configuration from figment"),
        }
    }

    fn figment() -> Figment {
        Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Yaml::file(format!("{CONFIG_DIR}/config.yaml")))
            .merge(Yaml::file(format!("{CONFIG_DIR}/local.yaml")))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    /// Validate configuration after loading
    pub fn validate(config: &Config) -> Result<(), ConfigError> {
        let planner = &config.planner;
        let executor = &config.executor;
        let coordinator = &config.coordinator;

        for (field, value) in [
            ("planner.state_dim", planner.state_dim),
            ("executor.state_dim", executor.state_dim),
        ] {
            if value == 0 {
                return Err(ConfigError::InvalidDimension { field, value });
            }
        }

        for (field, value) in [
            ("executor.convergence_threshold", executor.convergence_threshold),
            (
                "coordinator.global_convergence_threshold",
                coordinator.global_convergence_threshold,
            ),
        ] {
            if !in_unit_range(value) {
                return Err(ConfigError::InvalidThreshold { field, value });
            }
        }

        for (field, value) in [
            ("planner.learning_rate", planner.learning_rate),
            ("executor.refinement_rate", executor.refinement_rate),
        ] {
            if !in_unit_range(value) {
                return Err(ConfigError::InvalidRate { field, value });
            }
        }

        if executor.stability_window == 0 {
            return Err(ConfigError::InvalidStabilityWindow(executor.stability_window));
        }

        for (field, value) in [
            ("executor.max_iterations", executor.max_iterations),
            (
                "coordinator.max_global_iterations",
                coordinator.max_global_iterations,
            ),
            ("coordinator.inner_iteration_cap", coordinator.inner_iteration_cap),
        ] {
            if value == 0 {
                return Err(ConfigError::InvalidIterationBudget { field, value });
            }
        }

        if planner.min_cadence > planner.max_cadence
            || !(planner.min_cadence..=planner.max_cadence).contains(&planner.initial_cadence)
        {
            return Err(ConfigError::InvalidCadence {
                min: planner.min_cadence,
                initial: planner.initial_cadence,
                max: planner.max_cadence,
            });
        }

        // decay only shapes the geometric strategy
        let decay = config.strategy.decay;
        if config.strategy.kind == StrategyKind::Geometric && !(decay > 0.0 && decay < 1.0) {
            return Err(ConfigError::InvalidDecay(decay));
        }

        // Validate logging config
        let valid_log_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_log_levels.contains(&config.logging.level.as_str()) {
            return Err(ConfigError::InvalidLogLevel(config.logging.level.clone()));
        }

        let valid_log_formats = ["json", "pretty"];
        if !valid_log_formats.contains(&config.logging.format.as_str()) {
            return Err(ConfigError::InvalidLogFormat(config.logging.format.clone()));
        }

        let valid_rotations = ["daily", "hourly", "never"];
        if !valid_rotations.contains(&config.logging.rotation.as_str()) {
            return Err(ConfigError::InvalidLogRotation(
                config.logging.rotation.clone(),
            ));
        }

        Ok(())
    }
}

/// `(0, 1]`; rejects NaN.
fn in_unit_range(value: f64) -> bool {
    value > 0.0 && value <= 1.0
}
