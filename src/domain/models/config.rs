use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main configuration structure for Hierarch
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Config {
    /// Slow planner configuration
    #[serde(default)]
    pub planner: PlannerConfig,

    /// Fast executor configuration
    #[serde(default)]
    pub executor: ExecutorConfig,

    /// Outer loop configuration
    #[serde(default)]
    pub coordinator: CoordinatorConfig,

    /// Built-in search strategy selection
    #[serde(default)]
    pub strategy: StrategyConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Nominal parameters per state-vector entry, reported in run statistics.
const PARAMETERS_PER_STATE_ENTRY: u64 = 1000;

/// Nominal parameter count for the given planner and executor state sizes.
pub const fn parameter_count(planner_state_dim: usize, executor_state_dim: usize) -> u64 {
    (planner_state_dim as u64 + executor_state_dim as u64) * PARAMETERS_PER_STATE_ENTRY
}

impl Config {
    /// Nominal parameter count derived from the configured state dimensions.
    pub const fn parameters_used(&self) -> u64 {
        parameter_count(self.planner.state_dim, self.executor.state_dim)
    }
}

/// Slow planner configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct PlannerConfig {
    /// Dimension of the planner state vector
    #[serde(default = "default_planner_state_dim")]
    pub state_dim: usize,

    /// Step size applied to feedback when refining planner state
    #[serde(default = "default_learning_rate")]
    pub learning_rate: f64,

    /// Re-planning cadence at start-up
    #[serde(default = "default_initial_cadence")]
    pub initial_cadence: u32,

    /// Lowest cadence feedback may push the planner to
    #[serde(default = "default_min_cadence")]
    pub min_cadence: u32,

    /// Highest cadence feedback may push the planner to
    #[serde(default = "default_max_cadence")]
    pub max_cadence: u32,

    /// Number of recent plans retained for reporting
    #[serde(default = "default_history_capacity")]
    pub history_capacity: usize,
}

const fn default_planner_state_dim() -> usize {
    512
}

const fn default_learning_rate() -> f64 {
    0.01
}

const fn default_initial_cadence() -> u32 {
    5
}

const fn default_min_cadence() -> u32 {
    2
}

const fn default_max_cadence() -> u32 {
    10
}

const fn default_history_capacity() -> usize {
    16
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            state_dim: default_planner_state_dim(),
            learning_rate: default_learning_rate(),
            initial_cadence: default_initial_cadence(),
            min_cadence: default_min_cadence(),
            max_cadence: default_max_cadence(),
            history_capacity: default_history_capacity(),
        }
    }
}

/// Fast executor configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ExecutorConfig {
    /// Dimension of the executor state vector
    #[serde(default = "default_executor_state_dim")]
    pub state_dim: usize,

    /// Stability and quality level required for local convergence
    #[serde(default = "default_convergence_threshold")]
    pub convergence_threshold: f64,

    /// Number of recent solutions scored for stability
    #[serde(default = "default_stability_window")]
    pub stability_window: usize,

    /// Inner iterations after which the executor declares convergence regardless
    #[serde(default = "default_max_iterations")]
    pub max_iterations: u32,

    /// Fraction of the gap to each candidate closed by the executor state
    #[serde(default = "default_refinement_rate")]
    pub refinement_rate: f64,
}

const fn default_executor_state_dim() -> usize {
    256
}

const fn default_convergence_threshold() -> f64 {
    0.95
}

const fn default_stability_window() -> usize {
    5
}

const fn default_max_iterations() -> u32 {
    50
}

const fn default_refinement_rate() -> f64 {
    0.1
}

impl Default for ExecutorConfig {
    fn default() -> Self {
        Self {
            state_dim: default_executor_state_dim(),
            convergence_threshold: default_convergence_threshold(),
            stability_window: default_stability_window(),
            max_iterations: default_max_iterations(),
            refinement_rate: default_refinement_rate(),
        }
    }
}

/// Outer loop configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct CoordinatorConfig {
    /// Performance and quality both must exceed this for global convergence
    #[serde(default = "default_global_convergence_threshold")]
    pub global_convergence_threshold: f64,

    /// Outer iteration budget
    #[serde(default = "default_max_global_iterations")]
    pub max_global_iterations: u32,

    /// Hard ceiling on inner iterations per outer cycle
    #[serde(default = "default_inner_iteration_cap")]
    pub inner_iteration_cap: u32,

    /// Emit an inner progress event every this many inner iterations (0 disables)
    #[serde(default = "default_progress_interval")]
    pub progress_interval: u32,

    /// Label reported in the run lineage
    #[serde(default = "default_architecture_label")]
    pub architecture_label: String,
}

const fn default_global_convergence_threshold() -> f64 {
    0.95
}

const fn default_max_global_iterations() -> u32 {
    20
}

const fn default_inner_iteration_cap() -> u32 {
    100
}

const fn default_progress_interval() -> u32 {
    10
}

fn default_architecture_label() -> String {
    "hierarchical-27m".to_string()
}

impl Default for CoordinatorConfig {
    fn default() -> Self {
        Self {
            global_convergence_threshold: default_global_convergence_threshold(),
            max_global_iterations: default_max_global_iterations(),
            inner_iteration_cap: default_inner_iteration_cap(),
            progress_interval: default_progress_interval(),
            architecture_label: default_architecture_label(),
        }
    }
}

/// Which built-in search strategy the CLI plugs into the executor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StrategyKind {
    /// Seeded pseudo-random sampling
    #[default]
    Seeded,
    /// Deterministic geometric improvement
    Geometric,
}

impl std::fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Seeded => write!(f, "seeded"),
            Self::Geometric => write!(f, "geometric"),
        }
    }
}

/// Built-in search strategy configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct StrategyConfig {
    #[serde(default)]
    pub kind: StrategyKind,

    /// Seed for the seeded strategy
    #[serde(default = "default_seed")]
    pub seed: u64,

    /// Per-call shrink factor of the remaining gap for the geometric strategy
    #[serde(default = "default_decay")]
    pub decay: f64,
}

const fn default_seed() -> u64 {
    42
}

const fn default_decay() -> f64 {
    0.8
}

impl Default for StrategyConfig {
    fn default() -> Self {
        Self {
            kind: StrategyKind::default(),
            seed: default_seed(),
            decay: default_decay(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log format: json or pretty
    #[serde(default = "default_log_format")]
    pub format: String,

    /// Directory for rolling log files (stderr only when unset)
    #[serde(default)]
    pub log_dir: Option<PathBuf>,

    /// Log file rotation: daily, hourly, never
    #[serde(default = "default_rotation")]
    pub rotation: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

fn default_rotation() -> String {
    "daily".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            log_dir: None,
            rotation: default_rotation(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_reference_constants() {
        let config = Config::default();
        assert_eq!(config.planner.state_dim, 512);
        assert_eq!(config.executor.state_dim, 256);
        assert_eq!(config.executor.stability_window, 5);
        assert_eq!(config.executor.max_iterations, 50);
        assert_eq!(config.coordinator.max_global_iterations, 20);
        assert_eq!(config.coordinator.inner_iteration_cap, 100);
        assert!((config.coordinator.global_convergence_threshold - 0.95).abs() < f64::EPSILON);
    }

    #[test]
    fn test_parameters_used_from_dimensions() {
        assert_eq!(Config::default().parameters_used(), 768_000);
        assert_eq!(parameter_count(8, 4), 12_000);
    }

    #[test]
    fn test_partial_yaml_fills_defaults() {
        let yaml = r"
executor:
  max_iterations: 3
strategy:
  kind: geometric
";
        let config: Config = serde_yaml::from_str(yaml).expect("YAML should parse");
        assert_eq!(config.executor.max_iterations, 3);
        assert_eq!(config.executor.stability_window, 5);
        assert_eq!(config.strategy.kind, StrategyKind::Geometric);
        assert_eq!(config.strategy.seed, 42);
        assert_eq!(config.planner, PlannerConfig::default());
    }
}
