//! Implementation of the `hierarch run` command.

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use serde_json::json;
use std::path::PathBuf;

use crate::adapters::sinks::TracingEventSink;
use crate::adapters::strategies;
use crate::cli::output::{key_value_table, output, CommandOutput};
use crate::cli::progress::{create_spinner, SpinnerEventSink};
use crate::domain::models::{Config, Problem, ReasoningOutcome, StrategyKind};
use crate::infrastructure::config::ConfigLoader;
use crate::services::Coordinator;

#[derive(Args, Debug)]
pub struct RunArgs {
    /// Problem file (YAML or JSON mapping with a `type` field)
    #[arg(short, long, value_name = "FILE", conflicts_with = "preset")]
    pub problem: Option<PathBuf>,

    /// Built-in example problem (used when no problem file is given)
    #[arg(long, value_enum)]
    pub preset: Option<Preset>,

    /// Search strategy plugged into the executor
    #[arg(short, long, value_enum)]
    pub strategy: Option<StrategyChoice>,

    /// Seed for the seeded strategy
    #[arg(long)]
    pub seed: Option<u64>,

    /// Outer iteration budget
    #[arg(long, value_name = "N")]
    pub max_global_iterations: Option<u32>,

    /// Show a spinner while the coordinator runs
    #[arg(long)]
    pub progress: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Preset {
    /// 9x9 sudoku with 17 givens
    #[default]
    Sudoku,
    /// 30x30 maze with 30% obstacles
    Maze,
}

impl Preset {
    pub fn problem(self) -> Problem {
        match self {
            Self::Sudoku => Problem::new("sudoku_extreme")
                .with_field("difficulty", "master_level")
                .with_field("grid_size", 9)
                .with_field("filled_cells", 17)
                .with_field("rules", "standard_sudoku_rules")
                .with_field("optimization_target", "find_unique_solution"),
            Self::Maze => Problem::new("maze_pathfinding")
                .with_field("maze_size", "30x30")
                .with_field("obstacles", 0.3)
                .with_field("start", json!([0, 0]))
                .with_field("goal", json!([29, 29]))
                .with_field("optimization_target", "shortest_path"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StrategyChoice {
    Seeded,
    Geometric,
}

impl From<StrategyChoice> for StrategyKind {
    fn from(choice: StrategyChoice) -> Self {
        match choice {
            StrategyChoice::Seeded => Self::Seeded,
            StrategyChoice::Geometric => Self::Geometric,
        }
    }
}

#[derive(Debug, serde::Serialize)]
pub struct RunOutput {
    pub problem_type: String,
    pub strategy: String,
    pub outcome: ReasoningOutcome,
}

impl CommandOutput for RunOutput {
    fn to_human(&self) -> String {
        let outcome = &self.outcome;
        let metrics = &outcome.convergence_metrics;
        let stats = &outcome.computational_stats;
        let lineage = &outcome.lineage;

        let rows = [
            ("problem".to_string(), self.problem_type.clone()),
            ("strategy".to_string(), self.strategy.clone()),
            ("converged".to_string(), outcome.converged.to_string()),
            ("performance".to_string(), format!("{:.3}", outcome.performance)),
            ("quality".to_string(), format!("{:.3}", outcome.quality)),
            ("local stability".to_string(), format!("{:.3}", metrics.local_stability)),
            ("global coherence".to_string(), format!("{:.3}", metrics.global_coherence)),
            ("global checks".to_string(), metrics.iteration_count.to_string()),
            ("convergence rate".to_string(), format!("{:.3}", metrics.convergence_rate)),
            ("total time".to_string(), format!("{:.3}s", stats.total_time)),
            ("efficiency".to_string(), format!("{:.2}", stats.efficiency)),
            ("parameters".to_string(), stats.parameters_used.to_string()),
            ("planner updates".to_string(), lineage.planner_updates.to_string()),
            ("inner iterations".to_string(), lineage.inner_iterations_total.to_string()),
            ("architecture".to_string(), lineage.architecture_label.clone()),
        ];
        key_value_table(["Metric", "Value"], &rows).to_string()
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

/// Fold command-line overrides into the loaded configuration.
fn apply_overrides(config: &mut Config, args: &RunArgs) {
    if let Some(strategy) = args.strategy {
        config.strategy.kind = strategy.into();
    }
    if let Some(seed) = args.seed {
        config.strategy.seed = seed;
    }
    if let Some(max) = args.max_global_iterations {
        config.coordinator.max_global_iterations = max;
    }
}

fn load_problem(args: &RunArgs) -> Result<Problem> {
    match args.problem {
        Some(ref path) => Problem::from_file(path)
            .with_context(|| format!("Failed to load problem from {}", path.display())),
        None => Ok(args.preset.unwrap_or_default().problem()),
    }
}

/// Run the coordinator and return the command output without printing it.
pub fn run(args: &RunArgs, mut config: Config) -> Result<RunOutput> {
    apply_overrides(&mut config, args);
    ConfigLoader::validate(&config).context("Invalid run configuration")?;
    let problem = load_problem(args)?;

    let strategy = strategies::from_config(&config.strategy);
    let strategy_name = strategy.name().to_string();
    let mut coordinator = Coordinator::new(&config, strategy).with_sink(TracingEventSink::new());

    let spinner = args.progress.then(|| create_spinner("starting"));
    if let Some(ref spinner) = spinner {
        coordinator.subscribe(SpinnerEventSink::new(spinner.clone()));
    }

    let outcome = coordinator.reason(&problem);

    Ok(RunOutput {
        problem_type: problem.kind().to_string(),
        strategy: strategy_name,
        outcome,
    })
}

pub fn execute(args: RunArgs, config: Config, json_mode: bool) -> Result<()> {
    let result = run(&args, config)?;
    output(&result, json_mode);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn args() -> RunArgs {
        RunArgs {
            problem: None,
            preset: None,
            strategy: None,
            seed: None,
            max_global_iterations: None,
            progress: false,
        }
    }

    #[test]
    fn test_presets_carry_type() {
        assert_eq!(Preset::Sudoku.problem().kind(), "sudoku_extreme");
        assert_eq!(Preset::Maze.problem().kind(), "maze_pathfinding");
    }

    #[test]
    fn test_geometric_run_converges() {
        let args = RunArgs {
            strategy: Some(StrategyChoice::Geometric),
            ..args()
        };
        let result = run(&args, Config::default()).unwrap();
        assert_eq!(result.strategy, "geometric");
        assert_eq!(result.problem_type, "sudoku_extreme");
        assert!(result.outcome.converged);
        assert!(result.to_human().contains("sudoku_extreme"));
    }

    #[test]
    fn test_override_budget_is_validated() {
        let args = RunArgs {
            max_global_iterations: Some(0),
            ..args()
        };
        assert!(run(&args, Config::default()).is_err());
    }

    #[test]
    fn test_seeded_run_respects_budget() {
        let args = RunArgs {
            preset: Some(Preset::Maze),
            seed: Some(7),
            max_global_iterations: Some(2),
            ..args()
        };
        let result = run(&args, Config::default()).unwrap();
        assert!(result.outcome.lineage.global_iterations <= 2);
        let json = result.to_json();
        assert_eq!(json["strategy"], "seeded");
        assert!(json["outcome"]["convergence_metrics"]["iterations"].is_number());
    }

    #[test]
    fn test_problem_file_is_loaded() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "type: knapsack\nitems: 12\nconstraints: []").unwrap();
        file.flush().unwrap();

        let args = RunArgs {
            problem: Some(file.path().to_path_buf()),
            strategy: Some(StrategyChoice::Geometric),
            max_global_iterations: Some(1),
            ..args()
        };
        let result = run(&args, Config::default()).unwrap();
        assert_eq!(result.problem_type, "knapsack");
    }

    #[test]
    fn test_missing_problem_file_is_an_error() {
        let args = RunArgs {
            problem: Some(PathBuf::from("/definitely/not/here.yaml")),
            ..args()
        };
        let err = run(&args, Config::default()).unwrap_err();
        assert!(err.to_string().contains("Failed to load problem"));
    }
}
