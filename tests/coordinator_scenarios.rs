//! End-to-end scenarios for the two-timescale coordinator.

mod common;

use common::{excellent, excellent_scores, mediocre, small_config};
use hierarch::adapters::sinks::RecordingEventSink;
use hierarch::adapters::strategies::{GeometricStrategy, ScriptedStrategy, SeededStrategy};
use hierarch::domain::models::{ExecutorConfig, PlannerConfig, Problem, TacticalScores};
use hierarch::services::{Coordinator, FastExecutor, SlowPlanner};
use hierarch::Plan;

#[test]
fn test_inner_cap_scenario() {
    let config = ExecutorConfig {
        max_iterations: 3,
        stability_window: 5,
        ..Default::default()
    };
    let mut executor = FastExecutor::new(config, mediocre());
    let plan = Plan::default();

    for _ in 0..3 {
        executor.compute(&plan);
    }
    assert!(executor.converged());
    assert_eq!(executor.iteration(), 0);
    assert_eq!(executor.history_len(), 0);
}

#[test]
fn test_outer_cap_scenario() {
    let mut config = small_config();
    config.coordinator.max_global_iterations = 1;
    let sink = RecordingEventSink::new();
    let mut coordinator = Coordinator::new(&config, mediocre()).with_sink(sink.clone());

    let outcome = coordinator.reason(&Problem::new("maze_pathfinding"));

    assert!(!outcome.converged);
    assert_eq!(outcome.lineage.global_iterations, 1);
    assert_eq!(outcome.convergence_metrics.iteration_count, 1);
    assert!(outcome.convergence_metrics.convergence_rate.abs() < f64::EPSILON);
    assert!((0.0..=1.0).contains(&outcome.performance));
    assert!((0.0..=1.0).contains(&outcome.quality));
    assert_eq!(sink.count("plan_produced"), 1);
    assert_eq!(sink.count("budget_exhausted"), 1);
}

#[test]
fn test_global_convergence_scenario() {
    let config = small_config();
    let mut coordinator = Coordinator::new(&config, excellent());

    let outcome = coordinator.reason(&Problem::new("sudoku_extreme").with_field("grid_size", 9));

    assert!(outcome.converged);
    assert_eq!(outcome.lineage.global_iterations, 1);
    assert_eq!(outcome.convergence_metrics.iteration_count, 1);
    assert!((outcome.convergence_metrics.convergence_rate - 1.0 / 20.0).abs() < 1e-12);
    assert!((outcome.performance - 0.99).abs() < 1e-12);
    assert!((outcome.quality - 0.99).abs() < 1e-12);
    assert_eq!(outcome.solution.scores, excellent_scores());
}

#[test]
fn test_run_completes_on_empty_problem() {
    let mut coordinator = Coordinator::new(&small_config(), excellent());
    let outcome = coordinator.reason(&Problem::default());
    assert!(outcome.converged);

    let plan = coordinator
        .planner()
        .recent_plans()
        .last()
        .cloned()
        .expect("one plan produced");
    assert!(plan.context.is_empty());
}

#[test]
fn test_geometric_strategy_converges_globally() {
    let mut coordinator = Coordinator::new(&small_config(), GeometricStrategy::new(0.8));
    let outcome = coordinator.reason(&Problem::new("sudoku_extreme"));
    assert!(outcome.converged);
    assert!(outcome.performance > 0.95);
    assert!(outcome.quality > 0.95);
}

#[test]
fn test_seeded_runs_are_reproducible() {
    let run = || {
        let mut config = small_config();
        config.coordinator.max_global_iterations = 3;
        let strategy = SeededStrategy::new(11).with_candidate_len(16);
        let mut coordinator = Coordinator::new(&config, strategy);
        let outcome = coordinator.reason(&Problem::new("maze_pathfinding"));
        (
            outcome.performance,
            outcome.quality,
            outcome.lineage.inner_iterations_total,
            coordinator.planner().state().to_vec(),
        )
    };
    assert_eq!(run(), run());
}

#[test]
fn test_declared_constraints_flow_into_plans() {
    let problem: Problem = Problem::parse(
        r#"{"type": "scheduling", "constraints": [{"type": "time", "limit": 10}]}"#,
    )
    .unwrap();
    let sink = RecordingEventSink::new();
    let mut coordinator = Coordinator::new(&small_config(), excellent()).with_sink(sink.clone());
    coordinator.reason(&problem);

    let plan = coordinator.planner().recent_plans().last().cloned().unwrap();
    assert_eq!(plan.constraints.len(), 1);
    assert_eq!(plan.constraints[0].kind(), "time");
}

#[test]
fn test_outcome_uses_last_solution_across_cycles() {
    // The strategy settles on poor scores, so every cycle ends by max_iterations
    let mut config = small_config();
    config.executor.max_iterations = 4;
    config.coordinator.max_global_iterations = 3;
    let strategy = ScriptedStrategy::new(vec![
        TacticalScores::new(1.0, 0.2, 1.0),
        TacticalScores::new(1.0, 0.3, 1.0),
        TacticalScores::new(1.0, 0.4, 1.0),
        TacticalScores::new(1.0, 0.5, 1.0),
    ]);
    let mut coordinator = Coordinator::new(&config, strategy);
    let outcome = coordinator.reason(&Problem::new("x"));

    assert!(!outcome.converged);
    assert_eq!(outcome.lineage.inner_iterations_total, 12);
    // Each cycle ends on the fourth script entry
    assert!((outcome.quality - 0.5).abs() < 1e-12);
}

#[test]
fn test_planner_and_executor_compose_from_parts() {
    let planner = SlowPlanner::new(PlannerConfig {
        state_dim: 8,
        ..Default::default()
    });
    let executor = FastExecutor::new(
        ExecutorConfig {
            state_dim: 4,
            ..Default::default()
        },
        excellent(),
    );
    let mut coordinator = Coordinator::from_parts(planner, executor, Default::default());
    let outcome = coordinator.reason(&Problem::new("x"));
    assert_eq!(outcome.computational_stats.parameters_used, 12_000);
    assert_eq!(coordinator.executor().cycles_completed(), 1);
}
