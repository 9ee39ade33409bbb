use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use hierarch::adapters::strategies::{GeometricStrategy, SeededStrategy};
use hierarch::domain::models::{Config, Problem};
use hierarch::services::Coordinator;

fn sudoku() -> Problem {
    Problem::new("sudoku_extreme")
        .with_field("grid_size", 9)
        .with_field("filled_cells", 17)
}

fn bench_geometric_run(c: &mut Criterion) {
    let config = Config::default();
    let problem = sudoku();
    c.bench_function("coordinator_geometric_default", |b| {
        b.iter(|| {
            let mut coordinator = Coordinator::new(&config, GeometricStrategy::new(0.8));
            black_box(coordinator.reason(black_box(&problem)))
        });
    });
}

fn bench_seeded_budget(c: &mut Criterion) {
    let mut group = c.benchmark_group("coordinator_seeded_budget");
    let problem = sudoku();
    for max_global in [1u32, 5, 20] {
        let mut config = Config::default();
        config.coordinator.max_global_iterations = max_global;
        group.bench_with_input(BenchmarkId::from_parameter(max_global), &config, |b, config| {
            b.iter(|| {
                let mut coordinator = Coordinator::new(config, SeededStrategy::new(42));
                black_box(coordinator.reason(&problem))
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_geometric_run, bench_seeded_budget);
criterion_main!(benches);
