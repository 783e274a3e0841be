//! Benchmarks for layout fitness and swarm iterations.
//!
//! Run with: cargo bench -p route-optimize
//!
//! To compare against baseline:
//! 1. First run: cargo bench -p route-optimize -- --save-baseline main
//! 2. After changes: cargo bench -p route-optimize -- --baseline main

#![allow(clippy::cast_precision_loss, clippy::unwrap_used)]

use cf_planar::{Bounds, Obstacle};
use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use nalgebra::{Point2, Vector2};
use route_optimize::{FitnessEvaluator, SearchSpace, SwarmOptimizer};
use route_types::{Anchor, Demand, HighwayConfig, HighwayProblem, SwarmConfig};

// =============================================================================
// Scenario Generation
// =============================================================================

/// Ports on a ring around a central island, each shipping to the next two.
fn create_problem(ports: usize) -> HighwayProblem {
    let center = Point2::new(500.0, 500.0);
    let anchors = (0..ports).map(|i| {
        let angle = std::f64::consts::TAU * i as f64 / ports as f64;
        Anchor::new(center + 400.0 * Vector2::new(angle.cos(), angle.sin()))
    });
    let demands = (0..ports).flat_map(|i| {
        [
            Demand::new(i, (i + 1) % ports, 10.0),
            Demand::new(i, (i + 2) % ports, 5.0),
        ]
    });

    HighwayProblem::new(Bounds::new(
        Point2::new(0.0, 0.0),
        Point2::new(1000.0, 1000.0),
    ))
    .with_anchors(anchors)
    .with_demands(demands)
    .with_obstacle(Obstacle::new(vec![
        Point2::new(400.0, 400.0),
        Point2::new(600.0, 400.0),
        Point2::new(600.0, 600.0),
        Point2::new(400.0, 600.0),
    ]))
}

/// Waypoints on an inner ring.
fn create_layout(count: usize) -> Vec<Point2<f64>> {
    (0..count)
        .map(|i| {
            let angle = std::f64::consts::TAU * (i as f64 + 0.5) / count as f64;
            Point2::new(500.0 + 200.0 * angle.cos(), 500.0 + 200.0 * angle.sin())
        })
        .collect()
}

// =============================================================================
// Fitness Benchmarks
// =============================================================================

fn bench_fitness(c: &mut Criterion) {
    let mut group = c.benchmark_group("Fitness");
    let problem = create_problem(8);

    for waypoints in [4, 8, 16] {
        let config = HighwayConfig::default()
            .with_waypoint_count(waypoints)
            .with_radius(350.0);
        let evaluator = FitnessEvaluator::new(&problem, &config);
        let layout = create_layout(waypoints);
        group.throughput(Throughput::Elements(problem.demands().len() as u64));

        group.bench_with_input(BenchmarkId::new("evaluate", waypoints), &layout, |b, layout| {
            b.iter(|| evaluator.evaluate(black_box(layout)));
        });
    }

    group.finish();
}

// =============================================================================
// Swarm Benchmarks
// =============================================================================

fn bench_swarm_step(c: &mut Criterion) {
    let mut group = c.benchmark_group("SwarmStep");
    group.sample_size(20);
    let problem = create_problem(8);
    let config = HighwayConfig::default()
        .with_waypoint_count(6)
        .with_radius(350.0);
    let evaluator = FitnessEvaluator::new(&problem, &config);

    for parallel in [false, true] {
        let swarm_config = SwarmConfig::default()
            .with_particles(32)
            .with_seed(1)
            .with_parallel(parallel);
        let space = SearchSpace::tiled(problem.bounds(), 6).unwrap();
        let optimizer = SwarmOptimizer::new(&evaluator, space, swarm_config);
        let label = if parallel { "parallel" } else { "sequential" };

        group.bench_function(BenchmarkId::new("step", label), |b| {
            let mut swarm = optimizer.initialize();
            b.iter(|| optimizer.step(black_box(&mut swarm)));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_fitness, bench_swarm_step);
criterion_main!(benches);
