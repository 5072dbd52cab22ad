/*
 * Flock Simulation Benchmark
 *
 * Measures one flock step for growing populations under each scan strategy:
 * the full O(n^2) scan, the spatial grid broad-phase and the parallel scan.
 */

use boids3d::{Flock, SimulationParams, SpatialGrid, Vec3};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use std::time::Duration;

fn bench_params(parallel: bool, grid: bool) -> SimulationParams {
    SimulationParams {
        spawn_extent: Vec3::new(60.0, 40.0, 12.0),
        boundary: Vec3::new(30.0, 20.0, 6.0),
        enable_parallel: parallel,
        enable_spatial_grid: grid,
        ..SimulationParams::scene()
    }
}

// Benchmark rebuilding the broad-phase grid
fn bench_spatial_grid(c: &mut Criterion) {
    let mut group = c.benchmark_group("spatial_grid");

    for num_agents in [100, 500, 1000, 2000].iter() {
        group.bench_with_input(BenchmarkId::from_parameter(num_agents), num_agents, |b, &n| {
            let params = bench_params(false, true);
            let flock = Flock::seeded(n, &params, 42);
            let positions: Vec<Vec3> = flock.positions().collect();
            let mut grid = SpatialGrid::new(params.vision_range);

            b.iter(|| {
                grid.rebuild(params.vision_range, black_box(&positions));
                black_box(grid.occupied_cells());
            });
        });
    }

    group.finish();
}

// Benchmark one step under each strategy
fn bench_step(c: &mut Criterion) {
    let strategies = [
        ("full_scan", false, false),
        ("grid", false, true),
        ("parallel", true, false),
        ("parallel_grid", true, true),
    ];

    for (name, parallel, grid) in strategies {
        let mut group = c.benchmark_group(format!("step/{name}"));

        for num_agents in [100, 500, 1000, 2000].iter() {
            group.bench_with_input(BenchmarkId::from_parameter(num_agents), num_agents, |b, &n| {
                let params = bench_params(parallel, grid);
                let mut flock = Flock::seeded(n, &params, 42);

                b.iter(|| {
                    flock.advance(black_box(&params));
                });
            });
        }

        group.finish();
    }
}

criterion_group! {
    name = benches;
    config = Criterion::default()
        .sample_size(10)
        .measurement_time(Duration::from_secs(5))
        .warm_up_time(Duration::from_secs(1));
    targets = bench_spatial_grid, bench_step
}

criterion_main!(benches);
