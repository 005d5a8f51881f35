//! Criterion benchmarks for path planning and click sampling.
//!
//! A move is planned once per pointer operation, and the controller then
//! paces waypoints at roughly 1 ms each, so planning must stay far below a
//! single waypoint interval even for screen-spanning moves.
//!
//! Run with:
//! ```bash
//! cargo bench --package pointer-core --bench trajectory_bench
//! ```

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use pointer_core::{Point, PointSampler, Rect, Speed, TrajectoryPlanner, TuningFactor};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn bench_plan_by_distance(c: &mut Criterion) {
    let planner = TrajectoryPlanner::new(Rect::new(0, 0, 3840, 2160), TuningFactor::REFERENCE);
    let mut rng = StdRng::seed_from_u64(0xC0FFEE);
    let start = Point::new(10, 10);

    let mut group = c.benchmark_group("plan");
    for distance in [50, 400, 1500, 3000] {
        let target = Point::new(10 + distance, 10 + distance / 2);
        for speed in [Speed::Slow, Speed::Fastest] {
            group.bench_with_input(
                BenchmarkId::new(speed.label(), distance),
                &target,
                |b, &target| b.iter(|| planner.plan(&mut rng, black_box(start), black_box(target), speed)),
            );
        }
    }
    group.finish();
}

fn bench_sample_point(c: &mut Criterion) {
    let mut sampler = PointSampler::seeded(1);
    let mut group = c.benchmark_group("sample");
    for (name, rect) in [
        ("inventory_slot", Rect::new(0, 0, 36, 32)),
        ("game_view", Rect::new(0, 0, 512, 334)),
        ("degenerate", Rect::new(0, 0, 3, 40)),
    ] {
        group.bench_function(name, |b| b.iter(|| sampler.sample(black_box(&rect))));
    }
    group.finish();
}

criterion_group!(benches, bench_plan_by_distance, bench_sample_point);
criterion_main!(benches);
