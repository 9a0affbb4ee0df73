// Benchmark for trajectory construction and dense evaluation
// Run with: cargo bench

use criterion::{Criterion, criterion_group, criterion_main};

use arctraj::{Point, PointTrajectory};

fn wavy_points(n: usize) -> Vec<Point> {
    (0..n)
        .map(|i| {
            let t = i as f64 * 0.5;
            Point::new(t, (t * 0.3).sin() * 2.0, 0.0)
        })
        .collect()
}

fn bench_build(c: &mut Criterion) {
    let points = wavy_points(1_000);
    c.bench_function("build spline trajectory (1k points)", |b| {
        b.iter(|| {
            let trajectory = PointTrajectory::builder().build(&points).unwrap();
            assert!(trajectory.length() > 0.0);
        });
    });
}

fn bench_compute_many(c: &mut Criterion) {
    let trajectory = PointTrajectory::builder()
        .build(&wavy_points(1_000))
        .unwrap();
    let ladder = trajectory.base_arange(0.05);
    c.bench_function("compute_many over 0.05 ladder", |b| {
        b.iter(|| {
            let samples = trajectory.compute_many(&ladder);
            assert_eq!(samples.len(), ladder.len());
        });
    });
}

fn bench_curvature_many(c: &mut Criterion) {
    let trajectory = PointTrajectory::builder()
        .build(&wavy_points(1_000))
        .unwrap();
    let ladder = trajectory.base_arange(0.05);
    c.bench_function("curvature_many over 0.05 ladder", |b| {
        b.iter(|| {
            let ks = trajectory.curvature_many(&ladder);
            assert!(ks.iter().all(|k| k.is_finite()));
        });
    });
}

criterion_group!(
    benches,
    bench_build,
    bench_compute_many,
    bench_curvature_many
);
criterion_main!(benches);
