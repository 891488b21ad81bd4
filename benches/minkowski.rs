use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};

use motion::geometry::{decompose_convex, inflate, minkowski_sum_convex};
use motion::{Point, Polygon};

/// Star-shaped concave polygon with `spikes` outer points.
fn star(spikes: usize, outer: f64, inner: f64) -> Polygon {
    let step = std::f64::consts::PI / spikes as f64;
    let points = (0..2 * spikes)
        .map(|i| {
            let r = if i % 2 == 0 { outer } else { inner };
            let (sin, cos) = (step * i as f64).sin_cos();
            Point::new(r * cos, r * sin)
        })
        .collect();
    Polygon::new(points).unwrap()
}

fn bench_minkowski(c: &mut Criterion) {
    let mut group = c.benchmark_group("convex_sum");
    for sides in [4, 16, 64, 256] {
        let a = Polygon::regular(sides, 10.0).unwrap();
        let b = Polygon::regular(sides, 3.0).unwrap();
        group.bench_with_input(BenchmarkId::from_parameter(sides), &sides, |bench, _| {
            bench.iter(|| black_box(minkowski_sum_convex(&a, &b)));
        });
    }
    group.finish();

    let mut group = c.benchmark_group("decompose_star");
    for spikes in [5, 20, 80] {
        let shape = star(spikes, 10.0, 4.0);
        group.bench_with_input(BenchmarkId::from_parameter(spikes), &spikes, |bench, _| {
            bench.iter(|| black_box(decompose_convex(&shape)));
        });
    }
    group.finish();

    let mut group = c.benchmark_group("inflate_star");
    let device = star(5, 1.0, 0.4);
    for spikes in [5, 20, 80] {
        let obstacle = star(spikes, 10.0, 4.0);
        group.bench_with_input(BenchmarkId::from_parameter(spikes), &spikes, |bench, _| {
            bench.iter(|| black_box(inflate(&obstacle, &device)));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_minkowski);
criterion_main!(benches);
