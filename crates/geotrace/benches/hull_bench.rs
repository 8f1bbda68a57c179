//! Criterion benchmarks for the four hull algorithms.
//! Sizes: n in {16, 64, 256, 1024} uniform points in a square (brute force
//! stops at 64, it is cubic).
//! Results: by default under target/criterion.

use criterion::{criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use geotrace::{HullAlgorithm, Point, PointSet};
use rand::{rngs::StdRng, Rng, SeedableRng};

fn random_cloud(n: usize, seed: u64) -> PointSet {
    let mut rng = StdRng::seed_from_u64(seed);
    let pts = (0..n)
        .map(|_| Point::new(rng.gen_range(-1.0..1.0), rng.gen_range(-1.0..1.0)))
        .collect();
    PointSet::new(pts).unwrap()
}

fn bench_hull(c: &mut Criterion) {
    let mut group = c.benchmark_group("hull");
    for &n in &[16usize, 64, 256, 1024] {
        for algo in HullAlgorithm::ALL {
            if algo == HullAlgorithm::BruteForce && n > 64 {
                continue;
            }
            group.bench_with_input(BenchmarkId::new(algo.id(), n), &n, |b, &n| {
                b.iter_batched(
                    || random_cloud(n, 43),
                    |pts| {
                        let _res = algo.compute(&pts);
                    },
                    BatchSize::SmallInput,
                )
            });
        }
    }
    group.finish();
}

criterion_group!(benches, bench_hull);
criterion_main!(benches);
