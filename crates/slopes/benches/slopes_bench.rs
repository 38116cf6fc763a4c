//! Criterion benchmarks: fast slope statistics vs the O(n²) references.
//! Focus sizes: n in {100, 1000, 10000} (brute force only up to 1000).
//! Results: by default under target/criterion.

use criterion::{criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use slopes::brute::{count_slopes_naive, min_slope_naive};
use slopes::prelude::*;

fn cloud(n: usize, seed: u64) -> PointSet {
    draw_points(
        PointCloudCfg {
            n,
            half_extent: 100.0,
            integer_grid: false,
        },
        seed,
    )
}

fn bench_slopes(c: &mut Criterion) {
    let mut group = c.benchmark_group("slopes");
    for &n in &[100usize, 1000, 10_000] {
        group.bench_with_input(BenchmarkId::new("min_slope", n), &n, |b, &n| {
            b.iter_batched(
                || cloud(n, 41),
                |mut p| {
                    let _s = min_slope(&mut p);
                },
                BatchSize::SmallInput,
            )
        });
        group.bench_with_input(BenchmarkId::new("count_slopes", n), &n, |b, &n| {
            b.iter_batched(
                || cloud(n, 42),
                |mut p| {
                    let _c = count_slopes(&mut p, -1.0, 0.0).unwrap();
                },
                BatchSize::SmallInput,
            )
        });
        group.bench_with_input(BenchmarkId::new("kth_slope_median", n), &n, |b, &n| {
            b.iter_batched(
                || cloud(n, 43),
                |mut p| {
                    let k = p.pair_count() / 2;
                    let _s = kth_slope(&mut p, k.max(1), SelectCfg::default());
                },
                BatchSize::SmallInput,
            )
        });
        if n <= 1000 {
            group.bench_with_input(BenchmarkId::new("min_slope_naive", n), &n, |b, &n| {
                let p = cloud(n, 41);
                b.iter(|| min_slope_naive(p.points()))
            });
            group.bench_with_input(BenchmarkId::new("count_slopes_naive", n), &n, |b, &n| {
                let p = cloud(n, 42);
                b.iter(|| count_slopes_naive(p.points(), -1.0, 0.0))
            });
        }
    }
    group.finish();
}

criterion_group!(benches, bench_slopes);
criterion_main!(benches);
