//! Criterion micro-benchmarks for grid indexing and interpolation.

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};
use glam::DVec2;
use strata_bench::{hash_unit, reference_2d};
use strata_space::{Domain2, Grid2, WrapMode};

/// `expand` then `flatten` on every cell of a 256x256 grid.
fn bench_index_round_trip(c: &mut Criterion) {
    let grid = Grid2::new(256, 256).unwrap();

    c.bench_function("index_round_trip_65k", |b| {
        b.iter(|| {
            let mut acc = 0usize;
            for index in 0..grid.count() {
                let (i, j) = grid.expand(index);
                acc ^= grid.flatten(i, j);
            }
            black_box(acc);
        });
    });
}

/// Bilinear handles for 10K deterministic points under each wrap mode.
fn bench_grid_point_at(c: &mut Criterion) {
    let base = Grid2::new(256, 256).unwrap();
    let domain = Domain2::new(DVec2::ZERO, DVec2::splat(255.0)).unwrap();
    let points: Vec<DVec2> = (0..10_000)
        .map(|i| DVec2::new(hash_unit(1, i), hash_unit(2, i)) * 300.0 - 20.0)
        .collect();

    for (name, mode) in [
        ("grid_point_at_clamp_10k", WrapMode::Clamp),
        ("grid_point_at_repeat_10k", WrapMode::Repeat),
        ("grid_point_at_mirror_10k", WrapMode::MirrorRepeat),
    ] {
        let grid = base.with_wrap(mode);
        c.bench_function(name, |b| {
            b.iter(|| {
                for p in &points {
                    black_box(grid.grid_point_at(*p, &domain));
                }
            });
        });
    }
}

/// Interpolated sampling of a 256x256 field at 10K points.
fn bench_sample_points(c: &mut Criterion) {
    let field = reference_2d(5);
    let points: Vec<DVec2> = (0..10_000)
        .map(|i| DVec2::new(hash_unit(3, i), hash_unit(4, i)) * 255.0)
        .collect();
    let mut out = vec![0.0; points.len()];

    c.bench_function("sample_points_10k", |b| {
        b.iter(|| {
            field.sample_points(&points, &mut out).unwrap();
            black_box(&out);
        });
    });
}

criterion_group!(
    benches,
    bench_index_round_trip,
    bench_grid_point_at,
    bench_sample_points
);
criterion_main!(benches);
