//! Integration tests for the distance solvers.
//!
//! Random cost fields come from the seeded fixtures; the checks are
//! relations that must hold for any non-negative cost rather than golden
//! values.

use glam::DVec2;
use proptest::prelude::*;
use strata_field::Field2;
use strata_geodesic::{
    dijkstra_2d, dijkstra_2d_into, dijkstra_3d, fast_marching_2d, fast_marching_3d,
    GeodesicError,
};
use strata_space::{Domain2, Grid2, WrapMode};
use strata_test_utils::{random_2d, random_3d, uniform_2d, uniform_3d};

fn face_neighbours(grid: &Grid2, index: usize) -> Vec<(usize, usize)> {
    let (i, j) = grid.expand(index);
    let (i, j) = (i as isize, j as isize);
    [(-1, 0, 0), (1, 0, 0), (0, -1, 1), (0, 1, 1)]
        .into_iter()
        .filter(|&(di, dj, _)| grid.contains(i + di, j + dj))
        .map(|(di, dj, axis)| (grid.wrap_index(i + di, j + dj), axis))
        .collect()
}

// ── Relations between solvers ───────────────────────────────────

#[test]
fn fast_marching_never_exceeds_dijkstra() {
    let cost = random_2d(30, 20, 0.5, 2.0, 42);
    let sources = [0, 311, 599];
    let l1 = dijkstra_2d(&cost, &sources).unwrap();
    let l2 = fast_marching_2d(&cost, &sources).unwrap();
    for (a, b) in l2.values().iter().zip(l1.values()) {
        assert!(*a <= b + 1e-9, "{a} > {b}");
        assert!(*a >= 0.0);
    }
    for s in sources {
        assert_eq!(l2.values()[s], 0.0);
    }
}

#[test]
fn dijkstra_multi_source_is_pointwise_min() {
    let cost = random_2d(16, 16, 0.1, 3.0, 8);
    let a = dijkstra_2d(&cost, &[17]).unwrap();
    let b = dijkstra_2d(&cost, &[200]).unwrap();
    let both = dijkstra_2d(&cost, &[17, 200]).unwrap();
    for ((x, y), z) in a.values().iter().zip(b.values()).zip(both.values()) {
        assert_eq!(x.min(*y), *z);
    }
}

#[test]
fn zero_cost_region_shares_one_distance() {
    let mut cost = uniform_2d(10, 10, 1.0);
    let grid = *cost.grid();
    for j in 3..7 {
        for i in 3..7 {
            cost.values_mut()[grid.flatten(i, j)] = 0.0;
        }
    }
    let dist = dijkstra_2d(&cost, &[0]).unwrap();
    let entry = dist.values()[grid.flatten(3, 3)];
    assert_eq!(entry, 5.0);
    for j in 3..7 {
        for i in 3..7 {
            assert_eq!(dist.values()[grid.flatten(i, j)], entry);
        }
    }
}

#[test]
fn toroidal_wavefront_meets_itself() {
    let grid = Grid2::new(10, 10).unwrap().with_wrap(WrapMode::Repeat);
    let domain = Domain2::with_spacing(DVec2::ZERO, DVec2::ONE, &grid).unwrap();
    let mut cost = Field2::new(grid, domain);
    cost.fill(1.0);
    let dist = fast_marching_2d(&cost, &[grid.flatten(0, 0)]).unwrap();
    // Symmetric about the seam in both directions.
    for j in 0..10 {
        for i in 1..10 {
            let mirrored = grid.flatten(10 - i, j);
            assert_eq!(dist.values()[grid.flatten(i, j)], dist.values()[mirrored]);
        }
    }
    assert_eq!(dist.values()[grid.flatten(5, 0)], 5.0);
}

#[test]
fn three_d_fast_marching_bounded_by_dijkstra() {
    let cost = random_3d(8, 6, 5, 0.5, 1.5, 1);
    let grid = *cost.grid();
    let sources = [grid.flatten(3, 2, 2)];
    let l1 = dijkstra_3d(&cost, &sources).unwrap();
    let l2 = fast_marching_3d(&cost, &sources).unwrap();
    for (a, b) in l2.values().iter().zip(l1.values()) {
        assert!(*a <= b + 1e-9);
    }

    let unit = uniform_3d(6, 5, 4, 1.0);
    let dist = fast_marching_3d(&unit, &[0]).unwrap();
    for i in 0..6 {
        assert_eq!(dist.values()[unit.grid().flatten(i, 0, 0)], i as f64);
    }
}

#[test]
fn errors_are_classified() {
    let cost = uniform_2d(4, 4, 1.0);
    let mut out = vec![0.0; 3];
    let err = dijkstra_2d_into(&cost, &[0], &mut out).unwrap_err();
    match err {
        GeodesicError::Field(inner) => assert!(!inner.is_construction()),
        other => panic!("unexpected {other:?}"),
    }
}

// ── Properties ──────────────────────────────────────────────────

fn cost_grid() -> impl Strategy<Value = (usize, usize, Vec<f64>)> {
    (1usize..8, 1usize..8).prop_flat_map(|(nx, ny)| {
        (
            Just(nx),
            Just(ny),
            proptest::collection::vec(0.0f64..5.0, nx * ny),
        )
    })
}

fn build(nx: usize, ny: usize, costs: Vec<f64>) -> Field2<f64> {
    let grid = Grid2::new(nx, ny).unwrap();
    let domain = Domain2::with_spacing(DVec2::ZERO, DVec2::new(1.0, 0.5), &grid).unwrap();
    Field2::from_values(grid, domain, costs).unwrap()
}

proptest! {
    #[test]
    fn dijkstra_is_relaxed((nx, ny, costs) in cost_grid(), pick in any::<prop::sample::Index>()) {
        let cost = build(nx, ny, costs);
        let grid = *cost.grid();
        let h = cost.spacing().to_array();
        let src = pick.index(grid.count());
        let dist = dijkstra_2d(&cost, &[src]).unwrap();
        let d = dist.values();
        prop_assert_eq!(d[src], 0.0);
        for index in 0..grid.count() {
            prop_assert!(d[index].is_finite());
            for (nb, axis) in face_neighbours(&grid, index) {
                prop_assert!(d[nb] <= d[index] + h[axis] * cost.values()[nb]);
            }
        }
    }

    #[test]
    fn fast_marching_settles_everything((nx, ny, costs) in cost_grid(), pick in any::<prop::sample::Index>()) {
        let cost = build(nx, ny, costs);
        let src = pick.index(cost.count());
        let dist = fast_marching_2d(&cost, &[src]).unwrap();
        prop_assert!(dist.values().iter().all(|v| v.is_finite() && *v >= 0.0));
        prop_assert_eq!(dist.values()[src], 0.0);
    }
}
