//! Grid topology compliance test helpers.
//!
//! These functions verify the invariants every lattice must satisfy
//! regardless of wrap mode. Reused by the `Grid2` and `Grid3` test modules.

use glam::{DVec2, DVec3};
use indexmap::IndexSet;

use crate::{Domain2, Domain3, Grid2, Grid3};

/// Assert `flatten(expand(idx)) == idx` for every cell, and that expanded
/// coordinates are distinct and in range.
pub fn assert_grid2_round_trip(grid: &Grid2) {
    let mut seen = IndexSet::with_capacity(grid.count());
    for idx in 0..grid.count() {
        let (i, j) = grid.expand(idx);
        assert!(i < grid.nx() && j < grid.ny(), "expand({idx}) = ({i}, {j}) out of range");
        assert_eq!(grid.flatten(i, j), idx, "round trip failed at {idx}");
        assert!(seen.insert((i, j)), "duplicate coordinate ({i}, {j})");
    }
    assert_eq!(seen.len(), grid.count());
}

/// Assert every wrapped index lands in `[0, count)`, including far outside
/// the grid.
pub fn assert_grid2_wrap_in_range(grid: &Grid2) {
    let (nx, ny) = (grid.nx() as isize, grid.ny() as isize);
    for j in (-2 * ny - 1)..=(2 * ny + 1) {
        for i in (-2 * nx - 1)..=(2 * nx + 1) {
            let idx = grid.wrap_index(i, j);
            assert!(idx < grid.count(), "wrap_index({i}, {j}) = {idx} >= {}", grid.count());
            if grid.contains(i, j) {
                assert_eq!(idx, grid.flatten(i as usize, j as usize));
            }
        }
    }
}

/// Assert interpolation handles are normalised and in range over a sweep
/// of points inside and around the domain.
pub fn assert_grid2_weights_normalised(grid: &Grid2) {
    let domain = Domain2::unit();
    for sj in -4..=12 {
        for si in -4..=12 {
            let p = DVec2::new(si as f64 / 8.0, sj as f64 / 8.0);
            let fp = grid.grid_point_at(p, &domain);
            assert!(
                (fp.weight_sum() - 1.0).abs() < 1e-9,
                "weights at {p:?} sum to {}",
                fp.weight_sum()
            );
            assert!(fp.weights.iter().all(|w| *w >= 0.0));
            assert!(fp.corners.iter().all(|c| *c < grid.count()));
        }
    }
}

/// Run every 2D compliance check.
pub fn run_grid2_compliance(grid: &Grid2) {
    assert_grid2_round_trip(grid);
    assert_grid2_wrap_in_range(grid);
    assert_grid2_weights_normalised(grid);
}

/// 3D counterpart of [`assert_grid2_round_trip`].
pub fn assert_grid3_round_trip(grid: &Grid3) {
    let mut seen = IndexSet::with_capacity(grid.count());
    for idx in 0..grid.count() {
        let (i, j, k) = grid.expand(idx);
        assert!(
            i < grid.nx() && j < grid.ny() && k < grid.nz(),
            "expand({idx}) = ({i}, {j}, {k}) out of range"
        );
        assert_eq!(grid.flatten(i, j, k), idx, "round trip failed at {idx}");
        assert!(seen.insert((i, j, k)), "duplicate coordinate ({i}, {j}, {k})");
    }
    assert_eq!(seen.len(), grid.count());
}

/// 3D counterpart of [`assert_grid2_wrap_in_range`].
pub fn assert_grid3_wrap_in_range(grid: &Grid3) {
    let (nx, ny, nz) = (grid.nx() as isize, grid.ny() as isize, grid.nz() as isize);
    for k in (-nz - 1)..=(2 * nz) {
        for j in (-ny - 1)..=(2 * ny) {
            for i in (-nx - 1)..=(2 * nx) {
                let idx = grid.wrap_index(i, j, k);
                assert!(idx < grid.count(), "wrap_index({i}, {j}, {k}) = {idx}");
                if grid.contains(i, j, k) {
                    assert_eq!(idx, grid.flatten(i as usize, j as usize, k as usize));
                }
            }
        }
    }
}

/// 3D counterpart of [`assert_grid2_weights_normalised`].
pub fn assert_grid3_weights_normalised(grid: &Grid3) {
    let domain = Domain3::unit();
    for s in -3..=7 {
        let t = s as f64 / 5.0;
        for p in [
            DVec3::splat(t),
            DVec3::new(t, 0.5, 1.0 - t),
            DVec3::new(0.1, t * 0.7, t),
        ] {
            let fp = grid.grid_point_at(p, &domain);
            assert!((fp.weight_sum() - 1.0).abs() < 1e-9, "weights at {p:?}");
            assert!(fp.weights.iter().all(|w| *w >= 0.0));
            assert!(fp.corners.iter().all(|c| *c < grid.count()));
        }
    }
}

/// Run every 3D compliance check.
pub fn run_grid3_compliance(grid: &Grid3) {
    assert_grid3_round_trip(grid);
    assert_grid3_wrap_in_range(grid);
    assert_grid3_weights_normalised(grid);
}
