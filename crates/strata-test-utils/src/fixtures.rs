//! Deterministic field fixtures.
//!
//! Every fixture uses a unit-spaced domain starting at the origin, so grid
//! index `(i, j[, k])` sits at world position `(i, j[, k])`. Random fixtures
//! are seeded through `ChaCha8Rng` and reproduce exactly across platforms.

use glam::{DVec2, DVec3};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use strata_field::{BoundaryPolicy, Field2, Field3};
use strata_space::{Domain2, Domain3, Grid2, Grid3};

/// An `nx × ny` grid with unit spacing and its domain.
pub fn unit_grid_2d(nx: usize, ny: usize) -> (Grid2, Domain2) {
    let grid = Grid2::new(nx, ny).expect("fixture dimensions must be positive");
    let domain = Domain2::with_spacing(DVec2::ZERO, DVec2::ONE, &grid)
        .expect("unit spacing is a valid domain");
    (grid, domain)
}

/// An `nx × ny × nz` grid with unit spacing and its domain.
pub fn unit_grid_3d(nx: usize, ny: usize, nz: usize) -> (Grid3, Domain3) {
    let grid = Grid3::new(nx, ny, nz).expect("fixture dimensions must be at least 2");
    let domain = Domain3::with_spacing(DVec3::ZERO, DVec3::ONE, &grid)
        .expect("unit spacing is a valid domain");
    (grid, domain)
}

/// Every cell set to `value`.
pub fn uniform_2d(nx: usize, ny: usize, value: f64) -> Field2<f64> {
    let (grid, domain) = unit_grid_2d(nx, ny);
    let mut f = Field2::new(grid, domain);
    f.fill(value);
    f
}

/// `value[i, j] = i`.
pub fn ramp_x_2d(nx: usize, ny: usize) -> Field2<f64> {
    let (grid, domain) = unit_grid_2d(nx, ny);
    let mut f = Field2::new(grid, domain);
    f.set_from_fn(|p| p.x);
    f
}

/// All zeros except `value` at the centre cell `(nx / 2, ny / 2)`.
pub fn spike_2d(nx: usize, ny: usize, value: f64) -> Field2<f64> {
    let (grid, domain) = unit_grid_2d(nx, ny);
    let mut f = Field2::new(grid, domain);
    let centre = grid.flatten(nx / 2, ny / 2);
    f.values_mut()[centre] = value;
    f
}

/// Uniform random values in `[lo, hi)` from a seeded generator.
pub fn random_2d(nx: usize, ny: usize, lo: f64, hi: f64, seed: u64) -> Field2<f64> {
    let (grid, domain) = unit_grid_2d(nx, ny);
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let values = (0..grid.count())
        .map(|_| rng.random_range(lo..hi))
        .collect();
    Field2::from_values(grid, domain, values).expect("fixture buffer matches grid")
}

/// A field with the given policy and a zero boundary value.
pub fn with_policy_2d(field: Field2<f64>, policy: BoundaryPolicy) -> Field2<f64> {
    field.with_boundary(policy, 0.0)
}

/// Every cell set to `value`.
pub fn uniform_3d(nx: usize, ny: usize, nz: usize, value: f64) -> Field3<f64> {
    let (grid, domain) = unit_grid_3d(nx, ny, nz);
    let mut f = Field3::new(grid, domain);
    f.fill(value);
    f
}

/// `value[i, j, k] = i`.
pub fn ramp_x_3d(nx: usize, ny: usize, nz: usize) -> Field3<f64> {
    let (grid, domain) = unit_grid_3d(nx, ny, nz);
    let mut f = Field3::new(grid, domain);
    f.set_from_fn(|p| p.x);
    f
}

/// All zeros except `value` at the centre cell.
pub fn spike_3d(nx: usize, ny: usize, nz: usize, value: f64) -> Field3<f64> {
    let (grid, domain) = unit_grid_3d(nx, ny, nz);
    let mut f = Field3::new(grid, domain);
    let centre = grid.flatten(nx / 2, ny / 2, nz / 2);
    f.values_mut()[centre] = value;
    f
}

/// Uniform random values in `[lo, hi)` from a seeded generator.
pub fn random_3d(nx: usize, ny: usize, nz: usize, lo: f64, hi: f64, seed: u64) -> Field3<f64> {
    let (grid, domain) = unit_grid_3d(nx, ny, nz);
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let values = (0..grid.count())
        .map(|_| rng.random_range(lo..hi))
        .collect();
    Field3::from_values(grid, domain, values).expect("fixture buffer matches grid")
}
