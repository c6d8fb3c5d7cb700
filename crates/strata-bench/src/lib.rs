//! Benchmark profiles for the Strata field crates.
//!
//! - [`reference_2d`]: 256x256 scalar field (~65K cells)
//! - [`stress_2d`]: 1024x1024 scalar field (~1M cells)
//! - [`reference_3d`]: 64x64x64 scalar field (~262K cells)
//! - [`cost_2d`]: strictly positive cost field for the distance solvers
//!
//! Values come from a fixed integer hash of `(seed, index)` so every run
//! sees the same data without a random-number dependency.

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use glam::{DVec2, DVec3};
use strata_core::{Dispatcher, ParallelConfig};
use strata_field::{Field2, Field3};

/// Deterministic value in `[0, 1)` for `(seed, index)`.
pub fn hash_unit(seed: u64, index: usize) -> f64 {
    let mut x = seed ^ (index as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15);
    x = (x ^ (x >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    x = (x ^ (x >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    x ^= x >> 31;
    (x >> 11) as f64 / (1u64 << 53) as f64
}

/// An `nx` x `ny` field over `[0, nx-1] x [0, ny-1]` filled with hashed
/// values in `[0, 1)`.
pub fn hashed_2d(nx: usize, ny: usize, seed: u64) -> Field2<f64> {
    let to = DVec2::new((nx - 1) as f64, (ny - 1) as f64);
    let mut f = Field2::with_shape(nx, ny, DVec2::ZERO, to)
        .expect("benchmark shapes are valid");
    for (index, v) in f.values_mut().iter_mut().enumerate() {
        *v = hash_unit(seed, index);
    }
    f
}

/// 3D counterpart of [`hashed_2d`].
pub fn hashed_3d(nx: usize, ny: usize, nz: usize, seed: u64) -> Field3<f64> {
    let to = DVec3::new((nx - 1) as f64, (ny - 1) as f64, (nz - 1) as f64);
    let mut f = Field3::with_shape(nx, ny, nz, DVec3::ZERO, to)
        .expect("benchmark shapes are valid");
    for (index, v) in f.values_mut().iter_mut().enumerate() {
        *v = hash_unit(seed, index);
    }
    f
}

/// 256x256 reference field.
pub fn reference_2d(seed: u64) -> Field2<f64> {
    hashed_2d(256, 256, seed)
}

/// 1024x1024 stress field.
pub fn stress_2d(seed: u64) -> Field2<f64> {
    hashed_2d(1024, 1024, seed)
}

/// 64x64x64 reference field.
pub fn reference_3d(seed: u64) -> Field3<f64> {
    hashed_3d(64, 64, 64, seed)
}

/// Cost field with values in `[0.5, 1.5)`.
pub fn cost_2d(nx: usize, ny: usize, seed: u64) -> Field2<f64> {
    let mut f = hashed_2d(nx, ny, seed);
    f.map_in_place(|v| v + 0.5);
    f
}

/// Dispatcher on the global rayon pool with the default chunk size.
pub fn parallel_dispatcher() -> Dispatcher {
    Dispatcher::new(&ParallelConfig::default()).expect("default config is valid")
}
