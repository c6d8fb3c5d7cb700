//! Test utilities for Strata development.
//!
//! Provides deterministic field fixtures ([`fixtures`]) and tolerance-based
//! float assertions shared by the integration tests and benchmarks of
//! every crate in the workspace.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;

pub use fixtures::*;

/// Default absolute tolerance for [`assert_close`].
pub const DEFAULT_TOLERANCE: f64 = 1e-9;

/// Assert `|actual - expected| <= tolerance`.
#[track_caller]
pub fn assert_close(actual: f64, expected: f64, tolerance: f64) {
    assert!(
        (actual - expected).abs() <= tolerance,
        "expected {expected}, got {actual} (tolerance {tolerance})"
    );
}

/// Assert two buffers are element-wise within `tolerance`, reporting the
/// first offending index.
#[track_caller]
pub fn assert_all_close(actual: &[f64], expected: &[f64], tolerance: f64) {
    assert_eq!(
        actual.len(),
        expected.len(),
        "length mismatch: {} vs {}",
        actual.len(),
        expected.len()
    );
    for (i, (a, e)) in actual.iter().zip(expected).enumerate() {
        assert!(
            (a - e).abs() <= tolerance,
            "index {i}: expected {e}, got {a} (tolerance {tolerance})"
        );
    }
}

/// Assert every element of `values` is within `tolerance` of `expected`.
#[track_caller]
pub fn assert_all_near(values: &[f64], expected: f64, tolerance: f64) {
    for (i, v) in values.iter().enumerate() {
        assert!(
            (v - expected).abs() <= tolerance,
            "index {i}: expected {expected}, got {v} (tolerance {tolerance})"
        );
    }
}
