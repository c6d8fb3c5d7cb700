//! Shared numeric helpers.

use crate::value::FieldValue;

/// Linear interpolation between `a` and `b`.
#[inline]
pub fn lerp<T: FieldValue>(a: T, b: T, t: f64) -> T {
    a + (b - a) * t
}

/// Map `value` from the interval `[from.0, from.1]` onto `[to.0, to.1]`.
///
/// A degenerate source interval maps everything to `to.0`.
#[inline]
pub fn remap(value: f64, from: (f64, f64), to: (f64, f64)) -> f64 {
    let span = from.1 - from.0;
    if span == 0.0 {
        return to.0;
    }
    to.0 + (value - from.0) / span * (to.1 - to.0)
}

/// Absolute-tolerance float comparison.
#[inline]
pub fn approx_eq(a: f64, b: f64, tolerance: f64) -> bool {
    (a - b).abs() <= tolerance
}

/// `Σ values[k] * weights[k]` over paired slices.
///
/// Used by bilinear/trilinear evaluation of interpolation handles.
#[inline]
pub fn weighted_sum<T: FieldValue>(values: impl IntoIterator<Item = T>, weights: &[f64]) -> T {
    let mut acc = T::zero();
    for (v, &w) in values.into_iter().zip(weights) {
        acc += v * w;
    }
    acc
}

/// Sum of a slice of reals using compensated (Kahan) summation.
pub fn compensated_sum(values: &[f64]) -> f64 {
    let mut sum = 0.0;
    let mut c = 0.0;
    for &v in values {
        let y = v - c;
        let t = sum + y;
        c = (t - sum) - y;
        sum = t;
    }
    sum
}
