//! The [`FieldValue`] payload trait.

use glam::{DVec2, DVec3};
use std::fmt::Debug;
use std::ops::{Add, AddAssign, Mul, Sub};

/// A per-cell payload that can be stored in a field buffer.
///
/// Every differential operator and dynamic rule in the workspace is written
/// against this trait, so a scalar field and a vector field share the same
/// Laplacian, deposit, and decay code. The arithmetic bounds are exactly
/// what those stencils need: sums and differences of neighbours, and
/// scaling by a real coefficient.
///
/// Implemented for `f64` (scalar fields), [`DVec2`] and [`DVec3`]
/// (vector fields).
pub trait FieldValue:
    Copy
    + Default
    + PartialEq
    + Debug
    + Send
    + Sync
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<f64, Output = Self>
    + AddAssign
    + 'static
{
    /// The additive identity.
    fn zero() -> Self;

    /// Returns `true` if every component is finite.
    fn is_finite_value(&self) -> bool;
}

impl FieldValue for f64 {
    #[inline]
    fn zero() -> Self {
        0.0
    }

    #[inline]
    fn is_finite_value(&self) -> bool {
        self.is_finite()
    }
}

impl FieldValue for DVec2 {
    #[inline]
    fn zero() -> Self {
        DVec2::ZERO
    }

    #[inline]
    fn is_finite_value(&self) -> bool {
        self.is_finite()
    }
}

impl FieldValue for DVec3 {
    #[inline]
    fn zero() -> Self {
        DVec3::ZERO
    }

    #[inline]
    fn is_finite_value(&self) -> bool {
        self.is_finite()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sum_all<T: FieldValue>(values: &[T]) -> T {
        let mut acc = T::zero();
        for &v in values {
            acc += v;
        }
        acc
    }

    #[test]
    fn zero_is_default() {
        assert_eq!(f64::zero(), f64::default());
        assert_eq!(DVec2::zero(), DVec2::default());
        assert_eq!(DVec3::zero(), DVec3::default());
    }

    #[test]
    fn generic_sum_over_vectors() {
        let v = [DVec2::new(1.0, 2.0), DVec2::new(3.0, -1.0)];
        assert_eq!(sum_all(&v), DVec2::new(4.0, 1.0));
    }

    #[test]
    fn finiteness_checks_every_component() {
        assert!(1.0f64.is_finite_value());
        assert!(!f64::NAN.is_finite_value());
        assert!(!DVec3::new(0.0, f64::INFINITY, 0.0).is_finite_value());
    }
}
