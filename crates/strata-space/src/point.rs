//! Interpolation handles for non-grid-aligned queries.
//!
//! A field point is produced once by a grid lookup and can then be reused
//! to evaluate or scatter into any field sharing that grid.

use strata_core::num::weighted_sum;
use strata_core::FieldValue;

/// Four corner indices and bilinear weights.
///
/// Corners are ordered `(i0,j0), (i1,j0), (i0,j1), (i1,j1)`. Weights are
/// non-negative and sum to 1 within rounding.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FieldPoint2 {
    /// Flat corner indices, already wrapped into the grid.
    pub corners: [usize; 4],
    /// Bilinear weight of each corner.
    pub weights: [f64; 4],
}

impl FieldPoint2 {
    /// A handle that resolves entirely to one cell.
    pub fn at_index(index: usize) -> Self {
        Self {
            corners: [index; 4],
            weights: [1.0, 0.0, 0.0, 0.0],
        }
    }

    /// Sum of the corner weights.
    pub fn weight_sum(&self) -> f64 {
        self.weights.iter().sum()
    }

    /// Bilinear evaluation over `values`.
    ///
    /// # Panics
    ///
    /// Panics if a corner index is out of bounds for `values`.
    #[inline]
    pub fn evaluate<T: FieldValue>(&self, values: &[T]) -> T {
        weighted_sum(self.corners.iter().map(|&c| values[c]), &self.weights)
    }

    /// `(index, weight)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (usize, f64)> + '_ {
        self.corners.iter().copied().zip(self.weights.iter().copied())
    }
}

/// Eight corner indices and trilinear weights.
///
/// Corners are ordered with `i` varying fastest, then `j`, then `k`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FieldPoint3 {
    /// Flat corner indices, already wrapped into the grid.
    pub corners: [usize; 8],
    /// Trilinear weight of each corner.
    pub weights: [f64; 8],
}

impl FieldPoint3 {
    /// A handle that resolves entirely to one cell.
    pub fn at_index(index: usize) -> Self {
        let mut weights = [0.0; 8];
        weights[0] = 1.0;
        Self {
            corners: [index; 8],
            weights,
        }
    }

    /// Sum of the corner weights.
    pub fn weight_sum(&self) -> f64 {
        self.weights.iter().sum()
    }

    /// Trilinear evaluation over `values`.
    ///
    /// # Panics
    ///
    /// Panics if a corner index is out of bounds for `values`.
    #[inline]
    pub fn evaluate<T: FieldValue>(&self, values: &[T]) -> T {
        weighted_sum(self.corners.iter().map(|&c| values[c]), &self.weights)
    }

    /// `(index, weight)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (usize, f64)> + '_ {
        self.corners.iter().copied().zip(self.weights.iter().copied())
    }
}
