//! Per-axis neighbour fetch shared by operators and dynamic rules.
//!
//! A [`Stencil`] is resolved once per operator call from the field's
//! boundary policy and boundary value, then copied into each chunk body.
//! Neighbour reads return `None` only for an out-of-range neighbour under
//! [`BoundaryPolicy::Equal`]; callers substitute the cell's own value or
//! skip that side.

use strata_core::FieldValue;
use strata_space::{Grid2, Grid3};

use crate::boundary::BoundaryPolicy;

/// One axis of a lattice as seen from a flat index.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Axis {
    /// Cells along the axis.
    pub n: usize,
    /// Flat-index step between neighbours along the axis.
    pub stride: usize,
    /// Flat-index distance from the low edge to the high edge.
    pub seam: usize,
}

impl Axis {
    fn new(n: usize, stride: usize) -> Self {
        Self {
            n,
            stride,
            seam: (n - 1) * stride,
        }
    }
}

pub(crate) fn axes2(grid: &Grid2) -> [Axis; 2] {
    [Axis::new(grid.nx(), 1), Axis::new(grid.ny(), grid.stride_y())]
}

pub(crate) fn axes3(grid: &Grid3) -> [Axis; 3] {
    [
        Axis::new(grid.nx(), 1),
        Axis::new(grid.ny(), grid.stride_y()),
        Axis::new(grid.nz(), grid.stride_z()),
    ]
}

#[derive(Clone, Copy, Debug)]
pub(crate) struct Stencil<T> {
    policy: BoundaryPolicy,
    boundary: T,
}

impl<T: FieldValue> Stencil<T> {
    pub fn new(policy: BoundaryPolicy, boundary: T) -> Self {
        Self { policy, boundary }
    }

    /// Neighbour at `coord - 1` along `axis`.
    #[inline]
    pub fn minus(&self, values: &[T], index: usize, coord: usize, axis: Axis) -> Option<T> {
        if coord > 0 {
            return Some(values[index - axis.stride]);
        }
        match self.policy {
            BoundaryPolicy::Constant => Some(self.boundary),
            BoundaryPolicy::Equal => None,
            BoundaryPolicy::Periodic => Some(values[index + axis.seam]),
        }
    }

    /// Neighbour at `coord + 1` along `axis`.
    #[inline]
    pub fn plus(&self, values: &[T], index: usize, coord: usize, axis: Axis) -> Option<T> {
        if coord + 1 < axis.n {
            return Some(values[index + axis.stride]);
        }
        match self.policy {
            BoundaryPolicy::Constant => Some(self.boundary),
            BoundaryPolicy::Equal => None,
            BoundaryPolicy::Periodic => Some(values[index - axis.seam]),
        }
    }

    /// `(minus, plus)` with the cell's own value standing in for a missing
    /// side.
    #[inline]
    pub fn pair(&self, values: &[T], index: usize, coord: usize, axis: Axis) -> (T, T) {
        let v = values[index];
        (
            self.minus(values, index, coord, axis).unwrap_or(v),
            self.plus(values, index, coord, axis).unwrap_or(v),
        )
    }

    /// `Σ (neighbour - value)` over the present neighbours along `axis`.
    ///
    /// Under `Equal` a missing side contributes nothing, which is the same
    /// as substituting the cell's own value.
    #[inline]
    pub fn second_difference(&self, values: &[T], index: usize, coord: usize, axis: Axis) -> T {
        let v = values[index];
        let mut acc = T::zero();
        if let Some(m) = self.minus(values, index, coord, axis) {
            acc += m - v;
        }
        if let Some(p) = self.plus(values, index, coord, axis) {
            acc += p - v;
        }
        acc
    }
}

/// Excess-slope flow from one directional neighbour: with
/// `m = (neighbour - value) / h`, returns `sign(m) * (|m| - threshold) * rate`
/// when `|m| > threshold`, otherwise zero. A missing neighbour gives zero.
#[inline]
pub(crate) fn talus(nb: Option<f64>, v: f64, inv_h: f64, threshold: f64, rate: f64) -> f64 {
    let Some(n) = nb else {
        return 0.0;
    };
    let m = (n - v) * inv_h;
    let excess = m.abs() - threshold;
    if excess > 0.0 {
        m.signum() * excess * rate
    } else {
        0.0
    }
}

/// Incremental 2D multi-index over consecutive flat indices.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Cursor2 {
    pub i: usize,
    pub j: usize,
    nx: usize,
}

impl Cursor2 {
    pub fn at(grid: &Grid2, index: usize) -> Self {
        let (i, j) = grid.expand(index);
        Self { i, j, nx: grid.nx() }
    }

    #[inline]
    pub fn coords(&self) -> [usize; 2] {
        [self.i, self.j]
    }

    #[inline]
    pub fn advance(&mut self) {
        self.i += 1;
        if self.i == self.nx {
            self.i = 0;
            self.j += 1;
        }
    }
}

/// Incremental 3D multi-index over consecutive flat indices.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Cursor3 {
    pub i: usize,
    pub j: usize,
    pub k: usize,
    nx: usize,
    ny: usize,
}

impl Cursor3 {
    pub fn at(grid: &Grid3, index: usize) -> Self {
        let (i, j, k) = grid.expand(index);
        Self {
            i,
            j,
            k,
            nx: grid.nx(),
            ny: grid.ny(),
        }
    }

    #[inline]
    pub fn coords(&self) -> [usize; 3] {
        [self.i, self.j, self.k]
    }

    #[inline]
    pub fn advance(&mut self) {
        self.i += 1;
        if self.i == self.nx {
            self.i = 0;
            self.j += 1;
            if self.j == self.ny {
                self.j = 0;
                self.k += 1;
            }
        }
    }
}
