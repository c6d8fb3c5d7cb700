//! Three-dimensional grid-bound fields.

use glam::DVec3;
use strata_core::num::{compensated_sum, lerp, remap};
use strata_core::{Dispatcher, FieldValue};
use strata_space::{Domain3, FieldPoint3, Grid3};

use crate::boundary::BoundaryPolicy;
use crate::error::FieldError;
use crate::ops3;

/// One value of type `T` per cell of a [`Grid3`], bound to a [`Domain3`].
///
/// The 3D counterpart of [`Field2`](crate::Field2); see there for the
/// ownership and boundary rules.
#[derive(Clone, Debug)]
pub struct Field3<T: FieldValue> {
    grid: Grid3,
    domain: Domain3,
    values: Vec<T>,
    boundary_value: T,
    boundary_policy: BoundaryPolicy,
    dispatcher: Dispatcher,
}

impl<T: FieldValue> Field3<T> {
    /// A zero-filled field over `grid` and `domain`.
    pub fn new(grid: Grid3, domain: Domain3) -> Self {
        Self {
            values: vec![T::zero(); grid.count()],
            grid,
            domain,
            boundary_value: T::zero(),
            boundary_policy: BoundaryPolicy::default(),
            dispatcher: Dispatcher::default(),
        }
    }

    /// A zero-filled `nx × ny × nz` field spanning `from..to`.
    pub fn with_shape(
        nx: usize,
        ny: usize,
        nz: usize,
        from: DVec3,
        to: DVec3,
    ) -> Result<Self, FieldError> {
        let grid = Grid3::new(nx, ny, nz)?;
        let domain = Domain3::new(from, to)?;
        Ok(Self::new(grid, domain))
    }

    /// A field taking ownership of `values`.
    ///
    /// Returns `Err(FieldError::SizeMismatch)` if `values.len() != grid.count()`.
    pub fn from_values(grid: Grid3, domain: Domain3, values: Vec<T>) -> Result<Self, FieldError> {
        FieldError::check_len(grid.count(), values.len())?;
        Ok(Self {
            grid,
            domain,
            values,
            boundary_value: T::zero(),
            boundary_policy: BoundaryPolicy::default(),
            dispatcher: Dispatcher::default(),
        })
    }

    /// A zero-filled field with the shape, domain, boundary policy, and
    /// dispatcher of `other`.
    pub fn like<U: FieldValue>(other: &Field3<U>) -> Self {
        Self {
            values: vec![T::zero(); other.grid.count()],
            grid: other.grid,
            domain: other.domain,
            boundary_value: T::zero(),
            boundary_policy: other.boundary_policy,
            dispatcher: other.dispatcher.clone(),
        }
    }

    /// Set the boundary policy and value.
    pub fn with_boundary(mut self, policy: BoundaryPolicy, value: T) -> Self {
        self.boundary_policy = policy;
        self.boundary_value = value;
        self
    }

    /// Replace the dispatcher.
    pub fn with_dispatcher(mut self, dispatcher: Dispatcher) -> Self {
        self.dispatcher = dispatcher;
        self
    }

    /// The grid topology.
    pub fn grid(&self) -> &Grid3 {
        &self.grid
    }

    /// The world-space domain.
    pub fn domain(&self) -> &Domain3 {
        &self.domain
    }

    /// Number of cells.
    pub fn count(&self) -> usize {
        self.values.len()
    }

    /// Per-axis cell spacing.
    pub fn spacing(&self) -> DVec3 {
        self.domain.spacing(&self.grid)
    }

    /// Reciprocal of [`spacing`](Self::spacing).
    pub fn inv_spacing(&self) -> DVec3 {
        self.domain.inv_spacing(&self.grid)
    }

    /// The value buffer.
    pub fn values(&self) -> &[T] {
        &self.values
    }

    /// The value buffer, mutably.
    pub fn values_mut(&mut self) -> &mut [T] {
        &mut self.values
    }

    /// Consume the field, returning its buffer.
    pub fn into_values(self) -> Vec<T> {
        self.values
    }

    /// The constant boundary value.
    pub fn boundary_value(&self) -> T {
        self.boundary_value
    }

    /// Set the constant boundary value.
    pub fn set_boundary_value(&mut self, value: T) {
        self.boundary_value = value;
    }

    /// The active boundary policy.
    pub fn boundary_policy(&self) -> BoundaryPolicy {
        self.boundary_policy
    }

    /// Change the boundary policy.
    pub fn set_boundary_policy(&mut self, policy: BoundaryPolicy) {
        self.boundary_policy = policy;
    }

    /// The dispatcher every per-cell loop on this field runs through.
    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    /// Replace the dispatcher.
    pub fn set_dispatcher(&mut self, dispatcher: Dispatcher) {
        self.dispatcher = dispatcher;
    }

    /// Rebind the field to the interval `from..to`.
    pub fn set_domain(&mut self, from: DVec3, to: DVec3) -> Result<(), FieldError> {
        self.domain = Domain3::new(from, to)?;
        Ok(())
    }

    /// World position of the cell at `index`.
    pub fn coordinate_at(&self, index: usize) -> DVec3 {
        self.grid.coordinate_at(index, &self.domain)
    }

    /// World position of every cell, in buffer order.
    pub fn coordinates(&self) -> Vec<DVec3> {
        (0..self.count()).map(|i| self.coordinate_at(i)).collect()
    }

    /// Flat index of the nearest cell to `point`.
    pub fn index_at(&self, point: DVec3) -> usize {
        self.grid.index_at(point, &self.domain)
    }

    /// Trilinear interpolation handle for `point`.
    pub fn grid_point_at(&self, point: DVec3) -> FieldPoint3 {
        self.grid.grid_point_at(point, &self.domain)
    }

    /// Trilinearly interpolated value at `point`.
    pub fn value_at(&self, point: DVec3) -> T {
        self.grid_point_at(point).evaluate(&self.values)
    }

    /// Value of the nearest cell to `point`.
    pub fn value_at_nearest(&self, point: DVec3) -> T {
        self.values[self.index_at(point)]
    }

    /// Value interpolated through a precomputed handle.
    pub fn value_at_grid_point(&self, point: &FieldPoint3) -> T {
        point.evaluate(&self.values)
    }

    /// Move each corner of `point` toward `value` by its weight.
    pub fn set_at(&mut self, point: &FieldPoint3, value: T) {
        for (c, w) in point.iter() {
            self.values[c] = lerp(self.values[c], value, w);
        }
    }

    /// Add `value * weight` to each corner of `point`.
    pub fn increment_at(&mut self, point: &FieldPoint3, value: T) {
        for (c, w) in point.iter() {
            self.values[c] += value * w;
        }
    }

    /// Set every cell to `value`.
    pub fn fill(&mut self, value: T) {
        self.dispatcher
            .for_each_chunk_mut(&mut self.values, |_, chunk| chunk.fill(value));
    }

    /// Copy `values` into the buffer.
    pub fn set_values(&mut self, values: &[T]) -> Result<(), FieldError> {
        FieldError::check_len(self.count(), values.len())?;
        self.values.copy_from_slice(values);
        Ok(())
    }

    /// Set each cell to `f(position)`.
    pub fn set_from_fn<F>(&mut self, f: F)
    where
        F: Fn(DVec3) -> T + Send + Sync,
    {
        let grid = self.grid;
        let origin = self.domain.origin();
        let spacing = self.spacing();
        self.dispatcher
            .for_each_chunk_mut(&mut self.values, |offset, chunk| {
                let (mut i, mut j, mut k) = grid.expand(offset);
                for slot in chunk.iter_mut() {
                    *slot = f(origin + DVec3::new(i as f64, j as f64, k as f64) * spacing);
                    i += 1;
                    if i == grid.nx() {
                        i = 0;
                        j += 1;
                        if j == grid.ny() {
                            j = 0;
                            k += 1;
                        }
                    }
                }
            });
    }

    /// Replace each value `v` with `f(v)`.
    pub fn map_in_place<F>(&mut self, f: F)
    where
        F: Fn(T) -> T + Send + Sync,
    {
        self.dispatcher.for_each_chunk_mut(&mut self.values, |_, chunk| {
            for v in chunk.iter_mut() {
                *v = f(*v);
            }
        });
    }

    /// Replace each value `v` with `f(v, other[i])`.
    pub fn zip_with<U, F>(&mut self, other: &Field3<U>, f: F) -> Result<(), FieldError>
    where
        U: FieldValue,
        F: Fn(T, U) -> T + Send + Sync,
    {
        FieldError::check_len(self.count(), other.count())?;
        let rhs = other.values();
        self.dispatcher
            .for_each_chunk_mut(&mut self.values, |offset, chunk| {
                for (v, &u) in chunk.iter_mut().zip(&rhs[offset..]) {
                    *v = f(*v, u);
                }
            });
        Ok(())
    }

    /// Interpolate the field at each of `points` into `out`.
    pub fn sample_points(&self, points: &[DVec3], out: &mut [T]) -> Result<(), FieldError> {
        FieldError::check_len(points.len(), out.len())?;
        self.dispatcher.for_each_chunk_mut(out, |offset, chunk| {
            for (slot, &p) in chunk.iter_mut().zip(&points[offset..]) {
                *slot = self.value_at(p);
            }
        });
        Ok(())
    }

    /// Overwrite every cell with `source` interpolated at the cell's
    /// position.
    pub fn resample(&mut self, source: &Field3<T>) {
        let grid = self.grid;
        let domain = self.domain;
        self.dispatcher
            .for_each_chunk_mut(&mut self.values, |offset, chunk| {
                for (k, slot) in chunk.iter_mut().enumerate() {
                    *slot = source.value_at(grid.coordinate_at(offset + k, &domain));
                }
            });
    }

    /// Laplacian under the active boundary policy.
    pub fn laplacian(&self) -> Field3<T> {
        let mut out = Field3::like(self);
        ops3::laplacian_unchecked(self, &mut out.values);
        out
    }
}

impl Field3<f64> {
    /// Central-difference gradient.
    pub fn gradient(&self) -> Field3<DVec3> {
        let mut out = Field3::like(self);
        ops3::gradient_unchecked(self, &mut out.values);
        out
    }

    /// Sum of all values (compensated).
    pub fn sum(&self) -> f64 {
        let partials = self
            .dispatcher
            .map_chunks(&self.values, |_, chunk| compensated_sum(chunk));
        compensated_sum(&partials)
    }

    /// Arithmetic mean of all values.
    pub fn mean(&self) -> f64 {
        self.sum() / self.count() as f64
    }

    /// `(min, max)` over all values.
    pub fn min_max(&self) -> (f64, f64) {
        self.values
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
                (lo.min(v), hi.max(v))
            })
    }

    /// Linearly rescale values from `from` onto `to`.
    pub fn remap(&mut self, from: (f64, f64), to: (f64, f64)) {
        self.map_in_place(|v| remap(v, from, to));
    }

    /// Rescale values into `[0, 1]`.
    pub fn normalize(&mut self) {
        let range = self.min_max();
        self.remap(range, (0.0, 1.0));
    }
}

impl Field3<DVec3> {
    /// Divergence `∂vx/∂x + ∂vy/∂y + ∂vz/∂z`.
    pub fn divergence(&self) -> Field3<f64> {
        let mut out = Field3::like(self);
        ops3::divergence_unchecked(self, &mut out.values);
        out
    }

    /// Vector curl.
    pub fn curl(&self) -> Field3<DVec3> {
        let mut out = Field3::like(self);
        ops3::curl_unchecked(self, &mut out.values);
        out
    }

    /// Length of each vector.
    pub fn magnitudes(&self) -> Field3<f64> {
        let mut out = Field3::like(self);
        let src = &self.values;
        self.dispatcher.for_each_chunk_mut(&mut out.values, |offset, chunk| {
            for (slot, v) in chunk.iter_mut().zip(&src[offset..]) {
                *slot = v.length();
            }
        });
        out
    }

    /// Scale each vector to unit length; degenerate vectors become zero.
    pub fn normalize_vectors(&mut self) {
        self.map_in_place(|v| v.normalize_or_zero());
    }
}
