//! Delta-accumulating simulation over a [`Field2`].

use strata_core::FieldValue;
use strata_space::FieldPoint2;
use tracing::warn;

use crate::field2::Field2;
use crate::ops2;
use crate::stencil::{axes2, talus, Cursor2, Stencil};

/// A [`Field2`] paired with a same-length delta buffer.
///
/// Rule methods read the frozen values and add their contribution into
/// the deltas; they never touch the values. Any number of rules can run
/// between updates and their order does not matter. [`update`](Self::update)
/// applies `value += delta * dt` and zeroes the deltas.
///
/// # Examples
///
/// ```
/// use glam::DVec2;
/// use strata_field::{DynamicField2, Field2};
///
/// let mut f = Field2::<f64>::with_shape(3, 3, DVec2::ZERO, DVec2::splat(2.0)).unwrap();
/// f.values_mut()[4] = 1.0;
/// let mut sim = DynamicField2::new(f);
/// sim.decay(0.5);
/// sim.deposit(0.25);
/// assert_eq!(sim.field().values()[4], 1.0);
/// sim.update(1.0);
/// assert_eq!(sim.field().values()[4], 0.75);
/// assert_eq!(sim.field().values()[0], 0.25);
/// ```
#[derive(Clone, Debug)]
pub struct DynamicField2<T: FieldValue> {
    field: Field2<T>,
    deltas: Vec<T>,
}

impl<T: FieldValue> DynamicField2<T> {
    /// Wrap `field` with an all-zero delta buffer.
    pub fn new(field: Field2<T>) -> Self {
        let deltas = vec![T::zero(); field.count()];
        Self { field, deltas }
    }

    /// The wrapped field.
    pub fn field(&self) -> &Field2<T> {
        &self.field
    }

    /// The wrapped field, mutably. Shape is fixed, so the delta buffer
    /// stays in step.
    pub fn field_mut(&mut self) -> &mut Field2<T> {
        &mut self.field
    }

    /// Unwrap the field, discarding pending deltas.
    pub fn into_field(self) -> Field2<T> {
        self.field
    }

    /// Pending deltas.
    pub fn deltas(&self) -> &[T] {
        &self.deltas
    }

    /// Discard pending deltas.
    pub fn clear_deltas(&mut self) {
        let zero = T::zero();
        self.field
            .dispatcher()
            .for_each_chunk_mut(&mut self.deltas, |_, chunk| chunk.fill(zero));
    }

    /// Per-cell rule: `deltas[i] += rule(values[i])`.
    fn accumulate<F>(&mut self, rule: F)
    where
        F: Fn(T) -> T + Send + Sync,
    {
        let values = self.field.values();
        self.field
            .dispatcher()
            .for_each_chunk_mut(&mut self.deltas, |offset, chunk| {
                for (d, &v) in chunk.iter_mut().zip(&values[offset..]) {
                    *d += rule(v);
                }
            });
    }

    // ── Global rules ────────────────────────────────────────────

    /// Add `laplacian * rate` under the field's boundary policy.
    pub fn diffuse(&mut self, rate: f64) {
        ops2::laplacian_with(&self.field, &mut self.deltas, |d, lap| *d += lap * rate);
    }

    /// Add `amount` to every cell.
    pub fn deposit(&mut self, amount: T) {
        self.accumulate(|_| amount);
    }

    /// Pull every cell toward `target` by `(target - value) * rate`.
    pub fn deposit_toward(&mut self, target: T, rate: f64) {
        self.accumulate(|v| (target - v) * rate);
    }

    /// Relax every cell toward zero by `value * rate`.
    pub fn decay(&mut self, rate: f64) {
        self.accumulate(|v| T::zero() - v * rate);
    }

    // ── Scatter rules ───────────────────────────────────────────

    /// Add `amount` to one cell.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range.
    pub fn deposit_at(&mut self, index: usize, amount: T) {
        self.deltas[index] += amount;
    }

    /// Add `amount` spread over the corners of `point` by weight.
    pub fn deposit_at_point(&mut self, point: &FieldPoint2, amount: T) {
        for (c, w) in point.iter() {
            self.deltas[c] += amount * w;
        }
    }

    /// Pull one cell toward `target`.
    pub fn deposit_toward_at(&mut self, index: usize, target: T, rate: f64) {
        let v = self.field.values()[index];
        self.deltas[index] += (target - v) * rate;
    }

    /// Pull the corners of `point` toward `target`, each scaled by its
    /// weight.
    pub fn deposit_toward_at_point(&mut self, point: &FieldPoint2, target: T, rate: f64) {
        let values = self.field.values();
        for (c, w) in point.iter() {
            self.deltas[c] += (target - values[c]) * (rate * w);
        }
    }

    /// Relax one cell toward zero.
    pub fn decay_at(&mut self, index: usize, rate: f64) {
        let v = self.field.values()[index];
        self.deltas[index] += T::zero() - v * rate;
    }

    /// Relax the corners of `point` toward zero, each scaled by its weight.
    pub fn decay_at_point(&mut self, point: &FieldPoint2, rate: f64) {
        let values = self.field.values();
        for (c, w) in point.iter() {
            self.deltas[c] += T::zero() - values[c] * (rate * w);
        }
    }

    // ── Update ──────────────────────────────────────────────────

    /// Apply `value += delta * dt` to every cell, then zero the deltas.
    ///
    /// A non-finite `dt` is ignored with a warning and the deltas are
    /// kept.
    pub fn update(&mut self, dt: f64) {
        if !dt.is_finite() {
            warn!(dt, "ignoring update with non-finite dt");
            return;
        }
        let zero = T::zero();
        let dispatcher = self.field.dispatcher().clone();
        dispatcher.zip_chunks_mut(
            self.field.values_mut(),
            &mut self.deltas,
            |_, values, deltas| {
                for (v, d) in values.iter_mut().zip(deltas.iter_mut()) {
                    *v += *d * dt;
                    *d = zero;
                }
            },
        );
    }
}

impl DynamicField2<f64> {
    /// Thermal erosion: material moves down any directional slope steeper
    /// than `threshold`.
    ///
    /// For each axis direction, `m = (neighbour - value) / h`; when
    /// `|m| > threshold` the cell gains `sign(m) * (|m| - threshold) * rate`.
    /// Under `Equal` the missing side of an edge cell contributes nothing.
    pub fn erode(&mut self, threshold: f64, rate: f64) {
        let field = &self.field;
        let values = field.values();
        let grid = *field.grid();
        let axes = axes2(&grid);
        let inv = field.inv_spacing();
        let inv = [inv.x, inv.y];
        let st = Stencil::new(field.boundary_policy(), field.boundary_value());

        field
            .dispatcher()
            .for_each_chunk_mut(&mut self.deltas, |offset, chunk| {
                let mut cur = Cursor2::at(&grid, offset);
                for (k, d) in chunk.iter_mut().enumerate() {
                    let index = offset + k;
                    let v = values[index];
                    let coords = cur.coords();
                    for a in 0..2 {
                        let (coord, axis) = (coords[a], axes[a]);
                        *d += talus(st.minus(values, index, coord, axis), v, inv[a], threshold, rate);
                        *d += talus(st.plus(values, index, coord, axis), v, inv[a], threshold, rate);
                    }
                    cur.advance();
                }
            });
    }

    /// Two-level attractor: cells above `threshold` gain `amount`, cells at
    /// or below it lose `amount`.
    pub fn bifurcate(&mut self, threshold: f64, amount: f64) {
        self.accumulate(|v| if v > threshold { amount } else { -amount });
    }

    /// Two-level attractor with proportional pull: cells above `threshold`
    /// move toward `upper`, cells at or below it toward `lower`, by
    /// `(target - value) * rate`.
    pub fn bifurcate_toward(&mut self, threshold: f64, lower: f64, upper: f64, rate: f64) {
        self.accumulate(|v| {
            let target = if v > threshold { upper } else { lower };
            (target - v) * rate
        });
    }
}
