//! Delta-accumulating simulation over a [`Field3`].

use strata_core::FieldValue;
use strata_space::FieldPoint3;
use tracing::warn;

use crate::field3::Field3;
use crate::ops3;
use crate::stencil::{axes3, talus, Cursor3, Stencil};

/// A [`Field3`] paired with a same-length delta buffer.
///
/// Same contract as [`DynamicField2`](crate::DynamicField2): rules only
/// add into the deltas, [`update`](Self::update) applies and clears them.
#[derive(Clone, Debug)]
pub struct DynamicField3<T: FieldValue> {
    field: Field3<T>,
    deltas: Vec<T>,
}

impl<T: FieldValue> DynamicField3<T> {
    /// Wrap `field` with an all-zero delta buffer.
    pub fn new(field: Field3<T>) -> Self {
        let deltas = vec![T::zero(); field.count()];
        Self { field, deltas }
    }

    /// The wrapped field.
    pub fn field(&self) -> &Field3<T> {
        &self.field
    }

    /// The wrapped field, mutably.
    pub fn field_mut(&mut self) -> &mut Field3<T> {
        &mut self.field
    }

    /// Unwrap the field, discarding pending deltas.
    pub fn into_field(self) -> Field3<T> {
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

    /// Add `laplacian * rate`.
    pub fn diffuse(&mut self, rate: f64) {
        ops3::laplacian_with(&self.field, &mut self.deltas, |d, lap| *d += lap * rate);
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

    /// Add `amount` to one cell. Panics if `index` is out of range.
    pub fn deposit_at(&mut self, index: usize, amount: T) {
        self.deltas[index] += amount;
    }

    /// Add `amount` spread over the corners of `point` by weight.
    pub fn deposit_at_point(&mut self, point: &FieldPoint3, amount: T) {
        for (c, w) in point.iter() {
            self.deltas[c] += amount * w;
        }
    }

    /// Pull one cell toward `target`.
    pub fn deposit_toward_at(&mut self, index: usize, target: T, rate: f64) {
        let v = self.field.values()[index];
        self.deltas[index] += (target - v) * rate;
    }

    /// Pull the corners of `point` toward `target` by weight.
    pub fn deposit_toward_at_point(&mut self, point: &FieldPoint3, target: T, rate: f64) {
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

    /// Relax the corners of `point` toward zero by weight.
    pub fn decay_at_point(&mut self, point: &FieldPoint3, rate: f64) {
        let values = self.field.values();
        for (c, w) in point.iter() {
            self.deltas[c] += T::zero() - values[c] * (rate * w);
        }
    }

    /// Apply `value += delta * dt`, then zero the deltas. A non-finite `dt`
    /// is ignored with a warning.
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

impl DynamicField3<f64> {
    /// Thermal erosion over all six directions.
    pub fn erode(&mut self, threshold: f64, rate: f64) {
        let field = &self.field;
        let values = field.values();
        let grid = *field.grid();
        let axes = axes3(&grid);
        let inv = field.inv_spacing().to_array();
        let st = Stencil::new(field.boundary_policy(), field.boundary_value());

        field
            .dispatcher()
            .for_each_chunk_mut(&mut self.deltas, |offset, chunk| {
                let mut cur = Cursor3::at(&grid, offset);
                for (n, d) in chunk.iter_mut().enumerate() {
                    let index = offset + n;
                    let v = values[index];
                    for ((coord, axis), inv_h) in cur.coords().into_iter().zip(axes).zip(inv) {
                        *d += talus(st.minus(values, index, coord, axis), v, inv_h, threshold, rate);
                        *d += talus(st.plus(values, index, coord, axis), v, inv_h, threshold, rate);
                    }
                    cur.advance();
                }
            });
    }

    /// Cells above `threshold` gain `amount`; the rest lose it.
    pub fn bifurcate(&mut self, threshold: f64, amount: f64) {
        self.accumulate(|v| if v > threshold { amount } else { -amount });
    }

    /// Cells above `threshold` move toward `upper`, the rest toward
    /// `lower`, by `(target - value) * rate`.
    pub fn bifurcate_toward(&mut self, threshold: f64, lower: f64, upper: f64, rate: f64) {
        self.accumulate(|v| {
            let target = if v > threshold { upper } else { lower };
            (target - v) * rate
        });
    }
}
