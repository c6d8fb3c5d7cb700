//! Finite-difference operators over [`Field2`].
//!
//! Each operator reads the field's frozen value buffer and writes one
//! result per cell into a separate output buffer, so chunks never observe
//! each other's writes. Out-of-range neighbours follow the field's
//! [`BoundaryPolicy`](crate::BoundaryPolicy):
//!
//! ```text
//! laplacian  = Σ_axis (v⁻ + v⁺ - 2v) / h²
//! gradient   = ((v⁺ - v⁻) / 2hx, (v⁺ - v⁻) / 2hy)
//! divergence = ∂vx/∂x + ∂vy/∂y
//! curl       = ∂vy/∂x - ∂vx/∂y
//! ```
//!
//! Under `Equal` a missing neighbour is the cell itself, so the Laplacian
//! drops that side's term and the gradient becomes one-sided while keeping
//! the `2h` denominator.

use glam::DVec2;
use strata_core::FieldValue;

use crate::error::FieldError;
use crate::field2::Field2;
use crate::stencil::{axes2, Cursor2, Stencil};

/// Shared Laplacian loop. `write(slot, lap)` folds each result into `out`.
pub(crate) fn laplacian_with<T, W>(field: &Field2<T>, out: &mut [T], write: W)
where
    T: FieldValue,
    W: Fn(&mut T, T) + Send + Sync,
{
    let values = field.values();
    let grid = *field.grid();
    let axes = axes2(&grid);
    let inv2 = field.inv_spacing() * field.inv_spacing();
    let st = Stencil::new(field.boundary_policy(), field.boundary_value());

    field.dispatcher().for_each_chunk_mut(out, |offset, chunk| {
        let mut cur = Cursor2::at(&grid, offset);
        for (k, slot) in chunk.iter_mut().enumerate() {
            let index = offset + k;
            let lap = st.second_difference(values, index, cur.i, axes[0]) * inv2.x
                + st.second_difference(values, index, cur.j, axes[1]) * inv2.y;
            write(slot, lap);
            cur.advance();
        }
    });
}

pub(crate) fn laplacian_unchecked<T: FieldValue>(field: &Field2<T>, out: &mut [T]) {
    laplacian_with(field, out, |slot, lap| *slot = lap);
}

/// Laplacian of `field` into `out`.
///
/// Returns `Err(FieldError::SizeMismatch)` if `out` is not one entry per
/// cell.
pub fn laplacian_into<T: FieldValue>(field: &Field2<T>, out: &mut [T]) -> Result<(), FieldError> {
    FieldError::check_len(field.count(), out.len())?;
    laplacian_unchecked(field, out);
    Ok(())
}

pub(crate) fn gradient_unchecked(field: &Field2<f64>, out: &mut [DVec2]) {
    let values = field.values();
    let grid = *field.grid();
    let [ax, ay] = axes2(&grid);
    let half_inv = field.inv_spacing() * 0.5;
    let st = Stencil::new(field.boundary_policy(), field.boundary_value());

    field.dispatcher().for_each_chunk_mut(out, |offset, chunk| {
        let mut cur = Cursor2::at(&grid, offset);
        for (k, slot) in chunk.iter_mut().enumerate() {
            let index = offset + k;
            let (xm, xp) = st.pair(values, index, cur.i, ax);
            let (ym, yp) = st.pair(values, index, cur.j, ay);
            *slot = DVec2::new((xp - xm) * half_inv.x, (yp - ym) * half_inv.y);
            cur.advance();
        }
    });
}

/// Central-difference gradient of a scalar field into `out`.
pub fn gradient_into(field: &Field2<f64>, out: &mut [DVec2]) -> Result<(), FieldError> {
    FieldError::check_len(field.count(), out.len())?;
    gradient_unchecked(field, out);
    Ok(())
}

pub(crate) fn divergence_unchecked(field: &Field2<DVec2>, out: &mut [f64]) {
    let values = field.values();
    let grid = *field.grid();
    let [ax, ay] = axes2(&grid);
    let half_inv = field.inv_spacing() * 0.5;
    let st = Stencil::new(field.boundary_policy(), field.boundary_value());

    field.dispatcher().for_each_chunk_mut(out, |offset, chunk| {
        let mut cur = Cursor2::at(&grid, offset);
        for (k, slot) in chunk.iter_mut().enumerate() {
            let index = offset + k;
            let (xm, xp) = st.pair(values, index, cur.i, ax);
            let (ym, yp) = st.pair(values, index, cur.j, ay);
            *slot = (xp.x - xm.x) * half_inv.x + (yp.y - ym.y) * half_inv.y;
            cur.advance();
        }
    });
}

/// Divergence of a vector field into `out`.
pub fn divergence_into(field: &Field2<DVec2>, out: &mut [f64]) -> Result<(), FieldError> {
    FieldError::check_len(field.count(), out.len())?;
    divergence_unchecked(field, out);
    Ok(())
}

pub(crate) fn curl_unchecked(field: &Field2<DVec2>, out: &mut [f64]) {
    let values = field.values();
    let grid = *field.grid();
    let [ax, ay] = axes2(&grid);
    let half_inv = field.inv_spacing() * 0.5;
    let st = Stencil::new(field.boundary_policy(), field.boundary_value());

    field.dispatcher().for_each_chunk_mut(out, |offset, chunk| {
        let mut cur = Cursor2::at(&grid, offset);
        for (k, slot) in chunk.iter_mut().enumerate() {
            let index = offset + k;
            let (xm, xp) = st.pair(values, index, cur.i, ax);
            let (ym, yp) = st.pair(values, index, cur.j, ay);
            *slot = (xp.y - xm.y) * half_inv.x - (yp.x - ym.x) * half_inv.y;
            cur.advance();
        }
    });
}

/// Scalar curl of a vector field into `out`.
pub fn curl_into(field: &Field2<DVec2>, out: &mut [f64]) -> Result<(), FieldError> {
    FieldError::check_len(field.count(), out.len())?;
    curl_unchecked(field, out);
    Ok(())
}
