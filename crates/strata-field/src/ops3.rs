//! Finite-difference operators over [`Field3`].
//!
//! Same stencils and boundary handling as [`ops2`](crate::ops2) with a
//! third axis. Curl is the full vector curl:
//!
//! ```text
//! curl = (∂vz/∂y - ∂vy/∂z, ∂vx/∂z - ∂vz/∂x, ∂vy/∂x - ∂vx/∂y)
//! ```

use glam::DVec3;
use strata_core::FieldValue;

use crate::error::FieldError;
use crate::field3::Field3;
use crate::stencil::{axes3, Cursor3, Stencil};

pub(crate) fn laplacian_with<T, W>(field: &Field3<T>, out: &mut [T], write: W)
where
    T: FieldValue,
    W: Fn(&mut T, T) + Send + Sync,
{
    let values = field.values();
    let grid = *field.grid();
    let [ax, ay, az] = axes3(&grid);
    let inv2 = field.inv_spacing() * field.inv_spacing();
    let st = Stencil::new(field.boundary_policy(), field.boundary_value());

    field.dispatcher().for_each_chunk_mut(out, |offset, chunk| {
        let mut cur = Cursor3::at(&grid, offset);
        for (n, slot) in chunk.iter_mut().enumerate() {
            let index = offset + n;
            let lap = st.second_difference(values, index, cur.i, ax) * inv2.x
                + st.second_difference(values, index, cur.j, ay) * inv2.y
                + st.second_difference(values, index, cur.k, az) * inv2.z;
            write(slot, lap);
            cur.advance();
        }
    });
}

pub(crate) fn laplacian_unchecked<T: FieldValue>(field: &Field3<T>, out: &mut [T]) {
    laplacian_with(field, out, |slot, lap| *slot = lap);
}

/// Laplacian of `field` into `out`.
pub fn laplacian_into<T: FieldValue>(field: &Field3<T>, out: &mut [T]) -> Result<(), FieldError> {
    FieldError::check_len(field.count(), out.len())?;
    laplacian_unchecked(field, out);
    Ok(())
}

/// Per-axis `(minus, plus)` pairs for every cell, handed to `body`.
fn central_pairs<T, R, F>(field: &Field3<T>, out: &mut [R], body: F)
where
    T: FieldValue,
    R: Send,
    F: Fn([(T, T); 3]) -> R + Send + Sync,
{
    let values = field.values();
    let grid = *field.grid();
    let [ax, ay, az] = axes3(&grid);
    let st = Stencil::new(field.boundary_policy(), field.boundary_value());

    field.dispatcher().for_each_chunk_mut(out, |offset, chunk| {
        let mut cur = Cursor3::at(&grid, offset);
        for (n, slot) in chunk.iter_mut().enumerate() {
            let index = offset + n;
            *slot = body([
                st.pair(values, index, cur.i, ax),
                st.pair(values, index, cur.j, ay),
                st.pair(values, index, cur.k, az),
            ]);
            cur.advance();
        }
    });
}

pub(crate) fn gradient_unchecked(field: &Field3<f64>, out: &mut [DVec3]) {
    let h = field.inv_spacing() * 0.5;
    central_pairs(field, out, |[(xm, xp), (ym, yp), (zm, zp)]| {
        DVec3::new((xp - xm) * h.x, (yp - ym) * h.y, (zp - zm) * h.z)
    });
}

/// Central-difference gradient of a scalar field into `out`.
pub fn gradient_into(field: &Field3<f64>, out: &mut [DVec3]) -> Result<(), FieldError> {
    FieldError::check_len(field.count(), out.len())?;
    gradient_unchecked(field, out);
    Ok(())
}

pub(crate) fn divergence_unchecked(field: &Field3<DVec3>, out: &mut [f64]) {
    let h = field.inv_spacing() * 0.5;
    central_pairs(field, out, |[(xm, xp), (ym, yp), (zm, zp)]| {
        (xp.x - xm.x) * h.x + (yp.y - ym.y) * h.y + (zp.z - zm.z) * h.z
    });
}

/// Divergence of a vector field into `out`.
pub fn divergence_into(field: &Field3<DVec3>, out: &mut [f64]) -> Result<(), FieldError> {
    FieldError::check_len(field.count(), out.len())?;
    divergence_unchecked(field, out);
    Ok(())
}

pub(crate) fn curl_unchecked(field: &Field3<DVec3>, out: &mut [DVec3]) {
    let h = field.inv_spacing() * 0.5;
    central_pairs(field, out, |[(xm, xp), (ym, yp), (zm, zp)]| {
        let dx = (xp - xm) * h.x;
        let dy = (yp - ym) * h.y;
        let dz = (zp - zm) * h.z;
        DVec3::new(dy.z - dz.y, dz.x - dx.z, dx.y - dy.x)
    });
}

/// Vector curl of a vector field into `out`.
pub fn curl_into(field: &Field3<DVec3>, out: &mut [DVec3]) -> Result<(), FieldError> {
    FieldError::check_len(field.count(), out.len())?;
    curl_unchecked(field, out);
    Ok(())
}
