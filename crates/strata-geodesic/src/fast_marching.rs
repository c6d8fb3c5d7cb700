//! Cost-weighted L2 distance by Fast Marching.
//!
//! Each cell is settled the first time it leaves the queue, and a popped
//! entry for an already-settled cell is discarded. When a cell is settled
//! its unsettled neighbours are re-estimated from the discretised Eikonal
//! equation `|∇T| = cost`, using for every axis the smaller of the two
//! settled neighbours along it:
//!
//! ```text
//! a = Σ 1/h²      b = -2 Σ t/h²      c = Σ t²/h² - w²
//! T = (√(b² - 4ac) - b) / 2a
//! ```
//!
//! A root is accepted only if it is real and not below any term it was
//! built from. Otherwise the largest term is dropped and the solve
//! repeated; a single remaining axis gives the one-sided update
//! `t + h * w`. An axis with no settled neighbour contributes no term, so
//! a wavefront that has only reached a cell along one axis always takes
//! the one-sided update.

use smallvec::SmallVec;
use strata_field::{Field2, Field3};
use tracing::debug;

use crate::error::{validate, GeodesicError};
use crate::frontier::{neighbours_2d, neighbours_3d, Frontier, SolveStats};

/// `(arrival, spacing)` per contributing axis.
type Terms = SmallVec<[(f64, f64); 3]>;

fn quadratic(terms: &[(f64, f64)], w: f64) -> Option<f64> {
    let (mut a, mut b, mut c) = (0.0, 0.0, -w * w);
    for &(t, h) in terms {
        let inv2 = 1.0 / (h * h);
        a += inv2;
        b -= 2.0 * t * inv2;
        c += t * t * inv2;
    }
    let disc = b * b - 4.0 * a * c;
    if disc < 0.0 {
        return None;
    }
    Some((disc.sqrt() - b) / (2.0 * a))
}

/// Arrival time at a cell with cost `w` from the known per-axis `terms`.
/// `terms` must be non-empty.
pub(crate) fn eikonal_update(mut terms: Terms, w: f64) -> f64 {
    terms.sort_by(|a, b| a.0.total_cmp(&b.0));
    for n in (2..=terms.len()).rev() {
        let used = &terms[..n];
        if let Some(t) = quadratic(used, w) {
            if t >= used[n - 1].0 {
                return t;
            }
        }
    }
    terms
        .iter()
        .map(|&(t, h)| t + h * w)
        .fold(f64::INFINITY, f64::min)
}

pub(crate) fn march<N, I>(
    dist: &mut [f64],
    costs: &[f64],
    sources: &[usize],
    spacing: &[f64],
    neighbours: N,
) -> SolveStats
where
    N: Fn(usize) -> I,
    I: IntoIterator<Item = (usize, usize)>,
{
    let mut settled = vec![false; dist.len()];
    let mut frontier = Frontier::seeded(dist, sources);
    while let Some(entry) = frontier.pop() {
        if settled[entry.index] {
            frontier.stats.stale_pops += 1;
            continue;
        }
        settled[entry.index] = true;
        frontier.stats.settled += 1;

        for (nb, _) in neighbours(entry.index) {
            if settled[nb] {
                continue;
            }
            let mut known = [f64::INFINITY; 3];
            for (m, axis) in neighbours(nb) {
                if settled[m] {
                    known[axis] = known[axis].min(dist[m]);
                }
            }
            let terms: Terms = known
                .iter()
                .zip(spacing)
                .filter(|(t, _)| t.is_finite())
                .map(|(&t, &h)| (t, h))
                .collect();
            let candidate = eikonal_update(terms, costs[nb]);
            if candidate < dist[nb] {
                dist[nb] = candidate;
                frontier.push(nb, candidate);
            }
        }
    }
    frontier.stats
}

/// L2 distance from `sources` over `cost`, into `out`.
///
/// # Errors
///
/// See [`GeodesicError`]; nothing is written on error.
pub fn fast_marching_2d_into(
    cost: &Field2<f64>,
    sources: &[usize],
    out: &mut [f64],
) -> Result<SolveStats, GeodesicError> {
    validate(cost.values(), sources, out.len())?;
    let grid = *cost.grid();
    let stats = march(
        out,
        cost.values(),
        sources,
        &cost.spacing().to_array(),
        |index| neighbours_2d(&grid, index),
    );
    debug!(
        sources = stats.sources,
        settled = stats.settled,
        pops = stats.pops,
        stale_pops = stats.stale_pops,
        pushes = stats.pushes,
        "fast marching 2d solve complete"
    );
    Ok(stats)
}

/// L2 distance from `sources` over `cost` as a new field on the same grid.
///
/// # Examples
///
/// ```
/// use glam::DVec2;
/// use strata_field::Field2;
/// use strata_geodesic::fast_marching_2d;
///
/// let mut cost = Field2::<f64>::with_shape(5, 5, DVec2::ZERO, DVec2::splat(4.0)).unwrap();
/// cost.fill(1.0);
/// let dist = fast_marching_2d(&cost, &[0]).unwrap();
///
/// // Along an edge row the wavefront arrives one-sided: exact distance.
/// assert_eq!(dist.values()[4], 4.0);
/// // Off-axis it is close to, and never below, the straight-line distance.
/// let far = dist.values()[24];
/// assert!(far >= 32f64.sqrt() && far < 8.0);
/// ```
pub fn fast_marching_2d(
    cost: &Field2<f64>,
    sources: &[usize],
) -> Result<Field2<f64>, GeodesicError> {
    let mut out: Field2<f64> = Field2::like(cost);
    fast_marching_2d_into(cost, sources, out.values_mut())?;
    Ok(out)
}

/// 3D counterpart of [`fast_marching_2d_into`].
pub fn fast_marching_3d_into(
    cost: &Field3<f64>,
    sources: &[usize],
    out: &mut [f64],
) -> Result<SolveStats, GeodesicError> {
    validate(cost.values(), sources, out.len())?;
    let grid = *cost.grid();
    let stats = march(
        out,
        cost.values(),
        sources,
        &cost.spacing().to_array(),
        |index| neighbours_3d(&grid, index),
    );
    debug!(
        sources = stats.sources,
        settled = stats.settled,
        pops = stats.pops,
        stale_pops = stats.stale_pops,
        pushes = stats.pushes,
        "fast marching 3d solve complete"
    );
    Ok(stats)
}

/// 3D counterpart of [`fast_marching_2d`].
pub fn fast_marching_3d(
    cost: &Field3<f64>,
    sources: &[usize],
) -> Result<Field3<f64>, GeodesicError> {
    let mut out: Field3<f64> = Field3::like(cost);
    fast_marching_3d_into(cost, sources, out.values_mut())?;
    Ok(out)
}
