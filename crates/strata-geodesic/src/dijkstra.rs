//! Cost-weighted L1 distance by grid Dijkstra.
//!
//! Relaxing neighbour `n` of a settled cell along axis `a` offers
//! `dist + spacing[a] * cost[n]`. Stale queue entries (popped above the
//! cell's current best) are skipped, so each cell is expanded once. With a
//! non-negative cost the result is the exact cost-weighted Manhattan
//! distance over the 4- or 6-connected lattice.

use strata_field::{Field2, Field3};
use tracing::debug;

use crate::error::{validate, GeodesicError};
use crate::frontier::{neighbours_2d, neighbours_3d, Frontier, SolveStats};

pub(crate) fn relax<N, I>(
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
    let mut frontier = Frontier::seeded(dist, sources);
    while let Some(entry) = frontier.pop() {
        if entry.dist > dist[entry.index] {
            frontier.stats.stale_pops += 1;
            continue;
        }
        frontier.stats.settled += 1;
        for (nb, axis) in neighbours(entry.index) {
            let candidate = entry.dist + spacing[axis] * costs[nb];
            if candidate < dist[nb] {
                dist[nb] = candidate;
                frontier.push(nb, candidate);
            }
        }
    }
    frontier.stats
}

/// L1 distance from `sources` over `cost`, into `out`.
///
/// # Errors
///
/// See [`GeodesicError`]; nothing is written on error.
pub fn dijkstra_2d_into(
    cost: &Field2<f64>,
    sources: &[usize],
    out: &mut [f64],
) -> Result<SolveStats, GeodesicError> {
    validate(cost.values(), sources, out.len())?;
    let grid = *cost.grid();
    let stats = relax(
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
        "dijkstra 2d solve complete"
    );
    Ok(stats)
}

/// L1 distance from `sources` over `cost` as a new field on the same grid.
pub fn dijkstra_2d(cost: &Field2<f64>, sources: &[usize]) -> Result<Field2<f64>, GeodesicError> {
    let mut out: Field2<f64> = Field2::like(cost);
    dijkstra_2d_into(cost, sources, out.values_mut())?;
    Ok(out)
}

/// 3D counterpart of [`dijkstra_2d_into`].
pub fn dijkstra_3d_into(
    cost: &Field3<f64>,
    sources: &[usize],
    out: &mut [f64],
) -> Result<SolveStats, GeodesicError> {
    validate(cost.values(), sources, out.len())?;
    let grid = *cost.grid();
    let stats = relax(
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
        "dijkstra 3d solve complete"
    );
    Ok(stats)
}

/// 3D counterpart of [`dijkstra_2d`].
pub fn dijkstra_3d(cost: &Field3<f64>, sources: &[usize]) -> Result<Field3<f64>, GeodesicError> {
    let mut out: Field3<f64> = Field3::like(cost);
    dijkstra_3d_into(cost, sources, out.values_mut())?;
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::{DVec2, DVec3};
    use strata_space::{Domain2, Domain3, Grid2, Grid3, WrapMode};

    fn cost_2d(grid: Grid2, spacing: DVec2, value: f64) -> Field2<f64> {
        let domain = Domain2::with_spacing(DVec2::ZERO, spacing, &grid).unwrap();
        let mut f = Field2::new(grid, domain);
        f.fill(value);
        f
    }

    #[test]
    fn unit_cost_gives_manhattan_distance() {
        let grid = Grid2::new(7, 5).unwrap();
        let (dx, dy) = (0.5, 2.0);
        let cost = cost_2d(grid, DVec2::new(dx, dy), 1.0);
        let dist = dijkstra_2d(&cost, &[0]).unwrap();
        for j in 0..5 {
            for i in 0..7 {
                let expected = i as f64 * dx + j as f64 * dy;
                assert_eq!(dist.values()[grid.flatten(i, j)], expected, "({i}, {j})");
            }
        }
    }

    #[test]
    fn cost_is_charged_on_entry() {
        let grid = Grid2::new(3, 1).unwrap();
        let mut cost = cost_2d(grid, DVec2::ONE, 1.0);
        cost.values_mut().copy_from_slice(&[5.0, 2.0, 3.0]);
        let dist = dijkstra_2d(&cost, &[0]).unwrap();
        assert_eq!(dist.values(), &[0.0, 2.0, 5.0]);
    }

    #[test]
    fn routes_around_expensive_cells() {
        // 3×3 with an expensive centre: the far corner is reached around it.
        let grid = Grid2::new(3, 3).unwrap();
        let mut cost = cost_2d(grid, DVec2::ONE, 1.0);
        cost.values_mut()[4] = 100.0;
        let dist = dijkstra_2d(&cost, &[grid.flatten(0, 1)]).unwrap();
        assert_eq!(dist.values()[grid.flatten(2, 1)], 4.0);
    }

    #[test]
    fn nearest_of_several_sources_wins() {
        let grid = Grid2::new(9, 1).unwrap();
        let cost = cost_2d(grid, DVec2::ONE, 1.0);
        let dist = dijkstra_2d(&cost, &[0, 8]).unwrap();
        assert_eq!(
            dist.values(),
            &[0.0, 1.0, 2.0, 3.0, 4.0, 3.0, 2.0, 1.0, 0.0]
        );
    }

    #[test]
    fn repeat_gives_toroidal_distance() {
        let grid = Grid2::new(8, 6).unwrap().with_wrap(WrapMode::Repeat);
        let cost = cost_2d(grid, DVec2::ONE, 1.0);
        let dist = dijkstra_2d(&cost, &[0]).unwrap();
        assert_eq!(dist.values()[grid.flatten(7, 0)], 1.0);
        assert_eq!(dist.values()[grid.flatten(7, 5)], 2.0);
        assert_eq!(dist.values()[grid.flatten(4, 3)], 7.0);
    }

    #[test]
    fn stats_balance() {
        let grid = Grid2::new(6, 6).unwrap();
        let cost = cost_2d(grid, DVec2::ONE, 1.0);
        let mut out = vec![0.0; grid.count()];
        let stats = dijkstra_2d_into(&cost, &[0, 0, 35], &mut out).unwrap();
        assert_eq!(stats.sources, 2);
        assert_eq!(stats.settled, 36);
        assert_eq!(stats.pops, stats.settled + stats.stale_pops);
        assert_eq!(stats.pushes, stats.pops);
    }

    #[test]
    fn errors_leave_output_untouched() {
        let grid = Grid2::new(3, 3).unwrap();
        let mut cost = cost_2d(grid, DVec2::ONE, 1.0);
        let mut out = vec![-1.0; 9];
        assert_eq!(
            dijkstra_2d_into(&cost, &[9], &mut out),
            Err(GeodesicError::SourceOutOfRange { index: 9, count: 9 })
        );
        cost.values_mut()[2] = -1.0;
        assert!(dijkstra_2d_into(&cost, &[0], &mut out).is_err());
        assert!(out.iter().all(|v| *v == -1.0));
    }

    #[test]
    fn three_d_manhattan() {
        let grid = Grid3::new(4, 3, 5).unwrap();
        let spacing = DVec3::new(1.0, 2.0, 0.5);
        let domain = Domain3::with_spacing(DVec3::ZERO, spacing, &grid).unwrap();
        let mut cost = Field3::new(grid, domain);
        cost.fill(2.0);
        let src = grid.flatten(1, 1, 2);
        let dist = dijkstra_3d(&cost, &[src]).unwrap();
        for index in 0..grid.count() {
            let (i, j, k) = grid.expand(index);
            let steps = DVec3::new(i as f64 - 1.0, j as f64 - 1.0, k as f64 - 2.0).abs();
            let expected = 2.0 * steps.dot(spacing);
            assert_eq!(dist.values()[index], expected);
        }
    }
}
