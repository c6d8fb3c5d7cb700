//! Source lookup and steepest-descent path tracing over distance fields.

use glam::{DVec2, DVec3};
use strata_field::{Field2, Field3};
use strata_space::{Domain2, Domain3, Grid2, Grid3};
use tracing::{debug, warn};

/// Cell indices nearest to `points`, first occurrence kept on duplicates.
pub fn sources_at_points_2d(grid: &Grid2, domain: &Domain2, points: &[DVec2]) -> Vec<usize> {
    dedup_in_order(points.iter().map(|&p| grid.index_at(p, domain)))
}

/// 3D counterpart of [`sources_at_points_2d`].
pub fn sources_at_points_3d(grid: &Grid3, domain: &Domain3, points: &[DVec3]) -> Vec<usize> {
    dedup_in_order(points.iter().map(|&p| grid.index_at(p, domain)))
}

fn dedup_in_order(indices: impl Iterator<Item = usize>) -> Vec<usize> {
    let mut out: Vec<usize> = Vec::new();
    for index in indices {
        if !out.contains(&index) {
            out.push(index);
        }
    }
    out
}

fn valid_step(step: f64) -> bool {
    if step.is_finite() && step > 0.0 {
        true
    } else {
        warn!(step, "descent step must be positive and finite");
        false
    }
}

/// Walk downhill on `distance` from `start` in fixed `step`s along the
/// negated, normalised, interpolated gradient.
///
/// The returned polyline starts at `start` and ends when the walk reaches
/// a source cell (nearest cell at distance zero), stops on a plateau
/// (zero gradient, warned), or after `max_steps` steps. Points are kept
/// inside the field's domain.
pub fn trace_descent_2d(
    distance: &Field2<f64>,
    start: DVec2,
    step: f64,
    max_steps: usize,
) -> Vec<DVec2> {
    let mut path = vec![start];
    if !valid_step(step) {
        return path;
    }
    let gradient = distance.gradient();
    let (lo, hi) = (distance.domain().origin(), distance.domain().to());
    let mut p = start;
    for _ in 0..max_steps {
        if distance.value_at_nearest(p) <= 0.0 {
            return path;
        }
        let dir = -gradient.value_at(p).normalize_or_zero();
        if dir == DVec2::ZERO {
            warn!(x = p.x, y = p.y, "descent stopped on a plateau");
            return path;
        }
        p = (p + dir * step).clamp(lo, hi);
        path.push(p);
    }
    debug!(max_steps, "descent ran out of steps");
    path
}

/// 3D counterpart of [`trace_descent_2d`].
pub fn trace_descent_3d(
    distance: &Field3<f64>,
    start: DVec3,
    step: f64,
    max_steps: usize,
) -> Vec<DVec3> {
    let mut path = vec![start];
    if !valid_step(step) {
        return path;
    }
    let gradient = distance.gradient();
    let (lo, hi) = (distance.domain().origin(), distance.domain().to());
    let mut p = start;
    for _ in 0..max_steps {
        if distance.value_at_nearest(p) <= 0.0 {
            return path;
        }
        let dir = -gradient.value_at(p).normalize_or_zero();
        if dir == DVec3::ZERO {
            warn!(x = p.x, y = p.y, z = p.z, "descent stopped on a plateau");
            return path;
        }
        p = (p + dir * step).clamp(lo, hi);
        path.push(p);
    }
    debug!(max_steps, "descent ran out of steps");
    path
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{dijkstra_3d, fast_marching_2d};

    fn unit_field_2d(n: usize, value: f64) -> Field2<f64> {
        let grid = Grid2::new(n, n).unwrap();
        let domain = Domain2::with_spacing(DVec2::ZERO, DVec2::ONE, &grid).unwrap();
        let mut f = Field2::new(grid, domain);
        f.fill(value);
        f
    }

    #[test]
    fn sources_snap_and_dedupe() {
        let grid = Grid2::new(4, 4).unwrap();
        let domain = Domain2::new(DVec2::ZERO, DVec2::splat(3.0)).unwrap();
        let pts = [
            DVec2::new(0.2, 0.1),
            DVec2::new(2.6, 1.4),
            DVec2::new(-5.0, 0.0),
            DVec2::new(3.0, 1.0),
        ];
        assert_eq!(sources_at_points_2d(&grid, &domain, &pts), vec![0, 7]);
    }

    #[test]
    fn descends_to_source() {
        let cost = unit_field_2d(21, 1.0);
        let grid = *cost.grid();
        let src = grid.flatten(10, 10);
        let dist = fast_marching_2d(&cost, &[src]).unwrap();
        let path = trace_descent_2d(&dist, DVec2::new(2.0, 3.0), 0.25, 500);
        assert!(path.len() < 500);
        let end = *path.last().unwrap();
        assert_eq!(dist.index_at(end), src);
        assert_eq!(path[0], DVec2::new(2.0, 3.0));
    }

    #[test]
    fn plateau_stops_immediately() {
        let flat = unit_field_2d(5, 3.0);
        let path = trace_descent_2d(&flat, DVec2::splat(2.0), 0.5, 10);
        assert_eq!(path, vec![DVec2::splat(2.0)]);
    }

    #[test]
    fn step_budget_and_bad_step() {
        let cost = unit_field_2d(21, 1.0);
        let dist = fast_marching_2d(&cost, &[0]).unwrap();
        let path = trace_descent_2d(&dist, DVec2::splat(20.0), 0.1, 3);
        assert_eq!(path.len(), 4);
        assert_eq!(trace_descent_2d(&dist, DVec2::ONE, -1.0, 3).len(), 1);
        assert_eq!(trace_descent_2d(&dist, DVec2::ONE, f64::NAN, 3).len(), 1);
    }

    #[test]
    fn three_d_descent() {
        let grid = Grid3::new(9, 9, 9).unwrap();
        let domain = Domain3::with_spacing(DVec3::ZERO, DVec3::ONE, &grid).unwrap();
        let mut cost = Field3::new(grid, domain);
        cost.fill(1.0);
        let src = sources_at_points_3d(&grid, &domain, &[DVec3::splat(4.0)]);
        let dist = dijkstra_3d(&cost, &src).unwrap();
        let path = trace_descent_3d(&dist, DVec3::new(0.0, 8.0, 2.0), 0.25, 400);
        let end = *path.last().unwrap();
        assert_eq!(dist.index_at(end), src[0]);
    }
}
