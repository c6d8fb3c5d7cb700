//! Two-dimensional lattice topology.

use glam::DVec2;

use crate::domain::Domain2;
use crate::error::SpaceError;
use crate::point::FieldPoint2;
use crate::wrap::WrapMode;

/// Split a grid-space coordinate into its lower cell and fractional offset.
/// Non-finite coordinates resolve to cell 0 with no offset.
#[inline]
pub(crate) fn split_axis(g: f64) -> (isize, f64) {
    if !g.is_finite() {
        return (0, 0.0);
    }
    let f = g.floor();
    (f as isize, g - f)
}

/// Round a grid-space coordinate to the nearest cell, ties away from zero.
#[inline]
pub(crate) fn round_axis(g: f64) -> isize {
    if g.is_finite() {
        g.round() as isize
    } else {
        0
    }
}

/// A fixed `nx × ny` lattice with per-axis wrap modes.
///
/// Cells are stored row-major: cell `(i, j)` has flat index `i + j * nx`.
/// A grid is immutable once constructed; changing wrap modes produces a new
/// value.
///
/// # Examples
///
/// ```
/// use strata_space::{Grid2, WrapMode};
///
/// let grid = Grid2::new(4, 3).unwrap().with_wrap_modes(WrapMode::Repeat, WrapMode::Clamp);
/// assert_eq!(grid.count(), 12);
/// assert_eq!(grid.flatten(1, 2), 9);
/// assert_eq!(grid.expand(9), (1, 2));
/// assert_eq!(grid.wrap_index(-1, 5), grid.flatten(3, 2));
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Grid2 {
    nx: usize,
    ny: usize,
    count: usize,
    wrap_x: WrapMode,
    wrap_y: WrapMode,
}

impl Grid2 {
    /// Smallest accepted count on each axis.
    pub const MIN_DIM: usize = 1;

    /// Create an `nx × ny` grid with [`WrapMode::Clamp`] on both axes.
    ///
    /// Returns `Err(SpaceError::InvalidDimension)` if either count is zero,
    /// or `Err(SpaceError::CellCountOverflow)` if `nx * ny` overflows.
    pub fn new(nx: usize, ny: usize) -> Result<Self, SpaceError> {
        for (axis, value) in [("nx", nx), ("ny", ny)] {
            if value < Self::MIN_DIM {
                return Err(SpaceError::InvalidDimension {
                    axis,
                    value,
                    min: Self::MIN_DIM,
                });
            }
        }
        let count = nx
            .checked_mul(ny)
            .ok_or_else(|| SpaceError::CellCountOverflow { dims: vec![nx, ny] })?;
        Ok(Self {
            nx,
            ny,
            count,
            wrap_x: WrapMode::Clamp,
            wrap_y: WrapMode::Clamp,
        })
    }

    /// The same grid with the given per-axis wrap modes.
    pub fn with_wrap_modes(self, wrap_x: WrapMode, wrap_y: WrapMode) -> Self {
        Self {
            wrap_x,
            wrap_y,
            ..self
        }
    }

    /// The same grid with `mode` on both axes.
    pub fn with_wrap(self, mode: WrapMode) -> Self {
        self.with_wrap_modes(mode, mode)
    }

    /// Per-axis wrap modes `(x, y)`.
    pub fn wrap_modes(&self) -> (WrapMode, WrapMode) {
        (self.wrap_x, self.wrap_y)
    }

    /// Cells along x.
    pub fn nx(&self) -> usize {
        self.nx
    }

    /// Cells along y.
    pub fn ny(&self) -> usize {
        self.ny
    }

    /// Total number of cells.
    pub fn count(&self) -> usize {
        self.count
    }

    /// Flat-index stride along y (`nx`). The x stride is 1.
    pub fn stride_y(&self) -> usize {
        self.nx
    }

    /// Flat index of an in-range cell. Indices are not wrapped.
    #[inline]
    pub fn flatten(&self, i: usize, j: usize) -> usize {
        debug_assert!(i < self.nx && j < self.ny, "({i}, {j}) outside grid");
        i + j * self.nx
    }

    /// Inverse of [`flatten`](Self::flatten).
    #[inline]
    pub fn expand(&self, index: usize) -> (usize, usize) {
        (index % self.nx, index / self.nx)
    }

    /// Wrap an x index into `[0, nx)`.
    #[inline]
    pub fn wrap_x(&self, i: isize) -> usize {
        self.wrap_x.apply(i, self.nx)
    }

    /// Wrap a y index into `[0, ny)`.
    #[inline]
    pub fn wrap_y(&self, j: isize) -> usize {
        self.wrap_y.apply(j, self.ny)
    }

    /// Wrap both indices, then flatten.
    #[inline]
    pub fn wrap_index(&self, i: isize, j: isize) -> usize {
        self.wrap_x(i) + self.wrap_y(j) * self.nx
    }

    /// Whether `(i, j)` lies inside the grid without wrapping.
    pub fn contains(&self, i: isize, j: isize) -> bool {
        i >= 0 && j >= 0 && (i as usize) < self.nx && (j as usize) < self.ny
    }

    /// Whether two grids have the same counts (wrap modes are ignored).
    pub fn shape_eq(&self, other: &Self) -> bool {
        self.nx == other.nx && self.ny == other.ny
    }

    /// Flat-index offsets from a cell on the low edge of each axis to the
    /// matching cell on the high edge: `(nx - 1, (ny - 1) * nx)`.
    ///
    /// Periodic stencils add or subtract these to reach across the seam
    /// without a modulo in the hot loop.
    pub fn periodic_offsets(&self) -> (usize, usize) {
        (self.nx - 1, (self.ny - 1) * self.nx)
    }

    /// `point` in continuous grid coordinates, where integer values land on
    /// cell centres.
    #[inline]
    pub fn to_grid_space(&self, point: DVec2, domain: &Domain2) -> DVec2 {
        (point - domain.origin()) * domain.inv_spacing(self)
    }

    /// World position of the cell at flat `index`.
    pub fn coordinate_at(&self, index: usize, domain: &Domain2) -> DVec2 {
        let (i, j) = self.expand(index);
        domain.origin() + DVec2::new(i as f64, j as f64) * domain.spacing(self)
    }

    /// Nearest cell to `point`, wrapped per axis.
    ///
    /// Halfway cases round away from zero.
    pub fn indices_at(&self, point: DVec2, domain: &Domain2) -> (usize, usize) {
        let g = self.to_grid_space(point, domain);
        (self.wrap_x(round_axis(g.x)), self.wrap_y(round_axis(g.y)))
    }

    /// Flat index of the nearest cell to `point`.
    pub fn index_at(&self, point: DVec2, domain: &Domain2) -> usize {
        let (i, j) = self.indices_at(point, domain);
        self.flatten(i, j)
    }

    /// Bilinear interpolation handle for `point`.
    ///
    /// Each corner is wrapped independently, so under `Repeat` the upper
    /// corners of the last cell land on the first row or column.
    pub fn grid_point_at(&self, point: DVec2, domain: &Domain2) -> FieldPoint2 {
        let g = self.to_grid_space(point, domain);
        let (i0, tx) = split_axis(g.x);
        let (j0, ty) = split_axis(g.y);

        let x0 = self.wrap_x(i0);
        let x1 = self.wrap_x(i0.saturating_add(1));
        let y0 = self.wrap_y(j0) * self.nx;
        let y1 = self.wrap_y(j0.saturating_add(1)) * self.nx;

        let (sx, sy) = (1.0 - tx, 1.0 - ty);
        FieldPoint2 {
            corners: [x0 + y0, x1 + y0, x0 + y1, x1 + y1],
            weights: [sx * sy, tx * sy, sx * ty, tx * ty],
        }
    }
}
