//! Three-dimensional lattice topology.

use glam::DVec3;

use crate::domain::Domain3;
use crate::error::SpaceError;
use crate::grid2::{round_axis, split_axis};
use crate::point::FieldPoint3;
use crate::wrap::WrapMode;

/// A fixed `nx × ny × nz` lattice with per-axis wrap modes.
///
/// Cell `(i, j, k)` has flat index `i + j * nx + k * nx * ny`. Every axis
/// needs at least two cells so that each axis has a unit cell to
/// difference across.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Grid3 {
    nx: usize,
    ny: usize,
    nz: usize,
    nxy: usize,
    count: usize,
    wrap: [WrapMode; 3],
}

impl Grid3 {
    /// Smallest accepted count on each axis.
    pub const MIN_DIM: usize = 2;

    /// Create an `nx × ny × nz` grid with [`WrapMode::Clamp`] on every axis.
    ///
    /// Returns `Err(SpaceError::InvalidDimension)` if any count is below 2,
    /// or `Err(SpaceError::CellCountOverflow)` if the product overflows.
    pub fn new(nx: usize, ny: usize, nz: usize) -> Result<Self, SpaceError> {
        for (axis, value) in [("nx", nx), ("ny", ny), ("nz", nz)] {
            if value < Self::MIN_DIM {
                return Err(SpaceError::InvalidDimension {
                    axis,
                    value,
                    min: Self::MIN_DIM,
                });
            }
        }
        let overflow = || SpaceError::CellCountOverflow {
            dims: vec![nx, ny, nz],
        };
        let nxy = nx.checked_mul(ny).ok_or_else(overflow)?;
        let count = nxy.checked_mul(nz).ok_or_else(overflow)?;
        Ok(Self {
            nx,
            ny,
            nz,
            nxy,
            count,
            wrap: [WrapMode::Clamp; 3],
        })
    }

    /// The same grid with the given per-axis wrap modes.
    pub fn with_wrap_modes(self, wrap_x: WrapMode, wrap_y: WrapMode, wrap_z: WrapMode) -> Self {
        Self {
            wrap: [wrap_x, wrap_y, wrap_z],
            ..self
        }
    }

    /// The same grid with `mode` on every axis.
    pub fn with_wrap(self, mode: WrapMode) -> Self {
        self.with_wrap_modes(mode, mode, mode)
    }

    /// Per-axis wrap modes `(x, y, z)`.
    pub fn wrap_modes(&self) -> (WrapMode, WrapMode, WrapMode) {
        (self.wrap[0], self.wrap[1], self.wrap[2])
    }

    /// Cells along x.
    pub fn nx(&self) -> usize {
        self.nx
    }

    /// Cells along y.
    pub fn ny(&self) -> usize {
        self.ny
    }

    /// Cells along z.
    pub fn nz(&self) -> usize {
        self.nz
    }

    /// Total number of cells.
    pub fn count(&self) -> usize {
        self.count
    }

    /// Flat-index stride along y (`nx`).
    pub fn stride_y(&self) -> usize {
        self.nx
    }

    /// Flat-index stride along z (`nx * ny`).
    pub fn stride_z(&self) -> usize {
        self.nxy
    }

    /// Flat index of an in-range cell. Indices are not wrapped.
    #[inline]
    pub fn flatten(&self, i: usize, j: usize, k: usize) -> usize {
        debug_assert!(
            i < self.nx && j < self.ny && k < self.nz,
            "({i}, {j}, {k}) outside grid"
        );
        i + j * self.nx + k * self.nxy
    }

    /// Inverse of [`flatten`](Self::flatten).
    #[inline]
    pub fn expand(&self, index: usize) -> (usize, usize, usize) {
        let k = index / self.nxy;
        let rem = index - k * self.nxy;
        (rem % self.nx, rem / self.nx, k)
    }

    /// Wrap an x index into `[0, nx)`.
    #[inline]
    pub fn wrap_x(&self, i: isize) -> usize {
        self.wrap[0].apply(i, self.nx)
    }

    /// Wrap a y index into `[0, ny)`.
    #[inline]
    pub fn wrap_y(&self, j: isize) -> usize {
        self.wrap[1].apply(j, self.ny)
    }

    /// Wrap a z index into `[0, nz)`.
    #[inline]
    pub fn wrap_z(&self, k: isize) -> usize {
        self.wrap[2].apply(k, self.nz)
    }

    /// Wrap all three indices, then flatten.
    #[inline]
    pub fn wrap_index(&self, i: isize, j: isize, k: isize) -> usize {
        self.wrap_x(i) + self.wrap_y(j) * self.nx + self.wrap_z(k) * self.nxy
    }

    /// Whether `(i, j, k)` lies inside the grid without wrapping.
    pub fn contains(&self, i: isize, j: isize, k: isize) -> bool {
        i >= 0
            && j >= 0
            && k >= 0
            && (i as usize) < self.nx
            && (j as usize) < self.ny
            && (k as usize) < self.nz
    }

    /// Whether two grids have the same counts (wrap modes are ignored).
    pub fn shape_eq(&self, other: &Self) -> bool {
        self.nx == other.nx && self.ny == other.ny && self.nz == other.nz
    }

    /// Flat-index offsets from the low edge to the high edge of each axis:
    /// `(nx - 1, (ny - 1) * nx, (nz - 1) * nx * ny)`.
    pub fn periodic_offsets(&self) -> (usize, usize, usize) {
        (
            self.nx - 1,
            (self.ny - 1) * self.nx,
            (self.nz - 1) * self.nxy,
        )
    }

    /// `point` in continuous grid coordinates.
    #[inline]
    pub fn to_grid_space(&self, point: DVec3, domain: &Domain3) -> DVec3 {
        (point - domain.origin()) * domain.inv_spacing(self)
    }

    /// World position of the cell at flat `index`.
    pub fn coordinate_at(&self, index: usize, domain: &Domain3) -> DVec3 {
        let (i, j, k) = self.expand(index);
        domain.origin() + DVec3::new(i as f64, j as f64, k as f64) * domain.spacing(self)
    }

    /// Nearest cell to `point`, wrapped per axis. Ties round away from zero.
    pub fn indices_at(&self, point: DVec3, domain: &Domain3) -> (usize, usize, usize) {
        let g = self.to_grid_space(point, domain);
        (
            self.wrap_x(round_axis(g.x)),
            self.wrap_y(round_axis(g.y)),
            self.wrap_z(round_axis(g.z)),
        )
    }

    /// Flat index of the nearest cell to `point`.
    pub fn index_at(&self, point: DVec3, domain: &Domain3) -> usize {
        let (i, j, k) = self.indices_at(point, domain);
        self.flatten(i, j, k)
    }

    /// Trilinear interpolation handle for `point`.
    pub fn grid_point_at(&self, point: DVec3, domain: &Domain3) -> FieldPoint3 {
        let g = self.to_grid_space(point, domain);
        let (i0, tx) = split_axis(g.x);
        let (j0, ty) = split_axis(g.y);
        let (k0, tz) = split_axis(g.z);

        let xs = [self.wrap_x(i0), self.wrap_x(i0.saturating_add(1))];
        let ys = [
            self.wrap_y(j0) * self.nx,
            self.wrap_y(j0.saturating_add(1)) * self.nx,
        ];
        let zs = [
            self.wrap_z(k0) * self.nxy,
            self.wrap_z(k0.saturating_add(1)) * self.nxy,
        ];
        let wx = [1.0 - tx, tx];
        let wy = [1.0 - ty, ty];
        let wz = [1.0 - tz, tz];

        let mut corners = [0usize; 8];
        let mut weights = [0.0f64; 8];
        for n in 0..8 {
            let (a, b, c) = (n & 1, (n >> 1) & 1, (n >> 2) & 1);
            corners[n] = xs[a] + ys[b] + zs[c];
            weights[n] = wx[a] * wy[b] * wz[c];
        }
        FieldPoint3 { corners, weights }
    }
}
