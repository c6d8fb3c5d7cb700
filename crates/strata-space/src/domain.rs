//! World-space intervals covered by a grid.

use glam::{DVec2, DVec3};

use crate::error::SpaceError;
use crate::grid2::Grid2;
use crate::grid3::Grid3;

fn check_span(axis: &'static str, span: f64) -> Result<(), SpaceError> {
    if span.is_finite() && span > 0.0 {
        Ok(())
    } else {
        Err(SpaceError::InvalidDomain { axis, span })
    }
}

/// Cell spacing along one axis: `span / (n - 1)`, so the first and last
/// grid points sit exactly on the domain bounds. A single-cell axis uses
/// the full span.
#[inline]
fn axis_spacing(span: f64, n: usize) -> f64 {
    if n > 1 {
        span / (n - 1) as f64
    } else {
        span
    }
}

/// A rectilinear 2D interval `[origin, origin + span]`.
///
/// Grid point `(i, j)` of a field bound to this domain sits at
/// `origin + (i, j) * spacing`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Domain2 {
    origin: DVec2,
    span: DVec2,
}

impl Domain2 {
    /// The interval from `from` to `to`.
    ///
    /// Returns `Err(SpaceError::InvalidDomain)` if `to - from` is not
    /// finite and positive on every axis.
    pub fn new(from: DVec2, to: DVec2) -> Result<Self, SpaceError> {
        Self::from_origin_span(from, to - from)
    }

    /// The interval starting at `origin` with extent `span`.
    pub fn from_origin_span(origin: DVec2, span: DVec2) -> Result<Self, SpaceError> {
        check_span("x", span.x)?;
        check_span("y", span.y)?;
        if !origin.is_finite() {
            return Err(SpaceError::InvalidDomain {
                axis: if origin.x.is_finite() { "y" } else { "x" },
                span: f64::NAN,
            });
        }
        Ok(Self { origin, span })
    }

    /// The unit square `[0, 1]²`.
    pub fn unit() -> Self {
        Self {
            origin: DVec2::ZERO,
            span: DVec2::ONE,
        }
    }

    /// A domain whose spacing on `grid` is exactly `spacing`, starting at
    /// `origin`.
    pub fn with_spacing(origin: DVec2, spacing: DVec2, grid: &Grid2) -> Result<Self, SpaceError> {
        let steps = DVec2::new(
            (grid.nx().max(2) - 1) as f64,
            (grid.ny().max(2) - 1) as f64,
        );
        Self::from_origin_span(origin, spacing * steps)
    }

    /// Lower corner.
    pub fn origin(&self) -> DVec2 {
        self.origin
    }

    /// Extent per axis.
    pub fn span(&self) -> DVec2 {
        self.span
    }

    /// Upper corner.
    pub fn to(&self) -> DVec2 {
        self.origin + self.span
    }

    /// Midpoint.
    pub fn center(&self) -> DVec2 {
        self.origin + self.span * 0.5
    }

    /// Whether `p` lies inside the closed interval.
    pub fn contains(&self, p: DVec2) -> bool {
        let to = self.to();
        p.x >= self.origin.x && p.x <= to.x && p.y >= self.origin.y && p.y <= to.y
    }

    /// Per-axis cell spacing on `grid`.
    pub fn spacing(&self, grid: &Grid2) -> DVec2 {
        DVec2::new(
            axis_spacing(self.span.x, grid.nx()),
            axis_spacing(self.span.y, grid.ny()),
        )
    }

    /// Reciprocal of [`spacing`](Self::spacing).
    pub fn inv_spacing(&self, grid: &Grid2) -> DVec2 {
        self.spacing(grid).recip()
    }
}

impl Default for Domain2 {
    fn default() -> Self {
        Self::unit()
    }
}

/// A rectilinear 3D interval `[origin, origin + span]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Domain3 {
    origin: DVec3,
    span: DVec3,
}

impl Domain3 {
    /// The interval from `from` to `to`.
    ///
    /// Returns `Err(SpaceError::InvalidDomain)` if `to - from` is not
    /// finite and positive on every axis.
    pub fn new(from: DVec3, to: DVec3) -> Result<Self, SpaceError> {
        Self::from_origin_span(from, to - from)
    }

    /// The interval starting at `origin` with extent `span`.
    pub fn from_origin_span(origin: DVec3, span: DVec3) -> Result<Self, SpaceError> {
        check_span("x", span.x)?;
        check_span("y", span.y)?;
        check_span("z", span.z)?;
        if !origin.is_finite() {
            let axis = if !origin.x.is_finite() {
                "x"
            } else if !origin.y.is_finite() {
                "y"
            } else {
                "z"
            };
            return Err(SpaceError::InvalidDomain {
                axis,
                span: f64::NAN,
            });
        }
        Ok(Self { origin, span })
    }

    /// The unit cube `[0, 1]³`.
    pub fn unit() -> Self {
        Self {
            origin: DVec3::ZERO,
            span: DVec3::ONE,
        }
    }

    /// A domain whose spacing on `grid` is exactly `spacing`, starting at
    /// `origin`.
    pub fn with_spacing(origin: DVec3, spacing: DVec3, grid: &Grid3) -> Result<Self, SpaceError> {
        let steps = DVec3::new(
            (grid.nx() - 1) as f64,
            (grid.ny() - 1) as f64,
            (grid.nz() - 1) as f64,
        );
        Self::from_origin_span(origin, spacing * steps)
    }

    /// Lower corner.
    pub fn origin(&self) -> DVec3 {
        self.origin
    }

    /// Extent per axis.
    pub fn span(&self) -> DVec3 {
        self.span
    }

    /// Upper corner.
    pub fn to(&self) -> DVec3 {
        self.origin + self.span
    }

    /// Midpoint.
    pub fn center(&self) -> DVec3 {
        self.origin + self.span * 0.5
    }

    /// Whether `p` lies inside the closed interval.
    pub fn contains(&self, p: DVec3) -> bool {
        let to = self.to();
        p.cmpge(self.origin).all() && p.cmple(to).all()
    }

    /// Per-axis cell spacing on `grid`.
    pub fn spacing(&self, grid: &Grid3) -> DVec3 {
        DVec3::new(
            axis_spacing(self.span.x, grid.nx()),
            axis_spacing(self.span.y, grid.ny()),
            axis_spacing(self.span.z, grid.nz()),
        )
    }

    /// Reciprocal of [`spacing`](Self::spacing).
    pub fn inv_spacing(&self, grid: &Grid3) -> DVec3 {
        self.spacing(grid).recip()
    }
}

impl Default for Domain3 {
    fn default() -> Self {
        Self::unit()
    }
}
