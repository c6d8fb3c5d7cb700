//! Error types for grid and domain construction.

use std::fmt;

/// Errors arising from grid or domain construction.
///
/// All of these are construction-time failures: once a [`Grid2`](crate::Grid2),
/// [`Grid3`](crate::Grid3), or domain exists, no query on it can fail.
#[derive(Debug, Clone, PartialEq)]
pub enum SpaceError {
    /// An axis count is below the minimum for this grid rank
    /// (1 for 2D grids, 2 for 3D grids).
    InvalidDimension {
        /// Axis name (`"nx"`, `"ny"`, `"nz"`).
        axis: &'static str,
        /// The rejected count.
        value: usize,
        /// Smallest accepted count.
        min: usize,
    },
    /// The product of the axis counts overflows `usize`.
    CellCountOverflow {
        /// The axis counts that were requested.
        dims: Vec<usize>,
    },
    /// A domain axis has a zero, negative, or non-finite span.
    InvalidDomain {
        /// Axis name (`"x"`, `"y"`, `"z"`).
        axis: &'static str,
        /// The rejected span.
        span: f64,
    },
}

impl fmt::Display for SpaceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidDimension { axis, value, min } => {
                write!(f, "invalid dimension: {axis} = {value}, minimum is {min}")
            }
            Self::CellCountOverflow { dims } => {
                write!(f, "cell count for dimensions {dims:?} overflows usize")
            }
            Self::InvalidDomain { axis, span } => {
                write!(
                    f,
                    "invalid domain: span on {axis} axis must be finite and positive, got {span}"
                )
            }
        }
    }
}

impl std::error::Error for SpaceError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_the_axis() {
        let e = SpaceError::InvalidDimension {
            axis: "nz",
            value: 1,
            min: 2,
        };
        assert_eq!(e.to_string(), "invalid dimension: nz = 1, minimum is 2");

        let e = SpaceError::InvalidDomain {
            axis: "y",
            span: 0.0,
        };
        assert!(e.to_string().contains("y axis"));
    }
}
