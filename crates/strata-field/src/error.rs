//! Error types for field construction and field operations.

use std::error::Error;
use std::fmt;

use strata_space::SpaceError;

/// Errors from field construction and field operations.
///
/// Two classes: construction-time failures (a bad shape or domain, wrapped
/// from [`SpaceError`]) and operation-time failures (buffers of mismatched
/// length). [`is_construction`](Self::is_construction) tells them apart so a
/// caller can decide whether to rebuild the field or resize an input.
#[derive(Clone, Debug, PartialEq)]
pub enum FieldError {
    /// The grid or domain could not be constructed.
    Space(SpaceError),
    /// Two buffers that must have one entry per cell differ in length.
    /// Raised before any buffer is touched.
    SizeMismatch {
        /// Length required by the field.
        expected: usize,
        /// Length supplied.
        actual: usize,
    },
}

impl FieldError {
    /// Whether this is a construction-time (shape or domain) failure.
    pub fn is_construction(&self) -> bool {
        matches!(self, Self::Space(_))
    }

    /// `Ok(())` when `actual == expected`, else `SizeMismatch`.
    pub(crate) fn check_len(expected: usize, actual: usize) -> Result<(), Self> {
        if expected == actual {
            Ok(())
        } else {
            Err(Self::SizeMismatch { expected, actual })
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Space(e) => write!(f, "field construction failed: {e}"),
            Self::SizeMismatch { expected, actual } => {
                write!(f, "size mismatch: expected {expected} cells, got {actual}")
            }
        }
    }
}

impl Error for FieldError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Space(e) => Some(e),
            Self::SizeMismatch { .. } => None,
        }
    }
}

impl From<SpaceError> for FieldError {
    fn from(e: SpaceError) -> Self {
        Self::Space(e)
    }
}
