//! Error types for the distance solvers.

use std::error::Error;
use std::fmt;

use strata_field::FieldError;

/// Errors from distance-field solves.
///
/// All validation runs before the output buffer is written, so a failed
/// solve leaves a caller-supplied buffer untouched.
#[derive(Clone, Debug, PartialEq)]
pub enum GeodesicError {
    /// The output buffer does not match the cost field.
    Field(FieldError),
    /// The source list is empty.
    NoSources,
    /// A source index is outside the cost grid.
    SourceOutOfRange {
        /// The offending source index.
        index: usize,
        /// Cells in the cost grid.
        count: usize,
    },
    /// A cost is negative or not finite.
    NegativeCost {
        /// Cell holding the bad cost.
        index: usize,
        /// The cost found there.
        value: f64,
    },
}

impl fmt::Display for GeodesicError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Field(e) => write!(f, "distance output rejected: {e}"),
            Self::NoSources => write!(f, "at least one source cell is required"),
            Self::SourceOutOfRange { index, count } => {
                write!(f, "source {index} out of range for {count} cells")
            }
            Self::NegativeCost { index, value } => {
                write!(f, "cost at cell {index} must be finite and >= 0, got {value}")
            }
        }
    }
}

impl Error for GeodesicError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Field(e) => Some(e),
            _ => None,
        }
    }
}

impl From<FieldError> for GeodesicError {
    fn from(e: FieldError) -> Self {
        Self::Field(e)
    }
}

/// Check everything a solve needs before any buffer is touched.
pub(crate) fn validate(
    costs: &[f64],
    sources: &[usize],
    out_len: usize,
) -> Result<(), GeodesicError> {
    let count = costs.len();
    if out_len != count {
        return Err(FieldError::SizeMismatch {
            expected: count,
            actual: out_len,
        }
        .into());
    }
    if sources.is_empty() {
        return Err(GeodesicError::NoSources);
    }
    if let Some(&index) = sources.iter().find(|&&s| s >= count) {
        return Err(GeodesicError::SourceOutOfRange { index, count });
    }
    if let Some((index, &value)) = costs
        .iter()
        .enumerate()
        .find(|(_, c)| !(c.is_finite() && **c >= 0.0))
    {
        return Err(GeodesicError::NegativeCost { index, value });
    }
    Ok(())
}
