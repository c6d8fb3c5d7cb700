//! Error types for parallel dispatch configuration.

use std::error::Error;
use std::fmt;

/// Errors detected while validating a [`ParallelConfig`](crate::ParallelConfig)
/// or building the [`Dispatcher`](crate::Dispatcher) it describes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// `min_chunk_len` is zero.
    InvalidChunkLen,
    /// An explicit worker count is zero or above the supported maximum.
    InvalidWorkerCount {
        /// The configured value.
        value: usize,
        /// Largest accepted value.
        max: usize,
    },
    /// The dedicated worker pool could not be created.
    PoolBuildFailed {
        /// Description reported by the thread-pool builder.
        reason: String,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidChunkLen => write!(f, "min_chunk_len must be at least 1"),
            Self::InvalidWorkerCount { value, max } => {
                write!(f, "worker_count must be in [1, {max}], got {value}")
            }
            Self::PoolBuildFailed { reason } => {
                write!(f, "worker pool could not be built: {reason}")
            }
        }
    }
}

impl Error for ConfigError {}
