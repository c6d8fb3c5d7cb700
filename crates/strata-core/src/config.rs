//! Parallel dispatch configuration.
//!
//! [`ParallelConfig`] is plain data describing how range dispatch should
//! partition work. It is resolved once into a [`Dispatcher`](crate::Dispatcher),
//! which is what fields and operators actually carry.

use crate::error::ConfigError;

/// How cell ranges are partitioned and scheduled.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParallelConfig {
    /// Run chunks on worker threads. When `false`, every dispatch runs
    /// as a single inline chunk. Default: `true`.
    pub enabled: bool,
    /// Smallest number of cells handed to one chunk. Grids smaller than
    /// this run as a single chunk even when `enabled`. Default: 1024.
    pub min_chunk_len: usize,
    /// Size of a dedicated worker pool. `None` = share the global rayon
    /// pool. Default: `None`.
    pub worker_count: Option<usize>,
}

impl ParallelConfig {
    /// Upper bound on an explicit `worker_count`.
    pub const MAX_WORKERS: usize = 256;

    /// Chunks per worker targeted by [`chunk_len`](Self::chunk_len), so
    /// uneven chunks still balance across the pool.
    pub const CHUNKS_PER_WORKER: usize = 4;

    /// A configuration that always runs inline.
    pub fn sequential() -> Self {
        Self {
            enabled: false,
            ..Self::default()
        }
    }

    /// Check structural invariants.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.min_chunk_len == 0 {
            return Err(ConfigError::InvalidChunkLen);
        }
        if let Some(n) = self.worker_count {
            if n == 0 || n > Self::MAX_WORKERS {
                return Err(ConfigError::InvalidWorkerCount {
                    value: n,
                    max: Self::MAX_WORKERS,
                });
            }
        }
        Ok(())
    }

    /// Chunk length for `count` cells given `workers` available threads.
    ///
    /// Returns `count` (one chunk) when disabled; otherwise
    /// `max(min_chunk_len, ceil(count / (workers * CHUNKS_PER_WORKER)))`.
    /// Never returns zero.
    pub fn chunk_len(&self, count: usize, workers: usize) -> usize {
        if !self.enabled || count == 0 {
            return count.max(1);
        }
        let target = workers.max(1) * Self::CHUNKS_PER_WORKER;
        count.div_ceil(target).max(self.min_chunk_len.max(1))
    }
}

impl Default for ParallelConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            min_chunk_len: 1024,
            worker_count: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn default_is_valid() {
        assert!(ParallelConfig::default().validate().is_ok());
        assert!(ParallelConfig::sequential().validate().is_ok());
    }

    #[test]
    fn zero_chunk_len_rejected() {
        let cfg = ParallelConfig {
            min_chunk_len: 0,
            ..Default::default()
        };
        assert_eq!(cfg.validate(), Err(ConfigError::InvalidChunkLen));
    }

    #[test]
    fn worker_count_bounds() {
        let zero = ParallelConfig {
            worker_count: Some(0),
            ..Default::default()
        };
        assert!(matches!(
            zero.validate(),
            Err(ConfigError::InvalidWorkerCount { value: 0, .. })
        ));
        let huge = ParallelConfig {
            worker_count: Some(ParallelConfig::MAX_WORKERS + 1),
            ..Default::default()
        };
        assert!(huge.validate().is_err());
        let ok = ParallelConfig {
            worker_count: Some(4),
            ..Default::default()
        };
        assert!(ok.validate().is_ok());
    }

    #[test]
    fn disabled_is_single_chunk() {
        let cfg = ParallelConfig::sequential();
        assert_eq!(cfg.chunk_len(10_000, 8), 10_000);
        assert_eq!(cfg.chunk_len(0, 8), 1);
    }

    #[test]
    fn small_grids_respect_min_chunk() {
        let cfg = ParallelConfig::default();
        assert_eq!(cfg.chunk_len(100, 8), 1024);
    }

    #[test]
    fn large_grids_split_per_worker() {
        let cfg = ParallelConfig {
            min_chunk_len: 16,
            ..Default::default()
        };
        // 8 workers * 4 chunks = 32 chunks of 1000 cells.
        assert_eq!(cfg.chunk_len(32_000, 8), 1000);
    }

    proptest! {
        #[test]
        fn chunk_len_never_zero(
            count in 0usize..1_000_000,
            workers in 0usize..64,
            min in 1usize..4096,
            enabled in any::<bool>(),
        ) {
            let cfg = ParallelConfig { enabled, min_chunk_len: min, worker_count: None };
            prop_assert!(cfg.chunk_len(count, workers) >= 1);
        }
    }
}
