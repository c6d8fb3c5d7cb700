//! Parallel range dispatch.
//!
//! Every per-cell loop in the workspace goes through a [`Dispatcher`]: it
//! splits `[0, n)` into chunks and runs a chunk body either inline or on a
//! rayon pool. Chunk bodies receive disjoint mutable slices, so a body can
//! only ever write the cells of its own chunk. Reads of a frozen source
//! buffer are shared through the closure environment.

use std::ops::Range;
use std::sync::Arc;

use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};
use tracing::{debug, trace};

use crate::config::ParallelConfig;
use crate::error::ConfigError;

/// A resolved [`ParallelConfig`].
///
/// Cheap to clone: a dedicated worker pool, if any, is shared through an
/// `Arc`. Construction is the only fallible step; dispatch itself never
/// fails.
#[derive(Clone, Debug)]
pub struct Dispatcher {
    config: ParallelConfig,
    pool: Option<Arc<ThreadPool>>,
}

impl Dispatcher {
    /// Validate `config` and build the dispatcher it describes.
    ///
    /// A dedicated pool is only built when parallelism is enabled and an
    /// explicit `worker_count` is given.
    pub fn new(config: &ParallelConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let pool = match (config.enabled, config.worker_count) {
            (true, Some(n)) => {
                let pool = ThreadPoolBuilder::new()
                    .num_threads(n)
                    .thread_name(|i| format!("strata-worker-{i}"))
                    .build()
                    .map_err(|e| ConfigError::PoolBuildFailed {
                        reason: e.to_string(),
                    })?;
                debug!(workers = n, "built dedicated worker pool");
                Some(Arc::new(pool))
            }
            _ => None,
        };
        Ok(Self {
            config: config.clone(),
            pool,
        })
    }

    /// A dispatcher that runs every body inline as a single chunk.
    pub fn sequential() -> Self {
        Self {
            config: ParallelConfig::sequential(),
            pool: None,
        }
    }

    /// The configuration this dispatcher was built from.
    pub fn config(&self) -> &ParallelConfig {
        &self.config
    }

    /// Whether chunks may run on worker threads.
    pub fn is_parallel(&self) -> bool {
        self.config.enabled
    }

    /// Number of worker threads chunks are spread over.
    pub fn worker_count(&self) -> usize {
        if !self.config.enabled {
            return 1;
        }
        match &self.pool {
            Some(pool) => pool.current_num_threads(),
            None => rayon::current_num_threads(),
        }
    }

    /// Chunk length used for a dispatch over `count` cells.
    pub fn chunk_len(&self, count: usize) -> usize {
        self.config.chunk_len(count, self.worker_count())
    }

    fn install<R, OP>(&self, op: OP) -> R
    where
        R: Send,
        OP: FnOnce() -> R + Send,
    {
        match &self.pool {
            Some(pool) => pool.install(op),
            None => op(),
        }
    }

    /// Run `body(offset, chunk)` over disjoint chunks of `data`, where
    /// `offset` is the index of `chunk[0]` within `data`.
    pub fn for_each_chunk_mut<T, F>(&self, data: &mut [T], body: F)
    where
        T: Send,
        F: Fn(usize, &mut [T]) + Send + Sync,
    {
        let n = data.len();
        if n == 0 {
            return;
        }
        let chunk = self.chunk_len(n);
        if chunk >= n {
            body(0, data);
            return;
        }
        trace!(count = n, chunk_len = chunk, "dispatch chunks");
        self.install(|| {
            data.par_chunks_mut(chunk)
                .enumerate()
                .for_each(|(ci, c)| body(ci * chunk, c));
        });
    }

    /// Run `body(offset, a_chunk, b_chunk)` over matching disjoint chunks of
    /// two equally sized buffers.
    ///
    /// # Panics
    ///
    /// Panics if `a.len() != b.len()`; callers validate sizes first.
    pub fn zip_chunks_mut<A, B, F>(&self, a: &mut [A], b: &mut [B], body: F)
    where
        A: Send,
        B: Send,
        F: Fn(usize, &mut [A], &mut [B]) + Send + Sync,
    {
        assert_eq!(a.len(), b.len(), "zipped buffers must have equal length");
        let n = a.len();
        if n == 0 {
            return;
        }
        let chunk = self.chunk_len(n);
        if chunk >= n {
            body(0, a, b);
            return;
        }
        trace!(count = n, chunk_len = chunk, "dispatch zipped chunks");
        self.install(|| {
            a.par_chunks_mut(chunk)
                .zip(b.par_chunks_mut(chunk))
                .enumerate()
                .for_each(|(ci, (ca, cb))| body(ci * chunk, ca, cb));
        });
    }

    /// Run `body(range)` over a partition of `[0, count)`.
    ///
    /// For bodies that only read shared state (or write through their own
    /// synchronisation).
    pub fn for_each_range<F>(&self, count: usize, body: F)
    where
        F: Fn(Range<usize>) + Send + Sync,
    {
        if count == 0 {
            return;
        }
        let chunk = self.chunk_len(count);
        if chunk >= count {
            body(0..count);
            return;
        }
        let chunks = count.div_ceil(chunk);
        trace!(count, chunk_len = chunk, chunks, "dispatch ranges");
        self.install(|| {
            (0..chunks).into_par_iter().for_each(|ci| {
                let start = ci * chunk;
                body(start..(start + chunk).min(count));
            });
        });
    }

    /// Map each chunk of `data` to a partial result, returned in chunk
    /// order so reductions over them are deterministic.
    pub fn map_chunks<T, R, F>(&self, data: &[T], map: F) -> Vec<R>
    where
        T: Sync,
        R: Send,
        F: Fn(usize, &[T]) -> R + Send + Sync,
    {
        let n = data.len();
        if n == 0 {
            return Vec::new();
        }
        let chunk = self.chunk_len(n);
        if chunk >= n {
            return vec![map(0, data)];
        }
        self.install(|| {
            data.par_chunks(chunk)
                .enumerate()
                .map(|(ci, c)| map(ci * chunk, c))
                .collect()
        })
    }
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self {
            config: ParallelConfig::default(),
            pool: None,
        }
    }
}
