//! Min-priority wavefront shared by both solvers.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use smallvec::SmallVec;
use strata_space::{Grid2, Grid3};

/// Counters from one solve.
///
/// On a connected grid every cell is settled exactly once, so
/// `settled == count`, `pops == settled + stale_pops` and `pushes == pops`
/// once the queue drains.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SolveStats {
    /// Distinct source cells seeded at distance zero.
    pub sources: usize,
    /// Cells whose distance was finalised.
    pub settled: usize,
    /// Queue entries removed.
    pub pops: usize,
    /// Removed entries discarded because their cell was already final.
    pub stale_pops: usize,
    /// Queue entries added, seeds included.
    pub pushes: usize,
}

#[derive(Clone, Copy, Debug)]
pub(crate) struct Entry {
    pub dist: f64,
    pub index: usize,
}

// Reversed so `BinaryHeap` pops the smallest distance. Ties break on the
// lower index so the pop order is deterministic.
impl Ord for Entry {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .dist
            .total_cmp(&self.dist)
            .then_with(|| other.index.cmp(&self.index))
    }
}

impl PartialOrd for Entry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Entry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Entry {}

pub(crate) struct Frontier {
    heap: BinaryHeap<Entry>,
    pub stats: SolveStats,
}

impl Frontier {
    /// Reset `dist` to `+∞`, zero every source and queue each distinct one.
    pub fn seeded(dist: &mut [f64], sources: &[usize]) -> Self {
        dist.fill(f64::INFINITY);
        let mut frontier = Self {
            heap: BinaryHeap::with_capacity(dist.len()),
            stats: SolveStats::default(),
        };
        for &s in sources {
            if dist[s] == 0.0 {
                continue;
            }
            dist[s] = 0.0;
            frontier.stats.sources += 1;
            frontier.push(s, 0.0);
        }
        frontier
    }

    #[inline]
    pub fn push(&mut self, index: usize, dist: f64) {
        self.stats.pushes += 1;
        self.heap.push(Entry { dist, index });
    }

    #[inline]
    pub fn pop(&mut self) -> Option<Entry> {
        let entry = self.heap.pop()?;
        self.stats.pops += 1;
        Some(entry)
    }
}

/// Face neighbours as `(index, axis)`, resolved through the grid's wrap
/// modes. A neighbour that resolves back onto the cell itself (any edge
/// under `Clamp` or `MirrorRepeat`, a single-cell axis under `Repeat`) is
/// left out.
pub(crate) fn neighbours_2d(grid: &Grid2, index: usize) -> SmallVec<[(usize, usize); 4]> {
    let (i, j) = grid.expand(index);
    let (i, j) = (i as isize, j as isize);
    let offsets: [(isize, isize, usize); 4] = [(-1, 0, 0), (1, 0, 0), (0, -1, 1), (0, 1, 1)];
    let mut out = SmallVec::new();
    for (di, dj, axis) in offsets {
        let nb = grid.wrap_index(i + di, j + dj);
        if nb != index {
            out.push((nb, axis));
        }
    }
    out
}

/// 3D counterpart of [`neighbours_2d`].
pub(crate) fn neighbours_3d(grid: &Grid3, index: usize) -> SmallVec<[(usize, usize); 6]> {
    let (i, j, k) = grid.expand(index);
    let (i, j, k) = (i as isize, j as isize, k as isize);
    let offsets: [(isize, isize, isize, usize); 6] = [
        (-1, 0, 0, 0),
        (1, 0, 0, 0),
        (0, -1, 0, 1),
        (0, 1, 0, 1),
        (0, 0, -1, 2),
        (0, 0, 1, 2),
    ];
    let mut out = SmallVec::new();
    for (di, dj, dk, axis) in offsets {
        let nb = grid.wrap_index(i + di, j + dj, k + dk);
        if nb != index {
            out.push((nb, axis));
        }
    }
    out
}
