//! Distance fields over cost grids.
//!
//! Two wavefront solvers read a non-negative cost field and a set of
//! source cells and produce a distance field on the same grid:
//!
//! - [`dijkstra_2d`] / [`dijkstra_3d`]: exact cost-weighted L1 distance.
//! - [`fast_marching_2d`] / [`fast_marching_3d`]: first-order Eikonal
//!   approximation of cost-weighted L2 distance.
//!
//! Neighbour expansion follows the cost grid's wrap modes, so a grid built
//! with `WrapMode::Repeat` yields toroidal distance. The `_into` variants
//! write into a caller buffer and return the [`SolveStats`] of the run;
//! [`trace_descent_2d`] / [`trace_descent_3d`] walk a finished distance
//! field back to its nearest source.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod descent;
pub mod dijkstra;
pub mod error;
pub mod fast_marching;
mod frontier;

pub use descent::{sources_at_points_2d, sources_at_points_3d, trace_descent_2d, trace_descent_3d};
pub use dijkstra::{dijkstra_2d, dijkstra_2d_into, dijkstra_3d, dijkstra_3d_into};
pub use error::GeodesicError;
pub use fast_marching::{
    fast_marching_2d, fast_marching_2d_into, fast_marching_3d, fast_marching_3d_into,
};
pub use frontier::SolveStats;
