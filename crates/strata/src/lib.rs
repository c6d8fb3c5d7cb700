//! Strata: scalar and vector fields on regular 2D and 3D lattices.
//!
//! This facade re-exports the public API of the Strata sub-crates. For
//! most users, adding `strata` as a single dependency is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use strata::prelude::*;
//!
//! // A 9×9 heat field over [0, 8]² with a spike in the middle.
//! let mut heat = Field2::<f64>::with_shape(9, 9, DVec2::ZERO, DVec2::splat(8.0)).unwrap();
//! let centre = heat.index_at(DVec2::splat(4.0));
//! heat.values_mut()[centre] = 100.0;
//!
//! // Diffuse and decay for a few steps. Rules only accumulate deltas;
//! // `update` applies them all at once.
//! let mut sim = DynamicField2::new(heat);
//! for _ in 0..10 {
//!     sim.diffuse(0.2);
//!     sim.decay(0.01);
//!     sim.update(1.0);
//! }
//! assert!(sim.field().values()[centre] < 100.0);
//!
//! // Distance from the hottest cell over a uniform cost.
//! let mut cost: Field2<f64> = Field2::like(sim.field());
//! cost.fill(1.0);
//! let dist = fast_marching_2d(&cost, &[centre]).unwrap();
//! assert_eq!(dist.values()[centre], 0.0);
//! assert_eq!(dist.value_at_nearest(DVec2::new(4.0, 0.0)), 4.0);
//! ```
//!
//! # Modules
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `strata-core` | Payload trait, numeric helpers, parallel dispatch |
//! | [`space`] | `strata-space` | Grid topology, domains, interpolation handles |
//! | [`field`] | `strata-field` | Fields, operators, dynamic rules |
//! | [`geodesic`] | `strata-geodesic` | Dijkstra and Fast Marching distance fields |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Field payload trait, numeric helpers, and parallel dispatch
/// (`strata-core`).
pub use strata_core as types;

/// Grid topology, physical domains, and interpolation handles
/// (`strata-space`).
///
/// [`space::Grid2`] and [`space::Grid3`] own the index arithmetic;
/// [`space::WrapMode`] picks how out-of-range indices resolve.
pub use strata_space as space;

/// Fields, differential operators, and dynamic rules (`strata-field`).
///
/// See [`field::ops2`] and [`field::ops3`] for the buffer-writing operator
/// forms.
pub use strata_field as field;

/// Distance-field solvers (`strata-geodesic`).
pub use strata_geodesic as geodesic;

/// Common imports for typical Strata usage.
///
/// ```rust
/// use strata::prelude::*;
/// ```
pub mod prelude {
    // Core
    pub use strata_core::{DVec2, DVec3, Dispatcher, FieldValue, ParallelConfig};

    // Space
    pub use strata_space::{Domain2, Domain3, FieldPoint2, FieldPoint3, Grid2, Grid3, WrapMode};

    // Fields
    pub use strata_field::{BoundaryPolicy, DynamicField2, DynamicField3, Field2, Field3};

    // Distance fields
    pub use strata_geodesic::{
        dijkstra_2d, dijkstra_3d, fast_marching_2d, fast_marching_3d, trace_descent_2d,
        trace_descent_3d, SolveStats,
    };

    // Errors
    pub use strata_core::ConfigError;
    pub use strata_field::FieldError;
    pub use strata_geodesic::GeodesicError;
    pub use strata_space::SpaceError;
}
