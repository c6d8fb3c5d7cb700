//! Grid topology and coordinate mapping for Strata fields.
//!
//! This crate defines the fixed-resolution lattices every field is bound
//! to, and the mapping between world coordinates and grid indices.
//!
//! # Types
//!
//! - [`Grid2`] / [`Grid3`]: per-axis counts, flattened-index arithmetic, and
//!   a per-axis [`WrapMode`] (clamp, repeat, mirror-repeat)
//! - [`Domain2`] / [`Domain3`]: the world-space interval a grid spans, from
//!   which per-axis cell spacing is derived
//! - [`FieldPoint2`] / [`FieldPoint3`]: corner indices and weights for
//!   bilinear/trilinear interpolation at a non-grid-aligned point
//!
//! Construction is the only fallible step; every query on a constructed
//! grid is infallible.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod domain;
pub mod error;
pub mod grid2;
pub mod grid3;
pub mod point;
pub mod wrap;

#[cfg(test)]
pub(crate) mod compliance;

pub use domain::{Domain2, Domain3};
pub use error::SpaceError;
pub use grid2::Grid2;
pub use grid3::Grid3;
pub use point::{FieldPoint2, FieldPoint3};
pub use wrap::{wrap, WrapMode};
