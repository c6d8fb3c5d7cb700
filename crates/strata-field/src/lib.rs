//! Grid-bound fields, differential operators, and dynamic rules.
//!
//! A [`Field2`] / [`Field3`] owns one value per grid cell plus the
//! [`BoundaryPolicy`] its stencils use for out-of-range neighbours. The
//! [`ops2`] and [`ops3`] modules compute Laplacian, gradient, divergence,
//! and curl into caller-supplied buffers; the field types wrap them in
//! allocating convenience methods.
//!
//! [`DynamicField2`] / [`DynamicField3`] pair a field with a delta buffer.
//! Rules (diffuse, erode, bifurcate, deposit, decay) only ever add into the
//! deltas, so any number of them commute within a step; `update(dt)` is
//! the single place values change.
//!
//! Every per-cell loop runs through the field's
//! [`Dispatcher`](strata_core::Dispatcher).

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod boundary;
pub mod dynamic2;
pub mod dynamic3;
pub mod error;
pub mod field2;
pub mod field3;
pub mod ops2;
pub mod ops3;
mod stencil;

pub use boundary::BoundaryPolicy;
pub use dynamic2::DynamicField2;
pub use dynamic3::DynamicField3;
pub use error::FieldError;
pub use field2::Field2;
pub use field3::Field3;
