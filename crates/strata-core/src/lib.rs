//! Core types and helpers for the Strata field framework.
//!
//! This is the leaf crate of the workspace. It defines the payload trait
//! shared by every field type ([`FieldValue`]), a handful of numeric
//! helpers, and the parallel range dispatch used by every operator
//! ([`Dispatcher`], configured through [`ParallelConfig`]).

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod config;
pub mod dispatch;
pub mod error;
pub mod num;
pub mod value;

pub use config::ParallelConfig;
pub use dispatch::Dispatcher;
pub use error::ConfigError;
pub use value::FieldValue;

pub use glam::{DVec2, DVec3};
