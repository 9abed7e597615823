//! # impel-types
//!
//! Shared types, identifiers, error types, and numeric constants
//! for the Impel planar rigid-body dynamics engine.
//!
//! This crate has zero domain logic — it defines the vocabulary
//! that all other Impel crates share.

pub mod constants;
pub mod error;
pub mod ids;
pub mod scalar;

pub use error::{ImpelError, ImpelResult};
pub use ids::BodyId;
pub use scalar::Scalar;
