//! Scalar type alias for the engine.
//!
//! Using `f64` throughout: the collision core is a CPU dense-matrix
//! solver and its invariants (impulse noise floor, matrix symmetry)
//! are stated at the 1e-12 scale, which single precision cannot hold.

/// The floating-point type used throughout the engine.
///
/// Set to `f64`. The core never runs on the GPU, so there is no
/// pressure to drop to single precision.
pub type Scalar = f64;
