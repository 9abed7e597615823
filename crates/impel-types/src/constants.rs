//! Numeric tolerances and resolution defaults.

use crate::scalar::Scalar;

/// Impulses at or below this magnitude are numerical noise and are
/// clamped to zero rather than treated as constraint violations.
pub const TINY_IMPULSE: Scalar = 1e-12;

/// Below this magnitude a velocity jump counts as continuous — a hint
/// to the surrounding integrator that no variable-sequence bump is
/// needed.
pub const SMALL_IMPULSE: Scalar = 1e-4;

/// Acceptance tolerance for post-solve constraint residuals. Joint rows
/// and rows carrying a positive impulse must end within this bound.
pub const LCP_RESIDUAL_TOL: Scalar = 1e-4;

/// Default velocity tolerance: approach speeds smaller than this are
/// considered quiet.
pub const DEFAULT_VELOCITY_TOL: Scalar = 0.5;

/// Default distance tolerance handed to the contact detection layer.
pub const DEFAULT_DISTANCE_TOL: Scalar = 0.01;

/// Default collision accuracy fraction used by the surrounding step
/// loop when backing up to the moment of impact.
pub const DEFAULT_COLLISION_ACCURACY: Scalar = 0.6;

/// Default small-velocity threshold for near-rest classification.
pub const SMALL_VELOCITY: Scalar = 1e-5;

/// The panic-relaxation period is this factor times the contact count.
pub const PANIC_INTERVAL_FACTOR: u64 = 20;

/// Hard ceiling on serial resolution iterations.
pub const MAX_SERIAL_ITERATIONS: u64 = 100_000;
