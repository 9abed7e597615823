//! Error types for the Impel engine.
//!
//! All crates return `ImpelResult<T>` from fallible operations.

use thiserror::Error;

/// Unified error type for the Impel engine.
#[derive(Debug, Error)]
pub enum ImpelError {
    /// Configuration value is invalid. Raised to the caller; no state
    /// was changed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// A simulation invariant was violated (immovable body with
    /// velocity, negative impulse on a one-sided contact). Indicates a
    /// bug upstream.
    #[error("Invariant violation: {0}")]
    InvariantViolation(String),

    /// A contact referenced a body id that is not in the arena.
    #[error("Unknown body id {body} referenced by contact {contact}")]
    UnknownBodyId { body: u32, contact: usize },

    /// Constraint solver left a residual outside tolerance.
    #[error("Solver residual {residual:.3e} on row {row} exceeds tolerance (t = {time})")]
    SolverResidual {
        row: usize,
        residual: f64,
        time: f64,
    },

    /// Serial resolution hit its iteration ceiling.
    #[error("Collision resolution exceeded {iterations} iterations (t = {time})")]
    IterationLimit { iterations: u64, time: f64 },

    /// A sub-system matrix was numerically unusable.
    #[error("Singular system: {0}")]
    Singular(String),
}

/// Convenience alias for `Result<T, ImpelError>`.
pub type ImpelResult<T> = Result<T, ImpelError>;
