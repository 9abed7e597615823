//! # impel-math
//!
//! Math primitives for the Impel planar dynamics engine.
//!
//! Provides:
//! - Re-export of `glam`'s double-precision planar vector (`DVec2`)
//! - Dense row-major matrix used for contact influence systems
//! - Deterministic LCG random source for reproducible contact ordering
//! - The mixed linear-complementarity solver contract and its two
//!   implementations (direct pivoting via `faer`, projected Gauss–Seidel)

pub mod dense;
pub mod gauss_seidel;
pub mod lcp;
pub mod pivoting;
pub mod rng;

pub use dense::DenseMatrix;
pub use gauss_seidel::ProjectedGaussSeidel;
pub use lcp::{LcpProblem, LcpSolver, LcpStatus};
pub use pivoting::PivotingLcp;
pub use rng::Lcg;

// Re-export glam's planar vector as the canonical 2D type for Impel.
// `DVec2::perp_dot` is the planar cross product used throughout.
pub use glam::DVec2;
