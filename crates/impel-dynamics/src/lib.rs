//! # impel-dynamics
//!
//! Impulse-based collision resolution for planar rigid bodies.
//!
//! Given a list of detected contact points, the resolver computes and
//! applies instantaneous velocity changes so that no pair of bodies
//! keeps approaching through a contact, while bilateral joints end
//! with exactly zero relative normal velocity.
//!
//! ## Key Types
//!
//! - [`RigidBody`] / [`BodySet`] — planar body state in an id-indexed
//!   arena
//! - [`ContactPoint`] — transient contact descriptor produced by the
//!   detection layer
//! - [`ImpulseResolver`] — the entry point: validates contacts,
//!   dispatches to a [`CollisionHandling`] strategy, applies impulses
//! - [`ResolverConfig`] — runtime-tunable parameters
//!
//! Contact detection, time integration, and the surrounding step loop
//! are collaborators, not part of this crate.

pub mod body;
pub mod config;
pub mod contact;
pub mod impulse;
pub mod influence;
pub mod resolver;

mod serial;
mod simultaneous;

pub use body::{BodySet, RigidBody};
pub use config::{CollisionHandling, ResolverConfig};
pub use contact::{check_contacts, ContactPoint};
pub use impulse::{apply_impulse, VelocityJump};
pub use influence::{assemble_influence_matrix, influence};
pub use resolver::{ImpulseResolver, ResolutionTotals};
