//! Resolver configuration and the collision-handling strategy.

use impel_types::constants::{
    DEFAULT_COLLISION_ACCURACY, DEFAULT_DISTANCE_TOL, DEFAULT_VELOCITY_TOL, SMALL_VELOCITY,
};
use impel_types::{ImpelError, ImpelResult};
use serde::{Deserialize, Serialize};

/// How a resolution call treats multiple simultaneous contacts.
///
/// A closed set of six strategies, dispatched directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CollisionHandling {
    /// Solve every contact as one coupled system in a single shot.
    /// Accurate for balanced collisions (a block landing flat), but
    /// couples independent high-velocity events in chains.
    Simultaneous,
    /// Serial with joint grouping, plus any loud one-sided contacts on
    /// the grouped bodies pulled into each sub-solve.
    Hybrid,
    /// Serial, one focus contact at a time.
    SerialSeparate,
    /// Serial with the focus contact's transitive joint closure.
    SerialGrouped,
    /// `SerialSeparate` followed by a final pure-inelastic sweep.
    SerialSeparateLastPass,
    /// `SerialGrouped` followed by a final pure-inelastic sweep.
    SerialGroupedLastPass,
}

impl CollisionHandling {
    /// True for every strategy except [`Simultaneous`].
    ///
    /// [`Simultaneous`]: CollisionHandling::Simultaneous
    pub fn is_serial(self) -> bool {
        !matches!(self, Self::Simultaneous)
    }

    /// True when sub-solves extend to the focus contact's joint
    /// closure; joints then collide with zero elasticity.
    pub fn grouped(self) -> bool {
        matches!(
            self,
            Self::Hybrid | Self::SerialGrouped | Self::SerialGroupedLastPass
        )
    }

    /// True when loud one-sided contacts on grouped bodies join the
    /// sub-solve as well.
    pub fn hybrid(self) -> bool {
        matches!(self, Self::Hybrid)
    }

    /// True when a final zero-elasticity sweep over all contacts runs
    /// after the serial loop goes quiet.
    pub fn last_pass(self) -> bool {
        matches!(self, Self::SerialSeparateLastPass | Self::SerialGroupedLastPass)
    }
}

/// Runtime-tunable parameters of the impulse resolver.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolverConfig {
    /// Multi-contact handling strategy.
    pub handling: CollisionHandling,

    /// Approach speeds below this are quiet (`ε_v`). Must be positive.
    pub velocity_tol: f64,

    /// Distance tolerance handed to the detection layer. Must be
    /// positive.
    pub distance_tol: f64,

    /// Fraction of the pre-impact gap the step loop closes when
    /// backing up to the moment of impact. In `(0, 1]`.
    pub collision_accuracy: f64,

    /// Near-rest speed threshold used for contact classification.
    pub small_velocity: f64,

    /// Seed for the focus-ordering generator. Identical seeds replay
    /// resolutions bit-identically.
    pub random_seed: u32,

    /// Whether the serial loop may relax `velocity_tol` when it
    /// stalls (doubling it every `20·n` iterations).
    pub panic_relaxation: bool,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            handling: CollisionHandling::SerialGroupedLastPass,
            velocity_tol: DEFAULT_VELOCITY_TOL,
            distance_tol: DEFAULT_DISTANCE_TOL,
            collision_accuracy: DEFAULT_COLLISION_ACCURACY,
            small_velocity: SMALL_VELOCITY,
            random_seed: 0,
            panic_relaxation: true,
        }
    }
}

impl ResolverConfig {
    /// Creates a config for debugging: a single coupled solve and a
    /// loose quiet threshold, so every resolution is one step.
    pub fn debug() -> Self {
        Self {
            handling: CollisionHandling::Simultaneous,
            velocity_tol: 1.0,
            ..Default::default()
        }
    }

    /// Creates a high-quality config: tight quiet threshold, grouped
    /// serial handling with a final inelastic sweep.
    pub fn high_quality() -> Self {
        Self {
            handling: CollisionHandling::SerialGroupedLastPass,
            velocity_tol: 0.01,
            collision_accuracy: 0.9,
            ..Default::default()
        }
    }

    /// Rejects out-of-range values before they reach the resolver.
    pub fn validate(&self) -> ImpelResult<()> {
        if !(self.velocity_tol > 0.0 && self.velocity_tol.is_finite()) {
            return Err(ImpelError::InvalidConfig(format!(
                "velocity_tol must be positive, got {}",
                self.velocity_tol
            )));
        }
        if !(self.distance_tol > 0.0 && self.distance_tol.is_finite()) {
            return Err(ImpelError::InvalidConfig(format!(
                "distance_tol must be positive, got {}",
                self.distance_tol
            )));
        }
        if !(self.collision_accuracy > 0.0 && self.collision_accuracy <= 1.0) {
            return Err(ImpelError::InvalidConfig(format!(
                "collision_accuracy must be in (0, 1], got {}",
                self.collision_accuracy
            )));
        }
        if !(self.small_velocity > 0.0 && self.small_velocity.is_finite()) {
            return Err(ImpelError::InvalidConfig(format!(
                "small_velocity must be positive, got {}",
                self.small_velocity
            )));
        }
        Ok(())
    }
}
