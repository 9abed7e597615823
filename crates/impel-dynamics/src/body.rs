//! Rigid-body state and the body arena.
//!
//! Bodies are plain data; contacts refer to them by [`BodyId`] index,
//! so the resolver can read many bodies while mutating others without
//! aliasing. An infinite mass encodes an immovable body the same way
//! a zero inverse mass encodes a pinned vertex in particle systems.

use impel_math::DVec2;
use impel_types::{BodyId, ImpelError, ImpelResult};
use serde::{Deserialize, Serialize};

/// One planar rigid body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RigidBody {
    /// Mass. `f64::INFINITY` for an immovable body.
    pub mass: f64,
    /// Moment of inertia about the center of mass. May be infinite.
    pub moment: f64,
    /// Linear velocity of the center of mass.
    pub vel: DVec2,
    /// Angular velocity (counter-clockwise positive).
    pub angular_vel: f64,
    /// Coefficient of restitution in `[0, 1]`, consulted by the
    /// detection layer when it stamps contacts.
    pub elasticity: f64,
}

impl RigidBody {
    /// Creates a body at rest with the given mass and moment.
    pub fn new(mass: f64, moment: f64) -> Self {
        Self {
            mass,
            moment,
            vel: DVec2::ZERO,
            angular_vel: 0.0,
            elasticity: 1.0,
        }
    }

    /// Creates an immovable body (infinite mass and moment).
    pub fn fixed() -> Self {
        Self::new(f64::INFINITY, f64::INFINITY)
    }

    /// Returns true if impulses can move this body.
    #[inline]
    pub fn is_movable(&self) -> bool {
        self.mass.is_finite()
    }

    /// Inverse mass; zero for an immovable body.
    #[inline]
    pub fn inv_mass(&self) -> f64 {
        if self.mass.is_finite() {
            1.0 / self.mass
        } else {
            0.0
        }
    }

    /// Inverse moment of inertia; zero when rotation is locked.
    #[inline]
    pub fn inv_moment(&self) -> f64 {
        if self.moment.is_finite() {
            1.0 / self.moment
        } else {
            0.0
        }
    }

    /// Velocity of the material point at offset `r` from the center
    /// of mass: `v + ω × r`.
    pub fn velocity_at(&self, r: DVec2) -> DVec2 {
        DVec2::new(
            self.vel.x - self.angular_vel * r.y,
            self.vel.y + self.angular_vel * r.x,
        )
    }
}

/// Growable arena of rigid bodies, indexed by [`BodyId`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BodySet {
    bodies: Vec<RigidBody>,
}

impl BodySet {
    /// Creates an empty arena.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a body and returns its id.
    pub fn insert(&mut self, body: RigidBody) -> BodyId {
        let id = BodyId(self.bodies.len() as u32);
        self.bodies.push(body);
        id
    }

    /// Returns the body with the given id.
    ///
    /// Panics if the id does not belong to this arena.
    #[inline]
    pub fn get(&self, id: BodyId) -> &RigidBody {
        &self.bodies[id.index()]
    }

    /// Returns the body with the given id, or `None` for an id this
    /// arena never issued. The contact consistency check goes through
    /// here so a bad id from the detection layer surfaces as an error
    /// rather than a crash.
    #[inline]
    pub fn try_get(&self, id: BodyId) -> Option<&RigidBody> {
        self.bodies.get(id.index())
    }

    /// Mutable access to the body with the given id.
    #[inline]
    pub fn get_mut(&mut self, id: BodyId) -> &mut RigidBody {
        &mut self.bodies[id.index()]
    }

    /// Number of bodies.
    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    /// Returns true if the arena holds no bodies.
    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    /// Iterates over all bodies.
    pub fn iter(&self) -> impl Iterator<Item = &RigidBody> {
        self.bodies.iter()
    }

    /// Broadcasts a coefficient of restitution to every body.
    pub fn set_elasticity(&mut self, elasticity: f64) -> ImpelResult<()> {
        if !(0.0..=1.0).contains(&elasticity) {
            return Err(ImpelError::InvalidConfig(format!(
                "elasticity must be in [0, 1], got {elasticity}"
            )));
        }
        if self.bodies.is_empty() {
            return Err(ImpelError::InvalidConfig(
                "cannot set elasticity: no bodies present".into(),
            ));
        }
        for body in &mut self.bodies {
            body.elasticity = elasticity;
        }
        Ok(())
    }
}
