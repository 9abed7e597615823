//! Contact descriptors handed to the impulse resolver.
//!
//! A `ContactPoint` records one detected touching or interpenetrating
//! point between two bodies. The list is produced by the detection
//! layer, consumed by one resolution call, and discarded; only the
//! `impulse` field is written back.

use impel_math::DVec2;
use impel_types::{BodyId, ImpelError, ImpelResult};
use serde::{Deserialize, Serialize};

use crate::body::BodySet;

/// A detected contact between two bodies.
///
/// The normal points outward from `normal_body`. A positive impulse
/// pushes `primary` along the normal and `normal_body` against it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContactPoint {
    /// First involved body.
    pub primary: BodyId,
    /// Second involved body; the normal emerges from this one.
    pub normal_body: BodyId,
    /// Offset from `primary`'s center of mass to the impact point.
    pub r1: DVec2,
    /// Offset from `normal_body`'s center of mass to the impact point.
    pub r2: DVec2,
    /// Unit contact normal.
    pub normal: DVec2,
    /// Pre-resolution relative normal velocity (negative = approaching).
    pub normal_velocity: f64,
    /// Coefficient of restitution in `[0, 1]`.
    pub elasticity: f64,
    /// Bilateral flag: joints must end with zero normal velocity and
    /// may carry an impulse of either sign.
    pub joint: bool,
    /// Output: the scalar impulse finally applied at this contact.
    pub impulse: f64,
}

impl ContactPoint {
    /// Creates a contact with no impulse applied yet.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        primary: BodyId,
        normal_body: BodyId,
        r1: DVec2,
        r2: DVec2,
        normal: DVec2,
        normal_velocity: f64,
        elasticity: f64,
        joint: bool,
    ) -> Self {
        Self {
            primary,
            normal_body,
            r1,
            r2,
            normal,
            normal_velocity,
            elasticity,
            joint,
            impulse: 0.0,
        }
    }

    /// The impact-point offset for `body`, or `None` when `body` is
    /// not part of this contact. This is the role rule the influence
    /// function is built on.
    pub fn offset_for(&self, body: BodyId) -> Option<DVec2> {
        if body == self.primary {
            Some(self.r1)
        } else if body == self.normal_body {
            Some(self.r2)
        } else {
            None
        }
    }

    /// Returns true if `body` participates in this contact.
    pub fn involves(&self, body: BodyId) -> bool {
        body == self.primary || body == self.normal_body
    }

    /// Returns true if the two contacts touch a common body.
    pub fn shares_body(&self, other: &ContactPoint) -> bool {
        self.involves(other.primary) || self.involves(other.normal_body)
    }

    /// Recomputes the relative normal velocity from current body state.
    pub fn relative_normal_velocity(&self, bodies: &BodySet) -> f64 {
        let vp = bodies.get(self.primary).velocity_at(self.r1);
        let vn = bodies.get(self.normal_body).velocity_at(self.r2);
        (vp - vn).dot(self.normal)
    }
}

/// Validates a contact list before resolution.
///
/// Rejects body ids the arena never issued, contacts between two
/// immovable bodies, non-unit normals, and any immovable body that
/// claims a velocity — all of which point at bugs in the detection
/// layer.
pub fn check_contacts(contacts: &[ContactPoint], bodies: &BodySet) -> ImpelResult<()> {
    for (row, c) in contacts.iter().enumerate() {
        let primary = bodies.try_get(c.primary).ok_or(ImpelError::UnknownBodyId {
            body: c.primary.0,
            contact: row,
        })?;
        let normal_body = bodies.try_get(c.normal_body).ok_or(ImpelError::UnknownBodyId {
            body: c.normal_body.0,
            contact: row,
        })?;

        if !primary.is_movable() && !normal_body.is_movable() {
            return Err(ImpelError::InvariantViolation(format!(
                "contact {row} joins two immovable bodies"
            )));
        }
        if (c.normal.length() - 1.0).abs() > 1e-9 {
            return Err(ImpelError::InvariantViolation(format!(
                "contact {row} normal has length {}",
                c.normal.length()
            )));
        }
        for (id, body) in [(c.primary, primary), (c.normal_body, normal_body)] {
            if !body.is_movable() && (body.vel != DVec2::ZERO || body.angular_vel != 0.0) {
                return Err(ImpelError::InvariantViolation(format!(
                    "immovable body {} has non-zero velocity",
                    id.0
                )));
            }
        }
    }
    Ok(())
}
