//! Scalar impulse application.

use impel_types::constants::{SMALL_IMPULSE, TINY_IMPULSE};
use impel_types::{ImpelError, ImpelResult};

use crate::body::BodySet;
use crate::contact::ContactPoint;

/// How an applied impulse changed the involved velocities — a hint to
/// the surrounding integrator about whether to flag a variable-sequence
/// bump.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VelocityJump {
    /// No impulse was applied.
    None,
    /// The change is below the continuity threshold.
    Continuous,
    /// The change is a genuine velocity discontinuity.
    Discontinuous,
}

/// Applies the scalar impulse `j` at `contact`, mutating both body
/// velocities and recording `contact.impulse`.
///
/// A negative impulse on a one-sided contact is clamped to zero inside
/// the noise window (`TINY_IMPULSE`) and is an invariant violation
/// beyond it. Immovable bodies are never touched.
pub fn apply_impulse(
    bodies: &mut BodySet,
    contact: &mut ContactPoint,
    j: f64,
) -> ImpelResult<VelocityJump> {
    let mut j = j;
    if !contact.joint && j < 0.0 {
        if j >= -TINY_IMPULSE {
            j = 0.0;
        } else {
            return Err(ImpelError::InvariantViolation(format!(
                "negative impulse {j:.3e} on a one-sided contact"
            )));
        }
    }

    contact.impulse = j;
    if j == 0.0 {
        return Ok(VelocityJump::None);
    }
    let jump = if j.abs() < SMALL_IMPULSE {
        VelocityJump::Continuous
    } else {
        VelocityJump::Discontinuous
    };

    let dv = contact.normal * j;
    {
        let body = bodies.get_mut(contact.primary);
        if body.is_movable() {
            body.vel += dv * body.inv_mass();
            body.angular_vel += j * contact.r1.perp_dot(contact.normal) * body.inv_moment();
        }
    }
    {
        let body = bodies.get_mut(contact.normal_body);
        if body.is_movable() {
            body.vel -= dv * body.inv_mass();
            body.angular_vel -= j * contact.r2.perp_dot(contact.normal) * body.inv_moment();
        }
    }
    Ok(jump)
}
