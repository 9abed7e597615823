//! One-shot handling: assemble, solve, apply.

use impel_math::{LcpProblem, LcpSolver};
use impel_types::constants::TINY_IMPULSE;
use impel_types::{ImpelError, ImpelResult};

use crate::body::BodySet;
use crate::contact::ContactPoint;
use crate::impulse::apply_impulse;
use crate::influence::assemble_influence_matrix;
use crate::resolver::{verify_lcp, Scratch};

/// Resolves all contacts as one coupled system.
///
/// Returns true if any impulse above the noise floor was applied.
pub(crate) fn resolve_simultaneous(
    bodies: &mut BodySet,
    contacts: &mut [ContactPoint],
    solver: &mut dyn LcpSolver,
    scratch: &mut Scratch,
    time: f64,
) -> ImpelResult<bool> {
    let n = contacts.len();
    assemble_influence_matrix(contacts, bodies, &mut scratch.a);

    scratch.b.clear();
    scratch.joint.clear();
    for c in contacts.iter() {
        let factor = if c.joint { 1.0 } else { 1.0 + c.elasticity };
        scratch.b.push(c.normal_velocity * factor);
        scratch.joint.push(c.joint);
    }
    scratch.j.clear();
    scratch.j.resize(n, 0.0);

    let problem = LcpProblem {
        a: &scratch.a,
        b: &scratch.b,
        joint: &scratch.joint,
        time_hint: time,
    };
    let status = solver
        .solve(&problem, &mut scratch.j)
        .map_err(|e| ImpelError::Singular(format!("{}: {e}", solver.name())))?;
    verify_lcp(&problem, &scratch.j, status, solver.name(), time)?;

    let mut applied = false;
    for (c, &jk) in contacts.iter_mut().zip(&scratch.j) {
        apply_impulse(bodies, c, jk)?;
        if jk > TINY_IMPULSE {
            applied = true;
        }
    }
    Ok(applied)
}
