//! Serial handling: a rapid sequence of small coupled collisions.
//!
//! The loop simulates every contact as if separated by an
//! infinitesimal gap: pick a loud focus contact in random order, solve
//! the minimal coupled subset around it, propagate the velocity change
//! to every other contact through the influence matrix, repeat until
//! the whole system is quiet. Cumulative impulses are applied to the
//! bodies exactly once at the end.

use impel_math::{Lcg, LcpProblem, LcpSolver};
use impel_types::constants::{MAX_SERIAL_ITERATIONS, PANIC_INTERVAL_FACTOR, TINY_IMPULSE};
use impel_types::{ImpelError, ImpelResult};

use crate::body::BodySet;
use crate::config::ResolverConfig;
use crate::contact::ContactPoint;
use crate::impulse::apply_impulse;
use crate::influence::assemble_influence_matrix;
use crate::resolver::{verify_lcp, Scratch};

/// A contact is loud when it still violates its collision law by more
/// than the quiet threshold: one-sided contacts by approaching, joints
/// by moving in either direction.
fn is_loud(b: f64, joint: bool, tol: f64) -> bool {
    if joint {
        b.abs() > tol
    } else {
        b < -tol
    }
}

/// Picks the first loud contact in a freshly shuffled order.
///
/// The order changes every iteration so no contact can be starved.
fn select_focus(
    b: &[f64],
    contacts: &[ContactPoint],
    tol: f64,
    rng: &mut Lcg,
    order: &mut Vec<usize>,
) -> Option<usize> {
    rng.permutation(b.len(), order);
    order
        .iter()
        .copied()
        .find(|&i| is_loud(b[i], contacts[i].joint, tol))
}

/// Collects the subset resolved together with the focus contact:
/// every joint reachable through shared bodies, iterated to fixpoint,
/// and — in hybrid mode — every loud one-sided contact on those same
/// bodies.
fn joint_closure(
    focus: usize,
    contacts: &[ContactPoint],
    b: &[f64],
    hybrid: bool,
    tol: f64,
    subset: &mut Vec<usize>,
    in_subset: &mut Vec<bool>,
) {
    in_subset.clear();
    in_subset.resize(contacts.len(), false);
    subset.clear();
    subset.push(focus);
    in_subset[focus] = true;

    loop {
        let mut changed = false;
        for (i, c) in contacts.iter().enumerate() {
            if in_subset[i] {
                continue;
            }
            let touches = subset.iter().any(|&s| contacts[s].shares_body(c));
            if !touches {
                continue;
            }
            if c.joint || (hybrid && is_loud(b[i], c.joint, tol)) {
                subset.push(i);
                in_subset[i] = true;
                changed = true;
            }
        }
        if !changed {
            break;
        }
    }
    subset.sort_unstable();
}

/// Resolves the contact list serially.
///
/// Returns true if any cumulative impulse exceeded the noise floor and
/// at least one contact was one-sided.
pub(crate) fn resolve_serial(
    bodies: &mut BodySet,
    contacts: &mut [ContactPoint],
    solver: &mut dyn LcpSolver,
    rng: &mut Lcg,
    config: &ResolverConfig,
    scratch: &mut Scratch,
    time: f64,
) -> ImpelResult<bool> {
    let n = contacts.len();
    let grouped = config.handling.grouped();
    let hybrid = config.handling.hybrid();
    let last_pass_enabled = config.handling.last_pass();

    // The full influence matrix is assembled once and reused by every
    // sub-solve and by the velocity propagation below.
    assemble_influence_matrix(contacts, bodies, &mut scratch.a);

    // b: current normal velocity per contact; j2: cumulative impulses.
    scratch.b.clear();
    scratch.e.clear();
    for c in contacts.iter() {
        scratch.b.push(c.normal_velocity);
        // Grouped sub-solves treat joints as perfectly inelastic.
        scratch.e.push(if grouped && c.joint {
            0.0
        } else {
            c.elasticity
        });
    }
    scratch.j2.clear();
    scratch.j2.resize(n, 0.0);

    let mut velocity_tol = config.velocity_tol;
    let panic_interval = PANIC_INTERVAL_FACTOR * n as u64;
    let mut iteration: u64 = 0;
    let mut in_last_pass = false;

    loop {
        let focus = select_focus(&scratch.b, contacts, velocity_tol, rng, &mut scratch.order);
        if focus.is_none() {
            if !(last_pass_enabled && !in_last_pass) {
                break;
            }
            // One final sweep over every contact with zero elasticity.
            in_last_pass = true;
        }

        scratch.subset.clear();
        match focus {
            None => scratch.subset.extend(0..n),
            Some(f) if grouped || hybrid => joint_closure(
                f,
                contacts,
                &scratch.b,
                hybrid,
                velocity_tol,
                &mut scratch.subset,
                &mut scratch.in_subset,
            ),
            Some(f) => scratch.subset.push(f),
        }

        // Sub-system: always copied out, never aliasing the full b.
        scratch.sub_b.clear();
        scratch.sub_joint.clear();
        for &g in &scratch.subset {
            let factor = if focus.is_some() { 1.0 + scratch.e[g] } else { 1.0 };
            scratch.sub_b.push(scratch.b[g] * factor);
            scratch.sub_joint.push(contacts[g].joint);
        }
        scratch.a.gather(&scratch.subset, &mut scratch.sub_a);
        scratch.sub_j.clear();
        scratch.sub_j.resize(scratch.subset.len(), 0.0);

        let problem = LcpProblem {
            a: &scratch.sub_a,
            b: &scratch.sub_b,
            joint: &scratch.sub_joint,
            time_hint: time,
        };
        let status = solver
            .solve(&problem, &mut scratch.sub_j)
            .map_err(|e| ImpelError::Singular(format!("{}: {e}", solver.name())))?;
        verify_lcp(&problem, &scratch.sub_j, status, solver.name(), time)?;

        // Accumulate the increment and propagate the velocity change
        // to every contact through the full matrix.
        for (k, &g) in scratch.subset.iter().enumerate() {
            scratch.j2[g] += scratch.sub_j[k];
        }
        for i in 0..n {
            let mut dv = 0.0;
            for (k, &g) in scratch.subset.iter().enumerate() {
                dv += scratch.a.get(i, g) * scratch.sub_j[k];
            }
            scratch.b[i] += dv;
        }

        iteration += 1;
        if in_last_pass {
            break;
        }
        if config.panic_relaxation && iteration % panic_interval == 0 {
            velocity_tol *= 2.0;
            tracing::debug!(
                iteration,
                velocity_tol,
                time,
                "serial resolution stalling, relaxing quiet threshold"
            );
        }
        if iteration > MAX_SERIAL_ITERATIONS {
            return Err(ImpelError::IterationLimit {
                iterations: iteration,
                time,
            });
        }
    }

    // Apply the cumulative impulses exactly once per contact.
    let mut any_impulse = false;
    let mut any_one_sided = false;
    for (c, &j) in contacts.iter_mut().zip(&scratch.j2) {
        apply_impulse(bodies, c, j)?;
        if j.abs() > TINY_IMPULSE {
            any_impulse = true;
        }
        if !c.joint {
            any_one_sided = true;
        }
    }
    Ok(any_impulse && any_one_sided)
}
