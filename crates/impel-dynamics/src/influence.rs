//! Contact influence: how an impulse at one contact changes the
//! relative normal velocity at another.
//!
//! This is the single assembler for influence matrices; both handling
//! strategies build their systems through it.

use impel_math::{DenseMatrix, DVec2};
use impel_types::BodyId;

use crate::body::BodySet;
use crate::contact::ContactPoint;

/// Change in relative normal velocity at `ci` per unit impulse applied
/// at `cj` on `body`.
///
/// Zero when `body` does not take part in both contacts or cannot be
/// moved. The sign flips with `body`'s role at `cj`: the impulse acts
/// along `+normal` on `cj`'s primary body and along `−normal` on its
/// normal body.
pub fn influence(ci: &ContactPoint, cj: &ContactPoint, body: BodyId, bodies: &BodySet) -> f64 {
    let Some(ri) = ci.offset_for(body) else {
        return 0.0;
    };
    let Some(rj) = cj.offset_for(body) else {
        return 0.0;
    };
    let b = bodies.get(body);
    if !b.is_movable() {
        return 0.0;
    }

    let factor = if body == cj.primary { 1.0 } else { -1.0 };
    let inv_m = b.inv_mass();
    let inv_i = b.inv_moment();
    let ni: DVec2 = ci.normal;
    let nj: DVec2 = cj.normal;
    // Angular momentum the unit impulse deposits about `body`'s CM.
    let rj_cross_nj = rj.perp_dot(nj);

    factor
        * (ni.x * (nj.x * inv_m - ri.y * rj_cross_nj * inv_i)
            + ni.y * (nj.y * inv_m + ri.x * rj_cross_nj * inv_i))
}

/// Assembles the full influence matrix for a contact list into `a`.
///
/// `a[i][k]` is the change in normal velocity at contact `i` per unit
/// impulse at contact `k`. The matrix is symmetric; the upper triangle
/// is computed and mirrored. Immovable bodies contribute nothing.
pub fn assemble_influence_matrix(contacts: &[ContactPoint], bodies: &BodySet, a: &mut DenseMatrix) {
    let n = contacts.len();
    a.reset(n, n);
    for i in 0..n {
        let ci = &contacts[i];
        for k in i..n {
            let ck = &contacts[k];
            let value = influence(ci, ck, ci.primary, bodies)
                - influence(ci, ck, ci.normal_body, bodies);
            a.set(i, k, value);
            if k != i {
                a.set(k, i, value);
            }
        }
    }
}
