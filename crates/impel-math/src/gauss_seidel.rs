//! Iterative LCP solver: projected Gauss–Seidel.
//!
//! Sweeps the rows in order, relaxing each impulse against its own
//! post-velocity and clamping one-sided rows at zero; joint rows are
//! left unclamped. Robust on the symmetric positive-semidefinite
//! systems contact assembly produces, at the cost of finite precision.

use crate::lcp::{LcpProblem, LcpSolver, LcpStatus};

/// Projected Gauss–Seidel solver.
pub struct ProjectedGaussSeidel {
    /// Maximum number of full sweeps per solve.
    pub max_sweeps: u32,
    /// Largest per-row impulse update below which a sweep counts as
    /// converged.
    pub tolerance: f64,
}

impl ProjectedGaussSeidel {
    /// Creates a solver with the default sweep limit.
    pub fn new() -> Self {
        Self {
            max_sweeps: 4000,
            tolerance: 1e-10,
        }
    }
}

impl Default for ProjectedGaussSeidel {
    fn default() -> Self {
        Self::new()
    }
}

impl LcpSolver for ProjectedGaussSeidel {
    fn solve(
        &mut self,
        problem: &LcpProblem<'_>,
        impulses: &mut [f64],
    ) -> Result<LcpStatus, String> {
        let n = problem.dim();
        if impulses.len() != n || problem.joint.len() != n {
            return Err(format!(
                "dimension mismatch: n={n}, impulses={}, joints={}",
                impulses.len(),
                problem.joint.len()
            ));
        }
        if n == 0 {
            return Ok(LcpStatus::Solved);
        }

        impulses.fill(0.0);
        for _ in 0..self.max_sweeps {
            let mut max_delta = 0.0_f64;
            for row in 0..n {
                let diag = problem.a.get(row, row);
                if diag <= 0.0 {
                    // Impulse at this row has no effect on itself;
                    // nothing to relax against.
                    continue;
                }
                let a = problem.post_velocity(impulses, row);
                let mut next = impulses[row] - a / diag;
                if !problem.joint[row] && next < 0.0 {
                    next = 0.0;
                }
                max_delta = max_delta.max((next - impulses[row]).abs());
                impulses[row] = next;
            }
            if max_delta <= self.tolerance {
                return Ok(LcpStatus::Solved);
            }
        }

        match problem.worst_row(impulses) {
            None => Ok(LcpStatus::Solved),
            Some((row, _)) => Ok(LcpStatus::WorstRow(row)),
        }
    }

    fn name(&self) -> &str {
        "projected_gauss_seidel"
    }
}
