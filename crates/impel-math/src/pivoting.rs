//! Direct LCP solver backed by `faer`.
//!
//! Active-set pivoting: joint rows are permanently active, one-sided
//! rows enter the active set while their post-velocity is negative and
//! leave it while their impulse is negative. Each candidate active set
//! is solved exactly with faer's dense full-pivot LU, so an accepted
//! solution satisfies the contract to machine precision.

use faer::linalg::solvers::{FullPivLu, Solve};
use faer::Mat;

use crate::lcp::{LcpProblem, LcpSolver, LcpStatus};

/// Pivot decision threshold. Impulses and post-velocities inside this
/// band are treated as zero when choosing entering/leaving rows.
const PIVOT_TOL: f64 = 1e-10;

/// Direct active-set LCP solver (the default for impulse resolution).
///
/// Owns its working buffers so repeated solves avoid reallocation.
pub struct PivotingLcp {
    /// Active flag per row.
    active: Vec<bool>,
    /// Indices of active rows, rebuilt each pivot step.
    index: Vec<usize>,
}

impl PivotingLcp {
    /// Creates a new solver.
    pub fn new() -> Self {
        Self {
            active: Vec::new(),
            index: Vec::new(),
        }
    }

    /// Solves the equality system restricted to the active set and
    /// scatters the result into `impulses` (inactive rows get zero).
    fn solve_active(&mut self, problem: &LcpProblem<'_>, impulses: &mut [f64]) -> Result<(), String> {
        self.index.clear();
        self.index
            .extend((0..problem.dim()).filter(|&row| self.active[row]));
        impulses.fill(0.0);
        if self.index.is_empty() {
            return Ok(());
        }

        let k = self.index.len();
        let sub = Mat::from_fn(k, k, |r, c| problem.a.get(self.index[r], self.index[c]));
        let rhs = Mat::from_fn(k, 1, |r, _| -problem.b[self.index[r]]);

        let lu = FullPivLu::new(sub.as_ref());
        let sol = lu.solve(&rhs);

        for (r, &row) in self.index.iter().enumerate() {
            let x = sol[(r, 0)];
            if !x.is_finite() {
                return Err(format!(
                    "singular active-set system of size {k} (t = {})",
                    problem.time_hint
                ));
            }
            impulses[row] = x;
        }
        Ok(())
    }
}

impl Default for PivotingLcp {
    fn default() -> Self {
        Self::new()
    }
}

impl LcpSolver for PivotingLcp {
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
        if problem.a.rows != n || problem.a.cols != n {
            return Err(format!(
                "matrix is {}×{}, expected {n}×{n}",
                problem.a.rows, problem.a.cols
            ));
        }
        if n == 0 {
            return Ok(LcpStatus::Solved);
        }

        self.active.clear();
        self.active.extend(problem.joint.iter().copied());

        // Each pivot step activates or retires exactly one row.
        let max_pivots = 10 * n + 10;
        for _ in 0..max_pivots {
            self.solve_active(problem, impulses)?;

            // Retire the active one-sided row pulling hardest.
            let mut leaving: Option<(usize, f64)> = None;
            for &row in &self.index {
                if !problem.joint[row]
                    && impulses[row] < -PIVOT_TOL
                    && leaving.map_or(true, |(_, v)| impulses[row] < v)
                {
                    leaving = Some((row, impulses[row]));
                }
            }
            if let Some((row, _)) = leaving {
                self.active[row] = false;
                continue;
            }

            // Activate the inactive row still being approached fastest.
            let mut entering: Option<(usize, f64)> = None;
            for row in 0..n {
                if self.active[row] {
                    continue;
                }
                let a = problem.post_velocity(impulses, row);
                if a < -PIVOT_TOL && entering.map_or(true, |(_, v)| a < v) {
                    entering = Some((row, a));
                }
            }
            match entering {
                Some((row, _)) => self.active[row] = true,
                None => {
                    // Flush sub-threshold negatives left by the LU.
                    for row in 0..n {
                        if !problem.joint[row] && impulses[row] < 0.0 {
                            impulses[row] = 0.0;
                        }
                    }
                    return Ok(LcpStatus::Solved);
                }
            }
        }

        let worst = problem.worst_row(impulses).map_or(0, |(row, _)| row);
        Ok(LcpStatus::WorstRow(worst))
    }

    fn name(&self) -> &str {
        "pivoting_lcp"
    }
}
