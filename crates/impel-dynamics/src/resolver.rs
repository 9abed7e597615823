//! The impulse resolver — entry point of the collision core.

use impel_math::{DenseMatrix, Lcg, LcpProblem, LcpSolver, LcpStatus, PivotingLcp};
use impel_types::constants::{LCP_RESIDUAL_TOL, TINY_IMPULSE};
use impel_types::{ImpelError, ImpelResult};
use serde::{Deserialize, Serialize};

use crate::body::BodySet;
use crate::config::{CollisionHandling, ResolverConfig};
use crate::contact::{check_contacts, ContactPoint};
use crate::serial::resolve_serial;
use crate::simultaneous::resolve_simultaneous;

/// Caller-supplied running counters, carried across resolution calls.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct ResolutionTotals {
    /// Contacts that received an impulse above the noise floor.
    pub impulses: u64,
    /// Resolution calls handled.
    pub calls: u64,
}

/// Reusable per-call buffers. Matrix assembly is `O(n²)`; keeping the
/// allocations alive across calls makes repeated resolution cheap.
#[derive(Default)]
pub(crate) struct Scratch {
    pub a: DenseMatrix,
    pub b: Vec<f64>,
    pub e: Vec<f64>,
    pub joint: Vec<bool>,
    pub j: Vec<f64>,
    pub j2: Vec<f64>,
    pub order: Vec<usize>,
    pub subset: Vec<usize>,
    pub in_subset: Vec<bool>,
    pub sub_a: DenseMatrix,
    pub sub_b: Vec<f64>,
    pub sub_joint: Vec<bool>,
    pub sub_j: Vec<f64>,
}

/// Checks a solve against the acceptance criterion: joint rows and
/// pushing rows must end within `LCP_RESIDUAL_TOL`. A solver that
/// reported failure but passes the check is tolerated with a warning.
pub(crate) fn verify_lcp(
    problem: &LcpProblem<'_>,
    impulses: &[f64],
    status: LcpStatus,
    solver_name: &str,
    time: f64,
) -> ImpelResult<()> {
    match problem.check_contract(impulses, LCP_RESIDUAL_TOL) {
        Ok(()) => {
            if let LcpStatus::WorstRow(row) = status {
                tracing::warn!(
                    solver = solver_name,
                    row,
                    time,
                    "solver reported failure but residuals are within tolerance"
                );
            }
            Ok(())
        }
        Err((row, residual)) => Err(ImpelError::SolverResidual {
            row,
            residual,
            time,
        }),
    }
}

/// Impulse-based collision resolver.
///
/// Owns the tuning parameters, the injected random source, the
/// swappable LCP solver, and reusable scratch buffers. Stateless
/// between calls apart from those buffers and the generator.
pub struct ImpulseResolver {
    config: ResolverConfig,
    rng: Lcg,
    solver: Box<dyn LcpSolver>,
    scratch: Scratch,
}

impl ImpulseResolver {
    /// Creates a resolver with the default direct solver.
    pub fn new(config: ResolverConfig) -> ImpelResult<Self> {
        Self::with_solver(config, Box::new(PivotingLcp::new()))
    }

    /// Creates a resolver with a caller-supplied LCP solver.
    pub fn with_solver(config: ResolverConfig, solver: Box<dyn LcpSolver>) -> ImpelResult<Self> {
        config.validate()?;
        let rng = Lcg::new(config.random_seed);
        Ok(Self {
            config,
            rng,
            solver,
            scratch: Scratch::default(),
        })
    }

    /// Current configuration.
    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    /// Switches the multi-contact handling strategy.
    pub fn set_handling(&mut self, handling: CollisionHandling) {
        self.config.handling = handling;
    }

    /// Sets the quiet-velocity threshold (`ε_v`). Must be positive.
    pub fn set_velocity_tol(&mut self, velocity_tol: f64) -> ImpelResult<()> {
        let candidate = ResolverConfig {
            velocity_tol,
            ..self.config.clone()
        };
        candidate.validate()?;
        self.config = candidate;
        Ok(())
    }

    /// Sets the detection distance tolerance. Must be positive.
    pub fn set_distance_tol(&mut self, distance_tol: f64) -> ImpelResult<()> {
        let candidate = ResolverConfig {
            distance_tol,
            ..self.config.clone()
        };
        candidate.validate()?;
        self.config = candidate;
        Ok(())
    }

    /// Sets the collision backup accuracy. Must be in `(0, 1]`.
    pub fn set_collision_accuracy(&mut self, collision_accuracy: f64) -> ImpelResult<()> {
        let candidate = ResolverConfig {
            collision_accuracy,
            ..self.config.clone()
        };
        candidate.validate()?;
        self.config = candidate;
        Ok(())
    }

    /// Sets the focus-ordering seed and reseeds the generator, so the
    /// next resolution replays bit-identically for the same inputs.
    pub fn set_random_seed(&mut self, random_seed: u32) -> ImpelResult<()> {
        let candidate = ResolverConfig {
            random_seed,
            ..self.config.clone()
        };
        candidate.validate()?;
        self.config = candidate;
        self.rng.set_seed(random_seed);
        Ok(())
    }

    /// Resolves one contact list: validates it, dispatches to the
    /// configured strategy, and applies the resulting impulses to the
    /// bodies.
    ///
    /// Returns whether any non-trivial impulse was applied. `time` is
    /// carried into diagnostics only.
    pub fn handle_collisions(
        &mut self,
        bodies: &mut BodySet,
        contacts: &mut [ContactPoint],
        totals: Option<&mut ResolutionTotals>,
        time: f64,
    ) -> ImpelResult<bool> {
        if contacts.is_empty() {
            return Ok(false);
        }
        check_contacts(contacts, bodies)?;

        let applied = match self.config.handling {
            CollisionHandling::Simultaneous => resolve_simultaneous(
                bodies,
                contacts,
                self.solver.as_mut(),
                &mut self.scratch,
                time,
            )?,
            _ => resolve_serial(
                bodies,
                contacts,
                self.solver.as_mut(),
                &mut self.rng,
                &self.config,
                &mut self.scratch,
                time,
            )?,
        };

        if let Some(totals) = totals {
            totals.calls += 1;
            totals.impulses += contacts
                .iter()
                .filter(|c| c.impulse.abs() > TINY_IMPULSE)
                .count() as u64;
        }
        Ok(applied)
    }
}
