//! Deterministic random source.
//!
//! The serial impulse strategy shuffles contact order every iteration,
//! and replaying a simulation requires the exact integer sequence. A
//! 32-bit linear congruential generator pins that sequence forever,
//! where a third-party generator's stream may change between versions.
//! The generator is owned and injected explicitly, never global, so
//! concurrent simulations stay isolated.

use serde::{Deserialize, Serialize};

const MULTIPLIER: u32 = 1_664_525;
const INCREMENT: u32 = 1_013_904_223;

/// 32-bit linear congruential generator (Numerical Recipes constants).
///
/// Identical seeds produce bit-identical sequences on every platform.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Lcg {
    state: u32,
}

impl Lcg {
    /// Creates a generator with the given seed.
    pub fn new(seed: u32) -> Self {
        Self { state: seed }
    }

    /// Resets the generator to the given seed.
    pub fn set_seed(&mut self, seed: u32) {
        self.state = seed;
    }

    /// Advances the generator and returns the next 32-bit value.
    pub fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_mul(MULTIPLIER).wrapping_add(INCREMENT);
        self.state
    }

    /// Returns a value in `0..n`. `n` must be non-zero.
    pub fn next_below(&mut self, n: u32) -> u32 {
        debug_assert!(n > 0);
        self.next_u32() % n
    }

    /// Fills `out` with a uniform random permutation of `0..n`
    /// (Fisher–Yates).
    pub fn permutation(&mut self, n: usize, out: &mut Vec<usize>) {
        out.clear();
        out.extend(0..n);
        for i in (1..n).rev() {
            let k = self.next_below(i as u32 + 1) as usize;
            out.swap(i, k);
        }
    }
}
