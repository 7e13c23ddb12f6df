//! Random Replacement Policy.
//!
//! This policy evicts a uniformly chosen way of the set. The generator is a
//! `ChaCha8Rng` seeded at construction, so a given seed replays the same
//! victim sequence over the same trace.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use super::ReplacementPolicy;
use crate::cache::directory::Slot;
use crate::cache::usage::UsageTracker;

/// Random Policy state.
#[derive(Debug, Clone)]
pub struct RandomPolicy {
    /// Seed the generator was created from.
    seed: u64,
    /// Internal state for the pseudo-random number generator.
    rng: ChaCha8Rng,
}

impl RandomPolicy {
    /// Creates a new Random policy instance.
    ///
    /// # Arguments
    ///
    /// * `seed` - Seed for the generator.
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Seed this policy was created with.
    pub const fn seed(&self) -> u64 {
        self.seed
    }
}

impl ReplacementPolicy for RandomPolicy {
    /// Draws a way uniformly from `0..set.len()`.
    fn select_victim(
        &mut self,
        set: &[Slot],
        _set_index: usize,
        _usage: &UsageTracker,
        _incoming_block_id: u64,
    ) -> Option<usize> {
        if set.is_empty() {
            return None;
        }
        Some(self.rng.gen_range(0..set.len()))
    }
}
