//! Cache Replacement Policies.
//!
//! Implements the algorithms for selecting a victim way in a full set.
//!
//! # Policies
//!
//! - `Lru`: Least Recently Used.
//! - `Fifo`: First-In, First-Out.
//! - `Lfu`: Least Frequently Used, ties broken by FIFO order.
//! - `Random`: Seeded uniform random selection.
//!
//! The simulator holds a [`Policy`], a closed enum over these four, chosen
//! once at construction.

/// First-In, First-Out replacement policy.
pub mod fifo;

/// Least Frequently Used replacement policy.
pub mod lfu;

/// Least Recently Used replacement policy.
pub mod lru;

/// Random replacement policy.
pub mod random;

pub use fifo::FifoPolicy;
pub use lfu::LfuPolicy;
pub use lru::LruPolicy;
pub use random::RandomPolicy;

use super::directory::Slot;
use super::usage::UsageTracker;
use crate::config::ReplacementPolicy as PolicyType;

/// Trait for cache replacement policies.
///
/// Ordering state lives in the lines themselves (recency and insertion
/// stamps), so most policies are stateless; only RANDOM carries a generator.
pub trait ReplacementPolicy: Send + Sync {
    /// Selects the way to evict from a full set.
    ///
    /// # Arguments
    ///
    /// * `set` - The slots of the target set, in way order. All are occupied.
    /// * `set_index` - Index of the target set.
    /// * `usage` - Per-set access history.
    /// * `incoming_block_id` - Block identifier of the block about to be installed.
    ///
    /// # Returns
    ///
    /// The way to evict, or `None` if the policy cannot pick one.
    fn select_victim(
        &mut self,
        set: &[Slot],
        set_index: usize,
        usage: &UsageTracker,
        incoming_block_id: u64,
    ) -> Option<usize>;
}

/// The replacement policy bound to a simulator.
#[derive(Debug, Clone)]
pub enum Policy {
    /// Least Recently Used.
    Lru(LruPolicy),
    /// First-In, First-Out.
    Fifo(FifoPolicy),
    /// Least Frequently Used.
    Lfu(LfuPolicy),
    /// Seeded random.
    Random(RandomPolicy),
}

impl Policy {
    /// Builds the policy for `kind`. `seed` is only used by RANDOM.
    pub fn new(kind: PolicyType, seed: u64) -> Self {
        match kind {
            PolicyType::Lru => Self::Lru(LruPolicy),
            PolicyType::Fifo => Self::Fifo(FifoPolicy),
            PolicyType::Lfu => Self::Lfu(LfuPolicy),
            PolicyType::Random => Self::Random(RandomPolicy::new(seed)),
        }
    }

    /// Which policy this is.
    pub const fn kind(&self) -> PolicyType {
        match self {
            Self::Lru(_) => PolicyType::Lru,
            Self::Fifo(_) => PolicyType::Fifo,
            Self::Lfu(_) => PolicyType::Lfu,
            Self::Random(_) => PolicyType::Random,
        }
    }
}

impl ReplacementPolicy for Policy {
    #[inline]
    fn select_victim(
        &mut self,
        set: &[Slot],
        set_index: usize,
        usage: &UsageTracker,
        incoming_block_id: u64,
    ) -> Option<usize> {
        match self {
            Self::Lru(p) => p.select_victim(set, set_index, usage, incoming_block_id),
            Self::Fifo(p) => p.select_victim(set, set_index, usage, incoming_block_id),
            Self::Lfu(p) => p.select_victim(set, set_index, usage, incoming_block_id),
            Self::Random(p) => p.select_victim(set, set_index, usage, incoming_block_id),
        }
    }
}
