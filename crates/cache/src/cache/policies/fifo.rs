//! First-In, First-Out (FIFO) Replacement Policy.
//!
//! This policy evicts the oldest line in a set, regardless of how recently it
//! was accessed. The insertion stamp is written once when a line is installed
//! and hits never touch it, so eviction order is exactly install order.
//!
//! # Performance
//!
//! - **Time Complexity:** `select_victim()`: O(W) where W is the associativity
//! - **Space Complexity:** O(1)
//! - **Best Case:** Streaming accesses where all lines have equal importance
//! - **Worst Case:** Workloads with strong temporal locality (may evict frequently-used lines)

use super::ReplacementPolicy;
use crate::cache::directory::Slot;
use crate::cache::usage::UsageTracker;

/// FIFO Policy.
#[derive(Debug, Clone, Copy, Default)]
pub struct FifoPolicy;

impl ReplacementPolicy for FifoPolicy {
    /// Returns the way with the minimum insertion stamp.
    fn select_victim(
        &mut self,
        set: &[Slot],
        _set_index: usize,
        _usage: &UsageTracker,
        _incoming_block_id: u64,
    ) -> Option<usize> {
        set.iter()
            .enumerate()
            .filter_map(|(way, slot)| slot.map(|line| (way, line.insertion_order)))
            .min_by_key(|&(_, inserted)| inserted)
            .map(|(way, _)| way)
    }
}
