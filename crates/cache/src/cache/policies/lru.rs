//! Least Recently Used (LRU) Replacement Policy.
//!
//! This policy evicts the line that has gone longest without a hit or
//! insertion. Every hit and every install stamps the line with the next value
//! of the simulator's global recency counter, so the victim is simply the
//! occupied way with the smallest stamp. Stamps are unique, so there are no
//! ties.
//!
//! # Performance
//!
//! - **Time Complexity:** `select_victim()`: O(W) where W is the associativity
//! - **Space Complexity:** O(1); the stamps live in the directory
//! - **Best Case:** Workloads with strong temporal locality
//! - **Worst Case:** Cyclic scans slightly larger than the set (thrashing)

use super::ReplacementPolicy;
use crate::cache::directory::Slot;
use crate::cache::usage::UsageTracker;

/// LRU Policy.
#[derive(Debug, Clone, Copy, Default)]
pub struct LruPolicy;

impl ReplacementPolicy for LruPolicy {
    /// Returns the way with the minimum recency stamp.
    fn select_victim(
        &mut self,
        set: &[Slot],
        _set_index: usize,
        _usage: &UsageTracker,
        _incoming_block_id: u64,
    ) -> Option<usize> {
        set.iter()
            .enumerate()
            .filter_map(|(way, slot)| slot.map(|line| (way, line.recency_order)))
            .min_by_key(|&(_, recency)| recency)
            .map(|(way, _)| way)
    }
}
