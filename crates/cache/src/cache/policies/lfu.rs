//! Least Frequently Used (LFU) Replacement Policy.
//!
//! Evicts the line whose block has the lowest access count in the set's
//! [`UsageTracker`]. Counts include accesses made during earlier residencies
//! of the same block, because the tracker never forgets. Equal counts are
//! broken by insertion stamp (oldest first), which keeps the choice
//! deterministic.
//!
//! # Performance
//!
//! - **Time Complexity:** `select_victim()`: O(W) hash lookups
//! - **Space Complexity:** O(1) beyond the shared usage tracker

use super::ReplacementPolicy;
use crate::cache::directory::Slot;
use crate::cache::usage::UsageTracker;

/// LFU Policy.
#[derive(Debug, Clone, Copy, Default)]
pub struct LfuPolicy;

impl ReplacementPolicy for LfuPolicy {
    /// Returns the way minimizing `(access count, insertion stamp)`.
    fn select_victim(
        &mut self,
        set: &[Slot],
        set_index: usize,
        usage: &UsageTracker,
        _incoming_block_id: u64,
    ) -> Option<usize> {
        set.iter()
            .enumerate()
            .filter_map(|(way, slot)| {
                slot.map(|line| {
                    (
                        way,
                        usage.count(set_index, line.block_id),
                        line.insertion_order,
                    )
                })
            })
            .min_by_key(|&(_, count, inserted)| (count, inserted))
            .map(|(way, _, _)| way)
    }
}
