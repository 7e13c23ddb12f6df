//! Per-set access frequency history.
//!
//! Every hit or insertion of a block bumps its count in the set it maps to.
//! Counts are never decremented and entries are never removed, so a block that
//! was hot before being evicted keeps its history when it comes back. LFU
//! relies on this.

use std::collections::HashMap;

/// Map from block identifier to access count, one per set.
#[derive(Debug, Clone, Default)]
pub struct UsageTracker {
    sets: Vec<HashMap<u64, u64>>,
}

impl UsageTracker {
    /// Creates an empty tracker for `set_count` sets.
    pub fn new(set_count: usize) -> Self {
        Self {
            sets: vec![HashMap::new(); set_count],
        }
    }

    /// Records one access to `block_id` in `set` and returns the new count.
    ///
    /// The first access creates the entry with a count of 1.
    pub fn record(&mut self, set: usize, block_id: u64) -> u64 {
        let count = self.sets[set].entry(block_id).or_insert(0);
        *count += 1;
        *count
    }

    /// Access count of `block_id` in `set`, or 0 if it was never seen there.
    pub fn count(&self, set: usize, block_id: u64) -> u64 {
        self.sets
            .get(set)
            .and_then(|counts| counts.get(&block_id))
            .copied()
            .unwrap_or(0)
    }

    /// Number of distinct blocks ever recorded in `set`.
    pub fn tracked_blocks(&self, set: usize) -> usize {
        self.sets.get(set).map_or(0, HashMap::len)
    }

    /// Number of distinct blocks recorded across all sets.
    pub fn total_tracked(&self) -> usize {
        self.sets.iter().map(HashMap::len).sum()
    }

    /// Number of sets covered.
    pub fn set_count(&self) -> usize {
        self.sets.len()
    }
}
