//! Simulation statistics collection.
//!
//! Counts the outcomes of every access made through a simulator:
//! 1. **Accesses:** Total, hits and misses.
//! 2. **Evictions:** Misses that displaced a resident block.
//! 3. **Diagnostics:** Misses where the policy failed to pick a victim.

use serde::Serialize;

/// Access outcome counters for one simulator.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    /// Total number of accesses.
    pub accesses: u64,
    /// Accesses that found their block resident.
    pub hits: u64,
    /// Accesses that did not.
    pub misses: u64,
    /// Misses that evicted a resident block.
    pub evictions: u64,
    /// Misses on a full set where no victim was chosen and nothing was installed.
    pub victimless_misses: u64,
}

impl CacheStats {
    /// Fraction of accesses that hit, or 0.0 before the first access.
    pub fn hit_rate(&self) -> f64 {
        if self.accesses == 0 {
            0.0
        } else {
            self.hits as f64 / self.accesses as f64
        }
    }

    /// Fraction of accesses that missed, or 0.0 before the first access.
    pub fn miss_rate(&self) -> f64 {
        if self.accesses == 0 {
            0.0
        } else {
            self.misses as f64 / self.accesses as f64
        }
    }
}
