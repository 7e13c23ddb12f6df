//! Set-Associative Cache Simulator.
//!
//! This module implements the access state machine for a single
//! set-associative cache level. It decodes each address, looks the tag up in
//! its set, and on a miss fills an empty way or evicts a victim chosen by the
//! configured replacement policy (LRU, FIFO, LFU or Random). Only tag identity
//! is tracked; there is no data and no timing model.

/// Address decomposition into tag, index and offset.
pub mod address;

/// Slot storage for resident lines.
pub mod directory;

/// Cache replacement policy implementations (LRU, FIFO, LFU, Random).
pub mod policies;

/// Per-set access frequency history.
pub mod usage;

use serde::Serialize;
use tracing::{debug, info, trace, warn};

use self::address::{DecodedAddress, Geometry};
use self::directory::{CacheDirectory, CacheLine, DirectorySnapshot, Slot};
use self::policies::{Policy, ReplacementPolicy};
use self::usage::UsageTracker;
use crate::common::SimError;
use crate::config::{CacheConfig, ReplacementPolicy as PolicyType};
use crate::stats::CacheStats;
use crate::trace::AccessRecord;

/// Result of a single cache access.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct AccessOutcome {
    /// Whether the block was resident.
    pub hit: bool,
    /// Tag of the block displaced by this access, if any.
    pub evicted_tag: Option<u64>,
    /// Block identifier of the displaced block, if any.
    pub evicted_block_id: Option<u64>,
    /// Set the address mapped to.
    pub set_index: usize,
    /// Tag of the accessed block.
    pub tag: u64,
    /// Block identifier of the accessed block.
    pub block_id: u64,
    /// Way that now holds the block. `None` only when a full set produced no victim.
    pub way: Option<usize>,
}

impl AccessOutcome {
    const fn new(decoded: &DecodedAddress, hit: bool, way: Option<usize>, evicted: Slot) -> Self {
        let (evicted_tag, evicted_block_id) = match evicted {
            Some(line) => (Some(line.tag), Some(line.block_id)),
            None => (None, None),
        };
        Self {
            hit,
            evicted_tag,
            evicted_block_id,
            set_index: decoded.set_index,
            tag: decoded.tag,
            block_id: decoded.block_id,
            way,
        }
    }
}

/// Single-level cache simulator.
///
/// Owns the directory, the usage history, the bound replacement policy and
/// the two global ordering counters. Each call to [`access`](Self::access)
/// runs to completion; independent instances share nothing.
#[derive(Debug, Clone)]
pub struct CacheSimulator {
    config: CacheConfig,
    geometry: Geometry,
    directory: CacheDirectory,
    usage: UsageTracker,
    policy: Policy,
    /// Last recency stamp issued. Stamps start at 1.
    recency_counter: u64,
    /// Last insertion stamp issued. Stamps start at 1.
    insertion_counter: u64,
    stats: CacheStats,
}

impl CacheSimulator {
    /// Creates a simulator from a configuration.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::Config`] if the geometry is invalid.
    pub fn new(config: &CacheConfig) -> Result<Self, SimError> {
        let geometry = Geometry::from_config(config)?;
        let policy = Policy::new(config.policy, config.seed);

        info!(
            cache_size_bytes = geometry.cache_size_bytes(),
            line_size_bytes = geometry.line_size_bytes(),
            sets = geometry.set_count(),
            ways = geometry.associativity(),
            policy = %config.policy,
            tag_bits = geometry.tag_bits(),
            index_bits = geometry.index_bits(),
            offset_bits = geometry.offset_bits(),
            "cache configured"
        );

        Ok(Self {
            config: config.clone(),
            geometry,
            directory: CacheDirectory::new(geometry.set_count(), geometry.associativity()),
            usage: UsageTracker::new(geometry.set_count()),
            policy,
            recency_counter: 0,
            insertion_counter: 0,
            stats: CacheStats::default(),
        })
    }

    /// Creates a simulator from raw geometry parameters and a policy name.
    ///
    /// The policy name is validated before the geometry.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::Policy`] for an unknown policy name and
    /// [`SimError::Config`] for an invalid geometry.
    pub fn from_parts(
        address_bits: u32,
        cache_size_bytes: u64,
        line_size_bytes: u64,
        set_count: u64,
        policy_name: &str,
    ) -> Result<Self, SimError> {
        let policy: PolicyType = policy_name.parse()?;
        Self::new(&CacheConfig::new(
            address_bits,
            cache_size_bytes,
            line_size_bytes,
            set_count,
            policy,
        ))
    }

    /// Creates a simulator from `config` with its RANDOM seed replaced by `seed`.
    ///
    /// # Errors
    ///
    /// Same as [`new`](Self::new).
    pub fn with_seed(config: &CacheConfig, seed: u64) -> Result<Self, SimError> {
        Self::new(&CacheConfig {
            seed,
            ..config.clone()
        })
    }

    /// Accesses `address`.
    ///
    /// On a hit the line's recency stamp is refreshed. On a miss the block is
    /// installed in the first empty way of its set, or in the victim way the
    /// policy selects if the set is full. Every hit and install bumps the
    /// block's usage count.
    ///
    /// Never fails. Bits above the configured address width are ignored.
    pub fn access(&mut self, address: u64) -> AccessOutcome {
        let decoded = self.geometry.decode(address);
        let set = decoded.set_index;
        self.stats.accesses += 1;

        if let Some(way) = self.directory.find(set, decoded.tag) {
            let stamp = self.next_recency();
            if let Some(line) = self.directory.line_mut(set, way) {
                line.recency_order = stamp;
            }
            let uses = self.usage.record(set, decoded.block_id);
            self.stats.hits += 1;
            trace!(address, set, way, tag = decoded.tag, uses, "hit");
            return AccessOutcome::new(&decoded, true, Some(way), None);
        }

        self.stats.misses += 1;

        if let Some(way) = self.directory.first_empty(set) {
            let (previous, uses) = self.install(&decoded, way);
            debug_assert!(previous.is_none(), "empty way {way} of set {set} was occupied");
            trace!(address, set, way, tag = decoded.tag, uses, "miss, filled empty way");
            return AccessOutcome::new(&decoded, false, Some(way), None);
        }

        let victim = self
            .policy
            .select_victim(self.directory.set(set), set, &self.usage, decoded.block_id);
        self.replace(address, &decoded, victim)
    }

    /// Completes a miss on a full set. Installs the block in `victim` if it
    /// names a way of the set; otherwise leaves all state but the stats
    /// untouched and reports a miss with no way.
    fn replace(
        &mut self,
        address: u64,
        decoded: &DecodedAddress,
        victim: Option<usize>,
    ) -> AccessOutcome {
        let set = decoded.set_index;
        let ways = self.geometry.associativity();

        let Some(way) = victim.filter(|&way| way < ways) else {
            self.stats.victimless_misses += 1;
            warn!(
                address,
                set,
                ?victim,
                policy = %self.policy.kind(),
                "replacement policy chose no victim; directory left unchanged"
            );
            return AccessOutcome::new(decoded, false, None, None);
        };

        let (evicted, uses) = self.install(decoded, way);
        self.stats.evictions += 1;
        debug!(
            set,
            way,
            evicted_tag = evicted.map(|line| line.tag),
            incoming_tag = decoded.tag,
            uses,
            "evicted"
        );
        AccessOutcome::new(decoded, false, Some(way), evicted)
    }

    /// Feeds every address of `addresses` through [`access`](Self::access),
    /// returning one record per address.
    pub fn run_trace<I>(&mut self, addresses: I) -> Vec<AccessRecord>
    where
        I: IntoIterator<Item = u64>,
    {
        addresses
            .into_iter()
            .map(|address| {
                let outcome = self.access(address);
                AccessRecord::new(address, &outcome)
            })
            .collect()
    }

    /// Checks whether `address` is resident without touching any state.
    pub fn contains(&self, address: u64) -> bool {
        let decoded = self.geometry.decode(address);
        self.directory.find(decoded.set_index, decoded.tag).is_some()
    }

    /// Copies the current directory contents.
    pub fn snapshot(&self) -> DirectorySnapshot {
        self.directory.snapshot()
    }

    /// Number of occupied slots.
    pub fn occupancy(&self) -> usize {
        self.directory.occupancy()
    }

    /// The validated geometry.
    pub const fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    /// The configuration this simulator was built from.
    pub const fn config(&self) -> &CacheConfig {
        &self.config
    }

    /// The bound replacement policy.
    pub const fn policy_kind(&self) -> PolicyType {
        self.policy.kind()
    }

    /// Outcome counters so far.
    pub const fn stats(&self) -> &CacheStats {
        &self.stats
    }

    /// Per-set access history.
    pub const fn usage(&self) -> &UsageTracker {
        &self.usage
    }

    /// Last recency stamp issued, or 0 before the first access.
    pub const fn recency_counter(&self) -> u64 {
        self.recency_counter
    }

    /// Last insertion stamp issued, or 0 before the first install.
    pub const fn insertion_counter(&self) -> u64 {
        self.insertion_counter
    }

    /// Writes a fresh line for `decoded` into `way` of its set, returning the
    /// previous occupant and the block's new usage count.
    fn install(&mut self, decoded: &DecodedAddress, way: usize) -> (Slot, u64) {
        let line = CacheLine {
            tag: decoded.tag,
            block_id: decoded.block_id,
            insertion_order: self.next_insertion(),
            recency_order: self.next_recency(),
        };
        let uses = self.usage.record(decoded.set_index, decoded.block_id);
        (self.directory.install(decoded.set_index, way, line), uses)
    }

    const fn next_recency(&mut self) -> u64 {
        self.recency_counter += 1;
        self.recency_counter
    }

    const fn next_insertion(&mut self) -> u64 {
        self.insertion_counter += 1;
        self.insertion_counter
    }
}
