//! Configuration for the cache simulator.
//!
//! This module defines the parameters that shape a simulated cache. It provides:
//! 1. **Defaults:** Baseline geometry (32-bit addresses, 1 KiB cache, 32-byte lines, 8 sets).
//! 2. **Structures:** `CacheConfig`, deserializable from JSON with per-field defaults.
//! 3. **Enums:** The closed set of replacement policies, parseable by name.
//!
//! Configuration is plain data. Validation happens when the geometry is derived
//! (see [`Geometry::from_config`](crate::cache::address::Geometry::from_config)).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::common::{PolicyError, SimError};

/// Default configuration constants for the simulator.
mod defaults {
    /// Width of a trace address in bits.
    pub const ADDRESS_BITS: u32 = 32;

    /// Total cache capacity in bytes (1 KiB).
    pub const CACHE_SIZE: u64 = 1024;

    /// Line (block) size in bytes.
    pub const LINE_SIZE: u64 = 32;

    /// Number of sets. With the sizes above this gives a 4-way cache.
    pub const SET_COUNT: u64 = 8;

    /// Seed for the RANDOM policy's generator.
    pub const SEED: u64 = 123_456_789;
}

/// Cache replacement policy algorithms.
///
/// Specifies the algorithm used to select which line to evict when a new
/// block must be installed in a full set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ReplacementPolicy {
    /// Least Recently Used.
    ///
    /// Evicts the line with the oldest recency stamp.
    #[default]
    #[serde(alias = "Lru", alias = "lru")]
    Lru,
    /// First In First Out.
    ///
    /// Evicts the line with the oldest insertion stamp; hits do not refresh it.
    #[serde(alias = "Fifo", alias = "fifo")]
    Fifo,
    /// Least Frequently Used.
    ///
    /// Evicts the line whose block has the fewest recorded accesses in its set,
    /// counting accesses made before earlier evictions. Ties go to FIFO order.
    #[serde(alias = "Lfu", alias = "lfu")]
    Lfu,
    /// Random replacement from a seeded generator.
    #[serde(alias = "Random", alias = "random", alias = "RAND", alias = "rand")]
    Random,
}

impl ReplacementPolicy {
    /// All supported policies, in declaration order.
    pub const ALL: [Self; 4] = [Self::Lru, Self::Fifo, Self::Lfu, Self::Random];

    /// Canonical upper-case name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Lru => "LRU",
            Self::Fifo => "FIFO",
            Self::Lfu => "LFU",
            Self::Random => "RANDOM",
        }
    }
}

impl fmt::Display for ReplacementPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ReplacementPolicy {
    type Err = PolicyError;

    /// Parses a policy name case-insensitively.
    ///
    /// Accepts `lru`, `fifo`, `lfu`, `random` and `rand`, with surrounding
    /// whitespace ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "lru" => Ok(Self::Lru),
            "fifo" => Ok(Self::Fifo),
            "lfu" => Ok(Self::Lfu),
            "random" | "rand" => Ok(Self::Random),
            _ => Err(PolicyError::Unknown(s.to_owned())),
        }
    }
}

/// Parameters for a single simulated cache.
///
/// # Examples
///
/// ```
/// use replsim_core::config::{CacheConfig, ReplacementPolicy};
///
/// let config = CacheConfig::default();
/// assert_eq!(config.associativity(), 4);
/// assert_eq!(config.policy, ReplacementPolicy::Lru);
/// ```
///
/// Deserializing from JSON. The legacy `ways` key is accepted as an alias for
/// `set_count`, because that is what it always meant:
///
/// ```
/// use replsim_core::config::{CacheConfig, ReplacementPolicy};
///
/// let json = r#"{
///     "address_bits": 32,
///     "cache_size_bytes": 4096,
///     "line_size_bytes": 64,
///     "ways": 16,
///     "policy": "Lfu"
/// }"#;
///
/// let config: CacheConfig = serde_json::from_str(json).unwrap();
/// assert_eq!(config.set_count, 16);
/// assert_eq!(config.associativity(), 4);
/// assert_eq!(config.policy, ReplacementPolicy::Lfu);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Width of trace addresses in bits. Wider addresses are masked.
    #[serde(default = "CacheConfig::default_address_bits")]
    pub address_bits: u32,

    /// Total capacity in bytes.
    #[serde(default = "CacheConfig::default_cache_size")]
    pub cache_size_bytes: u64,

    /// Line (block) size in bytes. Must be a power of two.
    #[serde(default = "CacheConfig::default_line_size")]
    pub line_size_bytes: u64,

    /// Number of sets (not associativity). Must be a power of two.
    #[serde(default = "CacheConfig::default_set_count", alias = "ways")]
    pub set_count: u64,

    /// Replacement policy.
    #[serde(default)]
    pub policy: ReplacementPolicy,

    /// Seed for the RANDOM policy. Ignored by the other policies.
    #[serde(default = "CacheConfig::default_seed")]
    pub seed: u64,
}

impl CacheConfig {
    /// Creates a configuration with the given geometry and policy and the default seed.
    pub const fn new(
        address_bits: u32,
        cache_size_bytes: u64,
        line_size_bytes: u64,
        set_count: u64,
        policy: ReplacementPolicy,
    ) -> Self {
        Self {
            address_bits,
            cache_size_bytes,
            line_size_bytes,
            set_count,
            policy,
            seed: defaults::SEED,
        }
    }

    /// Parses a configuration from a JSON document.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::Json`] if the document is malformed or a field has
    /// the wrong type or an unknown policy name.
    pub fn from_json(json: &str) -> Result<Self, SimError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Derived number of ways per set.
    ///
    /// Returns 0 when the parameters cannot form a cache; geometry validation
    /// rejects that case.
    pub const fn associativity(&self) -> u64 {
        if self.line_size_bytes == 0 || self.set_count == 0 {
            return 0;
        }
        (self.cache_size_bytes / self.line_size_bytes) / self.set_count
    }

    fn default_address_bits() -> u32 {
        defaults::ADDRESS_BITS
    }

    fn default_cache_size() -> u64 {
        defaults::CACHE_SIZE
    }

    fn default_line_size() -> u64 {
        defaults::LINE_SIZE
    }

    fn default_set_count() -> u64 {
        defaults::SET_COUNT
    }

    fn default_seed() -> u64 {
        defaults::SEED
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self::new(
            defaults::ADDRESS_BITS,
            defaults::CACHE_SIZE,
            defaults::LINE_SIZE,
            defaults::SET_COUNT,
            ReplacementPolicy::Lru,
        )
    }
}
