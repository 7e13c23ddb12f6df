//! Set-associative cache replacement-policy simulator.
//!
//! This crate models a single cache level at the granularity of tags. It provides:
//! 1. **Geometry:** Validated tag/index/offset decomposition of trace addresses.
//! 2. **Directory:** A set × way grid of resident lines with global ordering stamps.
//! 3. **Policies:** LRU, FIFO, LFU and seeded RANDOM victim selection.
//! 4. **Usage history:** Per-set access counts that outlive residency (used by LFU).
//! 5. **Simulation:** The access state machine, statistics and per-access records.
//!
//! Stored data, timing and multi-level hierarchies are not modelled.
//!
//! # Examples
//!
//! ```
//! use replsim_core::{CacheConfig, CacheSimulator};
//!
//! let mut sim = CacheSimulator::new(&CacheConfig::default()).unwrap();
//! assert!(!sim.access(0x1000).hit);
//! assert!(sim.access(0x1000).hit);
//! ```

/// Cache directory, address decoding, usage tracking and replacement policies.
pub mod cache;
/// Error types shared across the crate.
pub mod common;
/// Simulator configuration (defaults, policy enum, geometry parameters).
pub mod config;
/// Hit/miss/eviction counters.
pub mod stats;
/// Per-access records handed to trace consumers.
pub mod trace;

/// Top-level simulator; construct with `CacheSimulator::new`.
pub use crate::cache::{AccessOutcome, CacheSimulator};
/// Errors raised while constructing a simulator.
pub use crate::common::{ConfigError, PolicyError, SimError};
/// Root configuration type; use `CacheConfig::default()` or deserialize from JSON.
pub use crate::config::{CacheConfig, ReplacementPolicy};
