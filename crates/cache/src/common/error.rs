//! Construction-time error definitions.
//!
//! This module defines every failure the simulator can report. It provides:
//! 1. **Geometry Errors:** Non-power-of-two, zero or non-tiling cache parameters.
//! 2. **Policy Errors:** Unrecognized replacement-policy names.
//! 3. **Top-level Errors:** A single `SimError` returned by simulator constructors.
//!
//! All of these are fatal and are raised before any trace address is processed.

use thiserror::Error;

/// Invalid cache geometry.
///
/// Raised while deriving the tag/index/offset split from a `CacheConfig`.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// A parameter that must be a power of two is not.
    ///
    /// Applies to the line size and the set count.
    #[error("{field} must be a power of two, got {value}")]
    NotPowerOfTwo {
        /// Name of the offending configuration field.
        field: &'static str,
        /// The rejected value.
        value: u64,
    },

    /// A parameter that must be non-zero is zero.
    #[error("{field} must be non-zero")]
    Zero {
        /// Name of the offending configuration field.
        field: &'static str,
    },

    /// The address width is outside `1..=64`.
    #[error("address width must be between 1 and 64 bits, got {0}")]
    AddressWidth(u32),

    /// The cache size is not an exact multiple of `line_size_bytes * set_count`,
    /// or it is too small to give each set at least one way.
    #[error(
        "cache size {cache_size_bytes} cannot be tiled by {set_count} sets of {line_size_bytes}-byte lines"
    )]
    Tiling {
        /// Total cache capacity in bytes.
        cache_size_bytes: u64,
        /// Line (block) size in bytes.
        line_size_bytes: u64,
        /// Number of sets.
        set_count: u64,
    },

    /// Offset and index bits consume the whole address, leaving no tag.
    #[error(
        "no tag bits left: {address_bits}-bit address minus {offset_bits} offset and {index_bits} index bits"
    )]
    NoTagBits {
        /// Configured address width.
        address_bits: u32,
        /// `log2(line_size_bytes)`.
        offset_bits: u32,
        /// `log2(set_count)`.
        index_bits: u32,
    },
}

/// Invalid replacement-policy selection.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum PolicyError {
    /// The policy name does not match any supported policy.
    #[error("unknown replacement policy '{0}' (expected LRU, FIFO, LFU or RANDOM)")]
    Unknown(String),
}

/// Any error that prevents a simulator from being constructed.
#[derive(Debug, Error)]
pub enum SimError {
    /// Invalid cache geometry.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Invalid policy name.
    #[error(transparent)]
    Policy(#[from] PolicyError),

    /// Malformed JSON configuration.
    #[error("invalid cache configuration JSON: {0}")]
    Json(#[from] serde_json::Error),
}
