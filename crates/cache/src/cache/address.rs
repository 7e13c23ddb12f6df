//! Address decomposition.
//!
//! Splits a trace address into the three fields a set-associative cache uses:
//!
//! ```text
//!  address_bits-1                                          0
//! +---------------------+-----------------+----------------+
//! |         tag         |      index      |     offset     |
//! +---------------------+-----------------+----------------+
//!                        <-- index_bits --><-- offset_bits->
//! ```
//!
//! The block identifier is `tag ++ index`, i.e. the address with the offset
//! shifted out. It names a memory block uniquely across the whole cache and is
//! the key used for frequency tracking.

use serde::Serialize;

use crate::common::ConfigError;
use crate::config::CacheConfig;

/// A trace address split into its cache fields.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct DecodedAddress {
    /// High-order bits identifying the block within its set.
    pub tag: u64,
    /// Set selected by the index bits.
    pub set_index: usize,
    /// Tag and index bits concatenated.
    pub block_id: u64,
    /// Byte offset within the line.
    pub offset: u64,
}

/// Validated cache geometry.
///
/// Built once from a [`CacheConfig`]; every later decode is infallible.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Geometry {
    address_bits: u32,
    offset_bits: u32,
    index_bits: u32,
    tag_bits: u32,
    set_count: usize,
    associativity: usize,
    line_size_bytes: u64,
    address_mask: u64,
}

impl Geometry {
    /// Derives and validates the geometry for `config`.
    ///
    /// # Errors
    ///
    /// - [`ConfigError::AddressWidth`] if `address_bits` is not in `1..=64`.
    /// - [`ConfigError::Zero`] if the cache size, line size or set count is zero.
    /// - [`ConfigError::NotPowerOfTwo`] if the line size or set count is not a power of two.
    /// - [`ConfigError::Tiling`] if the sets and lines do not exactly fill the cache.
    /// - [`ConfigError::NoTagBits`] if offset and index leave no tag bits.
    pub fn from_config(config: &CacheConfig) -> Result<Self, ConfigError> {
        let address_bits = config.address_bits;
        if address_bits == 0 || address_bits > u64::BITS {
            return Err(ConfigError::AddressWidth(address_bits));
        }

        for (field, value) in [
            ("cache_size_bytes", config.cache_size_bytes),
            ("line_size_bytes", config.line_size_bytes),
            ("set_count", config.set_count),
        ] {
            if value == 0 {
                return Err(ConfigError::Zero { field });
            }
        }

        for (field, value) in [
            ("line_size_bytes", config.line_size_bytes),
            ("set_count", config.set_count),
        ] {
            if !value.is_power_of_two() {
                return Err(ConfigError::NotPowerOfTwo { field, value });
            }
        }

        let associativity = config.associativity();
        if associativity == 0
            || associativity * config.set_count * config.line_size_bytes != config.cache_size_bytes
        {
            return Err(ConfigError::Tiling {
                cache_size_bytes: config.cache_size_bytes,
                line_size_bytes: config.line_size_bytes,
                set_count: config.set_count,
            });
        }

        let offset_bits = config.line_size_bytes.trailing_zeros();
        let index_bits = config.set_count.trailing_zeros();
        if offset_bits + index_bits >= address_bits {
            return Err(ConfigError::NoTagBits {
                address_bits,
                offset_bits,
                index_bits,
            });
        }

        let address_mask = if address_bits == u64::BITS {
            u64::MAX
        } else {
            (1u64 << address_bits) - 1
        };

        Ok(Self {
            address_bits,
            offset_bits,
            index_bits,
            tag_bits: address_bits - offset_bits - index_bits,
            set_count: config.set_count as usize,
            associativity: associativity as usize,
            line_size_bytes: config.line_size_bytes,
            address_mask,
        })
    }

    /// Splits `address` into tag, set index, block id and offset.
    ///
    /// Bits above `address_bits` are discarded first.
    #[inline]
    pub const fn decode(&self, address: u64) -> DecodedAddress {
        let address = address & self.address_mask;
        let offset = address & (self.line_size_bytes - 1);
        let block_id = address >> self.offset_bits;
        let set_index = (block_id & (self.set_count as u64 - 1)) as usize;
        let tag = block_id >> self.index_bits;
        DecodedAddress {
            tag,
            set_index,
            block_id,
            offset,
        }
    }

    /// Configured address width.
    pub const fn address_bits(&self) -> u32 {
        self.address_bits
    }

    /// `log2(line_size_bytes)`.
    pub const fn offset_bits(&self) -> u32 {
        self.offset_bits
    }

    /// `log2(set_count)`; zero for a fully associative cache.
    pub const fn index_bits(&self) -> u32 {
        self.index_bits
    }

    /// Bits left for the tag.
    pub const fn tag_bits(&self) -> u32 {
        self.tag_bits
    }

    /// Number of sets.
    pub const fn set_count(&self) -> usize {
        self.set_count
    }

    /// Number of ways per set.
    pub const fn associativity(&self) -> usize {
        self.associativity
    }

    /// Line size in bytes.
    pub const fn line_size_bytes(&self) -> u64 {
        self.line_size_bytes
    }

    /// Total capacity in bytes.
    pub const fn cache_size_bytes(&self) -> u64 {
        self.line_size_bytes * (self.set_count * self.associativity) as u64
    }

    /// True when there is a single set.
    pub const fn is_fully_associative(&self) -> bool {
        self.set_count == 1
    }
}

