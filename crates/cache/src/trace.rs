//! Per-access trace records.
//!
//! A consumer that wants to study the sequence of accepted and evicted blocks
//! collects one [`AccessRecord`] per address. Records serialize with serde; how
//! they are written out is up to the consumer.

use serde::Serialize;

use crate::cache::AccessOutcome;

/// What happened to one trace address.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct AccessRecord {
    /// The address as supplied by the trace, before masking.
    pub address: u64,
    /// Whether the access hit.
    pub hit: bool,
    /// Block identifier (tag and index bits) of the accessed block.
    pub block_id: u64,
    /// Tag of the block evicted by this access, if any.
    pub evicted_tag: Option<u64>,
    /// Block identifier of the evicted block, if any.
    pub evicted_block_id: Option<u64>,
}

impl AccessRecord {
    /// Builds a record from an address and the outcome of accessing it.
    pub const fn new(address: u64, outcome: &AccessOutcome) -> Self {
        Self {
            address,
            hit: outcome.hit,
            block_id: outcome.block_id,
            evicted_tag: outcome.evicted_tag,
            evicted_block_id: outcome.evicted_block_id,
        }
    }
}
