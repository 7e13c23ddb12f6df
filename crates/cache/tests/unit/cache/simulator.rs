//! Cache Simulator (CacheSimulator) Unit Tests.
//!
//! Verifies the access state machine end to end: cold misses, warm hits, way
//! filling order, eviction under each policy, ordering stamps, snapshots and
//! construction errors.
//!
//! Most tests use the reference geometry (32-bit, 1 KiB, 32-byte lines,
//! 8 sets, 4 ways). Addresses that differ only above bit 7 share a set:
//!   set = (addr >> 5) & 7
//!   tag = addr >> 8

use pretty_assertions::assert_eq;
use replsim_core::{CacheSimulator, PolicyError, ReplacementPolicy, SimError};

use crate::common::{
    drive, init_tracing, reference_config, reference_same_set, simulator,
    two_way_fully_associative,
};

// ══════════════════════════════════════════════════════════
// 1. Cold Miss / Warm Hit
// ══════════════════════════════════════════════════════════

#[test]
fn cold_miss_then_warm_hit() {
    init_tracing();
    let mut sim = simulator(&reference_config(ReplacementPolicy::Lru));

    let first = sim.access(0x1000);
    assert!(!first.hit, "First access should be a miss");
    assert_eq!(first.evicted_tag, None);
    assert_eq!(first.way, Some(0));

    let second = sim.access(0x1000);
    assert!(second.hit, "Second access should hit");
    assert_eq!(second.evicted_tag, None);
    assert_eq!(second.way, Some(0));
}

/// Any byte of a resident line hits.
#[test]
fn same_line_different_offset_hits() {
    let mut sim = simulator(&reference_config(ReplacementPolicy::Lru));
    drive(&mut sim, &[0x1000]);
    assert!(sim.access(0x101F).hit);
    assert!(!sim.access(0x1020).hit, "next line is a different block");
}

/// Bits above the address width are masked, so these alias.
#[test]
fn over_wide_address_aliases_its_low_bits() {
    let mut sim = simulator(&reference_config(ReplacementPolicy::Lru));
    drive(&mut sim, &[0x1234]);
    assert!(sim.access(0xABCD_0000_0000_1234).hit);
}

// ══════════════════════════════════════════════════════════
// 2. Filling
// ══════════════════════════════════════════════════════════

#[test]
fn misses_fill_ways_in_ascending_order() {
    let mut sim = simulator(&reference_config(ReplacementPolicy::Lru));
    for (k, address) in reference_same_set(2, 4).into_iter().enumerate() {
        let outcome = sim.access(address);
        assert!(!outcome.hit);
        assert_eq!(outcome.set_index, 2);
        assert_eq!(outcome.way, Some(k));
        assert_eq!(outcome.evicted_tag, None);
    }
    assert_eq!(sim.snapshot().tags(2), vec![Some(0), Some(1), Some(2), Some(3)]);
    assert_eq!(sim.occupancy(), 4);
}

#[test]
fn sets_do_not_interfere() {
    let mut sim = simulator(&reference_config(ReplacementPolicy::Lru));
    drive(&mut sim, &reference_same_set(0, 4));
    drive(&mut sim, &reference_same_set(1, 4));

    let snap = sim.snapshot();
    for set in 2..8 {
        assert_eq!(snap.tags(set), vec![None; 4]);
    }
    assert_eq!(sim.stats().evictions, 0);
}

// ══════════════════════════════════════════════════════════
// 3. LRU
// ══════════════════════════════════════════════════════════

/// Five distinct blocks into a 4-way set: the fifth evicts the first.
#[test]
fn lru_fifth_block_evicts_first() {
    init_tracing();
    let mut sim = simulator(&reference_config(ReplacementPolicy::Lru));
    let addrs = reference_same_set(0, 5);
    drive(&mut sim, &addrs[..4]);

    let outcome = sim.access(addrs[4]);
    assert!(!outcome.hit);
    assert_eq!(outcome.evicted_tag, Some(0));
    assert_eq!(outcome.evicted_block_id, Some(0));
    assert_eq!(outcome.way, Some(0));
    assert!(!sim.contains(addrs[0]));
    assert!(sim.contains(addrs[4]));
}

#[test]
fn lru_hit_protects_block() {
    let mut sim = simulator(&reference_config(ReplacementPolicy::Lru));
    let addrs = reference_same_set(3, 6);
    drive(&mut sim, &addrs[..4]);
    drive(&mut sim, &[addrs[0]]);

    assert_eq!(sim.access(addrs[4]).evicted_tag, Some(1));
    assert_eq!(sim.access(addrs[5]).evicted_tag, Some(2));
    assert!(sim.contains(addrs[0]));
}

// ══════════════════════════════════════════════════════════
// 4. FIFO
// ══════════════════════════════════════════════════════════

#[test]
fn fifo_evicts_in_insertion_order_despite_hits() {
    let mut sim = simulator(&reference_config(ReplacementPolicy::Fifo));
    let addrs = reference_same_set(0, 8);
    drive(&mut sim, &addrs[..4]);
    drive(&mut sim, &[addrs[0], addrs[0], addrs[1]]);

    let evicted: Vec<_> = addrs[4..]
        .iter()
        .map(|&a| sim.access(a).evicted_tag)
        .collect();
    assert_eq!(evicted, vec![Some(0), Some(1), Some(2), Some(3)]);
}

// ══════════════════════════════════════════════════════════
// 5. LFU
// ══════════════════════════════════════════════════════════

#[test]
fn lfu_evicts_fewest_hits() {
    let mut sim = simulator(&reference_config(ReplacementPolicy::Lfu));
    let addrs = reference_same_set(0, 5);
    drive(&mut sim, &addrs[..4]);
    // Counts: tag0 = 3, tag1 = 2, tag2 = 1, tag3 = 2.
    drive(&mut sim, &[addrs[0], addrs[0], addrs[1], addrs[3]]);

    assert_eq!(sim.access(addrs[4]).evicted_tag, Some(2));
}

#[test]
fn lfu_ties_resolve_to_fifo_order() {
    let mut sim = simulator(&reference_config(ReplacementPolicy::Lfu));
    let addrs = reference_same_set(0, 5);
    drive(&mut sim, &addrs[..4]);
    assert_eq!(sim.access(addrs[4]).evicted_tag, Some(0));
}

/// A block's count from an earlier residency still protects it after reinsertion.
///
/// 2-way, fully associative, tag = addr >> 5:
///   X X      → X=2
///   Y        → Y=1
///   Z        → evicts Y (1 < 2), Z=1
///   Y        → evicts Z (1 < 2), Y=2 thanks to its history
///   W        → X and Y tie at 2; X is older, so X goes
#[test]
fn lfu_remembers_history_across_eviction() {
    let (x, y, z, w) = (0x00, 0x20, 0x40, 0x60);
    let mut sim = simulator(&two_way_fully_associative(ReplacementPolicy::Lfu));
    drive(&mut sim, &[x, x, y]);

    assert_eq!(sim.access(z).evicted_tag, Some(1));
    assert_eq!(sim.access(y).evicted_tag, Some(2));
    assert_eq!(sim.usage().count(0, 1), 2);
    assert_eq!(sim.access(w).evicted_tag, Some(0));
}

// ══════════════════════════════════════════════════════════
// 6. RANDOM
// ══════════════════════════════════════════════════════════

#[test]
fn random_with_fixed_seed_replays_identically() {
    let config = reference_config(ReplacementPolicy::Random);
    let trace: Vec<u64> = (0..200u64).map(|i| (i * 7 % 13) << 8).collect();

    let mut a = CacheSimulator::with_seed(&config, 0xC0FFEE).unwrap();
    let mut b = CacheSimulator::with_seed(&config, 0xC0FFEE).unwrap();
    let records_a = a.run_trace(trace.iter().copied());
    let records_b = b.run_trace(trace.iter().copied());

    assert_eq!(records_a, records_b);
    assert_eq!(a.snapshot(), b.snapshot());
    assert!(a.stats().evictions > 0);
}

#[test]
fn random_victim_stays_in_set() {
    let mut sim = simulator(&reference_config(ReplacementPolicy::Random));
    for address in reference_same_set(5, 64) {
        let outcome = sim.access(address);
        assert_eq!(outcome.set_index, 5);
        assert!(outcome.way.is_some_and(|w| w < 4));
    }
    assert_eq!(sim.occupancy(), 4);
}

// ══════════════════════════════════════════════════════════
// 7. Ordering stamps and tag identity
// ══════════════════════════════════════════════════════════

#[test]
fn hit_refreshes_recency_but_not_tag_or_insertion() {
    let mut sim = simulator(&reference_config(ReplacementPolicy::Lru));
    drive(&mut sim, &[0x100, 0x200]);
    let before = *sim.snapshot().line(0, 0).unwrap();

    drive(&mut sim, &[0x100]);
    let after = *sim.snapshot().line(0, 0).unwrap();

    assert_eq!(after.tag, before.tag);
    assert_eq!(after.block_id, before.block_id);
    assert_eq!(after.insertion_order, before.insertion_order);
    assert!(after.recency_order > before.recency_order);
    assert_eq!(after.recency_order, sim.recency_counter());
}

#[test]
fn counters_are_global_across_sets() {
    let mut sim = simulator(&reference_config(ReplacementPolicy::Lru));
    assert_eq!(sim.recency_counter(), 0);
    assert_eq!(sim.insertion_counter(), 0);

    // Miss in set 0, miss in set 1, hit in set 0.
    drive(&mut sim, &[0x000, 0x020, 0x000]);
    assert_eq!(sim.recency_counter(), 3);
    assert_eq!(sim.insertion_counter(), 2);

    let snap = sim.snapshot();
    let a = snap.line(0, 0).unwrap();
    let b = snap.line(1, 0).unwrap();
    assert_eq!((a.insertion_order, a.recency_order), (1, 3));
    assert_eq!((b.insertion_order, b.recency_order), (2, 2));
}

// ══════════════════════════════════════════════════════════
// 8. Inspection
// ══════════════════════════════════════════════════════════

#[test]
fn snapshot_and_contains_do_not_mutate() {
    let mut sim = simulator(&reference_config(ReplacementPolicy::Lfu));
    drive(&mut sim, &reference_same_set(0, 6));

    let snap = sim.snapshot();
    let stats = *sim.stats();
    let counters = (sim.recency_counter(), sim.insertion_counter());

    for _ in 0..3 {
        assert!(!sim.contains(0xDEAD_0000));
        assert_eq!(sim.snapshot(), snap);
    }
    assert_eq!(*sim.stats(), stats);
    assert_eq!((sim.recency_counter(), sim.insertion_counter()), counters);
}

#[test]
fn run_trace_records_every_access() {
    let mut sim = simulator(&two_way_fully_associative(ReplacementPolicy::Lru));
    let records = sim.run_trace([0x00, 0x00, 0x20, 0x40]);

    assert_eq!(records.len(), 4);
    assert_eq!(
        records.iter().map(|r| r.hit).collect::<Vec<_>>(),
        vec![false, true, false, false]
    );
    assert_eq!(records[3].address, 0x40);
    assert_eq!(records[3].block_id, 2);
    assert_eq!(records[3].evicted_tag, Some(0));
    assert_eq!(records[3].evicted_block_id, Some(0));
}

#[test]
fn stats_track_outcomes() {
    let mut sim = simulator(&two_way_fully_associative(ReplacementPolicy::Lru));
    drive(&mut sim, &[0x00, 0x00, 0x20, 0x40, 0x40]);

    let stats = sim.stats();
    assert_eq!(stats.accesses, 5);
    assert_eq!(stats.hits, 2);
    assert_eq!(stats.misses, 3);
    assert_eq!(stats.evictions, 1);
    assert_eq!(stats.victimless_misses, 0);
}

// ══════════════════════════════════════════════════════════
// 9. Construction
// ══════════════════════════════════════════════════════════

#[test]
fn from_parts_builds_reference_cache() {
    let sim = CacheSimulator::from_parts(32, 1024, 32, 8, "lru").unwrap();
    assert_eq!(sim.policy_kind(), ReplacementPolicy::Lru);
    assert_eq!(sim.geometry().associativity(), 4);
    assert_eq!(sim.geometry().tag_bits(), 24);
    assert_eq!(sim.config().set_count, 8);
}

#[test]
fn from_parts_rejects_unknown_policy_before_geometry() {
    // Geometry is also invalid; the policy error must win.
    let err = CacheSimulator::from_parts(32, 1000, 24, 6, "MRU").unwrap_err();
    assert!(
        matches!(err, SimError::Policy(PolicyError::Unknown(ref name)) if name == "MRU"),
        "unexpected error: {err}"
    );
}

#[test]
fn from_parts_rejects_bad_geometry() {
    let err = CacheSimulator::from_parts(32, 1024, 24, 8, "FIFO").unwrap_err();
    assert!(matches!(err, SimError::Config(_)), "unexpected error: {err}");
}
