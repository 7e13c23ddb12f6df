//! Cache directory storage.
//!
//! The directory is a flat `set_count * associativity` array of slots; way `w`
//! of set `s` lives at index `s * associativity + w`. A slot is either empty
//! or holds a [`CacheLine`]. Slots are overwritten in place on eviction and
//! never removed.

use serde::Serialize;

/// A resident block.
///
/// Only tag identity and ordering stamps are kept; data is not modelled.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct CacheLine {
    /// Tag bits of the resident block.
    pub tag: u64,
    /// Tag and index bits of the resident block.
    pub block_id: u64,
    /// Global insertion stamp. Set once when the line is installed.
    pub insertion_order: u64,
    /// Global recency stamp. Refreshed on every hit.
    pub recency_order: u64,
}

/// One directory cell.
pub type Slot = Option<CacheLine>;

/// Set × way grid of slots.
#[derive(Clone, Debug)]
pub struct CacheDirectory {
    slots: Vec<Slot>,
    set_count: usize,
    ways: usize,
}

impl CacheDirectory {
    /// Creates an empty directory.
    pub fn new(set_count: usize, ways: usize) -> Self {
        Self {
            slots: vec![None; set_count * ways],
            set_count,
            ways,
        }
    }

    /// Slots of `set`, in way order.
    ///
    /// # Panics
    ///
    /// Panics if `set >= set_count`.
    #[inline]
    pub fn set(&self, set: usize) -> &[Slot] {
        let base = set * self.ways;
        &self.slots[base..base + self.ways]
    }

    /// First way of `set` holding `tag`.
    pub fn find(&self, set: usize, tag: u64) -> Option<usize> {
        self.set(set)
            .iter()
            .position(|slot| slot.is_some_and(|line| line.tag == tag))
    }

    /// First empty way of `set`.
    pub fn first_empty(&self, set: usize) -> Option<usize> {
        self.set(set).iter().position(Option::is_none)
    }

    /// Mutable access to an occupied line.
    pub fn line_mut(&mut self, set: usize, way: usize) -> Option<&mut CacheLine> {
        if way >= self.ways {
            return None;
        }
        self.slots
            .get_mut(set * self.ways + way)
            .and_then(Option::as_mut)
    }

    /// Writes `line` into `(set, way)` and returns whatever was there.
    ///
    /// # Panics
    ///
    /// Panics if `way >= ways` or `set >= set_count`.
    pub fn install(&mut self, set: usize, way: usize, line: CacheLine) -> Slot {
        assert!(
            way < self.ways,
            "way {way} out of range for a {}-way directory",
            self.ways
        );
        self.slots[set * self.ways + way].replace(line)
    }

    /// Number of sets.
    pub const fn set_count(&self) -> usize {
        self.set_count
    }

    /// Number of ways per set.
    pub const fn ways(&self) -> usize {
        self.ways
    }

    /// Number of occupied slots.
    pub fn occupancy(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    /// Copies the directory contents.
    pub fn snapshot(&self) -> DirectorySnapshot {
        DirectorySnapshot {
            sets: self.slots.chunks(self.ways).map(<[Slot]>::to_vec).collect(),
        }
    }
}

/// Read-only copy of the directory, indexed `[set][way]`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct DirectorySnapshot {
    /// One entry per set, each holding one slot per way.
    pub sets: Vec<Vec<Slot>>,
}

impl DirectorySnapshot {
    /// Slot at `(set, way)`, or `None` if out of range or empty.
    pub fn line(&self, set: usize, way: usize) -> Option<&CacheLine> {
        self.sets.get(set)?.get(way)?.as_ref()
    }

    /// Tags resident in `set`, in way order, with `None` for empty ways.
    pub fn tags(&self, set: usize) -> Vec<Option<u64>> {
        self.sets
            .get(set)
            .map(|ways| ways.iter().map(|slot| slot.map(|line| line.tag)).collect())
            .unwrap_or_default()
    }
}
