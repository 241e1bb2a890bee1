/// RecordStore - keyed index of live records
///
/// The store is the single owner and single writer of every live record.
///
/// ## Hot path / cold path
/// - **Hot**: `HashMap<u64, Record>` gives O(1) amortized add, cancel and
///   lookup. No ordering is kept here; the index is correct without it.
/// - **Cold**: [`SnapshotView`] caches the membership for display and is
///   rebuilt at most once per batch of mutations, on the next `render`.
///
/// ## Outcomes
/// Duplicate ids on `add` and unknown ids on `cancel` / `get` are routine,
/// so they are reported through `bool` / `Option`, never through an error.
///
/// ## Example
/// ```rust
/// use limit_order_manager::domain::{Record, RecordStore, Side};
///
/// let mut store = RecordStore::new();
/// assert!(store.add(Record::new(1, 150.50, 100, Side::Buy)));
/// assert!(!store.add(Record::new(1, 160.00, 50, Side::Buy)));
/// assert_eq!(store.get(1).map(|r| r.price()), Some(150.50));
/// ```

use super::record::Record;
use super::snapshot::{sort_for_display, SnapshotView};
use serde::Serialize;
use std::collections::hash_map::{Entry, HashMap};

/// Diagnostic counters reported by [`RecordStore::stats`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StoreStats {
    pub active: usize,
    pub total_added: u64,
    pub total_cancelled: u64,
    /// Fixed per-record footprint in bytes
    pub record_size: usize,
}

impl StoreStats {
    /// Payload estimate, `active * record_size`
    #[inline]
    pub fn memory_estimate(&self) -> usize {
        self.active * self.record_size
    }
}

#[derive(Debug, Clone, Default)]
pub struct RecordStore {
    // 主存储：按ID O(1)查找（热路径）
    records: HashMap<u64, Record>,
    // 展示用快照缓存（冷路径）
    snapshot: SnapshotView,
    total_added: u64,
    total_cancelled: u64,
}

impl RecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-reserves room for `capacity` records in both the map and the
    /// snapshot buffer
    pub fn with_capacity(capacity: usize) -> Self {
        RecordStore {
            records: HashMap::with_capacity(capacity),
            snapshot: SnapshotView::with_capacity(capacity),
            total_added: 0,
            total_cancelled: 0,
        }
    }

    /// Inserts `record` unless its id is already present
    ///
    /// Returns `false` on a duplicate id; the stored record is left as is
    /// and no counter or cache state changes.
    pub fn add(&mut self, record: Record) -> bool {
        match self.records.entry(record.id()) {
            Entry::Occupied(_) => false,
            Entry::Vacant(slot) => {
                slot.insert(record);
                self.total_added += 1;
                self.snapshot.invalidate();
                true
            }
        }
    }

    /// Removes the record with `id`
    ///
    /// Returns `false` if no such record is live.
    pub fn cancel(&mut self, id: u64) -> bool {
        if self.records.remove(&id).is_none() {
            return false;
        }
        self.total_cancelled += 1;
        self.snapshot.invalidate();
        true
    }

    #[inline]
    pub fn get(&self, id: u64) -> Option<&Record> {
        self.records.get(&id)
    }

    #[inline]
    pub fn contains(&self, id: u64) -> bool {
        self.records.contains_key(&id)
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.records.len()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Drops every record and resets both counters. Idempotent.
    pub fn clear(&mut self) {
        self.records.clear();
        self.snapshot.reset();
        self.total_added = 0;
        self.total_cancelled = 0;
    }

    pub fn stats(&self) -> StoreStats {
        StoreStats {
            active: self.records.len(),
            total_added: self.total_added,
            total_cancelled: self.total_cancelled,
            record_size: Record::SIZE,
        }
    }

    /// Live records in arbitrary order
    pub fn iter(&self) -> impl Iterator<Item = &Record> + '_ {
        self.records.values()
    }

    /// `true` when the next `render` will rebuild the snapshot cache
    #[inline]
    pub fn is_snapshot_stale(&self) -> bool {
        self.snapshot.is_dirty()
    }

    pub fn snapshot(&self) -> &SnapshotView {
        &self.snapshot
    }

    /// Price-ordered view of every live record
    ///
    /// Rebuilds the snapshot cache first if the store mutated since the last
    /// render. Ordering: buys by descending price, then sells by ascending
    /// price, ties by ascending id.
    pub fn render(&mut self) -> Vec<&Record> {
        let records = &self.records;
        self.snapshot.refresh(records.keys().copied());

        let mut rows: Vec<&Record> = self
            .snapshot
            .ids()
            .iter()
            .filter_map(|id| records.get(id))
            .collect();
        sort_for_display(&mut rows);
        rows
    }
}
