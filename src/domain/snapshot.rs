/// SnapshotView - lazily rebuilt display projection of the store
///
/// The store's primary map is the hot path (add / cancel / get). The
/// snapshot is the cold path: it is only read when someone asks for a
/// price-ordered listing, so it is rebuilt on demand instead of being
/// maintained on every mutation.
///
/// ## Cache States
/// ```text
///            add ok / cancel ok / clear
///   Clean ------------------------------> Dirty
///     ^                                     |
///     |            render (rebuild)         |
///     +-------------------------------------+
/// ```
/// The view starts `Dirty`. A render while `Clean` reuses the cached
/// membership untouched.
///
/// ## Index-by-key
/// The cache holds record ids, not references. Ids are resolved against the
/// primary map at render time, so a rehash of the map can never leave the
/// cache pointing at moved entries.

use super::record::Record;
use std::cmp::Ordering;

/// Freshness of the cached membership relative to the store
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheState {
    Clean,
    Dirty,
}

#[derive(Debug, Clone)]
pub struct SnapshotView {
    // 缓存的订单ID集合（无序，排序在渲染时进行）
    ids: Vec<u64>,
    state: CacheState,
    rebuilds: u64,
}

impl SnapshotView {
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        SnapshotView {
            ids: Vec::with_capacity(capacity),
            state: CacheState::Dirty,
            rebuilds: 0,
        }
    }

    #[inline]
    pub fn state(&self) -> CacheState {
        self.state
    }

    #[inline]
    pub fn is_dirty(&self) -> bool {
        self.state == CacheState::Dirty
    }

    /// Marks the cached membership stale
    #[inline]
    pub fn invalidate(&mut self) {
        self.state = CacheState::Dirty;
    }

    /// Drops the cached ids and marks the view stale
    pub fn reset(&mut self) {
        self.ids.clear();
        self.state = CacheState::Dirty;
    }

    /// Rebuilds the id cache from `members` if dirty
    ///
    /// Returns `true` when a rebuild happened. `members` is not consumed
    /// when the cache is clean.
    pub fn refresh<I>(&mut self, members: I) -> bool
    where
        I: IntoIterator<Item = u64>,
    {
        if self.state == CacheState::Clean {
            return false;
        }

        self.ids.clear();
        self.ids.extend(members);
        self.state = CacheState::Clean;
        self.rebuilds += 1;
        true
    }

    /// Cached ids in enumeration order of the last rebuild
    #[inline]
    pub fn ids(&self) -> &[u64] {
        &self.ids
    }

    /// Number of rebuilds performed since construction
    #[inline]
    pub fn rebuild_count(&self) -> u64 {
        self.rebuilds
    }
}

impl Default for SnapshotView {
    fn default() -> Self {
        Self::new()
    }
}

/// Display ordering for a snapshot
///
/// Buys before sells. Buys by descending price (best bid first), sells by
/// ascending price (best ask first). Equal side and price fall back to
/// ascending id.
pub fn display_order(a: &Record, b: &Record) -> Ordering {
    match (a.is_buy(), b.is_buy()) {
        (true, false) => Ordering::Less,
        (false, true) => Ordering::Greater,
        (true, true) => b.price().total_cmp(&a.price()).then(a.id().cmp(&b.id())),
        (false, false) => a.price().total_cmp(&b.price()).then(a.id().cmp(&b.id())),
    }
}

/// Sorts `rows` in place into display order
pub fn sort_for_display(rows: &mut [&Record]) {
    rows.sort_unstable_by(|a, b| display_order(a, b));
}
