/// Domain Layer - Core Record Index
///
/// Pure in-memory data structures with no I/O. Everything here is
/// synchronous and single-threaded; mutating methods take `&mut self`, so
/// the snapshot cache is always invalidated together with the mutation that
/// made it stale.
///
/// ## Modules
/// - `record`: the `Record` value type and `Side`
/// - `store`: `RecordStore`, the keyed index (hot path)
/// - `snapshot`: `SnapshotView`, the lazily rebuilt display cache (cold path)

pub mod record;
pub mod snapshot;
pub mod store;

pub use record::{Record, Side};
pub use snapshot::{CacheState, SnapshotView};
pub use store::{RecordStore, StoreStats};
