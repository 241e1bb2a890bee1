/// Infrastructure Layer - I/O Adapters
///
/// Everything that touches text or files lives here, outside the domain.
///
/// ## Modules
/// - `csv`: CSV input adapter producing validated records
/// - `report`: text / JSON rendering of snapshots and statistics

pub mod csv;
pub mod report;

pub use csv::{CsvAdapter, CsvBatch};
pub use report::{write_snapshot, write_stats, ReportFormat};
