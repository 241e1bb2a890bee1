/// Order Service - application glue around the record store
///
/// The service owns a [`RecordStore`] and adds everything the domain layer
/// deliberately leaves out: structured logs, Prometheus metrics, CSV
/// loading, random data generation, benchmarking and report output.
///
/// ## Usage
/// ```rust
/// use limit_order_manager::application::services::OrderService;
/// use limit_order_manager::domain::{Record, Side};
///
/// let mut service = OrderService::new();
/// service.add(Record::new(1, 150.50, 100, Side::Buy));
/// service.add(Record::new(2, 151.25, 200, Side::Sell));
///
/// let ids: Vec<u64> = service.render().iter().map(|r| r.id()).collect();
/// assert_eq!(ids, vec![1, 2]);
/// ```

use crate::domain::{Record, RecordStore, Side, StoreStats};
use crate::infrastructure::{self, CsvAdapter, CsvBatch, ReportFormat};
use crate::shared::{AppError, AppResult, METRICS};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use std::fs::File;
use std::io::{BufRead, BufWriter, Write};
use std::path::Path;
use std::time::{Duration, Instant};

/// Price range used by [`OrderService::generate_random`]
const MIN_RANDOM_PRICE: f64 = 100.0;
const MAX_RANDOM_PRICE: f64 = 200.0;
const MAX_RANDOM_QUANTITY: u32 = 1000;

/// Upper bound on the number of cancels issued by the benchmark
const BENCHMARK_CANCELS: usize = 1000;

/// Outcome of loading one CSV input
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct LoadReport {
    /// Records inserted into the store
    pub accepted: usize,
    /// Well-formed records whose id was already live
    pub duplicates: usize,
    /// Lines dropped by the adapter
    pub malformed: usize,
}

/// Timings of one benchmark run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BenchmarkReport {
    pub generated: usize,
    pub generation: Duration,
    pub snapshot_rows: usize,
    pub snapshot: Duration,
    pub cancelled: usize,
    pub cancellation: Duration,
    pub stats: StoreStats,
}

#[derive(Debug, Default)]
pub struct OrderService {
    store: RecordStore,
}

impl OrderService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        OrderService { store: RecordStore::with_capacity(capacity) }
    }

    pub fn store(&self) -> &RecordStore {
        &self.store
    }

    pub fn add(&mut self, record: Record) -> bool {
        let added = self.store.add(record);
        if added {
            let side = match record.side() {
                Side::Buy => "buy",
                Side::Sell => "sell",
            };
            METRICS.records_added.with_label_values(&[side]).inc();
            tracing::trace!(id = record.id(), "record added");
        } else {
            METRICS.duplicate_rejections.inc();
            tracing::debug!(id = record.id(), "duplicate id rejected");
        }
        self.sync_gauge();
        added
    }

    pub fn cancel(&mut self, id: u64) -> bool {
        let cancelled = self.store.cancel(id);
        if cancelled {
            METRICS.records_cancelled.inc();
            tracing::trace!(id, "record cancelled");
        } else {
            METRICS.cancel_misses.inc();
            tracing::debug!(id, "cancel for unknown id");
        }
        self.sync_gauge();
        cancelled
    }

    #[inline]
    pub fn get(&self, id: u64) -> Option<&Record> {
        self.store.get(id)
    }

    pub fn clear(&mut self) {
        let dropped = self.store.size();
        self.store.clear();
        self.sync_gauge();
        tracing::info!(dropped, "store cleared");
    }

    #[inline]
    pub fn stats(&self) -> StoreStats {
        self.store.stats()
    }

    /// Price-ordered view; counts a rebuild when the cache was stale
    pub fn render(&mut self) -> Vec<&Record> {
        if self.store.is_snapshot_stale() {
            METRICS.snapshot_rebuilds.inc();
            tracing::debug!(records = self.store.size(), "rebuilding snapshot cache");
        }
        self.store.render()
    }

    /// Loads every record the adapter accepts from `reader`
    pub fn load_reader<R: BufRead>(&mut self, reader: R) -> AppResult<LoadReport> {
        let batch = CsvAdapter::read(reader)?;
        Ok(self.ingest(batch))
    }

    pub fn load_csv(&mut self, path: impl AsRef<Path>) -> AppResult<LoadReport> {
        let path = path.as_ref();
        tracing::info!("loading records from {}", path.display());
        let batch = CsvAdapter::read_path(path)?;
        Ok(self.ingest(batch))
    }

    fn ingest(&mut self, batch: CsvBatch) -> LoadReport {
        let mut report = LoadReport { malformed: batch.rejected_lines.len(), ..LoadReport::default() };

        if report.malformed > 0 {
            METRICS.malformed_lines.inc_by(report.malformed as u64);
            tracing::warn!(
                count = report.malformed,
                "dropped malformed lines: {:?}",
                batch.rejected_lines
            );
        }

        for record in batch.records {
            if self.add(record) {
                report.accepted += 1;
            } else {
                report.duplicates += 1;
            }
        }

        tracing::info!(
            accepted = report.accepted,
            duplicates = report.duplicates,
            malformed = report.malformed,
            "csv batch loaded"
        );
        report
    }

    /// Adds `count` random records with ids `1..=count`
    ///
    /// Ids already live are rejected as duplicates, so the return value is
    /// the number actually added.
    pub fn generate_random<R: Rng>(&mut self, count: usize, rng: &mut R) -> usize {
        let mut added = 0;
        for i in 0..count {
            let record = Record::new(
                i as u64 + 1,
                rng.gen_range(MIN_RANDOM_PRICE..MAX_RANDOM_PRICE),
                rng.gen_range(1..=MAX_RANDOM_QUANTITY),
                if rng.gen_bool(0.5) { Side::Buy } else { Side::Sell },
            );
            if self.add(record) {
                added += 1;
            }
        }
        tracing::info!(requested = count, added, "random records generated");
        added
    }

    /// Clears the store, then times generation, one snapshot render and
    /// cancellation of the first `min(count, 1000)` ids
    pub fn run_benchmark(&mut self, count: usize, seed: Option<u64>) -> BenchmarkReport {
        self.clear();
        let mut rng = seeded_rng(seed);

        let start = Instant::now();
        let generated = self.generate_random(count, &mut rng);
        let generation = start.elapsed();

        let start = Instant::now();
        let snapshot_rows = self.render().len();
        let snapshot = start.elapsed();

        let start = Instant::now();
        let mut cancelled = 0;
        for id in 1..=count.min(BENCHMARK_CANCELS) as u64 {
            if self.cancel(id) {
                cancelled += 1;
            }
        }
        let cancellation = start.elapsed();

        tracing::info!(
            generated,
            generation_us = generation.as_micros() as u64,
            snapshot_us = snapshot.as_micros() as u64,
            cancellation_us = cancellation.as_micros() as u64,
            "benchmark finished"
        );

        BenchmarkReport {
            generated,
            generation,
            snapshot_rows,
            snapshot,
            cancelled,
            cancellation,
            stats: self.stats(),
        }
    }

    pub fn write_snapshot<W: Write>(&mut self, out: &mut W, format: ReportFormat) -> AppResult<()> {
        let rows = self.render();
        infrastructure::write_snapshot(out, &rows, format)
    }

    pub fn write_snapshot_to_file(&mut self, path: impl AsRef<Path>, format: ReportFormat) -> AppResult<()> {
        let path = path.as_ref();
        let file = File::create(path).map_err(|e| AppError::open(path, e))?;
        let mut out = BufWriter::new(file);
        self.write_snapshot(&mut out, format)?;
        out.flush()?;
        tracing::info!("snapshot written to {}", path.display());
        Ok(())
    }

    pub fn write_stats<W: Write>(&self, out: &mut W, format: ReportFormat) -> AppResult<()> {
        infrastructure::write_stats(out, &self.stats(), format)
    }

    fn sync_gauge(&self) {
        METRICS.active_records.set(self.store.size() as i64);
    }
}

/// Seeded RNG when `seed` is given, entropy-seeded otherwise
pub fn seeded_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}
