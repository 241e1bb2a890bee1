/// Report rendering for snapshots and statistics
///
/// The store produces values (`Vec<&Record>`, `StoreStats`); these
/// functions turn them into text or JSON on any `io::Write`, so the caller
/// decides whether the destination is stdout, a file or a buffer.

use crate::domain::{Record, StoreStats};
use crate::shared::AppResult;
use serde::Serialize;
use std::io::Write;

/// Output format shared by every report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum ReportFormat {
    #[default]
    Text,
    Json,
}

const RULE_WIDTH: usize = 44;

/// Writes a snapshot listing of `rows`, already in display order
pub fn write_snapshot<W: Write>(out: &mut W, rows: &[&Record], format: ReportFormat) -> AppResult<()> {
    match format {
        ReportFormat::Text => write_snapshot_text(out, rows),
        ReportFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, rows)?;
            writeln!(out)?;
            Ok(())
        }
    }
}

fn write_snapshot_text<W: Write>(out: &mut W, rows: &[&Record]) -> AppResult<()> {
    writeln!(out, "\n=== ORDER BOOK SNAPSHOT ===")?;
    writeln!(out, "Total Active Orders: {}", rows.len())?;
    writeln!(out)?;

    if rows.is_empty() {
        writeln!(out, "No active orders.")?;
        return Ok(());
    }

    writeln!(out, "{:>12}{:>12}{:>12}{:>8}", "Order ID", "Price", "Quantity", "Side")?;
    writeln!(out, "{}", "-".repeat(RULE_WIDTH))?;

    for record in rows {
        writeln!(
            out,
            "{:>12}{:>12.2}{:>12}{:>8}",
            record.id(),
            record.price(),
            record.quantity(),
            record.side().as_str()
        )?;
    }

    writeln!(out)?;
    Ok(())
}

#[derive(Serialize)]
struct StatsReport<'a> {
    #[serde(flatten)]
    stats: &'a StoreStats,
    memory_estimate: usize,
}

/// Writes the statistics summary
pub fn write_stats<W: Write>(out: &mut W, stats: &StoreStats, format: ReportFormat) -> AppResult<()> {
    match format {
        ReportFormat::Text => {
            writeln!(out, "\n=== ORDER MANAGER STATISTICS ===")?;
            writeln!(out, "Active Orders: {}", stats.active)?;
            writeln!(out, "Total Orders Added: {}", stats.total_added)?;
            writeln!(out, "Total Orders Cancelled: {}", stats.total_cancelled)?;
            writeln!(out, "Record Size: {} bytes", stats.record_size)?;
            writeln!(out, "Memory Usage (estimate): {} bytes", stats.memory_estimate())?;
            writeln!(out)?;
        }
        ReportFormat::Json => {
            let report = StatsReport { stats, memory_estimate: stats.memory_estimate() };
            serde_json::to_writer_pretty(&mut *out, &report)?;
            writeln!(out)?;
        }
    }
    Ok(())
}
