/// CSV input adapter
///
/// Turns text lines of the form `id,price,quantity,side` into [`Record`]s.
///
/// ## Policy
/// - Side is `0` (buy) or `1` (sell); any other code rejects the line.
/// - Fields are trimmed. Anything after the fourth field is ignored.
/// - Only the first line is checked for a header: it is skipped when it
///   contains `id` or `ID`.
/// - Empty lines are skipped without being counted.
/// - A malformed line is dropped and its 1-based line number recorded in
///   [`CsvBatch::rejected_lines`]. It never aborts the batch.
///
/// Uniqueness of ids is not checked here; that is the store's job.

use crate::domain::{Record, Side};
use crate::shared::{AppError, AppResult};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Records parsed from one input, plus the lines that were dropped
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CsvBatch {
    pub records: Vec<Record>,
    pub rejected_lines: Vec<usize>,
}

pub struct CsvAdapter;

impl CsvAdapter {
    /// Parses a single data line, `None` if any field is unusable
    pub fn parse_line(line: &str) -> Option<Record> {
        let mut fields = line.split(',').map(str::trim);

        let id = fields.next()?.parse::<u64>().ok()?;
        let price = fields.next()?.parse::<f64>().ok()?;
        let quantity = fields.next()?.parse::<u32>().ok()?;
        let side = Side::from_code(fields.next()?.parse::<u32>().ok()?)?;

        Some(Record::new(id, price, quantity, side))
    }

    /// Heuristic used on the first line only
    #[inline]
    pub fn looks_like_header(line: &str) -> bool {
        line.contains("id") || line.contains("ID")
    }

    /// Reads every line from `reader`
    ///
    /// Lines are split on raw bytes so a line that is not valid UTF-8 is
    /// dropped like any other malformed line. Only real I/O errors fail.
    pub fn read<R: BufRead>(reader: R) -> AppResult<CsvBatch> {
        let mut batch = CsvBatch::default();

        for (index, raw) in reader.split(b'\n').enumerate() {
            let mut raw = raw?;
            let line_no = index + 1;
            if raw.last() == Some(&b'\r') {
                raw.pop();
            }

            let Ok(line) = std::str::from_utf8(&raw) else {
                tracing::debug!(line_no, "dropping line with invalid UTF-8");
                batch.rejected_lines.push(line_no);
                continue;
            };

            if line_no == 1 && Self::looks_like_header(line) {
                tracing::debug!("skipping header line: {}", line);
                continue;
            }
            if line.trim().is_empty() {
                continue;
            }

            match Self::parse_line(line) {
                Some(record) => batch.records.push(record),
                None => {
                    tracing::debug!(line_no, "dropping malformed line: {:?}", line);
                    batch.rejected_lines.push(line_no);
                }
            }
        }

        Ok(batch)
    }

    /// Opens `path` and reads it with [`CsvAdapter::read`]
    pub fn read_path(path: impl AsRef<Path>) -> AppResult<CsvBatch> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| AppError::open(path, e))?;
        Self::read(BufReader::new(file))
    }
}
