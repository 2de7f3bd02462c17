//! CSV codec
//!
//! Uses the `csv` crate with flexible record lengths; short rows are
//! padded to the header width.

use crate::codecs::SheetCodec;
use crate::error::{SheetError, SheetResult};
use escalate_core::{ExportCell, ExportRow, Table, EXPORT_COLUMNS};

/// CSV codec
#[derive(Debug, Clone, Copy)]
pub struct CsvCodec {
    delimiter: u8,
}

impl Default for CsvCodec {
    fn default() -> Self {
        Self { delimiter: b',' }
    }
}

impl CsvCodec {
    /// Create comma-separated codec
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With field delimiter
    #[inline]
    #[must_use]
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }
}

impl SheetCodec for CsvCodec {
    fn decode(&self, bytes: &[u8]) -> SheetResult<Table> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .delimiter(self.delimiter)
            .from_reader(bytes);

        let headers: Vec<String> = reader
            .headers()?
            .iter()
            .enumerate()
            .map(|(i, h)| if i == 0 { h.trim_start_matches('\u{feff}') } else { h })
            .map(str::to_string)
            .collect();

        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record?;
            let mut cells: Vec<String> = record.iter().map(str::to_string).collect();
            if cells.len() < headers.len() {
                cells.resize(headers.len(), String::new());
            }
            rows.push(cells);
        }

        tracing::debug!(columns = headers.len(), rows = rows.len(), "decoded csv");
        Ok(Table::new(headers, rows))
    }

    fn encode(&self, rows: &[ExportRow]) -> SheetResult<Vec<u8>> {
        let mut writer = csv::WriterBuilder::new()
            .delimiter(self.delimiter)
            .from_writer(Vec::new());

        writer.write_record(EXPORT_COLUMNS)?;
        for row in rows {
            writer.write_record(row.cells().iter().map(ExportCell::to_text))?;
        }
        writer
            .into_inner()
            .map_err(|e| SheetError::Buffer(e.into_error()))
    }

    fn extensions(&self) -> &[&str] {
        &["csv"]
    }

    fn name(&self) -> &'static str {
        "csv"
    }
}
