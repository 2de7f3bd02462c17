//! XLSX codec
//!
//! Reads the first worksheet of any workbook `calamine` understands and
//! writes `.xlsx` with `rust_xlsxwriter`. Integral floats decode without a
//! trailing `.0` and date cells decode as `YYYY-MM-DD`.

use crate::codecs::SheetCodec;
use crate::error::{SheetError, SheetResult};
use calamine::{open_workbook_auto_from_rs, Data, DataType, Reader};
use escalate_core::{ExportCell, ExportRow, Table, DATE_FORMAT, EXPORT_COLUMNS};
use rust_xlsxwriter::{Format, Workbook, XlsxError};
use std::io::Cursor;

/// Name of the exported worksheet
pub const EXPORT_SHEET_NAME: &str = "Escalations";

/// XLSX codec
#[derive(Debug, Clone, Copy, Default)]
pub struct XlsxCodec;

impl XlsxCodec {
    /// Create XLSX codec
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        Data::Bool(true) => "TRUE".to_string(),
        Data::Bool(false) => "FALSE".to_string(),
        Data::Int(i) => i.to_string(),
        Data::Float(f) if f.fract() == 0.0 && f.abs() < 1e15 => format!("{f:.0}"),
        Data::Float(f) => f.to_string(),
        Data::DateTime(_) | Data::DateTimeIso(_) => cell
            .as_date()
            .map(|d| d.format(DATE_FORMAT).to_string())
            .unwrap_or_else(|| cell.to_string()),
        other => other.to_string(),
    }
}

impl SheetCodec for XlsxCodec {
    fn decode(&self, bytes: &[u8]) -> SheetResult<Table> {
        let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes.to_vec()))?;
        let range = workbook
            .worksheet_range_at(0)
            .ok_or(SheetError::NoWorksheet)??;

        let mut rows = range.rows();
        let headers: Vec<String> = match rows.next() {
            Some(header) => header.iter().map(cell_text).collect(),
            None => return Ok(Table::default()),
        };
        let rows: Vec<Vec<String>> = rows
            .map(|row| {
                let mut cells: Vec<String> = row.iter().map(cell_text).collect();
                if cells.len() < headers.len() {
                    cells.resize(headers.len(), String::new());
                }
                cells
            })
            .collect();

        tracing::debug!(columns = headers.len(), rows = rows.len(), "decoded workbook");
        Ok(Table::new(headers, rows))
    }

    fn encode(&self, rows: &[ExportRow]) -> SheetResult<Vec<u8>> {
        let mut workbook = Workbook::new();
        let header_format = Format::new().set_bold();

        {
            let sheet = workbook.add_worksheet();
            sheet.set_name(EXPORT_SHEET_NAME)?;

            for (col, name) in (0u16..).zip(EXPORT_COLUMNS) {
                sheet.write_string_with_format(0, col, name, &header_format)?;
            }

            for (index, row) in rows.iter().enumerate() {
                let line = u32::try_from(index + 1).map_err(|_| XlsxError::RowColumnLimitError)?;
                for (col, cell) in (0u16..).zip(row.cells()) {
                    match cell {
                        ExportCell::Text(text) if text.is_empty() => {}
                        ExportCell::Text(text) => {
                            sheet.write_string(line, col, &text)?;
                        }
                        ExportCell::Bool(value) => {
                            sheet.write_boolean(line, col, value)?;
                        }
                    }
                }
            }
            sheet.autofit();
        }

        Ok(workbook.save_to_buffer()?)
    }

    fn extensions(&self) -> &[&str] {
        &["xlsx", "xlsm", "xls"]
    }

    fn name(&self) -> &'static str {
        "xlsx"
    }
}
