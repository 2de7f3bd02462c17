//! Error types for spreadsheet codecs
//!
//! Covers decoding (file → `Table`), encoding (export rows → bytes) and
//! the file IO around both.

use std::path::PathBuf;

/// Spreadsheet codec errors
#[derive(Debug, thiserror::Error)]
pub enum SheetError {
    /// No codec registered for the file extension
    #[error("unsupported spreadsheet format: '{0}'")]
    UnsupportedFormat(String),

    /// CSV read or write failed
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    /// Workbook could not be read
    #[error("workbook read error: {0}")]
    WorkbookRead(#[from] calamine::Error),

    /// Workbook could not be written
    #[error("workbook write error: {0}")]
    WorkbookWrite(#[from] rust_xlsxwriter::XlsxError),

    /// Workbook has no worksheet to import
    #[error("workbook has no worksheets")]
    NoWorksheet,

    /// IO error on a spreadsheet file
    #[error("io error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// In-memory buffer error
    #[error("buffer error: {0}")]
    Buffer(#[source] std::io::Error),
}

impl SheetError {
    /// Create IO error for path
    pub fn io_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result type alias for codec operations
pub type SheetResult<T> = Result<T, SheetError>;
