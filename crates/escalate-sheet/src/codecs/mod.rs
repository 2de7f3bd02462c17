//! Spreadsheet codecs
//!
//! Converts between spreadsheet bytes and the core tabular types:
//! - CSV via the `csv` crate
//! - XLSX / XLS via `calamine` (read) and `rust_xlsxwriter` (write)

use crate::error::SheetResult;
use escalate_core::{ExportRow, Table};
use std::path::Path;

mod csv_codec;
mod xlsx_codec;

pub use csv_codec::CsvCodec;
pub use xlsx_codec::XlsxCodec;

/// Codec trait for one spreadsheet format
///
/// Implement this trait to add support for new formats.
pub trait SheetCodec: Send + Sync + 'static {
    /// Decode bytes into a header row plus text data rows
    fn decode(&self, bytes: &[u8]) -> SheetResult<Table>;

    /// Encode export rows, header row first
    fn encode(&self, rows: &[ExportRow]) -> SheetResult<Vec<u8>>;

    /// Supported file extensions (without dot, lower-case)
    fn extensions(&self) -> &[&str];

    /// Short format name for logs
    fn name(&self) -> &'static str;

    /// Check if this codec can handle the given path
    fn can_handle(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .map(|ext| self.extensions().contains(&ext.to_ascii_lowercase().as_str()))
            .unwrap_or(false)
    }
}

/// Registry of codecs, selected by file extension
pub struct CodecRegistry {
    codecs: Vec<Box<dyn SheetCodec>>,
}

impl Default for CodecRegistry {
    fn default() -> Self {
        default_codecs()
    }
}

impl std::fmt::Debug for CodecRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CodecRegistry")
            .field("codec_count", &self.codecs.len())
            .field("extensions", &self.all_extensions())
            .finish()
    }
}

impl CodecRegistry {
    /// Create empty registry
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self { codecs: Vec::new() }
    }

    /// Register a codec; earlier registrations win on shared extensions
    pub fn register<C: SheetCodec>(&mut self, codec: C) {
        self.codecs.push(Box::new(codec));
    }

    /// Find codec for path
    #[must_use]
    pub fn find_for_path(&self, path: &Path) -> Option<&dyn SheetCodec> {
        self.codecs.iter().find(|c| c.can_handle(path)).map(|c| &**c)
    }

    /// Get all registered extensions
    #[must_use]
    pub fn all_extensions(&self) -> Vec<&str> {
        self.codecs
            .iter()
            .flat_map(|c| c.extensions())
            .copied()
            .collect()
    }
}

/// Create default registry with built-in codecs
#[inline]
#[must_use]
pub fn default_codecs() -> CodecRegistry {
    let mut registry = CodecRegistry::new();
    registry.register(CsvCodec::new());
    registry.register(XlsxCodec::new());
    registry
}
