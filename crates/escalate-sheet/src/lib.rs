//! Escalate Sheet - spreadsheet import and export
//!
//! The boundary between spreadsheet files and the core tracker types.
//!
//! # Core Operations
//!
//! - **Ingress**: decode a file into a [`Table`] for [`escalate_core::Session::import`]
//! - **Egress**: encode [`ExportRow`]s from [`escalate_core::CaseStore::export_rows`]
//!
//! ```text
//! file → SheetCodec::decode → Table → Session::import → CaseStore
//! CaseStore → export_rows → SheetCodec::encode → file
//! ```

#![warn(unreachable_pub)]
#![allow(missing_docs)]

pub mod codecs;
pub mod error;

pub use codecs::{default_codecs, CodecRegistry, CsvCodec, SheetCodec, XlsxCodec};
pub use error::{SheetError, SheetResult};

use escalate_core::{ExportRow, Table};
use std::path::Path;

fn codec_for<'a>(registry: &'a CodecRegistry, path: &Path) -> SheetResult<&'a dyn SheetCodec> {
    registry.find_for_path(path).ok_or_else(|| {
        SheetError::UnsupportedFormat(
            path.extension()
                .and_then(|e| e.to_str())
                .unwrap_or_default()
                .to_string(),
        )
    })
}

/// Read a spreadsheet file into a table, choosing the codec by extension
///
/// # Errors
/// Returns error for unknown extensions, unreadable files or malformed content
pub fn read_table(path: impl AsRef<Path>) -> SheetResult<Table> {
    read_table_with(&default_codecs(), path)
}

/// Read with an explicit codec registry
///
/// # Errors
/// See [`read_table`]
pub fn read_table_with(registry: &CodecRegistry, path: impl AsRef<Path>) -> SheetResult<Table> {
    let path = path.as_ref();
    let codec = codec_for(registry, path)?;
    let bytes = std::fs::read(path).map_err(|e| SheetError::io_error(path, e))?;
    let table = codec.decode(&bytes)?;
    tracing::info!(
        path = %path.display(),
        format = codec.name(),
        rows = table.row_count(),
        "read spreadsheet"
    );
    Ok(table)
}

/// Write export rows to a spreadsheet file, choosing the codec by extension
///
/// # Errors
/// Returns error for unknown extensions or when the file cannot be written
pub fn write_export(path: impl AsRef<Path>, rows: &[ExportRow]) -> SheetResult<()> {
    write_export_with(&default_codecs(), path, rows)
}

/// Write with an explicit codec registry
///
/// # Errors
/// See [`write_export`]
pub fn write_export_with(
    registry: &CodecRegistry,
    path: impl AsRef<Path>,
    rows: &[ExportRow],
) -> SheetResult<()> {
    let path = path.as_ref();
    let codec = codec_for(registry, path)?;
    let bytes = codec.encode(rows)?;
    std::fs::write(path, bytes).map_err(|e| SheetError::io_error(path, e))?;
    tracing::info!(path = %path.display(), format = codec.name(), rows = rows.len(), "wrote export");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_extension_is_rejected() {
        let err = read_table("cases.ods").unwrap_err();
        assert!(matches!(err, SheetError::UnsupportedFormat(ext) if ext == "ods"));
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_table(dir.path().join("absent.csv")).unwrap_err();
        assert!(matches!(err, SheetError::Io { .. }));
    }
}
