//! File-level export and re-import tests

use escalate_core::{ExportRow, ImportError, ImportProfile, ImportSelection, Status};
use escalate_sheet::{read_table, write_export, SheetError};
use escalate_test_utils::{populated_session, setup_session, table_without_owner};
use pretty_assertions::assert_eq;
use std::path::Path;
use tempfile::TempDir;

fn without_ids(rows: Vec<ExportRow>) -> Vec<ExportRow> {
    rows.into_iter()
        .map(|row| ExportRow {
            id: String::new(),
            ..row
        })
        .collect()
}

fn roundtrip(path: &Path) {
    let mut original = populated_session();
    let first = original.store().list_all()[0].id();
    original.store_mut().update_status(first, Status::Resolved).unwrap();
    original
        .store_mut()
        .update_action_taken(first, "Rebooked with express courier")
        .unwrap();
    let exported = original.store().export_rows();
    write_export(path, &exported).unwrap();

    let table = read_table(path).unwrap();
    let mut restored = setup_session();
    let report = restored
        .import(&table, &ImportProfile::Strict, ImportSelection::All)
        .unwrap();

    assert!(report.warnings.is_empty(), "{:?}", report.warnings);
    assert_eq!(report.created.len(), exported.len());
    assert_eq!(without_ids(restored.store().export_rows()), without_ids(exported));

    let actions: Vec<&str> = restored.store().list_all().iter().map(|c| c.action_taken()).collect();
    assert_eq!(actions[1], "");
    assert_eq!(actions[4], "  called back  ");
}

#[test]
fn csv_export_reimports_every_field() {
    let dir = TempDir::new().unwrap();
    roundtrip(&dir.path().join("cases.csv"));
}

#[test]
fn xlsx_export_reimports_every_field() {
    let dir = TempDir::new().unwrap();
    roundtrip(&dir.path().join("cases.xlsx"));
}

#[test]
fn export_of_empty_store_is_header_only() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("empty.csv");
    write_export(&path, &setup_session().store().export_rows()).unwrap();

    let table = read_table(&path).unwrap();
    assert_eq!(table.headers.len(), 11);
    assert_eq!(table.row_count(), 0);
}

#[test]
fn strict_import_from_csv_reports_missing_owner() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("no_owner.csv");
    let source = table_without_owner();
    let mut writer = csv::Writer::from_path(&path).unwrap();
    writer.write_record(&source.headers).unwrap();
    for row in &source.rows {
        writer.write_record(row).unwrap();
    }
    writer.flush().unwrap();

    let table = read_table(&path).unwrap();
    let mut session = setup_session();
    let err = session
        .import(&table, &ImportProfile::Strict, ImportSelection::All)
        .unwrap_err();

    assert_eq!(err.missing_columns().map(|m| m.len()), Some(1));
    assert!(matches!(err, ImportError::MissingColumns(ref m) if m.contains("owner")));
    assert!(session.store().is_empty());

    let report = session
        .import(&table, &ImportProfile::Minimal, ImportSelection::All)
        .unwrap();
    assert_eq!(report.created.len(), 4);
    assert!(session.store().list_all().iter().all(|c| c.owner() == "N/A"));
}

#[test]
fn unsupported_extension_on_write() {
    let dir = TempDir::new().unwrap();
    let err = write_export(dir.path().join("cases.json"), &[]).unwrap_err();
    assert!(matches!(err, SheetError::UnsupportedFormat(ext) if ext == "json"));
}
