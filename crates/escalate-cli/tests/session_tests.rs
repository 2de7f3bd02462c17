//! End-to-end runs of the command surface with in-memory stdio

use escalate_cli::{build_cli, run, Options};
use escalate_test_utils::sample_table;
use pretty_assertions::assert_eq;
use std::path::Path;
use tempfile::TempDir;

fn invoke(args: &[&str], input: &str) -> anyhow::Result<String> {
    let argv = std::iter::once("escalate").chain(args.iter().copied());
    let matches = build_cli().try_get_matches_from(argv)?;
    let mut out = Vec::new();
    run(&matches, Options::default(), input.as_bytes(), &mut out)?;
    Ok(String::from_utf8(out)?)
}

fn write_sample_csv(path: &Path) {
    let table = sample_table();
    let mut writer = csv::Writer::from_path(path).unwrap();
    writer.write_record(&table.headers).unwrap();
    for row in &table.rows {
        writer.write_record(row).unwrap();
    }
    writer.flush().unwrap();
}

#[test]
fn classify_text_output() {
    let out = invoke(&["classify", "The delivery was delayed and this is urgent"], "").unwrap();
    assert!(out.contains("Sentiment: Negative"));
    assert!(out.contains("Urgency:   High"));
    assert!(out.contains("Escalated: yes"));
    assert!(out.contains("Negative terms: delayed"));
}

#[test]
fn classify_json_output() {
    let out = invoke(&["classify", "--json", "Thanks,", "all", "good"], "").unwrap();
    let value: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(value["sentiment"], "Positive");
    assert_eq!(value["urgency"], "Low");
    assert_eq!(value["escalated"], false);
}

#[test]
fn scripted_session_moves_cards() {
    let script = "\
board
log The delivery was delayed and this is urgent
add --customer Acme --owner dana 'Login problem'
status CESI-000001 resolved
action 2 Sent reset link
list
board
quit
log never reached
";
    let out = invoke(&["session"], script).unwrap();

    assert!(out.starts_with("No escalations logged yet.\n"));
    assert!(out.contains("Escalation triggered for CESI-000001"));
    assert!(out.contains("Logged CESI-000002 without escalation"));
    assert!(out.contains("CESI-000001 moved to Resolved"));
    assert!(out.contains("Recorded action on CESI-000002"));
    assert!(out.contains("OPEN (1)"));
    assert!(out.contains("RESOLVED (1)"));
    assert!(out.contains("Owner: dana | Action: Sent reset link"));
    assert!(!out.contains("CESI-000003"));
}

#[test]
fn session_reports_errors_and_continues() {
    let script = "\
log '   '
status CESI-000042 resolved
bogus
log Printer failed
";
    let out = invoke(&["session"], script).unwrap();
    assert!(out.contains("error: issue description"));
    assert!(out.contains("error: case not found: CESI-000042"));
    assert!(out.contains("Logged CESI-000001 without escalation"));
}

#[test]
fn session_import_preview_and_export_on_exit() {
    let dir = TempDir::new().unwrap();
    let sheet = dir.path().join("cases.csv");
    let export = dir.path().join("out.xlsx");
    write_sample_csv(&sheet);

    let script = format!(
        "preview {sheet} 2\nimport {sheet} --strict --row 1\nimport {sheet} --row 9\n",
        sheet = sheet.display()
    );
    let export_arg = export.display().to_string();
    let out = invoke(&["session", "--export-on-exit", &export_arg], &script).unwrap();

    assert!(out.contains("Row 2"));
    assert!(out.contains("Urgency terms:  immediately"));
    assert!(out.contains("Imported 1 case(s), 1 escalated"));
    assert!(out.contains("error: importing"));
    assert!(out.contains("Exported 1 case(s)"));

    let table = escalate_sheet::read_table(&export).unwrap();
    assert_eq!(table.row_count(), 1);
    assert_eq!(table.rows[0][2], "Shipment delayed, business impact");
}

#[test]
fn one_shot_import_with_export() {
    let dir = TempDir::new().unwrap();
    let sheet = dir.path().join("cases.csv");
    let export = dir.path().join("export.csv");
    write_sample_csv(&sheet);

    let out = invoke(
        &[
            "import",
            &sheet.display().to_string(),
            "--export",
            &export.display().to_string(),
        ],
        "",
    )
    .unwrap();
    assert!(out.contains("Imported 4 case(s), 1 escalated"));
    assert!(out.contains("IN PROGRESS (1)"));
    assert!(out.contains("Exported 4 case(s)"));
    assert_eq!(escalate_sheet::read_table(&export).unwrap().row_count(), 4);
}

#[test]
fn one_shot_errors_surface() {
    let dir = TempDir::new().unwrap();
    let err = invoke(&["import", &dir.path().join("cases.ods").display().to_string()], "")
        .unwrap_err();
    assert!(format!("{err:#}").contains("unsupported"));

    let config = dir.path().join("tracker.toml");
    std::fs::write(&config, "[ids]\nwidth = 0\n").unwrap();
    let err = invoke(
        &["--config", &config.display().to_string(), "classify", "late"],
        "",
    )
    .unwrap_err();
    assert!(format!("{err:#}").contains("loading config"));
}

#[test]
fn config_changes_id_prefix() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("tracker.toml");
    std::fs::write(&config, "[ids]\nprefix = \"ESC\"\nwidth = 3\n").unwrap();
    let out = invoke(
        &["--config", &config.display().to_string(), "session"],
        "log Thanks\n",
    )
    .unwrap();
    assert_eq!(out, "Logged ESC-001 without escalation\n");
}

#[test]
fn lookup_errors_use_configured_id_prefix() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("tracker.toml");
    std::fs::write(&config, "[ids]\nprefix = \"ESC\"\nwidth = 3\n").unwrap();
    let out = invoke(
        &["--config", &config.display().to_string(), "session"],
        "status 5 resolved\naction ESC-009 Called back\n",
    )
    .unwrap();
    assert!(out.contains("error: case not found: ESC-005"));
    assert!(out.contains("error: case not found: ESC-009"));
    assert!(!out.contains("CESI"));
}
