//! Testing utilities for Escalate workspace
//!
//! Shared fixtures: sessions, sample tables and populated stores.

#![allow(missing_docs)]

use chrono::NaiveDate;
use escalate_core::{
    Criticality, ImportProfile, ImportSelection, ManualEntry, Session, Table,
    TrackerConfig,
};

/// Headers of a tracker sheet carrying every importable column
pub const FULL_HEADERS: [&str; 7] = [
    "Brief Issue",
    "Customer",
    "Issue Reported Date",
    "Owner",
    "Status",
    "Criticality",
    "Action Taken",
];

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn setup_session() -> Session {
    Session::new(TrackerConfig::new()).unwrap()
}

/// Four well-formed rows: one escalated, one urgent, one negative, one routine
pub fn sample_table() -> Table {
    Table::from_strs(
        &FULL_HEADERS,
        &[
            &["Shipment delayed, business impact", "Acme", "2024-03-01", "dana", "Open", "High", "N/A"],
            &["Need the report immediately", "Globex", "2024-03-02", "lee", "In Progress", "Medium", "Drafting"],
            &["Login problem for two users", "Initech", "2024-03-03", "kim", "Resolved", "Low", "Reset SSO"],
            &["Thanks, all good", "Umbrella", "", "", "", "", ""],
        ],
    )
}

/// Sample table with the owner column removed
pub fn table_without_owner() -> Table {
    let full = sample_table();
    let keep: Vec<usize> = (0..full.headers.len()).filter(|&i| full.headers[i] != "Owner").collect();
    Table::new(
        keep.iter().map(|&i| full.headers[i].clone()).collect(),
        full.rows
            .iter()
            .map(|row| keep.iter().map(|&i| row[i].clone()).collect())
            .collect(),
    )
}

/// Session holding the sample table plus one manual entry
///
/// The second case has a blank action and the manual entry a padded one,
/// so exports carry free text that must survive unchanged.
pub fn populated_session() -> Session {
    let mut session = setup_session();
    let report = session
        .import(&sample_table(), &ImportProfile::Strict, ImportSelection::All)
        .unwrap();
    let receipt = session
        .log_manual(
            ManualEntry::new("Payment gateway failed, critical")
                .with_customer("Hooli")
                .with_owner("sam")
                .with_criticality(Criticality::High)
                .with_reported(date(2024, 3, 5)),
        )
        .unwrap();
    session
        .store_mut()
        .update_action_taken(report.created[1], "")
        .unwrap();
    session
        .store_mut()
        .update_action_taken(receipt.case_id, "  called back  ")
        .unwrap();
    session
}
