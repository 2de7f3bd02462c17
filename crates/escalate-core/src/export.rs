//! Export projection
//!
//! The flat row shape handed to spreadsheet codecs. Column order is fixed
//! and matches [`EXPORT_COLUMNS`]; header names are chosen so an export
//! re-imports without any column mapping.

use crate::types::Case;
use chrono::NaiveDate;
use serde::Serialize;

/// Export header row, in column order
pub const EXPORT_COLUMNS: [&str; 11] = [
    "ID",
    "Customer",
    "Brief Issue",
    "Criticality",
    "Sentiment",
    "Urgency",
    "Escalated",
    "Issue Reported Date",
    "Owner",
    "Status",
    "Action Taken",
];

/// ISO date format used in exports
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// One exported case
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExportRow {
    pub id: String,
    pub customer: String,
    pub issue: String,
    pub criticality: Option<String>,
    pub sentiment: String,
    pub urgency: String,
    pub escalated: bool,
    pub reported: Option<NaiveDate>,
    pub owner: String,
    pub status: String,
    pub action_taken: String,
}

/// Typed export cell
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportCell {
    /// Text value (empty for missing optional fields)
    Text(String),
    /// Boolean value
    Bool(bool),
}

impl ExportCell {
    /// Text form, booleans as `TRUE` / `FALSE`
    #[must_use]
    pub fn to_text(&self) -> String {
        match self {
            ExportCell::Text(s) => s.clone(),
            ExportCell::Bool(true) => "TRUE".to_string(),
            ExportCell::Bool(false) => "FALSE".to_string(),
        }
    }
}

impl ExportRow {
    /// Project a case using an already-rendered id
    #[must_use]
    pub fn from_case(case: &Case, rendered_id: &str) -> Self {
        Self {
            id: rendered_id.to_string(),
            customer: case.customer().to_string(),
            issue: case.issue().to_string(),
            criticality: case.criticality().map(|c| c.as_str().to_string()),
            sentiment: case.sentiment().as_str().to_string(),
            urgency: case.urgency().as_str().to_string(),
            escalated: case.escalated(),
            reported: case.reported(),
            owner: case.owner().to_string(),
            status: case.status().as_str().to_string(),
            action_taken: case.action_taken().to_string(),
        }
    }

    /// Cells in [`EXPORT_COLUMNS`] order
    #[must_use]
    pub fn cells(&self) -> Vec<ExportCell> {
        vec![
            ExportCell::Text(self.id.clone()),
            ExportCell::Text(self.customer.clone()),
            ExportCell::Text(self.issue.clone()),
            ExportCell::Text(self.criticality.clone().unwrap_or_default()),
            ExportCell::Text(self.sentiment.clone()),
            ExportCell::Text(self.urgency.clone()),
            ExportCell::Bool(self.escalated),
            ExportCell::Text(
                self.reported
                    .map(|d| d.format(DATE_FORMAT).to_string())
                    .unwrap_or_default(),
            ),
            ExportCell::Text(self.owner.clone()),
            ExportCell::Text(self.status.clone()),
            ExportCell::Text(self.action_taken.clone()),
        ]
    }
}
