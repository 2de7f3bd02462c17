//! Spreadsheet import path
//!
//! Turns a decoded [`Table`] into cases:
//! - normalizes header names and resolves column aliases
//! - rejects the whole import when a required column is missing
//! - skips and reports individual rows that fail validation
//! - classifies and appends each remaining row in file order

use crate::classifier::Classifier;
use crate::config::FieldDefaults;
use crate::error::{ImportError, ValidationError};
use crate::store::CaseStore;
use crate::types::{Assessment, CaseDraft, CaseId, CaseStatus, Criticality};
use chrono::{NaiveDate, NaiveDateTime};
use indexmap::IndexMap;
use serde::Serialize;
use std::collections::BTreeSet;

/// Canonical column: issue text
pub const COL_ISSUE: &str = "brief issue";
/// Canonical column: customer name
pub const COL_CUSTOMER: &str = "customer";
/// Canonical column: reported date
pub const COL_DATE: &str = "issue reported date";
/// Canonical column: owner
pub const COL_OWNER: &str = "owner";
/// Canonical column: status
pub const COL_STATUS: &str = "status";
/// Canonical column: criticality
pub const COL_CRITICALITY: &str = "criticality";
/// Canonical column: action taken
pub const COL_ACTION: &str = "action taken";

/// Canonical column names with their accepted (normalized) aliases
const COLUMN_ALIASES: &[(&str, &[&str])] = &[
    (COL_ISSUE, &["brief issue", "issue", "issue description"]),
    (COL_CUSTOMER, &["customer", "customer name"]),
    (COL_DATE, &["issue reported date", "date reported", "reported date", "date"]),
    (COL_OWNER, &["owner"]),
    (COL_STATUS, &["status"]),
    (COL_CRITICALITY, &["criticality", "urgency level"]),
    (COL_ACTION, &["action taken"]),
];

/// Accepted date layouts
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%d/%m/%Y", "%m/%d/%Y", "%Y/%m/%d"];
const DATETIME_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"];

/// Normalize a header: trim, lower-case, collapse whitespace runs
#[must_use]
pub fn normalize_header(raw: &str) -> String {
    raw.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Parse a date cell; empty text is `None`
///
/// # Errors
/// Returns [`ValidationError::InvalidDate`] if no accepted layout matches
pub fn parse_date(raw: &str) -> Result<Option<NaiveDate>, ValidationError> {
    let text = raw.trim();
    if text.is_empty() {
        return Ok(None);
    }
    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(text, format) {
            return Ok(Some(date));
        }
    }
    for format in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(text, format) {
            return Ok(Some(dt.date()));
        }
    }
    Err(ValidationError::InvalidDate(text.to_string()))
}

/// Decoded tabular input: one header row plus data rows of text cells
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    /// Create table
    #[inline]
    #[must_use]
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self { headers, rows }
    }

    /// Build from borrowed cells
    #[must_use]
    pub fn from_strs(headers: &[&str], rows: &[&[&str]]) -> Self {
        Self {
            headers: headers.iter().map(|h| (*h).to_string()).collect(),
            rows: rows
                .iter()
                .map(|r| r.iter().map(|c| (*c).to_string()).collect())
                .collect(),
        }
    }

    /// Number of data rows
    #[inline]
    #[must_use]
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Normalized header names
    #[must_use]
    pub fn normalized_headers(&self) -> Vec<String> {
        self.headers.iter().map(|h| normalize_header(h)).collect()
    }

    /// `(normalized header, value)` pairs of one data row (1-based)
    #[must_use]
    pub fn row_details(&self, row: usize) -> Option<Vec<(String, String)>> {
        let cells = self.rows.get(row.checked_sub(1)?)?;
        Some(
            self.normalized_headers()
                .into_iter()
                .enumerate()
                .map(|(i, h)| (h, cells.get(i).cloned().unwrap_or_default()))
                .collect(),
        )
    }
}

/// Required column set for an import
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImportProfile {
    /// Issue text only
    Minimal,
    /// Issue, customer, date, status, owner and criticality
    Strict,
    /// Explicit set of column names (normalized on use)
    Custom(BTreeSet<String>),
}

impl ImportProfile {
    /// Normalized required column names
    #[must_use]
    pub fn required_columns(&self) -> BTreeSet<String> {
        match self {
            ImportProfile::Minimal => [COL_ISSUE].iter().map(|c| (*c).to_string()).collect(),
            ImportProfile::Strict => [
                COL_ISSUE,
                COL_CUSTOMER,
                COL_DATE,
                COL_STATUS,
                COL_OWNER,
                COL_CRITICALITY,
            ]
            .iter()
            .map(|c| (*c).to_string())
            .collect(),
            ImportProfile::Custom(cols) => cols
                .iter()
                .map(|c| canonical_name(&normalize_header(c)))
                .collect(),
        }
    }
}

/// Which data rows to import
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ImportSelection {
    /// Every valid row in file order
    #[default]
    All,
    /// A single data row (1-based)
    Row(usize),
}

/// Row skipped during import
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RowWarning {
    /// 1-based data row number (header excluded)
    pub row: usize,
    /// Why the row was skipped
    pub reason: String,
}

impl std::fmt::Display for RowWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "row {}: {}", self.row, self.reason)
    }
}

/// Outcome of an import
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ImportReport {
    /// Created case ids in row order
    pub created: Vec<CaseId>,
    /// How many created cases are escalated
    pub escalated: usize,
    /// Skipped rows
    pub warnings: Vec<RowWarning>,
}

// Map a normalized alias to its canonical column; unknown names map to themselves.
fn canonical_name(normalized: &str) -> String {
    COLUMN_ALIASES
        .iter()
        .find(|(_, aliases)| aliases.contains(&normalized))
        .map_or_else(|| normalized.to_string(), |(canonical, _)| (*canonical).to_string())
}

/// Canonical column name → cell index, first occurrence wins
#[derive(Debug, Clone)]
struct ColumnMap {
    columns: IndexMap<String, usize>,
}

impl ColumnMap {
    fn resolve(table: &Table) -> Self {
        let mut columns = IndexMap::new();
        for (index, header) in table.normalized_headers().iter().enumerate() {
            columns.entry(canonical_name(header)).or_insert(index);
        }
        Self { columns }
    }

    fn missing(&self, required: &BTreeSet<String>) -> BTreeSet<String> {
        required
            .iter()
            .filter(|c| !self.columns.contains_key(c.as_str()))
            .cloned()
            .collect()
    }

    // Untouched cell text; a present column on a short row reads as "".
    fn raw<'a>(&self, row: &'a [String], column: &str) -> Option<&'a str> {
        self.columns
            .get(column)
            .map(|&i| row.get(i).map_or("", String::as_str))
    }

    fn trimmed<'a>(&self, row: &'a [String], column: &str) -> &'a str {
        self.raw(row, column).map_or("", str::trim)
    }
}

/// Import rows of `table` into `store`
///
/// Column validation happens before any case is created, so a
/// [`ImportError`] means the store was not touched.
///
/// # Errors
/// Returns [`ImportError::EmptyTable`] for a table without headers,
/// [`ImportError::MissingColumns`] when required columns are absent, and
/// [`ImportError::RowOutOfRange`] for a bad row selection.
pub fn import_table(
    table: &Table,
    profile: &ImportProfile,
    selection: ImportSelection,
    classifier: &Classifier,
    store: &mut CaseStore,
    defaults: &FieldDefaults,
) -> Result<ImportReport, ImportError> {
    if table.headers.iter().all(|h| h.trim().is_empty()) {
        return Err(ImportError::EmptyTable);
    }

    let columns = ColumnMap::resolve(table);
    let missing = columns.missing(&profile.required_columns());
    if !missing.is_empty() {
        tracing::warn!(?missing, "import rejected");
        return Err(ImportError::MissingColumns(missing));
    }

    let range = match selection {
        ImportSelection::All => 1..=table.row_count(),
        ImportSelection::Row(row) => {
            if row == 0 || row > table.row_count() {
                return Err(ImportError::RowOutOfRange {
                    row,
                    rows: table.row_count(),
                });
            }
            row..=row
        }
    };

    let mut report = ImportReport::default();
    for number in range {
        let cells = &table.rows[number - 1];
        if cells.iter().all(|c| c.trim().is_empty()) {
            if matches!(selection, ImportSelection::Row(_)) {
                let warning = RowWarning {
                    row: number,
                    reason: "row is blank".to_string(),
                };
                tracing::warn!(row = number, "selected row is blank");
                report.warnings.push(warning);
            }
            continue;
        }
        match draft_from_row(&columns, cells, classifier, defaults) {
            Ok(draft) => {
                let case = store.create(draft);
                if case.escalated() {
                    report.escalated += 1;
                }
                report.created.push(case.id());
            }
            Err(err) => {
                let warning = RowWarning {
                    row: number,
                    reason: err.to_string(),
                };
                tracing::warn!(row = number, reason = %warning.reason, "row skipped");
                report.warnings.push(warning);
            }
        }
    }

    tracing::info!(
        created = report.created.len(),
        escalated = report.escalated,
        skipped = report.warnings.len(),
        "import finished"
    );
    Ok(report)
}

fn draft_from_row(
    columns: &ColumnMap,
    cells: &[String],
    classifier: &Classifier,
    defaults: &FieldDefaults,
) -> Result<CaseDraft, ValidationError> {
    let issue = columns.trimmed(cells, COL_ISSUE);
    if issue.is_empty() {
        return Err(ValidationError::empty(COL_ISSUE));
    }

    let reported = parse_date(columns.trimmed(cells, COL_DATE))?;
    let criticality = match columns.trimmed(cells, COL_CRITICALITY) {
        "" => None,
        text => Some(text.parse::<Criticality>()?),
    };
    let status = CaseStatus::from_cell(columns.trimmed(cells, COL_STATUS));

    // Free text is kept as written; defaults fill only absent columns.
    let or_default = |column: &str, fallback: &str| {
        columns.raw(cells, column).unwrap_or(fallback).to_string()
    };

    let mut draft = CaseDraft::new(issue, classifier.classify(issue))
        .with_customer(or_default(COL_CUSTOMER, &defaults.import_customer))
        .with_owner(or_default(COL_OWNER, &defaults.import_owner))
        .with_action(or_default(COL_ACTION, &defaults.action_taken))
        .with_status(status);
    draft.reported = reported;
    draft.criticality = criticality;
    Ok(draft)
}

/// One data row shown before it is logged
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RowPreview {
    /// 1-based data row number
    pub row: usize,
    /// `(normalized header, value)` pairs in sheet order
    pub fields: Vec<(String, String)>,
    /// Classification of the issue cell, absent when the cell is blank
    pub assessment: Option<Assessment>,
}

/// Show one row and how its issue text would classify, without importing it
///
/// # Errors
/// Returns [`ImportError::EmptyTable`] for a table without headers and
/// [`ImportError::RowOutOfRange`] when `row` is not a data row.
pub fn preview_row(
    table: &Table,
    row: usize,
    classifier: &Classifier,
) -> Result<RowPreview, ImportError> {
    if table.headers.iter().all(|h| h.trim().is_empty()) {
        return Err(ImportError::EmptyTable);
    }
    let fields = table.row_details(row).ok_or(ImportError::RowOutOfRange {
        row,
        rows: table.row_count(),
    })?;

    let columns = ColumnMap::resolve(table);
    let issue = columns.trimmed(&table.rows[row - 1], COL_ISSUE);
    let assessment = (!issue.is_empty()).then(|| classifier.classify(issue));

    Ok(RowPreview {
        row,
        fields,
        assessment,
    })
}
