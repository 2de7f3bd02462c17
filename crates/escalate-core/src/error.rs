//! Error types for Escalate Core
//!
//! Provides error handling for:
//! - Form and field validation
//! - Case store lookups and status edits
//! - Spreadsheet import (column and row level)
//! - Configuration loading and vocabulary compilation

use crate::types::CaseId;
use std::collections::BTreeSet;
use std::path::PathBuf;

/// Validation errors on operator input
///
/// Raised before anything reaches the classifier or the store.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// Required field blank or whitespace-only
    #[error("{field} cannot be empty")]
    EmptyField { field: &'static str },

    /// Criticality text outside Low/Medium/High
    #[error("invalid criticality: '{0}' (expected Low, Medium or High)")]
    InvalidCriticality(String),

    /// Date text in no accepted format
    #[error("invalid date: '{0}'")]
    InvalidDate(String),
}

impl ValidationError {
    /// Create empty field error
    #[inline]
    #[must_use]
    pub fn empty(field: &'static str) -> Self {
        Self::EmptyField { field }
    }
}

/// Case store errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    /// No case with that identifier in this session
    ///
    /// `label` is the id rendered in the owning store's format.
    #[error("case not found: {label}")]
    NotFound { id: CaseId, label: String },

    /// Status text that is not Open, In Progress or Resolved
    #[error("invalid status: '{0}' (expected Open, In Progress or Resolved)")]
    InvalidStatus(String),

    /// Identifier text that could not be parsed
    #[error("invalid case id: '{0}'")]
    InvalidId(String),
}

impl StoreError {
    /// Check if error is a lookup miss
    #[inline]
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

/// Import errors that reject the whole batch
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ImportError {
    /// Required columns absent from the header row
    #[error("missing columns: {{{}}}", join_columns(.0))]
    MissingColumns(BTreeSet<String>),

    /// Selected row beyond the end of the table
    #[error("row {row} out of range (table has {rows} data rows)")]
    RowOutOfRange { row: usize, rows: usize },

    /// Table has no header row
    #[error("table has no header row")]
    EmptyTable,
}

impl ImportError {
    /// Missing column names, if this is a column error
    #[must_use]
    pub fn missing_columns(&self) -> Option<&BTreeSet<String>> {
        match self {
            Self::MissingColumns(cols) => Some(cols),
            _ => None,
        }
    }
}

fn join_columns(cols: &BTreeSet<String>) -> String {
    cols.iter().map(String::as_str).collect::<Vec<_>>().join(", ")
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// TOML did not parse into a config
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),

    /// Config file unreadable
    #[error("io error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Vocabulary term is empty or whitespace
    #[error("empty term in {vocabulary} vocabulary")]
    EmptyTerm { vocabulary: &'static str },

    /// Vocabulary failed to compile
    #[error("vocabulary regex error: {0}")]
    Regex(#[from] regex::Error),

    /// Identifier width outside 1..=12
    #[error("invalid id width {0} (expected 1..=12)")]
    InvalidIdWidth(usize),

    /// Identifier prefix empty or containing '-'
    #[error("invalid id prefix: '{0}'")]
    InvalidIdPrefix(String),
}

impl ConfigError {
    /// Create IO error for path
    pub fn io_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_columns_display_names_each_column() {
        let cols: BTreeSet<String> = ["owner", "customer"].iter().map(|s| s.to_string()).collect();
        let err = ImportError::MissingColumns(cols);
        assert_eq!(err.to_string(), "missing columns: {customer, owner}");
        assert_eq!(err.missing_columns().map(BTreeSet::len), Some(2));
    }

    #[test]
    fn store_error_display() {
        let err = StoreError::NotFound {
            id: CaseId(3),
            label: "ESC-003".to_string(),
        };
        assert_eq!(err.to_string(), "case not found: ESC-003");
        assert!(err.is_not_found());
        assert!(!StoreError::InvalidStatus("x".to_string()).is_not_found());
    }

    #[test]
    fn validation_error_display() {
        assert_eq!(
            ValidationError::empty("issue description").to_string(),
            "issue description cannot be empty"
        );
    }
}
