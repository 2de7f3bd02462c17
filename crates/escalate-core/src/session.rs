//! Tracking session
//!
//! A [`Session`] is the caller-owned unit of state: one classifier, one
//! case store, one config. It is created when the operator starts work,
//! passed by reference into every handler, and dropped at the end.

use crate::board::Board;
use crate::classifier::Classifier;
use crate::config::TrackerConfig;
use crate::error::{ConfigError, ImportError, ValidationError};
use crate::intake::{self, ImportProfile, ImportReport, ImportSelection, RowPreview, Table};
use crate::store::CaseStore;
use crate::types::{CaseDraft, CaseId, Criticality};
use chrono::NaiveDate;

/// Form fields for a manually entered issue
#[derive(Debug, Clone, Default)]
pub struct ManualEntry {
    pub issue: String,
    pub customer: Option<String>,
    pub owner: Option<String>,
    pub criticality: Option<Criticality>,
    pub reported: Option<NaiveDate>,
}

impl ManualEntry {
    /// Create entry with issue text only
    #[inline]
    #[must_use]
    pub fn new(issue: impl Into<String>) -> Self {
        Self {
            issue: issue.into(),
            ..Self::default()
        }
    }

    /// With customer
    #[inline]
    #[must_use]
    pub fn with_customer(mut self, customer: impl Into<String>) -> Self {
        self.customer = Some(customer.into());
        self
    }

    /// With owner
    #[inline]
    #[must_use]
    pub fn with_owner(mut self, owner: impl Into<String>) -> Self {
        self.owner = Some(owner.into());
        self
    }

    /// With criticality
    #[inline]
    #[must_use]
    pub fn with_criticality(mut self, criticality: Criticality) -> Self {
        self.criticality = Some(criticality);
        self
    }

    /// With reported date
    #[inline]
    #[must_use]
    pub fn with_reported(mut self, date: NaiveDate) -> Self {
        self.reported = Some(date);
        self
    }
}

/// Result of logging one case
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogReceipt {
    pub case_id: CaseId,
    pub label: String,
    pub escalated: bool,
}

impl LogReceipt {
    /// Operator-facing confirmation line
    #[must_use]
    pub fn banner(&self) -> String {
        if self.escalated {
            format!("Escalation triggered for {}", self.label)
        } else {
            format!("Logged {} without escalation", self.label)
        }
    }
}

/// One operator session
#[derive(Debug, Clone)]
pub struct Session {
    config: TrackerConfig,
    classifier: Classifier,
    store: CaseStore,
}

impl Session {
    /// Start a session
    ///
    /// # Errors
    /// Returns error if the config fails validation or its vocabulary
    /// does not compile
    pub fn new(config: TrackerConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let classifier = Classifier::new(&config.vocabulary)?;
        let store = CaseStore::with_id_format(config.ids.clone());
        Ok(Self {
            config,
            classifier,
            store,
        })
    }

    /// Log a manually entered issue
    ///
    /// Blank fields fall back to the configured manual defaults; a missing
    /// date means today.
    ///
    /// # Errors
    /// Returns [`ValidationError::EmptyField`] for blank issue text; the
    /// store is not touched.
    pub fn log_manual(&mut self, entry: ManualEntry) -> Result<LogReceipt, ValidationError> {
        let issue = entry.issue.trim();
        if issue.is_empty() {
            return Err(ValidationError::empty("issue description"));
        }

        let defaults = &self.config.defaults;
        let nonblank = |value: Option<String>, fallback: &str| {
            value
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| fallback.to_string())
        };

        let mut draft = CaseDraft::new(issue, self.classifier.classify(issue))
            .with_customer(nonblank(entry.customer, &defaults.manual_customer))
            .with_owner(nonblank(entry.owner, &defaults.manual_owner))
            .with_action(defaults.action_taken.clone())
            .with_reported(
                entry
                    .reported
                    .unwrap_or_else(|| chrono::Local::now().date_naive()),
            );
        draft.criticality = entry.criticality;

        let case = self.store.create(draft);
        let (case_id, escalated) = (case.id(), case.escalated());
        Ok(LogReceipt {
            case_id,
            label: self.store.render_id(case_id),
            escalated,
        })
    }

    /// Import rows of a decoded spreadsheet
    ///
    /// # Errors
    /// See [`intake::import_table`]
    pub fn import(
        &mut self,
        table: &Table,
        profile: &ImportProfile,
        selection: ImportSelection,
    ) -> Result<ImportReport, ImportError> {
        intake::import_table(
            table,
            profile,
            selection,
            &self.classifier,
            &mut self.store,
            &self.config.defaults,
        )
    }

    /// Import with the configured profile
    ///
    /// # Errors
    /// See [`intake::import_table`]
    pub fn import_default(
        &mut self,
        table: &Table,
        selection: ImportSelection,
    ) -> Result<ImportReport, ImportError> {
        let profile = self.config.import.profile();
        self.import(table, &profile, selection)
    }

    /// Preview one data row and its classification without logging it
    ///
    /// # Errors
    /// See [`intake::preview_row`]
    pub fn preview(&self, table: &Table, row: usize) -> Result<RowPreview, ImportError> {
        intake::preview_row(table, row, &self.classifier)
    }

    /// Current board
    #[must_use]
    pub fn board(&self) -> Board {
        Board::from_store(&self.store)
    }

    #[inline]
    #[must_use]
    pub fn store(&self) -> &CaseStore {
        &self.store
    }

    #[inline]
    pub fn store_mut(&mut self) -> &mut CaseStore {
        &mut self.store
    }

    #[inline]
    #[must_use]
    pub fn classifier(&self) -> &Classifier {
        &self.classifier
    }

    #[inline]
    #[must_use]
    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }
}
