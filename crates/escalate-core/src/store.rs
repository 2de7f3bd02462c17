//! Session case store
//!
//! Ordered, append-only collection of cases for one session. Entries are
//! never removed; only `status` and `action_taken` change after creation,
//! and only through the identifier-keyed update methods.

use crate::config::IdFormat;
use crate::error::StoreError;
use crate::export::ExportRow;
use crate::types::{Case, CaseDraft, CaseId, CaseStatus, Status};

/// Ordered case collection with a monotonic id counter
#[derive(Debug, Clone, Default)]
pub struct CaseStore {
    cases: Vec<Case>,
    last_id: u64,
    ids: IdFormat,
}

impl CaseStore {
    /// Create empty store with the default id format
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create empty store rendering ids with `ids`
    #[inline]
    #[must_use]
    pub fn with_id_format(ids: IdFormat) -> Self {
        Self {
            cases: Vec::new(),
            last_id: 0,
            ids,
        }
    }

    /// Append a new case
    ///
    /// Assigns the next identifier and defaults status to Open.
    pub fn create(&mut self, draft: CaseDraft) -> &Case {
        self.last_id += 1;
        let id = CaseId(self.last_id);
        let case = Case::from_draft(id, draft);
        tracing::info!(
            id = %self.render_id(id),
            escalated = case.escalated(),
            status = case.status().as_str(),
            "case created"
        );
        self.cases.push(case);
        &self.cases[self.cases.len() - 1]
    }

    /// Set the board status of a case
    ///
    /// # Errors
    /// Returns [`StoreError::NotFound`] if no case has this id
    pub fn update_status(&mut self, id: CaseId, status: Status) -> Result<(), StoreError> {
        let rendered = self.render_id(id);
        let case = self.get_mut(id)?;
        let previous = std::mem::replace(&mut case.status, CaseStatus::Tracked(status));
        tracing::info!(id = %rendered, from = previous.as_str(), to = status.as_str(), "status updated");
        Ok(())
    }

    /// Set the board status from operator text
    ///
    /// # Errors
    /// Returns [`StoreError::InvalidStatus`] for text outside the three
    /// statuses, or [`StoreError::NotFound`] for an unknown id. The store
    /// is unchanged on error.
    pub fn update_status_str(&mut self, id: CaseId, status: &str) -> Result<(), StoreError> {
        let status: Status = status.parse()?;
        self.update_status(id, status)
    }

    /// Overwrite the action-taken note of a case
    ///
    /// # Errors
    /// Returns [`StoreError::NotFound`] if no case has this id
    pub fn update_action_taken(
        &mut self,
        id: CaseId,
        text: impl Into<String>,
    ) -> Result<(), StoreError> {
        let case = self.get_mut(id)?;
        case.action_taken = text.into();
        Ok(())
    }

    /// Look up a case
    #[must_use]
    pub fn get(&self, id: CaseId) -> Option<&Case> {
        self.index_of(id).map(|i| &self.cases[i])
    }

    fn get_mut(&mut self, id: CaseId) -> Result<&mut Case, StoreError> {
        match self.index_of(id) {
            Some(i) => Ok(&mut self.cases[i]),
            None => Err(StoreError::NotFound {
                id,
                label: self.render_id(id),
            }),
        }
    }

    // Ids are assigned in push order, so the collection is sorted by id.
    fn index_of(&self, id: CaseId) -> Option<usize> {
        self.cases.binary_search_by_key(&id, Case::id).ok()
    }

    /// All cases in insertion order
    #[inline]
    #[must_use]
    pub fn list_all(&self) -> &[Case] {
        &self.cases
    }

    /// Number of cases
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.cases.len()
    }

    /// Check if store is empty
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cases.is_empty()
    }

    /// Identifier format used for rendering
    #[inline]
    #[must_use]
    pub fn id_format(&self) -> &IdFormat {
        &self.ids
    }

    /// Render an id with this store's format
    #[inline]
    #[must_use]
    pub fn render_id(&self, id: CaseId) -> String {
        id.render(&self.ids.prefix, self.ids.width)
    }

    /// Parse an id in this store's format
    ///
    /// # Errors
    /// Returns [`StoreError::InvalidId`] if the text is not an id
    pub fn parse_id(&self, text: &str) -> Result<CaseId, StoreError> {
        CaseId::parse_with_prefix(text, &self.ids.prefix)
    }

    /// Ordered field projection for spreadsheet export
    #[must_use]
    pub fn export_rows(&self) -> Vec<ExportRow> {
        self.cases
            .iter()
            .map(|case| ExportRow::from_case(case, &self.render_id(case.id())))
            .collect()
    }
}
