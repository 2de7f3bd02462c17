//! Core types for Escalate
//!
//! Defines the fundamental records of a tracking session:
//! - Case identifiers
//! - Classifier outputs (sentiment, urgency)
//! - Operator-supplied criticality
//! - Board status and the recorded status of a case
//! - The case record itself

use crate::error::{StoreError, ValidationError};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Unique case identifier (monotonic within a session)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CaseId(pub u64);

impl CaseId {
    /// Raw counter value
    #[inline]
    #[must_use]
    pub fn value(&self) -> u64 {
        self.0
    }

    /// Render as `<prefix>-<zero padded counter>`
    #[must_use]
    pub fn render(&self, prefix: &str, width: usize) -> String {
        format!("{prefix}-{:0width$}", self.0, width = width)
    }

    /// Parse either the rendered form (`CESI-000007`) or a bare counter (`7`)
    ///
    /// The prefix comparison is case-insensitive.
    ///
    /// # Errors
    /// Returns [`StoreError::InvalidId`] when the text is neither form.
    pub fn parse_with_prefix(text: &str, prefix: &str) -> Result<Self, StoreError> {
        let trimmed = text.trim();
        let digits = match trimmed.split_once('-') {
            Some((head, tail)) if head.eq_ignore_ascii_case(prefix) => tail,
            Some(_) => return Err(StoreError::InvalidId(trimmed.to_string())),
            None => trimmed,
        };
        digits
            .parse::<u64>()
            .map(CaseId)
            .map_err(|_| StoreError::InvalidId(trimmed.to_string()))
    }
}

impl std::fmt::Display for CaseId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.render(crate::config::DEFAULT_ID_PREFIX, crate::config::DEFAULT_ID_WIDTH))
    }
}

/// Sentiment detected in the issue text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sentiment {
    /// No negative vocabulary present
    Positive,
    /// At least one negative term present
    Negative,
}

impl Sentiment {
    /// Display label
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Sentiment::Positive => "Positive",
            Sentiment::Negative => "Negative",
        }
    }
}

impl std::fmt::Display for Sentiment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Urgency detected in the issue text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Urgency {
    /// No urgency marker present
    Low,
    /// At least one urgency marker present
    High,
}

impl Urgency {
    /// Display label
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Urgency::Low => "Low",
            Urgency::High => "High",
        }
    }
}

impl std::fmt::Display for Urgency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Criticality as reported by the operator
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Criticality {
    Low,
    Medium,
    High,
}

impl Criticality {
    /// Display label
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Criticality::Low => "Low",
            Criticality::Medium => "Medium",
            Criticality::High => "High",
        }
    }
}

impl std::fmt::Display for Criticality {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Criticality {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "low" => Ok(Criticality::Low),
            "medium" | "med" => Ok(Criticality::Medium),
            "high" => Ok(Criticality::High),
            _ => Err(ValidationError::InvalidCriticality(s.trim().to_string())),
        }
    }
}

/// Board status of a case
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Status {
    Open,
    InProgress,
    Resolved,
}

impl Status {
    /// All statuses in board order
    pub const ALL: [Status; 3] = [Status::Open, Status::InProgress, Status::Resolved];

    /// Display label
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Open => "Open",
            Status::InProgress => "In Progress",
            Status::Resolved => "Resolved",
        }
    }
}

impl Default for Status {
    fn default() -> Self {
        Status::Open
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Status {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .to_lowercase()
            .chars()
            .map(|c| if c == '-' || c == '_' { ' ' } else { c })
            .collect();
        match normalized.split_whitespace().collect::<Vec<_>>().join(" ").as_str() {
            "open" => Ok(Status::Open),
            "in progress" => Ok(Status::InProgress),
            "resolved" => Ok(Status::Resolved),
            _ => Err(StoreError::InvalidStatus(s.trim().to_string())),
        }
    }
}

/// Status as recorded on a case
///
/// Cases created in-session are always `Tracked`. Imported rows keep an
/// unrecognized status verbatim so the board can surface it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CaseStatus {
    /// One of the three board statuses
    Tracked(Status),
    /// Raw status text that matched no board status
    Unrecognized(String),
}

impl CaseStatus {
    /// Parse a raw cell value; empty text means `Open`
    #[must_use]
    pub fn from_cell(raw: &str) -> Self {
        if raw.trim().is_empty() {
            return CaseStatus::Tracked(Status::Open);
        }
        match raw.parse::<Status>() {
            Ok(status) => CaseStatus::Tracked(status),
            Err(_) => CaseStatus::Unrecognized(raw.trim().to_string()),
        }
    }

    /// Board status if tracked
    #[inline]
    #[must_use]
    pub fn tracked(&self) -> Option<Status> {
        match self {
            CaseStatus::Tracked(status) => Some(*status),
            CaseStatus::Unrecognized(_) => None,
        }
    }

    /// Text as written to exports
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            CaseStatus::Tracked(status) => status.as_str(),
            CaseStatus::Unrecognized(raw) => raw.as_str(),
        }
    }
}

impl Default for CaseStatus {
    fn default() -> Self {
        CaseStatus::Tracked(Status::Open)
    }
}

impl From<Status> for CaseStatus {
    fn from(status: Status) -> Self {
        CaseStatus::Tracked(status)
    }
}

/// Classifier verdict for one issue text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assessment {
    /// Detected sentiment
    pub sentiment: Sentiment,
    /// Detected urgency
    pub urgency: Urgency,
    /// Negative sentiment with high urgency
    pub escalated: bool,
    /// Negative terms found, in first-match order
    pub negative_terms: Vec<String>,
    /// Urgency markers found, in first-match order
    pub urgency_terms: Vec<String>,
}

impl Assessment {
    /// Build an assessment, deriving the escalation flag
    #[inline]
    #[must_use]
    pub fn new(sentiment: Sentiment, urgency: Urgency) -> Self {
        Self {
            sentiment,
            urgency,
            escalated: is_escalation(sentiment, urgency),
            negative_terms: Vec::new(),
            urgency_terms: Vec::new(),
        }
    }

    /// With matched terms
    #[inline]
    #[must_use]
    pub fn with_terms(mut self, negative: Vec<String>, urgency: Vec<String>) -> Self {
        self.negative_terms = negative;
        self.urgency_terms = urgency;
        self
    }
}

/// Escalation rule: negative sentiment and high urgency
#[inline]
#[must_use]
pub fn is_escalation(sentiment: Sentiment, urgency: Urgency) -> bool {
    sentiment == Sentiment::Negative && urgency == Urgency::High
}

/// Field values for a case about to be created
#[derive(Debug, Clone)]
pub struct CaseDraft {
    pub customer: String,
    pub issue: String,
    pub criticality: Option<Criticality>,
    pub reported: Option<NaiveDate>,
    pub owner: String,
    pub status: Option<CaseStatus>,
    pub action_taken: String,
    pub assessment: Assessment,
}

impl CaseDraft {
    /// Create draft with the required fields
    #[inline]
    #[must_use]
    pub fn new(issue: impl Into<String>, assessment: Assessment) -> Self {
        Self {
            customer: String::new(),
            issue: issue.into(),
            criticality: None,
            reported: None,
            owner: String::new(),
            status: None,
            action_taken: String::new(),
            assessment,
        }
    }

    /// With customer
    #[inline]
    #[must_use]
    pub fn with_customer(mut self, customer: impl Into<String>) -> Self {
        self.customer = customer.into();
        self
    }

    /// With owner
    #[inline]
    #[must_use]
    pub fn with_owner(mut self, owner: impl Into<String>) -> Self {
        self.owner = owner.into();
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

    /// With initial status
    #[inline]
    #[must_use]
    pub fn with_status(mut self, status: impl Into<CaseStatus>) -> Self {
        self.status = Some(status.into());
        self
    }

    /// With action taken
    #[inline]
    #[must_use]
    pub fn with_action(mut self, action: impl Into<String>) -> Self {
        self.action_taken = action.into();
        self
    }
}

/// One logged escalation
///
/// Fields are read-only outside the store; `status` and `action_taken`
/// change only through [`crate::CaseStore`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Case {
    pub(crate) id: CaseId,
    pub(crate) customer: String,
    pub(crate) issue: String,
    pub(crate) criticality: Option<Criticality>,
    pub(crate) sentiment: Sentiment,
    pub(crate) urgency: Urgency,
    pub(crate) reported: Option<NaiveDate>,
    pub(crate) owner: String,
    pub(crate) status: CaseStatus,
    pub(crate) action_taken: String,
}

impl Case {
    pub(crate) fn from_draft(id: CaseId, draft: CaseDraft) -> Self {
        Self {
            id,
            customer: draft.customer,
            issue: draft.issue,
            criticality: draft.criticality,
            sentiment: draft.assessment.sentiment,
            urgency: draft.assessment.urgency,
            reported: draft.reported,
            owner: draft.owner,
            status: draft.status.unwrap_or_default(),
            action_taken: draft.action_taken,
        }
    }

    #[inline]
    #[must_use]
    pub fn id(&self) -> CaseId {
        self.id
    }

    #[inline]
    #[must_use]
    pub fn customer(&self) -> &str {
        &self.customer
    }

    #[inline]
    #[must_use]
    pub fn issue(&self) -> &str {
        &self.issue
    }

    #[inline]
    #[must_use]
    pub fn criticality(&self) -> Option<Criticality> {
        self.criticality
    }

    #[inline]
    #[must_use]
    pub fn sentiment(&self) -> Sentiment {
        self.sentiment
    }

    #[inline]
    #[must_use]
    pub fn urgency(&self) -> Urgency {
        self.urgency
    }

    /// Derived from sentiment and urgency, never stored
    #[inline]
    #[must_use]
    pub fn escalated(&self) -> bool {
        is_escalation(self.sentiment, self.urgency)
    }

    #[inline]
    #[must_use]
    pub fn reported(&self) -> Option<NaiveDate> {
        self.reported
    }

    #[inline]
    #[must_use]
    pub fn owner(&self) -> &str {
        &self.owner
    }

    #[inline]
    #[must_use]
    pub fn status(&self) -> &CaseStatus {
        &self.status
    }

    #[inline]
    #[must_use]
    pub fn action_taken(&self) -> &str {
        &self.action_taken
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn case_id_render_and_parse() {
        let id = CaseId(7);
        assert_eq!(id.render("CESI", 6), "CESI-000007");
        assert_eq!(id.to_string(), "CESI-000007");
        assert_eq!(CaseId::parse_with_prefix("CESI-000007", "CESI").unwrap(), id);
        assert_eq!(CaseId::parse_with_prefix("cesi-7", "CESI").unwrap(), id);
        assert_eq!(CaseId::parse_with_prefix(" 7 ", "CESI").unwrap(), id);
        assert!(CaseId::parse_with_prefix("ABC-7", "CESI").is_err());
        assert!(CaseId::parse_with_prefix("CESI-x", "CESI").is_err());
    }

    #[test]
    fn escalation_truth_table() {
        assert!(is_escalation(Sentiment::Negative, Urgency::High));
        assert!(!is_escalation(Sentiment::Negative, Urgency::Low));
        assert!(!is_escalation(Sentiment::Positive, Urgency::High));
        assert!(!is_escalation(Sentiment::Positive, Urgency::Low));
    }

    #[test]
    fn status_parsing_variants() {
        assert_eq!("Open".parse::<Status>().unwrap(), Status::Open);
        assert_eq!(" in progress ".parse::<Status>().unwrap(), Status::InProgress);
        assert_eq!("In-Progress".parse::<Status>().unwrap(), Status::InProgress);
        assert_eq!("in_progress".parse::<Status>().unwrap(), Status::InProgress);
        assert_eq!("RESOLVED".parse::<Status>().unwrap(), Status::Resolved);
        assert!(matches!("Closed".parse::<Status>(), Err(StoreError::InvalidStatus(s)) if s == "Closed"));
    }

    #[test]
    fn case_status_from_cell() {
        assert_eq!(CaseStatus::from_cell(""), CaseStatus::Tracked(Status::Open));
        assert_eq!(CaseStatus::from_cell("resolved"), CaseStatus::Tracked(Status::Resolved));
        assert_eq!(
            CaseStatus::from_cell(" Closed "),
            CaseStatus::Unrecognized("Closed".to_string())
        );
    }

    #[test]
    fn criticality_parsing() {
        assert_eq!("medium".parse::<Criticality>().unwrap(), Criticality::Medium);
        assert_eq!("HIGH".parse::<Criticality>().unwrap(), Criticality::High);
        assert!("severe".parse::<Criticality>().is_err());
    }

    #[test]
    fn draft_defaults_to_open() {
        let draft = CaseDraft::new("text", Assessment::new(Sentiment::Positive, Urgency::Low));
        let case = Case::from_draft(CaseId(1), draft);
        assert_eq!(case.status(), &CaseStatus::Tracked(Status::Open));
        assert!(!case.escalated());
    }
}
