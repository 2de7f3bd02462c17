//! Status board projection
//!
//! Partitions cases into the Open / In Progress / Resolved columns. Cases
//! whose recorded status is not one of the three are excluded from every
//! column and returned as [`IntegrityAnomaly`] entries instead.

use crate::config::IdFormat;
use crate::error::StoreError;
use crate::store::CaseStore;
use crate::types::{Case, CaseId, CaseStatus, Criticality, Sentiment, Status, Urgency};
use chrono::NaiveDate;
use serde::Serialize;

/// Visual weight of a card
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum CardTone {
    /// Escalated case
    Escalated,
    /// High urgency, not escalated
    Urgent,
    /// Everything else
    Routine,
}

impl CardTone {
    /// Tone for a case
    #[inline]
    #[must_use]
    pub fn of(case: &Case) -> Self {
        if case.escalated() {
            CardTone::Escalated
        } else if case.urgency() == Urgency::High {
            CardTone::Urgent
        } else {
            CardTone::Routine
        }
    }
}

/// Summary card for one case
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Card {
    pub case_id: CaseId,
    pub label: String,
    pub issue: String,
    pub customer: String,
    pub criticality: Option<Criticality>,
    pub sentiment: Sentiment,
    pub urgency: Urgency,
    pub reported: Option<NaiveDate>,
    pub owner: String,
    pub action_taken: String,
    pub status: Status,
    pub tone: CardTone,
}

impl Card {
    fn new(case: &Case, status: Status, ids: &IdFormat) -> Self {
        Self {
            case_id: case.id(),
            label: case.id().render(&ids.prefix, ids.width),
            issue: case.issue().to_string(),
            customer: case.customer().to_string(),
            criticality: case.criticality(),
            sentiment: case.sentiment(),
            urgency: case.urgency(),
            reported: case.reported(),
            owner: case.owner().to_string(),
            action_taken: case.action_taken().to_string(),
            status,
            tone: CardTone::of(case),
        }
    }

    /// Change the status of the case behind this card
    ///
    /// Writes through [`CaseStore::update_status`]; the card itself is a
    /// snapshot and does not change.
    ///
    /// # Errors
    /// Returns [`StoreError::NotFound`] if the case is not in `store`
    pub fn change_status(&self, store: &mut CaseStore, status: Status) -> Result<(), StoreError> {
        store.update_status(self.case_id, status)
    }
}

/// Case excluded from the board because of its recorded status
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IntegrityAnomaly {
    pub case_id: CaseId,
    pub label: String,
    pub raw_status: String,
}

impl std::fmt::Display for IntegrityAnomaly {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} has unrecognized status '{}' and is not shown on the board",
            self.label, self.raw_status
        )
    }
}

/// Three-column board
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Board {
    pub open: Vec<Card>,
    pub in_progress: Vec<Card>,
    pub resolved: Vec<Card>,
    pub anomalies: Vec<IntegrityAnomaly>,
}

impl Board {
    /// Project the cases of a store
    #[must_use]
    pub fn from_store(store: &CaseStore) -> Self {
        project(store.list_all(), store.id_format())
    }

    /// Cards in one column
    #[inline]
    #[must_use]
    pub fn column(&self, status: Status) -> &[Card] {
        match status {
            Status::Open => &self.open,
            Status::InProgress => &self.in_progress,
            Status::Resolved => &self.resolved,
        }
    }

    /// Columns in board order
    pub fn columns(&self) -> impl Iterator<Item = (Status, &[Card])> {
        Status::ALL.into_iter().map(move |s| (s, self.column(s)))
    }

    /// Check if no column has a card
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.open.is_empty() && self.in_progress.is_empty() && self.resolved.is_empty()
    }

    /// Total number of cards across columns
    #[inline]
    #[must_use]
    pub fn card_count(&self) -> usize {
        self.open.len() + self.in_progress.len() + self.resolved.len()
    }

    /// Find a card by case id
    #[must_use]
    pub fn card(&self, id: CaseId) -> Option<&Card> {
        self.columns()
            .flat_map(|(_, cards)| cards.iter())
            .find(|c| c.case_id == id)
    }
}

/// Partition cases by status, insertion order within each column
#[must_use]
pub fn project(cases: &[Case], ids: &IdFormat) -> Board {
    let mut board = Board::default();
    for case in cases {
        match case.status() {
            CaseStatus::Tracked(status) => {
                let card = Card::new(case, *status, ids);
                match status {
                    Status::Open => board.open.push(card),
                    Status::InProgress => board.in_progress.push(card),
                    Status::Resolved => board.resolved.push(card),
                }
            }
            CaseStatus::Unrecognized(raw) => {
                let anomaly = IntegrityAnomaly {
                    case_id: case.id(),
                    label: case.id().render(&ids.prefix, ids.width),
                    raw_status: raw.clone(),
                };
                tracing::warn!(id = %anomaly.label, status = %raw, "case excluded from board");
                board.anomalies.push(anomaly);
            }
        }
    }
    board
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Assessment, CaseDraft};
    use pretty_assertions::assert_eq;

    fn store_with(statuses: &[CaseStatus]) -> CaseStore {
        let mut store = CaseStore::new();
        for (i, status) in statuses.iter().enumerate() {
            store.create(
                CaseDraft::new(
                    format!("issue {i}"),
                    Assessment::new(Sentiment::Positive, Urgency::Low),
                )
                .with_status(status.clone()),
            );
        }
        store
    }

    #[test]
    fn partitions_by_status_in_insertion_order() {
        let store = store_with(&[
            Status::Open.into(),
            Status::Resolved.into(),
            Status::Open.into(),
            Status::InProgress.into(),
        ]);
        let board = Board::from_store(&store);
        let ids = |cards: &[Card]| cards.iter().map(|c| c.case_id.0).collect::<Vec<_>>();

        assert_eq!(ids(&board.open), vec![1, 3]);
        assert_eq!(ids(&board.in_progress), vec![4]);
        assert_eq!(ids(&board.resolved), vec![2]);
        assert!(board.anomalies.is_empty());
        assert_eq!(board.card_count(), 4);
    }

    #[test]
    fn unrecognized_status_is_reported_not_bucketed() {
        let store = store_with(&[
            Status::Open.into(),
            CaseStatus::Unrecognized("Closed".to_string()),
        ]);
        let board = Board::from_store(&store);

        assert_eq!(board.card_count(), 1);
        assert!(board.card(CaseId(2)).is_none());
        assert_eq!(
            board.anomalies,
            vec![IntegrityAnomaly {
                case_id: CaseId(2),
                label: "CESI-000002".to_string(),
                raw_status: "Closed".to_string(),
            }]
        );
        assert!(board.anomalies[0].to_string().contains("'Closed'"));
    }

    #[test]
    fn card_change_status_moves_case_on_next_projection() {
        let mut store = store_with(&[Status::Open.into(), Status::Open.into()]);
        let before = Board::from_store(&store);
        let card = before.open[0].clone();

        card.change_status(&mut store, Status::Resolved).unwrap();

        let after = Board::from_store(&store);
        assert_eq!(after.open.len(), 1);
        assert_eq!(after.resolved.len(), 1);
        let moved = &after.resolved[0];
        assert_eq!(moved.case_id, card.case_id);
        assert_eq!(moved.issue, card.issue);
        assert_eq!(moved.owner, card.owner);
        assert_eq!(moved.status, Status::Resolved);
    }

    #[test]
    fn tone_reflects_escalation_then_urgency() {
        let mut store = CaseStore::new();
        store.create(CaseDraft::new("a", Assessment::new(Sentiment::Negative, Urgency::High)));
        store.create(CaseDraft::new("b", Assessment::new(Sentiment::Positive, Urgency::High)));
        store.create(CaseDraft::new("c", Assessment::new(Sentiment::Negative, Urgency::Low)));
        let tones: Vec<CardTone> = Board::from_store(&store).open.iter().map(|c| c.tone).collect();
        assert_eq!(tones, vec![CardTone::Escalated, CardTone::Urgent, CardTone::Routine]);
    }

    #[test]
    fn empty_store_projects_empty_board() {
        let board = Board::from_store(&CaseStore::new());
        assert!(board.is_empty());
        assert_eq!(board.columns().count(), 3);
    }
}
