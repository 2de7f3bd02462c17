use escalate_core::{
    Assessment, Board, CaseDraft, CaseId, CaseStatus, CaseStore, Sentiment, Status, StoreError,
    Urgency,
};
use proptest::prelude::*;
use std::collections::HashSet;

fn draft(n: usize) -> CaseDraft {
    CaseDraft::new(format!("issue {n}"), Assessment::new(Sentiment::Positive, Urgency::Low))
        .with_owner(format!("owner {n}"))
}

fn any_status() -> impl Strategy<Value = Status> {
    prop_oneof![Just(Status::Open), Just(Status::InProgress), Just(Status::Resolved)]
}

#[derive(Debug, Clone)]
enum Op {
    Create,
    SetStatus(u64, Status),
    SetAction(u64, String),
}

fn any_op() -> impl Strategy<Value = Op> {
    prop_oneof![
        Just(Op::Create),
        (0..40u64, any_status()).prop_map(|(id, s)| Op::SetStatus(id, s)),
        (0..40u64, "[a-z ]{0,12}").prop_map(|(id, t)| Op::SetAction(id, t)),
    ]
}

#[test]
fn open_to_resolved_moves_bucket_only() {
    let mut store = CaseStore::new();
    let id = store.create(draft(1)).id();
    store.create(draft(2));

    let before = store.get(id).cloned().unwrap();
    store.update_status(id, Status::Resolved).unwrap();
    let after = store.get(id).unwrap();

    assert_eq!(after.issue(), before.issue());
    assert_eq!(after.owner(), before.owner());
    assert_eq!(after.sentiment(), before.sentiment());
    assert_eq!(after.reported(), before.reported());

    let board = Board::from_store(&store);
    assert_eq!(board.open.iter().map(|c| c.case_id).collect::<Vec<_>>(), vec![CaseId(2)]);
    assert_eq!(board.resolved.iter().map(|c| c.case_id).collect::<Vec<_>>(), vec![id]);
}

proptest! {
    #[test]
    fn prop_n_creations_yield_n_distinct_ordered_ids(n in 0usize..60) {
        let mut store = CaseStore::new();
        let ids: Vec<CaseId> = (0..n).map(|i| store.create(draft(i)).id()).collect();

        let distinct: HashSet<_> = ids.iter().copied().collect();
        prop_assert_eq!(distinct.len(), n);
        prop_assert!(ids.windows(2).all(|w| w[0] < w[1]));
        prop_assert_eq!(store.len(), n);
    }

    #[test]
    fn prop_mixed_operations_preserve_ids_and_order(ops in proptest::collection::vec(any_op(), 0..80)) {
        let mut store = CaseStore::new();
        let mut created = Vec::new();

        for op in ops {
            match op {
                Op::Create => created.push(store.create(draft(created.len())).id()),
                Op::SetStatus(raw, status) => {
                    let id = CaseId(raw);
                    let snapshot = store.list_all().to_vec();
                    match store.update_status(id, status) {
                        Ok(()) => prop_assert!(created.contains(&id)),
                        Err(StoreError::NotFound { id: missing, label }) => {
                            prop_assert_eq!(missing, id);
                            prop_assert_eq!(label, store.render_id(id));
                            prop_assert_eq!(store.list_all(), snapshot.as_slice());
                        }
                        Err(other) => prop_assert!(false, "unexpected error {:?}", other),
                    }
                }
                Op::SetAction(raw, text) => {
                    let id = CaseId(raw);
                    let known = created.contains(&id);
                    prop_assert_eq!(store.update_action_taken(id, text).is_ok(), known);
                }
            }
        }

        let listed: Vec<CaseId> = store.list_all().iter().map(|c| c.id()).collect();
        prop_assert_eq!(listed, created);
    }

    #[test]
    fn prop_board_partitions_every_tracked_case(statuses in proptest::collection::vec(any_status(), 0..30)) {
        let mut store = CaseStore::new();
        for (i, status) in statuses.iter().enumerate() {
            store.create(draft(i).with_status(*status));
        }
        let board = Board::from_store(&store);

        prop_assert_eq!(board.card_count(), statuses.len());
        for (status, cards) in board.columns() {
            prop_assert!(cards.iter().all(|c| c.status == status));
            prop_assert!(cards.windows(2).all(|w| w[0].case_id < w[1].case_id));
        }
    }

    #[test]
    fn prop_unrecognized_statuses_never_reach_columns(raws in proptest::collection::vec("[A-Za-z]{3,8}", 0..10)) {
        let mut store = CaseStore::new();
        for (i, raw) in raws.iter().enumerate() {
            store.create(draft(i).with_status(CaseStatus::from_cell(raw)));
        }
        let board = Board::from_store(&store);
        let unrecognized = store
            .list_all()
            .iter()
            .filter(|c| c.status().tracked().is_none())
            .count();
        prop_assert_eq!(board.anomalies.len(), unrecognized);
        prop_assert_eq!(board.card_count() + unrecognized, raws.len());
    }
}
