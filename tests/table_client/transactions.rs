//! Batch transactions

use crate::common::*;

// ============================================================================
// Commit
// ============================================================================

#[test]
fn mixed_batch_commits() {
    init_tracing();
    let client = seeded_five();
    let responses = client
        .submit_transaction(vec![
            TransactionAction::add(FakeTableEntity::new("pk1", "rk5", "new")),
            TransactionAction::update_replace(FakeTableEntity::new("pk1", "rk4", "updated"), ETag::ALL),
            TransactionAction::delete(FakeTableEntity::new("pk1", "rk1", ""), ETag::ALL),
        ])
        .unwrap();

    assert_eq!(responses.raw().status(), 202);
    let statuses: Vec<u16> = responses.value().iter().map(|r| r.status()).collect();
    assert_eq!(statuses, vec![201, 204, 204]);

    let pk1 = client.partition("pk1").unwrap();
    assert_eq!(pk1["rk5"].value, "new");
    assert_eq!(pk1["rk4"].value, "updated");
    assert_ne!(pk1["rk4"].meta.etag, ETag::new("e4"));
    assert!(!pk1.contains_key("rk1"));
    assert_eq!(client.transaction_metrics().total_committed, 1);
}

#[test]
fn actions_apply_in_order() {
    let client = empty_client();
    client
        .submit_transaction(vec![
            TransactionAction::add(FakeTableEntity::new("pk1", "rk1", "a")),
            TransactionAction::update_merge(FakeTableEntity::new("pk1", "rk1", "b"), ETag::ALL),
            TransactionAction::upsert_replace(FakeTableEntity::new("pk1", "rk1", "c")),
        ])
        .unwrap();
    assert_eq!(get(&client, "pk1", "rk1").value, "c");
}

#[test]
fn upsert_action_ignores_etag() {
    let client = seeded_single();
    client
        .submit_transaction(vec![TransactionAction::new(
            TransactionActionType::UpsertMerge,
            FakeTableEntity::new("pk1", "rk1", "upserted").with_etag("stale"),
        )])
        .unwrap();
    assert_eq!(get(&client, "pk1", "rk1").value, "upserted");
}

#[test]
fn update_of_missing_row_is_noop_in_batch() {
    let client = seeded_single();
    client
        .submit_transaction(vec![TransactionAction::update_merge(
            FakeTableEntity::new("pk1", "rk9", "x"),
            ETag::ALL,
        )])
        .unwrap();
    assert_eq!(client.len(), 1);
}

// ============================================================================
// Rollback
// ============================================================================

#[test]
fn missing_delete_rolls_back_batch() {
    init_tracing();
    let client = seeded_single();
    let before = client.snapshot();

    let err = client
        .submit_transaction(vec![
            TransactionAction::update_replace(FakeTableEntity::new("pk1", "rk1", "changed"), ETag::ALL),
            TransactionAction::delete(FakeTableEntity::new("pk1", "rk99", ""), ETag::ALL),
        ])
        .unwrap_err();

    assert_eq!(
        err,
        TableError::NotFound {
            partition_key: "pk1".into(),
            row_key: "rk99".into()
        }
    );
    assert_eq!(client.snapshot(), before);
    let stored = get(&client, "pk1", "rk1");
    assert_eq!(stored.value, "Value");
    assert_eq!(stored.meta.etag, ETag::new("123"));
}

#[test]
fn conflicting_add_rolls_back_new_partition() {
    let client = seeded_single();
    let before = client.snapshot();

    let err = client
        .submit_transaction(vec![
            TransactionAction::add(FakeTableEntity::new("pk7", "rk1", "new")),
            TransactionAction::add(FakeTableEntity::new("pk1", "rk1", "dup")),
        ])
        .unwrap_err();

    assert!(err.is_conflict());
    assert_eq!(client.snapshot(), before);
    assert!(client.partition("pk7").is_none());
    assert_eq!(client.partition_count(), 1);
}

#[test]
fn precondition_failure_rolls_back() {
    let client = seeded_five();
    let before = client.snapshot();

    let err = client
        .submit_transaction(vec![
            TransactionAction::delete(FakeTableEntity::new("pk1", "rk1", ""), ETag::new("e1")),
            TransactionAction::update_merge(FakeTableEntity::new("pk1", "rk2", "x"), ETag::new("wrong")),
        ])
        .unwrap_err();

    assert!(err.is_precondition_failed());
    assert_eq!(client.snapshot(), before);

    let metrics = client.transaction_metrics();
    assert_eq!(metrics.total_started, 1);
    assert_eq!(metrics.total_rolled_back, 1);
}

#[test]
fn table_usable_after_rollback() {
    let client = seeded_single();
    let _ = client.submit_transaction(vec![TransactionAction::delete(
        FakeTableEntity::new("pk1", "missing", ""),
        ETag::ALL,
    )]);
    client
        .add_entity(FakeTableEntity::new("pk1", "rk2", "after"))
        .unwrap();
    assert_eq!(client.len(), 2);
}

#[test]
fn unstorable_shape_rolls_back_batch() {
    let client = seeded_single();
    let before = client.snapshot();

    let err = client
        .submit_transaction(vec![
            TransactionAction::add(DraftEntity::new("pk2", "rk1", Some("ok"))),
            TransactionAction::add(DraftEntity::new("pk2", "rk2", None)),
        ])
        .unwrap_err();

    match &err {
        TableError::TypeMismatch { reason, .. } => assert!(reason.contains("has no value")),
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(client.snapshot(), before);
    assert!(client.partition("pk2").is_none());
    assert_eq!(client.partition_count(), 1);
    assert_eq!(client.transaction_metrics().total_rolled_back, 1);
}

// ============================================================================
// Action tags
// ============================================================================

#[test]
fn textual_action_tags_parse() {
    let action = TransactionAction::parse(
        "upsertreplace",
        FakeTableEntity::new("pk1", "rk2", "x"),
        ETag::ALL,
    )
    .unwrap();
    assert_eq!(action.action_type, TransactionActionType::UpsertReplace);

    let client = seeded_single();
    client.submit_transaction(vec![action]).unwrap();
    assert_eq!(client.len(), 2);
}

#[test]
fn unknown_action_tag_is_invalid_argument() {
    let err = "Frobnicate".parse::<TransactionActionType>().unwrap_err();
    assert_eq!(
        err,
        TableError::InvalidArgument("Unknown action type: Frobnicate".into())
    );
    assert_eq!(err.status(), 400);
}
