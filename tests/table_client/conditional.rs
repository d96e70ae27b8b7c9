//! Etag preconditions and soft no-ops

use crate::common::*;

#[test]
fn update_with_stale_etag_fails() {
    let client = seeded_single();
    let err = client
        .update_entity(
            FakeTableEntity::new("pk1", "rk1", "x"),
            &ETag::new("999"),
            UpdateMode::Merge,
        )
        .unwrap_err();

    assert_eq!(
        err,
        TableError::PreconditionFailed {
            expected: ETag::new("999"),
            actual: ETag::new("123"),
        }
    );
    assert_eq!(err.status(), 412);
    assert_eq!(get(&client, "pk1", "rk1").value, "Value");
}

#[test]
fn delete_with_stale_etag_fails() {
    let client = seeded_single();
    let err = client
        .delete_entity("pk1", "rk1", &ETag::new("999"))
        .unwrap_err();
    assert!(err.is_precondition_failed());
    assert_eq!(client.len(), 1);
}

#[test]
fn empty_etag_only_matches_empty() {
    let client = seeded_single();
    let err = client
        .delete_entity("pk1", "rk1", &ETag::default())
        .unwrap_err();
    assert!(err.is_precondition_failed());
}

#[test]
fn etag_from_previous_read_is_accepted_once() {
    let client = seeded_single();
    let read = get(&client, "pk1", "rk1");

    client
        .update_entity(
            FakeTableEntity::new("pk1", "rk1", "first"),
            read.etag(),
            UpdateMode::Merge,
        )
        .unwrap();

    let err = client
        .update_entity(
            FakeTableEntity::new("pk1", "rk1", "second"),
            read.etag(),
            UpdateMode::Merge,
        )
        .unwrap_err();
    assert!(err.is_precondition_failed());
    assert_eq!(get(&client, "pk1", "rk1").value, "first");
}

#[test]
fn update_missing_row_is_noop() {
    let client = seeded_single();
    let before = client.snapshot();

    client
        .update_entity(
            FakeTableEntity::new("pk1", "rk9", "x"),
            &ETag::new("whatever"),
            UpdateMode::Merge,
        )
        .unwrap();
    client
        .update_entity(
            FakeTableEntity::new("pk9", "rk1", "x"),
            &ETag::ALL,
            UpdateMode::Replace,
        )
        .unwrap();

    assert_eq!(client.snapshot(), before);
    assert!(client.partition("pk9").is_none());
}

#[test]
fn delete_missing_row_is_noop() {
    let client = seeded_single();
    let before = client.snapshot();

    client.delete_entity("pk1", "rk9", &ETag::new("x")).unwrap();
    client.delete_entity("pk9", "rk1", &ETag::ALL).unwrap();

    assert_eq!(client.snapshot(), before);
}
