//! Single-entity CRUD

use crate::common::*;

// ============================================================================
// Add / Get
// ============================================================================

#[test]
fn add_then_get_returns_record() {
    let client = empty_client();
    let response = client
        .add_entity(FakeTableEntity::new("pk2", "rk2", "hello"))
        .unwrap();
    assert_eq!(response.status(), 201);

    let stored = get(&client, "pk2", "rk2");
    assert_eq!(stored.value, "hello");
    assert!(!stored.meta.etag.is_empty());
    assert!(stored.meta.timestamp.is_some());
}

#[test]
fn second_add_conflicts() {
    let client = empty_client();
    client
        .add_entity(FakeTableEntity::new("pk2", "rk2", "first"))
        .unwrap();
    let err = client
        .add_entity(FakeTableEntity::new("pk2", "rk2", "second"))
        .unwrap_err();

    assert!(err.is_conflict());
    assert_eq!(err.status(), 409);
    assert_eq!(client.partition("pk2").unwrap().len(), 1);
    assert_eq!(get(&client, "pk2", "rk2").value, "first");
}

#[test]
fn get_missing_is_not_found() {
    let client = seeded_single();
    let err = client
        .get_entity::<FakeTableEntity>("pk1", "nope", None)
        .unwrap_err();
    assert_eq!(
        err,
        TableError::NotFound {
            partition_key: "pk1".into(),
            row_key: "nope".into()
        }
    );

    let err = client
        .get_entity::<FakeTableEntity>("nope", "rk1", None)
        .unwrap_err();
    assert!(err.is_not_found());
}

#[test]
fn get_if_exists_reports_presence() {
    let client = seeded_single();
    let found = client
        .get_entity_if_exists::<FakeTableEntity>("pk1", "rk1", None)
        .unwrap();
    assert!(found.has_value());
    assert_eq!(found.value().unwrap().value, "Value");

    let missing = client
        .get_entity_if_exists::<FakeTableEntity>("pk1", "rk9", None)
        .unwrap();
    assert!(!missing.has_value());
}

#[test]
fn returned_entity_is_a_copy() {
    let client = seeded_single();
    let mut copy = get(&client, "pk1", "rk1");
    copy.value = "changed locally".into();
    assert_eq!(get(&client, "pk1", "rk1").value, "Value");
}

#[test]
fn seeding_keeps_etag_and_last_duplicate() {
    let client = TableClient::new(
        TABLE,
        vec![
            FakeTableEntity::new("pk1", "rk1", "old").with_etag("1"),
            FakeTableEntity::new("pk1", "rk1", "new").with_etag("2"),
        ],
    );
    assert_eq!(client.len(), 1);
    let stored = get(&client, "pk1", "rk1");
    assert_eq!(stored.value, "new");
    assert_eq!(stored.meta.etag, ETag::new("2"));
}

// ============================================================================
// Update / Upsert
// ============================================================================

#[test]
fn update_with_wildcard_replaces_and_rotates_etag() {
    let client = seeded_single();
    client
        .update_entity(
            FakeTableEntity::new("pk1", "rk1", "updated"),
            &ETag::ALL,
            UpdateMode::Merge,
        )
        .unwrap();

    let stored = get(&client, "pk1", "rk1");
    assert_eq!(stored.value, "updated");
    assert_ne!(stored.meta.etag, ETag::new("123"));
    assert_ne!(stored.meta.etag, ETag::ALL);
    assert_eq!(client.partition("pk1").unwrap().len(), 1);
}

#[test]
fn replace_mode_behaves_like_merge() {
    let client = seeded_single();
    client
        .update_entity(
            FakeTableEntity::new("pk1", "rk1", "replaced"),
            &ETag::new("123"),
            UpdateMode::Replace,
        )
        .unwrap();
    assert_eq!(get(&client, "pk1", "rk1").value, "replaced");
}

#[test]
fn upsert_inserts_then_replaces() {
    let client = empty_client();
    client
        .upsert_entity(FakeTableEntity::new("pk1", "rk1", "a"), UpdateMode::Merge)
        .unwrap();
    let first = get(&client, "pk1", "rk1");

    client
        .upsert_entity(
            FakeTableEntity::new("pk1", "rk1", "b").with_etag("stale"),
            UpdateMode::Replace,
        )
        .unwrap();
    let second = get(&client, "pk1", "rk1");

    assert_eq!(second.value, "b");
    assert_ne!(first.meta.etag, second.meta.etag);
    assert!(second.meta.timestamp > first.meta.timestamp);
    assert_eq!(client.len(), 1);
}

// ============================================================================
// Delete
// ============================================================================

#[test]
fn delete_removes_row_but_keeps_partition() {
    let client = seeded_single();
    client.delete_entity("pk1", "rk1", &ETag::new("123")).unwrap();

    assert!(client.is_empty());
    assert_eq!(client.partition_count(), 1);
    assert!(client.partition("pk1").unwrap().is_empty());
}

#[test]
fn delete_by_reference_uses_entity_keys() {
    let client = seeded_single();
    let stored = get(&client, "pk1", "rk1");
    client.delete_entity_ref(&stored, stored.etag()).unwrap();
    assert!(client.is_empty());
}

#[test]
fn delete_any_ignores_stored_etag() {
    let client = seeded_single();
    client.delete_entity_any("pk1", "rk1").unwrap();
    assert!(client.is_empty());
}

#[test]
fn create_if_not_exists_is_idempotent() {
    let client = seeded_single();
    for _ in 0..2 {
        let item = client.create_if_not_exists().into_value();
        assert_eq!(item.name(), TABLE);
    }
    assert_eq!(client.len(), 1);
}

// ============================================================================
// Unstorable shapes
// ============================================================================

#[test]
fn unstorable_shape_is_type_mismatch_on_every_write() {
    let client = seeded_single();
    let before = client.snapshot();

    let err = client
        .add_entity(DraftEntity::new("pk2", "rk1", None))
        .unwrap_err();
    assert!(err.is_type_mismatch());
    assert_eq!(err.status(), 400);

    let err = client
        .update_entity(DraftEntity::new("pk1", "rk1", None), &ETag::ALL, UpdateMode::Merge)
        .unwrap_err();
    assert!(err.is_type_mismatch());

    let err = client
        .upsert_entity(DraftEntity::new("pk1", "rk1", None), UpdateMode::Replace)
        .unwrap_err();
    assert!(err.is_type_mismatch());

    assert_eq!(client.snapshot(), before);
    assert_eq!(client.partition_count(), 1);
}

#[test]
fn storable_draft_writes_through() {
    let client = empty_client();
    client
        .add_entity(DraftEntity::new("pk1", "rk1", Some("ready")))
        .unwrap();
    let draft: DraftEntity = client.get_entity("pk1", "rk1", None).unwrap().into_value();
    assert_eq!(draft.value.as_deref(), Some("ready"));
}
