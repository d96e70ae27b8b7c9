//! Queries and paging

use crate::common::*;

#[test]
fn partition_predicate_returns_single_page() {
    let client = seeded_five();
    let results = client
        .query(|e: &FakeTableEntity| e.meta.partition_key == "pk1", None, None)
        .unwrap();

    assert_eq!(results.len(), 4);
    assert_eq!(results.as_pages().len(), 1);
    assert!(results.as_pages()[0].continuation_token().is_none());
    assert!(results.iter().all(|e| e.meta.partition_key == "pk1"));
}

#[test]
fn max_per_page_truncates() {
    let client = seeded_five();
    let results = client
        .query(|_: &FakeTableEntity| true, Some(2), Some(&["Value"][..]))
        .unwrap();
    assert_eq!(results.len(), 2);
}

#[test]
fn pageable_is_restartable() {
    let client = seeded_five();
    let results = client.query_all::<FakeTableEntity>().unwrap();

    let first: Vec<_> = results.iter().map(|e| e.value.clone()).collect();
    let second: Vec<_> = results.iter().map(|e| e.value.clone()).collect();
    assert_eq!(first, second);
    assert_eq!(results.into_vec().len(), 5);
}

#[test]
fn no_match_yields_empty_page() {
    let client = seeded_five();
    let results = client
        .query(|e: &FakeTableEntity| e.value == "absent", None, None)
        .unwrap();
    assert!(results.is_empty());
    assert_eq!(results.as_pages().len(), 1);
}

#[test]
fn string_filter_is_not_implemented() {
    let client = seeded_five();
    let err = client
        .query_filter::<FakeTableEntity>(Some("PartitionKey eq 'pk1'"), None, None)
        .unwrap_err();
    assert_eq!(err.status(), 501);
}

#[test]
fn query_results_are_copies() {
    let client = seeded_five();
    for mut entity in client.query_all::<FakeTableEntity>().unwrap() {
        entity.value.push_str("-local");
    }
    assert_eq!(get(&client, "pk1", "rk1").value, "v1");
}
