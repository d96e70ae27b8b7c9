//! Seed sets registered in code

use crate::common::*;

#[test]
fn create_returns_seeded_client() {
    init_tracing();
    let creator = TableClientCreator::new();
    creator.set_table_data(
        TABLE,
        vec![FakeTableEntity::new("pk1", "rk1", "Value").with_etag("123")],
    );

    let client = creator
        .create_table_client::<FakeTableEntity>(TABLE, "UseDevelopmentStorage=true")
        .unwrap();
    assert_eq!(client.name(), TABLE);
    let stored = get(&client, "pk1", "rk1");
    assert_eq!(stored.meta.etag, ETag::new("123"));
}

#[test]
fn unseeded_name_is_configuration_error() {
    let creator = TableClientCreator::new();
    creator.set_table_data::<FakeTableEntity>(TABLE, Vec::new());

    let err = creator
        .create_table_client::<FakeTableEntity>("Other", "")
        .unwrap_err();
    assert!(matches!(err, TableError::Configuration(ref msg) if msg.contains("Other")));
    assert_eq!(err.code(), "ConfigurationError");
}

#[test]
fn element_type_must_match_registration() {
    let creator = TableClientCreator::new();
    creator.set_table_data("Mixed", vec![MixedRecord::Counter(CounterEntity::new("pk", "rk", 1))]);

    assert!(creator
        .create_table_client::<FakeTableEntity>("Mixed", "")
        .unwrap_err()
        .is_type_mismatch());
    assert!(creator.create_table_client::<MixedRecord>("Mixed", "").is_ok());
}

#[test]
fn each_client_gets_its_own_copy() {
    let creator = TableClientCreator::new();
    creator.set_table_data(TABLE, vec![FakeTableEntity::new("pk1", "rk1", "seed")]);

    let first = creator.create_table_client::<FakeTableEntity>(TABLE, "").unwrap();
    first
        .update_entity(FakeTableEntity::new("pk1", "rk1", "changed"), &ETag::ALL, UpdateMode::Merge)
        .unwrap();
    first.delete_entity_any("pk1", "rk1").unwrap();

    let second = creator.create_table_client::<FakeTableEntity>(TABLE, "").unwrap();
    assert_eq!(get(&second, "pk1", "rk1").value, "seed");
    assert!(first.is_empty());
}

#[test]
fn registry_is_shareable_across_threads() {
    let creator = std::sync::Arc::new(TableClientCreator::new());
    creator.set_table_data(TABLE, vec![FakeTableEntity::new("pk1", "rk1", "seed")]);

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let creator = std::sync::Arc::clone(&creator);
            std::thread::spawn(move || {
                creator
                    .create_table_client::<FakeTableEntity>(TABLE, "")
                    .map(|c| c.len())
            })
        })
        .collect();
    for handle in handles {
        assert_eq!(handle.join().unwrap().unwrap(), 1);
    }
}
