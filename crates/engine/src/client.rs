//! TableClient: in-memory table storage client
//!
//! ## Design
//!
//! `TableClient<T>` owns one table of element type `T` behind an
//! `Arc<RwLock<..>>`. Clones are additional handles to the same table.
//! Callers never see the internal maps; reads hand out reinterpreted
//! copies and [`TableClient::snapshot`] produces a structural copy.
//!
//! ## Thread Safety
//!
//! Every mutation, including a whole batch transaction, runs under the
//! write lock. Reads share the read lock and therefore observe either the
//! state before or after any mutation.
//!
//! ## Limitations
//!
//! - the `select` projection argument is accepted and ignored
//! - merge and replace update modes both replace the stored entity
//! - string query filters fail with `NotImplemented`
//! - queries return a single page

use crate::query::Pageable;
use crate::table::Table;
use crate::transaction::{TransactionCoordinator, TransactionMetrics};
use parking_lot::RwLock;
use std::collections::BTreeMap;
use std::sync::Arc;
use tablefake_core::{
    reinterpret, to_stored, ETag, EntityShape, NullableResponse, RawResponse, Response, Result,
    TableEntity, TableError, TableItem, TransactionAction, UpdateMode,
};
use tracing::debug;

/// In-memory substitute for a networked table client
///
/// # Example
///
/// ```ignore
/// let client = TableClient::new("people", vec![alice]);
/// client.add_entity(bob)?;
/// let found: Person = client.get_entity("team-a", "bob", None)?.into_value();
/// ```
pub struct TableClient<T> {
    name: Arc<str>,
    table: Arc<RwLock<Table<T>>>,
    coordinator: Arc<TransactionCoordinator>,
}

impl<T> Clone for TableClient<T> {
    fn clone(&self) -> Self {
        TableClient {
            name: Arc::clone(&self.name),
            table: Arc::clone(&self.table),
            coordinator: Arc::clone(&self.coordinator),
        }
    }
}

impl<T> std::fmt::Debug for TableClient<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TableClient")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

impl<T: TableEntity> TableClient<T> {
    /// Create a client over a table seeded with `initial`
    ///
    /// Seed etags and timestamps are kept verbatim; a later entity with the
    /// same keys replaces an earlier one.
    pub fn new(name: impl Into<String>, initial: impl IntoIterator<Item = T>) -> Self {
        let name: String = name.into();
        TableClient {
            name: Arc::from(name),
            table: Arc::new(RwLock::new(Table::from_entities(initial))),
            coordinator: Arc::new(TransactionCoordinator::new()),
        }
    }

    /// Table name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Describe the table; always succeeds
    pub fn create_if_not_exists(&self) -> Response<TableItem> {
        Response::from_value(TableItem::new(self.name.as_ref()), RawResponse::OK)
    }

    // =========================================================================
    // Reads
    // =========================================================================

    /// Read one entity as shape `E`
    ///
    /// Fails with `NotFound` if absent and `TypeMismatch` if the stored
    /// entity is not an `E`. The `select` projection is ignored.
    pub fn get_entity<E: EntityShape<T>>(
        &self,
        partition_key: &str,
        row_key: &str,
        _select: Option<&[&str]>,
    ) -> Result<Response<E>> {
        let table = self.table.read();
        let stored = table
            .get(partition_key, row_key)
            .ok_or_else(|| TableError::not_found(partition_key, row_key))?;
        Ok(Response::ok(reinterpret::<T, E>(stored)?))
    }

    /// Read one entity as shape `E`, without failing when it is absent
    ///
    /// The `select` projection is ignored.
    pub fn get_entity_if_exists<E: EntityShape<T>>(
        &self,
        partition_key: &str,
        row_key: &str,
        _select: Option<&[&str]>,
    ) -> Result<NullableResponse<E>> {
        let table = self.table.read();
        match table.get(partition_key, row_key) {
            Some(stored) => Ok(NullableResponse::present(reinterpret::<T, E>(stored)?)),
            None => Ok(NullableResponse::absent()),
        }
    }

    /// Query every entity as shape `E`, keeping those matching `filter`
    ///
    /// At most `max_per_page` results are returned, in a single page.
    /// Fails with `TypeMismatch` if any stored entity is not an `E`. The
    /// `select` projection is ignored.
    ///
    /// `filter` runs after the read lock is released, so it may call back
    /// into this table.
    pub fn query<E, F>(
        &self,
        filter: F,
        max_per_page: Option<usize>,
        _select: Option<&[&str]>,
    ) -> Result<Pageable<E>>
    where
        E: EntityShape<T>,
        F: Fn(&E) -> bool,
    {
        let stored: Vec<Arc<T>> = self.table.read().entities().cloned().collect();
        let mut values = Vec::new();
        for stored in &stored {
            let entity: E = reinterpret::<T, E>(stored)?;
            if filter(&entity) {
                values.push(entity);
            }
        }
        if let Some(max) = max_per_page {
            values.truncate(max);
        }
        Ok(Pageable::single_page(values))
    }

    /// Query with a textual filter expression
    ///
    /// Only an absent or empty filter is supported, which selects every
    /// entity; any other filter fails with `NotImplemented`.
    pub fn query_filter<E: EntityShape<T>>(
        &self,
        filter: Option<&str>,
        max_per_page: Option<usize>,
        select: Option<&[&str]>,
    ) -> Result<Pageable<E>> {
        match filter {
            Some(f) if !f.is_empty() => Err(TableError::NotImplemented(format!(
                "string query filters are not supported: {}",
                f
            ))),
            _ => self.query(|_: &E| true, max_per_page, select),
        }
    }

    /// Every entity as shape `E`
    pub fn query_all<E: EntityShape<T>>(&self) -> Result<Pageable<E>> {
        self.query(|_: &E| true, None, None)
    }

    // =========================================================================
    // Writes
    // =========================================================================

    /// Insert a new entity
    ///
    /// The stored entity gets a fresh etag and timestamp. Fails with
    /// `Conflict` if the keys are taken.
    pub fn add_entity<E: EntityShape<T>>(&self, entity: E) -> Result<RawResponse> {
        let entity: T = to_stored(entity)?;
        let (pk, rk) = (entity.partition_key().to_string(), entity.row_key().to_string());
        self.table.write().add(entity)?;
        debug!(target: "tablefake::table", table = %self.name, partition_key = %pk, row_key = %rk, "Entity added");
        Ok(RawResponse::CREATED)
    }

    /// Replace an existing entity if `if_match` accepts its etag
    ///
    /// A missing entity is a silent no-op. `mode` is accepted for
    /// compatibility; both modes replace the whole entity.
    pub fn update_entity<E: EntityShape<T>>(
        &self,
        entity: E,
        if_match: &ETag,
        mode: UpdateMode,
    ) -> Result<RawResponse> {
        let entity: T = to_stored(entity)?;
        let (pk, rk) = (entity.partition_key().to_string(), entity.row_key().to_string());
        let applied = self.table.write().update(entity, if_match)?;
        debug!(target: "tablefake::table", table = %self.name, partition_key = %pk, row_key = %rk, ?mode, applied, "Entity updated");
        Ok(RawResponse::NO_CONTENT)
    }

    /// Replace an entity, inserting it if absent
    pub fn upsert_entity<E: EntityShape<T>>(&self, entity: E, mode: UpdateMode) -> Result<RawResponse> {
        let entity: T = to_stored(entity)?;
        let (pk, rk) = (entity.partition_key().to_string(), entity.row_key().to_string());
        let replaced = self.table.write().upsert(entity);
        debug!(target: "tablefake::table", table = %self.name, partition_key = %pk, row_key = %rk, ?mode, replaced, "Entity upserted");
        Ok(RawResponse::NO_CONTENT)
    }

    /// Delete an entity by keys if `if_match` accepts its etag
    ///
    /// A missing entity is a silent no-op.
    pub fn delete_entity(
        &self,
        partition_key: &str,
        row_key: &str,
        if_match: &ETag,
    ) -> Result<RawResponse> {
        let deleted = self
            .table
            .write()
            .delete(partition_key, row_key, false, if_match)?;
        debug!(target: "tablefake::table", table = %self.name, partition_key, row_key, deleted, "Entity deleted");
        Ok(RawResponse::NO_CONTENT)
    }

    /// Delete the entity addressed by `entity`'s keys
    pub fn delete_entity_ref<E: TableEntity>(&self, entity: &E, if_match: &ETag) -> Result<RawResponse> {
        self.delete_entity(entity.partition_key(), entity.row_key(), if_match)
    }

    /// Delete an entity by keys regardless of its etag
    pub fn delete_entity_any(&self, partition_key: &str, row_key: &str) -> Result<RawResponse> {
        self.delete_entity(partition_key, row_key, &ETag::ALL)
    }

    /// Submit a batch; all actions commit or none do
    ///
    /// Returns one response per action, in order. On failure the table is
    /// restored to its pre-batch state and the failing action's error is
    /// returned.
    pub fn submit_transaction<E, I>(&self, actions: I) -> Result<Response<Vec<RawResponse>>>
    where
        E: EntityShape<T>,
        I: IntoIterator<Item = TransactionAction<E>>,
    {
        let actions: Vec<_> = actions.into_iter().collect();
        let mut table = self.table.write();
        let responses = self.coordinator.submit(&self.name, &mut *table, actions)?;
        Ok(Response::from_value(responses, RawResponse::ACCEPTED))
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Structural copy of the whole table
    pub fn snapshot(&self) -> BTreeMap<String, BTreeMap<String, T>> {
        self.table.read().to_btree()
    }

    /// Copy of one partition's rows, `None` if the partition never existed
    pub fn partition(&self, partition_key: &str) -> Option<BTreeMap<String, T>> {
        self.table.read().partition(partition_key).map(|rows| {
            rows.iter()
                .map(|(rk, entity)| (rk.clone(), T::clone(entity)))
                .collect()
        })
    }

    /// Number of stored entities
    pub fn len(&self) -> usize {
        self.table.read().len()
    }

    /// Whether the table holds no entities
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of partitions, including emptied ones
    pub fn partition_count(&self) -> usize {
        self.table.read().partition_count()
    }

    /// Transaction counters for this table
    pub fn transaction_metrics(&self) -> TransactionMetrics {
        self.coordinator.metrics()
    }
}
