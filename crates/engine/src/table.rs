//! Two-level entity map
//!
//! `Table<T>` maps partition key → row key → entity. It implements the
//! single-entity mutation rules; callers are responsible for locking.
//!
//! ## Invariants
//!
//! - `(partition_key, row_key)` identifies at most one entity
//! - every successful write stores a freshly generated etag and a
//!   last-modified timestamp strictly later than the replaced entity's
//! - partitions emptied by deletes are kept
//!
//! Entities are held behind `Arc` and replaced wholesale, never mutated in
//! place, so cloning a `Table` is a cheap shallow copy that shares them.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use tablefake_core::{ETag, Result, TableEntity, TableError, Timestamp};

/// Rows of one partition
pub(crate) type Rows<T> = HashMap<String, Arc<T>>;

/// Partition key → row key → entity
#[derive(Debug)]
pub(crate) struct Table<T> {
    partitions: HashMap<String, Rows<T>>,
}

// Derived Clone would require `T: Clone`; the shallow copy only clones Arcs.
impl<T> Clone for Table<T> {
    fn clone(&self) -> Self {
        Table {
            partitions: self.partitions.clone(),
        }
    }
}

impl<T> Default for Table<T> {
    fn default() -> Self {
        Table {
            partitions: HashMap::new(),
        }
    }
}

impl<T: TableEntity> Table<T> {
    /// Build a table from seed entities
    ///
    /// Seed etags and timestamps are kept as given. A later entity with the
    /// same keys replaces an earlier one.
    pub(crate) fn from_entities(entities: impl IntoIterator<Item = T>) -> Self {
        let mut table = Table::default();
        for entity in entities {
            table
                .partitions
                .entry(entity.partition_key().to_string())
                .or_default()
                .insert(entity.row_key().to_string(), Arc::new(entity));
        }
        table
    }

    // =========================================================================
    // Reads
    // =========================================================================

    pub(crate) fn get(&self, partition_key: &str, row_key: &str) -> Option<&Arc<T>> {
        self.partitions
            .get(partition_key)
            .and_then(|rows| rows.get(row_key))
    }

    pub(crate) fn partition(&self, partition_key: &str) -> Option<&Rows<T>> {
        self.partitions.get(partition_key)
    }

    /// All entities across all partitions, in no particular order
    pub(crate) fn entities(&self) -> impl Iterator<Item = &Arc<T>> {
        self.partitions.values().flat_map(|rows| rows.values())
    }

    pub(crate) fn len(&self) -> usize {
        self.partitions.values().map(HashMap::len).sum()
    }

    pub(crate) fn partition_count(&self) -> usize {
        self.partitions.len()
    }

    /// Deep structural copy with deterministic ordering
    pub(crate) fn to_btree(&self) -> BTreeMap<String, BTreeMap<String, T>> {
        self.partitions
            .iter()
            .map(|(pk, rows)| {
                let rows = rows
                    .iter()
                    .map(|(rk, entity)| (rk.clone(), T::clone(entity)))
                    .collect();
                (pk.clone(), rows)
            })
            .collect()
    }

    // =========================================================================
    // Writes
    // =========================================================================

    /// Insert a new entity
    ///
    /// Fails with `Conflict` if the keys are taken.
    pub(crate) fn add(&mut self, mut entity: T) -> Result<()> {
        let rows = self
            .partitions
            .entry(entity.partition_key().to_string())
            .or_default();
        if rows.contains_key(entity.row_key()) {
            return Err(TableError::conflict(
                entity.partition_key(),
                entity.row_key(),
            ));
        }
        stamp(&mut entity, None);
        rows.insert(entity.row_key().to_string(), Arc::new(entity));
        Ok(())
    }

    /// Replace an existing entity
    ///
    /// A missing partition or row is a silent no-op and returns `false`.
    pub(crate) fn update(&mut self, mut entity: T, if_match: &ETag) -> Result<bool> {
        let Some(rows) = self.partitions.get_mut(entity.partition_key()) else {
            return Ok(false);
        };
        let Some(stored) = rows.get_mut(entity.row_key()) else {
            return Ok(false);
        };
        check_precondition(if_match, stored.etag())?;
        stamp(&mut entity, stored.timestamp());
        *stored = Arc::new(entity);
        Ok(true)
    }

    /// Replace an entity, inserting it if absent
    ///
    /// Returns `true` if an existing entity was replaced.
    pub(crate) fn upsert(&mut self, mut entity: T) -> bool {
        let rows = self
            .partitions
            .entry(entity.partition_key().to_string())
            .or_default();
        let previous = rows.get(entity.row_key()).and_then(|e| e.timestamp());
        stamp(&mut entity, previous);
        rows.insert(entity.row_key().to_string(), Arc::new(entity))
            .is_some()
    }

    /// Remove an entity
    ///
    /// A missing partition or row is a no-op returning `false`, or a
    /// `NotFound` error when `throw_if_missing` is set.
    pub(crate) fn delete(
        &mut self,
        partition_key: &str,
        row_key: &str,
        throw_if_missing: bool,
        if_match: &ETag,
    ) -> Result<bool> {
        let missing = || {
            if throw_if_missing {
                Err(TableError::not_found(partition_key, row_key))
            } else {
                Ok(false)
            }
        };
        let Some(rows) = self.partitions.get_mut(partition_key) else {
            return missing();
        };
        let Some(stored) = rows.get(row_key) else {
            return missing();
        };
        check_precondition(if_match, stored.etag())?;
        rows.remove(row_key);
        Ok(true)
    }
}

fn check_precondition(if_match: &ETag, stored: &ETag) -> Result<()> {
    if if_match.matches(stored) {
        Ok(())
    } else {
        Err(TableError::PreconditionFailed {
            expected: if_match.clone(),
            actual: stored.clone(),
        })
    }
}

/// Assign a fresh etag and a last-modified timestamp later than `previous`
fn stamp<T: TableEntity>(entity: &mut T, previous: Option<Timestamp>) {
    entity.set_etag(ETag::generate());
    entity.set_timestamp(Timestamp::now_after(previous));
}
