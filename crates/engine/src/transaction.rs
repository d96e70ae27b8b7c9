//! Batch transaction coordinator
//!
//! A batch is applied and then either committed or rolled back; the log
//! events of `tablefake::txn` carry the state it reached:
//!
//! 1. On entry to Applying the table is shallow-copied (every partition's
//!    row map duplicated, entities shared through `Arc`).
//! 2. Actions are applied in order with the single-entity rules of
//!    [`Table`]; a delete fails if its target is missing.
//! 3. On the first failure the table is reset to the copy and the error
//!    is returned unchanged.
//! 4. Otherwise the batch commits and one response per action is returned.
//!
//! The caller holds the table's write lock for the whole protocol, so no
//! reader observes an intermediate state.

use crate::table::Table;
use std::sync::atomic::{AtomicU64, Ordering};
use tablefake_core::{
    to_stored, EntityShape, RawResponse, Result, TableEntity, TransactionAction,
    TransactionActionType,
};
use tracing::{debug, info, warn};

/// Lifecycle state of a batch, reported in log events
#[derive(Debug, Clone, Copy)]
enum TransactionState {
    /// Actions are being applied
    Applying,
    /// All actions applied
    Committed,
    /// A failure restored the pre-batch table
    RolledBack,
}

/// Snapshot of transaction counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TransactionMetrics {
    /// Batches submitted
    pub total_started: u64,
    /// Batches committed
    pub total_committed: u64,
    /// Batches rolled back
    pub total_rolled_back: u64,
}

/// Applies batches and keeps counters
///
/// Counters use Relaxed ordering; they are observational only.
#[derive(Debug, Default)]
pub struct TransactionCoordinator {
    total_started: AtomicU64,
    total_committed: AtomicU64,
    total_rolled_back: AtomicU64,
}

impl TransactionCoordinator {
    /// Create a coordinator with zeroed counters
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply a batch atomically to `table`
    pub(crate) fn submit<T, E>(
        &self,
        table_name: &str,
        table: &mut Table<T>,
        actions: Vec<TransactionAction<E>>,
    ) -> Result<Vec<RawResponse>>
    where
        T: TableEntity,
        E: EntityShape<T>,
    {
        self.total_started.fetch_add(1, Ordering::Relaxed);
        let action_count = actions.len();
        debug!(target: "tablefake::txn", table = %table_name, actions = action_count, state = ?TransactionState::Applying, "Transaction started");

        let backup = table.clone();
        let mut responses = Vec::with_capacity(action_count);
        for (index, action) in actions.into_iter().enumerate() {
            let action_type = action.action_type;
            match apply_action(table, action) {
                Ok(raw) => responses.push(raw),
                Err(e) => {
                    *table = backup;
                    self.total_rolled_back.fetch_add(1, Ordering::Relaxed);
                    warn!(
                        target: "tablefake::txn",
                        table = %table_name,
                        index,
                        action = %action_type,
                        error = %e,
                        state = ?TransactionState::RolledBack,
                        "Transaction rolled back"
                    );
                    return Err(e);
                }
            }
        }

        self.total_committed.fetch_add(1, Ordering::Relaxed);
        info!(target: "tablefake::txn", table = %table_name, actions = action_count, state = ?TransactionState::Committed, "Transaction committed");
        Ok(responses)
    }

    /// Current counter values
    pub fn metrics(&self) -> TransactionMetrics {
        TransactionMetrics {
            total_started: self.total_started.load(Ordering::Relaxed),
            total_committed: self.total_committed.load(Ordering::Relaxed),
            total_rolled_back: self.total_rolled_back.load(Ordering::Relaxed),
        }
    }
}

fn apply_action<T, E>(table: &mut Table<T>, action: TransactionAction<E>) -> Result<RawResponse>
where
    T: TableEntity,
    E: EntityShape<T>,
{
    let TransactionAction {
        action_type,
        entity,
        etag,
    } = action;
    let entity: T = to_stored(entity)?;
    match action_type {
        TransactionActionType::Add => {
            table.add(entity)?;
            Ok(RawResponse::CREATED)
        }
        TransactionActionType::Delete => {
            table.delete(entity.partition_key(), entity.row_key(), true, &etag)?;
            Ok(RawResponse::NO_CONTENT)
        }
        TransactionActionType::UpdateMerge | TransactionActionType::UpdateReplace => {
            table.update(entity, &etag)?;
            Ok(RawResponse::NO_CONTENT)
        }
        // Upserts carry no precondition
        TransactionActionType::UpsertMerge | TransactionActionType::UpsertReplace => {
            table.upsert(entity);
            Ok(RawResponse::NO_CONTENT)
        }
    }
}
