//! Batch transaction action types
//!
//! A batch is an ordered list of [`TransactionAction`]s submitted together.
//! Either every action commits or none does.

use crate::contract::ETag;
use crate::entity::TableEntity;
use crate::error::{Result, TableError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How an update or upsert applies the supplied entity
///
/// The in-memory client treats both modes as a full replace of the stored
/// entity; no field-level merge is performed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum UpdateMode {
    /// Merge properties into the stored entity
    #[default]
    Merge,
    /// Replace the stored entity
    Replace,
}

/// Kind of a batch action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransactionActionType {
    /// Insert; fails if the entity exists
    Add,
    /// Update with merge semantics
    UpdateMerge,
    /// Update with replace semantics
    UpdateReplace,
    /// Delete; fails if the entity is missing
    Delete,
    /// Insert or merge
    UpsertMerge,
    /// Insert or replace
    UpsertReplace,
}

impl TransactionActionType {
    /// Every action type, in declaration order
    pub const ALL: [TransactionActionType; 6] = [
        TransactionActionType::Add,
        TransactionActionType::UpdateMerge,
        TransactionActionType::UpdateReplace,
        TransactionActionType::Delete,
        TransactionActionType::UpsertMerge,
        TransactionActionType::UpsertReplace,
    ];

    /// Canonical tag
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionActionType::Add => "Add",
            TransactionActionType::UpdateMerge => "UpdateMerge",
            TransactionActionType::UpdateReplace => "UpdateReplace",
            TransactionActionType::Delete => "Delete",
            TransactionActionType::UpsertMerge => "UpsertMerge",
            TransactionActionType::UpsertReplace => "UpsertReplace",
        }
    }

    /// Update mode carried by update and upsert actions
    pub fn update_mode(&self) -> Option<UpdateMode> {
        match self {
            TransactionActionType::UpdateMerge | TransactionActionType::UpsertMerge => {
                Some(UpdateMode::Merge)
            }
            TransactionActionType::UpdateReplace | TransactionActionType::UpsertReplace => {
                Some(UpdateMode::Replace)
            }
            TransactionActionType::Add | TransactionActionType::Delete => None,
        }
    }
}

impl fmt::Display for TransactionActionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransactionActionType {
    type Err = TableError;

    /// Parse a tag, ignoring ASCII case
    fn from_str(s: &str) -> Result<Self> {
        TransactionActionType::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| TableError::InvalidArgument(format!("Unknown action type: {}", s)))
    }
}

/// One action of a batch
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionAction<E> {
    /// What to do
    pub action_type: TransactionActionType,
    /// Target entity
    pub entity: E,
    /// If-match precondition for delete and update actions
    pub etag: ETag,
}

impl<E> TransactionAction<E> {
    /// Create an action with an explicit precondition etag
    pub fn with_etag(action_type: TransactionActionType, entity: E, etag: ETag) -> Self {
        TransactionAction {
            action_type,
            entity,
            etag,
        }
    }

    /// Create an action from a textual tag
    ///
    /// Fails with `InvalidArgument` for an unknown tag.
    pub fn parse(tag: &str, entity: E, etag: ETag) -> Result<Self> {
        Ok(TransactionAction::with_etag(tag.parse()?, entity, etag))
    }

    /// Insert action
    pub fn add(entity: E) -> Self {
        TransactionAction::with_etag(TransactionActionType::Add, entity, ETag::ALL)
    }

    /// Delete action guarded by `etag`
    pub fn delete(entity: E, etag: ETag) -> Self {
        TransactionAction::with_etag(TransactionActionType::Delete, entity, etag)
    }

    /// Replace-update action guarded by `etag`
    pub fn update_replace(entity: E, etag: ETag) -> Self {
        TransactionAction::with_etag(TransactionActionType::UpdateReplace, entity, etag)
    }

    /// Merge-update action guarded by `etag`
    pub fn update_merge(entity: E, etag: ETag) -> Self {
        TransactionAction::with_etag(TransactionActionType::UpdateMerge, entity, etag)
    }

    /// Insert-or-replace action
    pub fn upsert_replace(entity: E) -> Self {
        TransactionAction::with_etag(TransactionActionType::UpsertReplace, entity, ETag::ALL)
    }

    /// Insert-or-merge action
    pub fn upsert_merge(entity: E) -> Self {
        TransactionAction::with_etag(TransactionActionType::UpsertMerge, entity, ETag::ALL)
    }
}

impl<E: TableEntity> TransactionAction<E> {
    /// Create an action guarded by the entity's own etag
    pub fn new(action_type: TransactionActionType, entity: E) -> Self {
        let etag = entity.etag().clone();
        TransactionAction::with_etag(action_type, entity, etag)
    }
}
