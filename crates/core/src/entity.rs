//! Entity capability traits
//!
//! A table stores entities of one element type `T: TableEntity`. Callers
//! read and write through *shapes*: any type implementing
//! [`EntityShape<T>`] can be converted into the stored element type and
//! reinterpreted back out of it. Every `T` is trivially a shape of itself.
//!
//! Heterogeneous tables use an enum as the element type with one variant
//! per record shape. Each variant's payload implements `EntityShape<Enum>`
//! and refuses to be reinterpreted from the other variants, which surfaces
//! as [`TableError::TypeMismatch`].
//!
//! ```
//! use tablefake_core::{impl_table_entity, EntityMeta};
//!
//! #[derive(Debug, Clone)]
//! struct Customer {
//!     meta: EntityMeta,
//!     name: String,
//! }
//!
//! impl_table_entity!(Customer, meta);
//! ```

use crate::contract::{ETag, Timestamp};
use crate::error::{Result, TableError};
use serde::{Deserialize, Serialize};

/// Base capability every stored entity has
///
/// Entities are addressed by `(partition_key, row_key)`. The store owns the
/// etag and timestamp: both are overwritten on every successful write.
pub trait TableEntity: Clone + Send + Sync + 'static {
    /// Partition key
    fn partition_key(&self) -> &str;

    /// Row key, unique within the partition
    fn row_key(&self) -> &str;

    /// Current etag
    fn etag(&self) -> &ETag;

    /// Replace the etag
    fn set_etag(&mut self, etag: ETag);

    /// Last-modified timestamp, `None` if the entity was never stored
    fn timestamp(&self) -> Option<Timestamp>;

    /// Replace the last-modified timestamp
    fn set_timestamp(&mut self, timestamp: Timestamp);
}

/// A record shape that can be stored in a table of `T`
pub trait EntityShape<T: TableEntity>: Sized {
    /// Interpret this value as the table's element type
    fn into_stored(self) -> Result<T>;

    /// Reinterpret a stored element as this shape
    fn from_stored(stored: &T) -> Result<Self>;
}

impl<T: TableEntity> EntityShape<T> for T {
    fn into_stored(self) -> Result<T> {
        Ok(self)
    }

    fn from_stored(stored: &T) -> Result<Self> {
        Ok(stored.clone())
    }
}

/// The mandatory fields of every entity
///
/// Typed entities embed an `EntityMeta` and delegate [`TableEntity`] to it
/// with [`impl_table_entity!`](crate::impl_table_entity). Serializes with the
/// property names the table service uses on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct EntityMeta {
    /// Partition key
    #[serde(rename = "PartitionKey")]
    pub partition_key: String,
    /// Row key
    #[serde(rename = "RowKey")]
    pub row_key: String,
    /// Etag
    #[serde(rename = "ETag", default)]
    pub etag: ETag,
    /// Last-modified timestamp
    #[serde(rename = "Timestamp", default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<Timestamp>,
}

impl EntityMeta {
    /// Metadata for a not-yet-stored entity
    pub fn new(partition_key: impl Into<String>, row_key: impl Into<String>) -> Self {
        EntityMeta {
            partition_key: partition_key.into(),
            row_key: row_key.into(),
            etag: ETag::default(),
            timestamp: None,
        }
    }

    /// Same keys, with an explicit etag
    pub fn with_etag(mut self, etag: impl Into<ETag>) -> Self {
        self.etag = etag.into();
        self
    }
}

impl TableEntity for EntityMeta {
    fn partition_key(&self) -> &str {
        &self.partition_key
    }

    fn row_key(&self) -> &str {
        &self.row_key
    }

    fn etag(&self) -> &ETag {
        &self.etag
    }

    fn set_etag(&mut self, etag: ETag) {
        self.etag = etag;
    }

    fn timestamp(&self) -> Option<Timestamp> {
        self.timestamp
    }

    fn set_timestamp(&mut self, timestamp: Timestamp) {
        self.timestamp = Some(timestamp);
    }
}

/// Implement [`TableEntity`] for a struct by delegating to an
/// [`EntityMeta`] field
#[macro_export]
macro_rules! impl_table_entity {
    ($ty:ty, $field:ident) => {
        impl $crate::TableEntity for $ty {
            fn partition_key(&self) -> &str {
                &self.$field.partition_key
            }

            fn row_key(&self) -> &str {
                &self.$field.row_key
            }

            fn etag(&self) -> &$crate::ETag {
                &self.$field.etag
            }

            fn set_etag(&mut self, etag: $crate::ETag) {
                self.$field.etag = etag;
            }

            fn timestamp(&self) -> Option<$crate::Timestamp> {
                self.$field.timestamp
            }

            fn set_timestamp(&mut self, timestamp: $crate::Timestamp) {
                self.$field.timestamp = Some(timestamp);
            }
        }
    };
}

/// Reinterpret a stored entity as a shape, naming the shape on failure
pub fn reinterpret<T, E>(stored: &T) -> Result<E>
where
    T: TableEntity,
    E: EntityShape<T>,
{
    E::from_stored(stored).map_err(|e| match e {
        TableError::TypeMismatch { .. } => e,
        other => TableError::type_mismatch::<E>(other.to_string()),
    })
}

/// Interpret a shape as the stored element type, naming the element type
/// on failure
pub fn to_stored<T, E>(entity: E) -> Result<T>
where
    T: TableEntity,
    E: EntityShape<T>,
{
    entity.into_stored().map_err(|e| match e {
        TableError::TypeMismatch { .. } => e,
        other => TableError::type_mismatch::<T>(other.to_string()),
    })
}
