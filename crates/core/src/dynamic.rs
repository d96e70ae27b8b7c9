//! Property-bag entity
//!
//! `DynamicEntity` holds the mandatory entity fields plus an arbitrary set
//! of named properties. It is the element type of tables seeded from
//! fixture documents, and it bridges to typed shapes through serde.
//!
//! ```
//! use serde_json::json;
//! use tablefake_core::{DynamicEntity, TableEntity};
//!
//! let entity = DynamicEntity::new("pk1", "rk1").with_property("Value", json!("Value"));
//! assert_eq!(entity.partition_key(), "pk1");
//! assert_eq!(entity.get("Value"), Some(&json!("Value")));
//! ```

use crate::contract::{ETag, Timestamp};
use crate::entity::{EntityMeta, TableEntity};
use crate::error::{Result, TableError};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

const RESERVED: [&str; 4] = ["PartitionKey", "RowKey", "ETag", "Timestamp"];

/// Entity with an open set of properties
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DynamicEntity {
    #[serde(flatten)]
    meta: EntityMeta,
    #[serde(flatten)]
    properties: Map<String, Value>,
}

impl DynamicEntity {
    /// Create an entity with no properties
    pub fn new(partition_key: impl Into<String>, row_key: impl Into<String>) -> Self {
        DynamicEntity {
            meta: EntityMeta::new(partition_key, row_key),
            properties: Map::new(),
        }
    }

    /// Builder-style property insert
    pub fn with_property(mut self, name: impl Into<String>, value: Value) -> Self {
        self.insert(name, value);
        self
    }

    /// Builder-style etag override
    pub fn with_etag(mut self, etag: impl Into<ETag>) -> Self {
        self.meta.etag = etag.into();
        self
    }

    /// Get a property
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.properties.get(name)
    }

    /// Get a string property
    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.properties.get(name).and_then(Value::as_str)
    }

    /// Set a property, returning the previous value
    ///
    /// Reserved names (`PartitionKey`, `RowKey`, `ETag`, `Timestamp`) are
    /// ignored; use the [`TableEntity`] setters for those.
    pub fn insert(&mut self, name: impl Into<String>, value: Value) -> Option<Value> {
        let name = name.into();
        if RESERVED.contains(&name.as_str()) {
            return None;
        }
        self.properties.insert(name, value)
    }

    /// Remove a property
    pub fn remove(&mut self, name: &str) -> Option<Value> {
        self.properties.remove(name)
    }

    /// All non-key properties
    pub fn properties(&self) -> &Map<String, Value> {
        &self.properties
    }

    /// Convert a typed entity into a property bag
    ///
    /// The typed value must serialize to a map. Its key, etag and timestamp
    /// come from its [`TableEntity`] implementation.
    pub fn from_typed<E>(entity: &E) -> Result<Self>
    where
        E: TableEntity + Serialize,
    {
        let mut properties = match serde_json::to_value(entity) {
            Ok(Value::Object(map)) => map,
            Ok(other) => {
                return Err(TableError::type_mismatch::<DynamicEntity>(format!(
                    "{} does not serialize to a property map: {}",
                    std::any::type_name::<E>(),
                    other
                )))
            }
            Err(e) => return Err(TableError::type_mismatch::<DynamicEntity>(e.to_string())),
        };
        for name in RESERVED {
            properties.remove(name);
        }
        let meta = EntityMeta {
            partition_key: entity.partition_key().to_string(),
            row_key: entity.row_key().to_string(),
            etag: entity.etag().clone(),
            timestamp: entity.timestamp(),
        };
        Ok(DynamicEntity { meta, properties })
    }

    /// Reinterpret this property bag as a typed shape
    pub fn to_typed<E: DeserializeOwned>(&self) -> Result<E> {
        let value = serde_json::to_value(self)
            .map_err(|e| TableError::type_mismatch::<E>(e.to_string()))?;
        serde_json::from_value(value).map_err(|e| TableError::type_mismatch::<E>(e.to_string()))
    }
}

impl TableEntity for DynamicEntity {
    fn partition_key(&self) -> &str {
        &self.meta.partition_key
    }

    fn row_key(&self) -> &str {
        &self.meta.row_key
    }

    fn etag(&self) -> &ETag {
        &self.meta.etag
    }

    fn set_etag(&mut self, etag: ETag) {
        self.meta.etag = etag;
    }

    fn timestamp(&self) -> Option<Timestamp> {
        self.meta.timestamp
    }

    fn set_timestamp(&mut self, timestamp: Timestamp) {
        self.meta.timestamp = Some(timestamp);
    }
}
