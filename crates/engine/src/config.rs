//! Fixture configuration
//!
//! Seed sets can be described in a TOML document instead of being built in
//! code. Each `[[tables]]` entry names a table and lists its entities as
//! property bags:
//!
//! ```toml
//! [[tables]]
//! name = "FakeTable"
//!
//! [[tables.entities]]
//! PartitionKey = "pk1"
//! RowKey = "rk1"
//! ETag = "123"
//! Value = "value1"
//! ```
//!
//! Loaded entities are [`DynamicEntity`] records and are registered with
//! [`TableClientCreator::load_fixtures`](crate::TableClientCreator::load_fixtures).

use serde::{Deserialize, Serialize};
use std::path::Path;
use tablefake_core::{DynamicEntity, Result, TableEntity, TableError};

/// Seed set for one table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableFixture {
    /// Table name the seed set is registered under
    pub name: String,
    /// Seed entities
    #[serde(default)]
    pub entities: Vec<DynamicEntity>,
}

/// A fixture document: any number of table seed sets
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FixtureConfig {
    /// Table seed sets, in document order
    #[serde(default)]
    pub tables: Vec<TableFixture>,
}

impl FixtureConfig {
    /// Parse a fixture document
    ///
    /// # Errors
    ///
    /// Returns `Fixture` if the document is not valid TOML, does not match
    /// the fixture layout, or holds an entity with an empty key.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: FixtureConfig = toml::from_str(content)
            .map_err(|e| TableError::Fixture(format!("Invalid fixture document: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse a fixture file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            TableError::Fixture(format!("Failed to read {}: {}", path.display(), e))
        })?;
        Self::from_toml_str(&content)
    }

    /// Look up the seed set of one table
    pub fn table(&self, name: &str) -> Option<&TableFixture> {
        self.tables.iter().find(|t| t.name == name)
    }

    /// Commented template document
    pub fn default_toml() -> &'static str {
        r#"# tablefake fixtures
#
# One [[tables]] entry per table. Every entity needs PartitionKey and
# RowKey; ETag is optional and kept verbatim. Other keys become entity
# properties.

# [[tables]]
# name = "FakeTable"
#
# [[tables.entities]]
# PartitionKey = "pk1"
# RowKey = "rk1"
# Value = "value1"
"#
    }

    fn validate(&self) -> Result<()> {
        for table in &self.tables {
            if table.name.is_empty() {
                return Err(TableError::Fixture("Table name must not be empty".into()));
            }
            for (index, entity) in table.entities.iter().enumerate() {
                if entity.partition_key().is_empty() || entity.row_key().is_empty() {
                    return Err(TableError::Fixture(format!(
                        "Entity {} of table '{}' needs PartitionKey and RowKey",
                        index, table.name
                    )));
                }
            }
        }
        Ok(())
    }
}
