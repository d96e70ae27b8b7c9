//! Registry of pre-seeded tables
//!
//! `TableClientCreator` maps table names to seed sets. Each seed set is
//! registered together with a factory closure that builds a
//! `TableClient<T>` for the element type it was registered with, so no
//! runtime type inspection is needed beyond a final downcast of the
//! factory's output.
//!
//! Every `create_table_client` call builds a new client over its own copy
//! of the seed records; clients created from the same seed set never share
//! state.

use crate::client::TableClient;
use crate::config::FixtureConfig;
use parking_lot::Mutex;
use std::any::Any;
use std::collections::HashMap;
use tablefake_core::{DynamicEntity, Result, TableEntity, TableError};
use tracing::{debug, info};

type ClientFactory = Box<dyn Fn(&str) -> Box<dyn Any + Send> + Send + Sync>;

struct SeedSet {
    element_type: &'static str,
    len: usize,
    factory: ClientFactory,
}

/// Factory of table clients bound to named seed sets
#[derive(Default)]
pub struct TableClientCreator {
    seeds: Mutex<HashMap<String, SeedSet>>,
}

impl std::fmt::Debug for TableClientCreator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TableClientCreator")
            .field("tables", &self.table_names())
            .finish()
    }
}

impl TableClientCreator {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry from a fixture document
    pub fn from_fixtures(config: &FixtureConfig) -> Result<Self> {
        let creator = Self::new();
        creator.load_fixtures(config)?;
        Ok(creator)
    }

    /// Register (or replace) the seed set of `table_name`
    pub fn set_table_data<T: TableEntity>(&self, table_name: impl Into<String>, data: Vec<T>) {
        let table_name = table_name.into();
        let len = data.len();
        let factory: ClientFactory = Box::new(move |name: &str| {
            Box::new(TableClient::new(name, data.clone())) as Box<dyn Any + Send>
        });
        let element_type = std::any::type_name::<T>();
        debug!(target: "tablefake::registry", table = %table_name, element_type, entities = len, "Seed set registered");
        self.seeds.lock().insert(
            table_name,
            SeedSet {
                element_type,
                len,
                factory,
            },
        );
    }

    /// Build a new client over a copy of `table_name`'s seed set
    ///
    /// The connection string is accepted and ignored.
    ///
    /// # Errors
    ///
    /// - `Configuration` if no seed set was registered under `table_name`
    /// - `TypeMismatch` if the seed set was registered with an element type
    ///   other than `T`
    pub fn create_table_client<T: TableEntity>(
        &self,
        table_name: &str,
        _connection_string: &str,
    ) -> Result<TableClient<T>> {
        let seeds = self.seeds.lock();
        let seed = seeds.get(table_name).ok_or_else(|| {
            TableError::Configuration(format!("No initial data set for table {}", table_name))
        })?;
        let client = (seed.factory)(table_name)
            .downcast::<TableClient<T>>()
            .map_err(|_| {
                TableError::type_mismatch::<T>(format!(
                    "table {} was seeded with {}",
                    table_name, seed.element_type
                ))
            })?;
        info!(target: "tablefake::registry", table = %table_name, entities = seed.len, "Table client created");
        Ok(*client)
    }

    /// Register every table of a fixture document as a `DynamicEntity`
    /// seed set, returning the number of tables registered
    pub fn load_fixtures(&self, config: &FixtureConfig) -> Result<usize> {
        for table in &config.tables {
            if table.entities.iter().any(|e| e.partition_key().is_empty() || e.row_key().is_empty()) {
                return Err(TableError::Fixture(format!(
                    "Table '{}' has an entity without PartitionKey or RowKey",
                    table.name
                )));
            }
        }
        for table in &config.tables {
            self.set_table_data::<DynamicEntity>(table.name.clone(), table.entities.clone());
        }
        Ok(config.tables.len())
    }

    /// Whether a seed set exists for `table_name`
    pub fn has_table(&self, table_name: &str) -> bool {
        self.seeds.lock().contains_key(table_name)
    }

    /// Names of all seeded tables, sorted
    pub fn table_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.seeds.lock().keys().cloned().collect();
        names.sort();
        names
    }

    /// Remove a seed set, returning whether it existed
    pub fn remove_table_data(&self, table_name: &str) -> bool {
        self.seeds.lock().remove(table_name).is_some()
    }
}
