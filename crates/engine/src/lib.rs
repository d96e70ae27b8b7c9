//! In-memory table engine for tablefake
//!
//! This crate holds everything that touches stored entities:
//! - TableClient: CRUD, conditional writes and queries over one table
//! - Batch transactions with all-or-nothing rollback
//! - Query paging (sync and stream based)
//! - TableClientCreator: registry of named seed sets
//! - Fixture documents for seeding from TOML

#![warn(missing_docs)]
#![warn(clippy::all)]

mod async_client;
pub mod client;
pub mod config;
pub mod query;
pub mod registry;
mod table;
pub mod transaction;

pub use client::TableClient;
pub use config::{FixtureConfig, TableFixture};
pub use query::{AsyncPageable, Page, Pageable};
pub use registry::TableClientCreator;
pub use transaction::{TransactionCoordinator, TransactionMetrics};
pub use tokio_util::sync::CancellationToken;
