//! tablefake - in-memory table storage client for tests
//!
//! tablefake stands in for a networked key/value table client so that code
//! using partition/row-key addressing, etag preconditions and batch
//! transactions can be tested without a network.
//!
//! # Quick Start
//!
//! ```
//! use tablefake::prelude::*;
//!
//! let client = TableClient::new("people", vec![DynamicEntity::new("team-a", "alice")]);
//! client.add_entity(DynamicEntity::new("team-a", "bob"))?;
//!
//! let bob: DynamicEntity = client.get_entity("team-a", "bob", None)?.into_value();
//! client.delete_entity("team-a", "bob", bob.etag())?;
//! assert_eq!(client.len(), 1);
//! # Ok::<(), TableError>(())
//! ```
//!
//! # Architecture
//!
//! - `tablefake-core`: contract types (etags, entities, errors, actions)
//! - `tablefake-engine`: the table client, transactions, paging, registry

pub use tablefake_core::*;
pub use tablefake_engine::{
    AsyncPageable, CancellationToken, FixtureConfig, Page, Pageable, TableClient,
    TableClientCreator, TableFixture, TransactionCoordinator, TransactionMetrics,
};

/// Everything needed to seed and drive a table client
pub mod prelude {
    pub use tablefake_core::{
        impl_table_entity, DynamicEntity, ETag, EntityMeta, EntityShape, NullableResponse,
        RawResponse, Response, Result, TableEntity, TableError, TableItem, Timestamp,
        TransactionAction, TransactionActionType, UpdateMode,
    };
    pub use tablefake_engine::{
        AsyncPageable, CancellationToken, FixtureConfig, Pageable, TableClient,
        TableClientCreator,
    };
}
