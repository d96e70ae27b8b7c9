//! Core types and traits for tablefake
//!
//! This crate defines the contract shared by every table client:
//! - ETag: opaque version marker with the match-all wildcard
//! - Timestamp: microsecond last-modified timestamps
//! - TableEntity / EntityShape: entity capability and shape conversion
//! - DynamicEntity: property-bag entity bridging to typed shapes via serde
//! - Transaction actions and update modes
//! - Result envelopes: Response, NullableResponse, TableItem
//! - TableError: error taxonomy

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod contract;
pub mod dynamic;
pub mod entity;
pub mod error;
pub mod transaction;

pub use contract::{ETag, NullableResponse, RawResponse, Response, TableItem, Timestamp};
pub use dynamic::DynamicEntity;
pub use entity::{reinterpret, to_stored, EntityMeta, EntityShape, TableEntity};
pub use error::{Result, TableError};
pub use transaction::{TransactionAction, TransactionActionType, UpdateMode};
