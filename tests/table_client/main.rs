//! TableClient integration tests

#[path = "../common/mod.rs"]
mod common;

mod conditional;
mod crud;
mod query;
mod transactions;
