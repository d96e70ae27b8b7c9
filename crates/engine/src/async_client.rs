//! Async variants of the TableClient operations
//!
//! Every `*_async` method takes an optional cancellation token. A token
//! that is already cancelled short-circuits with [`TableError::Cancelled`]
//! before the table is touched; otherwise the synchronous operation runs
//! to completion. Nothing here ever awaits on I/O.

use crate::client::TableClient;
use crate::query::AsyncPageable;
use tablefake_core::{
    ETag, EntityShape, NullableResponse, RawResponse, Response, Result, TableEntity, TableError,
    TableItem, TransactionAction, UpdateMode,
};
use tokio_util::sync::CancellationToken;

fn check_cancelled(cancel: Option<&CancellationToken>) -> Result<()> {
    match cancel {
        Some(token) if token.is_cancelled() => Err(TableError::Cancelled),
        _ => Ok(()),
    }
}

impl<T: TableEntity> TableClient<T> {
    /// Async [`create_if_not_exists`](TableClient::create_if_not_exists)
    pub async fn create_if_not_exists_async(
        &self,
        cancel: Option<&CancellationToken>,
    ) -> Result<Response<TableItem>> {
        check_cancelled(cancel)?;
        Ok(self.create_if_not_exists())
    }

    /// Async [`get_entity`](TableClient::get_entity)
    pub async fn get_entity_async<E: EntityShape<T>>(
        &self,
        partition_key: &str,
        row_key: &str,
        select: Option<&[&str]>,
        cancel: Option<&CancellationToken>,
    ) -> Result<Response<E>> {
        check_cancelled(cancel)?;
        self.get_entity(partition_key, row_key, select)
    }

    /// Async [`get_entity_if_exists`](TableClient::get_entity_if_exists)
    pub async fn get_entity_if_exists_async<E: EntityShape<T>>(
        &self,
        partition_key: &str,
        row_key: &str,
        select: Option<&[&str]>,
        cancel: Option<&CancellationToken>,
    ) -> Result<NullableResponse<E>> {
        check_cancelled(cancel)?;
        self.get_entity_if_exists(partition_key, row_key, select)
    }

    /// Async [`query`](TableClient::query)
    pub async fn query_async<E, F>(
        &self,
        filter: F,
        max_per_page: Option<usize>,
        select: Option<&[&str]>,
        cancel: Option<&CancellationToken>,
    ) -> Result<AsyncPageable<E>>
    where
        E: EntityShape<T>,
        F: Fn(&E) -> bool,
    {
        check_cancelled(cancel)?;
        self.query(filter, max_per_page, select).map(AsyncPageable::from)
    }

    /// Async [`query_filter`](TableClient::query_filter)
    pub async fn query_filter_async<E: EntityShape<T>>(
        &self,
        filter: Option<&str>,
        max_per_page: Option<usize>,
        select: Option<&[&str]>,
        cancel: Option<&CancellationToken>,
    ) -> Result<AsyncPageable<E>> {
        check_cancelled(cancel)?;
        self.query_filter(filter, max_per_page, select)
            .map(AsyncPageable::from)
    }

    /// Async [`add_entity`](TableClient::add_entity)
    pub async fn add_entity_async<E: EntityShape<T>>(
        &self,
        entity: E,
        cancel: Option<&CancellationToken>,
    ) -> Result<RawResponse> {
        check_cancelled(cancel)?;
        self.add_entity(entity)
    }

    /// Async [`update_entity`](TableClient::update_entity)
    pub async fn update_entity_async<E: EntityShape<T>>(
        &self,
        entity: E,
        if_match: &ETag,
        mode: UpdateMode,
        cancel: Option<&CancellationToken>,
    ) -> Result<RawResponse> {
        check_cancelled(cancel)?;
        self.update_entity(entity, if_match, mode)
    }

    /// Async [`upsert_entity`](TableClient::upsert_entity)
    pub async fn upsert_entity_async<E: EntityShape<T>>(
        &self,
        entity: E,
        mode: UpdateMode,
        cancel: Option<&CancellationToken>,
    ) -> Result<RawResponse> {
        check_cancelled(cancel)?;
        self.upsert_entity(entity, mode)
    }

    /// Async [`delete_entity`](TableClient::delete_entity)
    pub async fn delete_entity_async(
        &self,
        partition_key: &str,
        row_key: &str,
        if_match: &ETag,
        cancel: Option<&CancellationToken>,
    ) -> Result<RawResponse> {
        check_cancelled(cancel)?;
        self.delete_entity(partition_key, row_key, if_match)
    }

    /// Async [`delete_entity_ref`](TableClient::delete_entity_ref)
    pub async fn delete_entity_ref_async<E: TableEntity>(
        &self,
        entity: &E,
        if_match: &ETag,
        cancel: Option<&CancellationToken>,
    ) -> Result<RawResponse> {
        check_cancelled(cancel)?;
        self.delete_entity_ref(entity, if_match)
    }

    /// Async [`submit_transaction`](TableClient::submit_transaction)
    pub async fn submit_transaction_async<E, I>(
        &self,
        actions: I,
        cancel: Option<&CancellationToken>,
    ) -> Result<Response<Vec<RawResponse>>>
    where
        E: EntityShape<T>,
        I: IntoIterator<Item = TransactionAction<E>>,
    {
        check_cancelled(cancel)?;
        self.submit_transaction(actions)
    }
}
