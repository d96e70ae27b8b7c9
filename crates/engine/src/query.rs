//! Query result paging
//!
//! The in-memory client always answers a query with exactly one page and
//! no continuation token. [`Pageable`] owns its pages, so it can be
//! iterated any number of times; [`AsyncPageable`] exposes the same page as
//! a `Stream`.

use tablefake_core::RawResponse;
use tokio_stream::Iter;

/// One bounded set of query results
#[derive(Debug, Clone, PartialEq)]
pub struct Page<E> {
    values: Vec<E>,
    continuation_token: Option<String>,
    raw: RawResponse,
}

impl<E> Page<E> {
    /// Final page holding `values`
    pub fn from_values(values: Vec<E>) -> Self {
        Page {
            values,
            continuation_token: None,
            raw: RawResponse::OK,
        }
    }

    /// Results on this page
    pub fn values(&self) -> &[E] {
        &self.values
    }

    /// Consume the page, returning its results
    pub fn into_values(self) -> Vec<E> {
        self.values
    }

    /// Token for the next page; always `None` here
    pub fn continuation_token(&self) -> Option<&str> {
        self.continuation_token.as_deref()
    }

    /// Metadata of the call that produced this page
    pub fn raw(&self) -> RawResponse {
        self.raw
    }
}

/// Finite, restartable sequence of query results
#[derive(Debug, Clone, PartialEq)]
pub struct Pageable<E> {
    pages: Vec<Page<E>>,
}

impl<E> Pageable<E> {
    /// A result set consisting of a single page
    pub fn single_page(values: Vec<E>) -> Self {
        Pageable {
            pages: vec![Page::from_values(values)],
        }
    }

    /// The pages
    pub fn as_pages(&self) -> &[Page<E>] {
        &self.pages
    }

    /// Iterate over all results
    pub fn iter(&self) -> impl Iterator<Item = &E> {
        self.pages.iter().flat_map(|p| p.values.iter())
    }

    /// Total number of results
    pub fn len(&self) -> usize {
        self.pages.iter().map(|p| p.values.len()).sum()
    }

    /// Whether the result set is empty
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Collect all results
    pub fn into_vec(self) -> Vec<E> {
        self.pages.into_iter().flat_map(Page::into_values).collect()
    }
}

impl<E> IntoIterator for Pageable<E> {
    type Item = E;
    type IntoIter = std::vec::IntoIter<E>;

    fn into_iter(self) -> Self::IntoIter {
        self.into_vec().into_iter()
    }
}

/// Query results delivered as a stream
#[derive(Debug, Clone, PartialEq)]
pub struct AsyncPageable<E> {
    inner: Pageable<E>,
}

impl<E> AsyncPageable<E> {
    /// The pages
    pub fn as_pages(&self) -> &[Page<E>] {
        self.inner.as_pages()
    }

    /// Stream every result
    pub fn into_stream(self) -> Iter<std::vec::IntoIter<E>> {
        tokio_stream::iter(self.inner.into_vec())
    }

    /// Stream whole pages
    pub fn into_page_stream(self) -> Iter<std::vec::IntoIter<Page<E>>> {
        tokio_stream::iter(self.inner.pages)
    }

    /// Drop back to the synchronous view
    pub fn into_pageable(self) -> Pageable<E> {
        self.inner
    }
}

impl<E> From<Pageable<E>> for AsyncPageable<E> {
    fn from(inner: Pageable<E>) -> Self {
        AsyncPageable { inner }
    }
}
