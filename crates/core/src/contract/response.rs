//! Result envelopes returned by table operations
//!
//! These are pass-through containers: a [`Response<T>`] wraps a value
//! together with the [`RawResponse`] metadata of the call, and a
//! [`NullableResponse<T>`] signals presence for reads that do not fail on a
//! missing entity.
//!
//! ```
//! use tablefake_core::{NullableResponse, Response};
//!
//! let found = Response::ok(42);
//! assert_eq!(*found.value(), 42);
//!
//! let missing: NullableResponse<i32> = NullableResponse::absent();
//! assert!(!missing.has_value());
//! ```

use serde::{Deserialize, Serialize};

/// Metadata of a completed call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawResponse {
    status: u16,
}

impl RawResponse {
    /// Metadata for a call that returned content
    pub const OK: RawResponse = RawResponse { status: 200 };

    /// Metadata for a call that created an entity or table
    pub const CREATED: RawResponse = RawResponse { status: 201 };

    /// Metadata for an accepted batch
    pub const ACCEPTED: RawResponse = RawResponse { status: 202 };

    /// Metadata for a call that returned no content
    pub const NO_CONTENT: RawResponse = RawResponse { status: 204 };

    /// HTTP-style status code
    #[inline]
    pub fn status(&self) -> u16 {
        self.status
    }
}

impl Default for RawResponse {
    fn default() -> Self {
        RawResponse::NO_CONTENT
    }
}

/// A value together with the metadata of the call that produced it
#[derive(Debug, Clone, PartialEq)]
pub struct Response<T> {
    value: T,
    raw: RawResponse,
}

impl<T> Response<T> {
    /// Wrap a value with explicit metadata
    pub fn from_value(value: T, raw: RawResponse) -> Self {
        Response { value, raw }
    }

    /// Wrap a value with `200 OK` metadata
    pub fn ok(value: T) -> Self {
        Response::from_value(value, RawResponse::OK)
    }

    /// Borrow the wrapped value
    #[inline]
    pub fn value(&self) -> &T {
        &self.value
    }

    /// Consume and return the wrapped value
    #[inline]
    pub fn into_value(self) -> T {
        self.value
    }

    /// Metadata of the call
    #[inline]
    pub fn raw(&self) -> RawResponse {
        self.raw
    }
}

impl<T> AsRef<T> for Response<T> {
    fn as_ref(&self) -> &T {
        &self.value
    }
}

/// A possibly absent value
#[derive(Debug, Clone, PartialEq)]
pub struct NullableResponse<T> {
    value: Option<T>,
}

impl<T> NullableResponse<T> {
    /// A present value
    pub fn present(value: T) -> Self {
        NullableResponse { value: Some(value) }
    }

    /// No value
    pub fn absent() -> Self {
        NullableResponse { value: None }
    }

    /// Whether a value is present
    #[inline]
    pub fn has_value(&self) -> bool {
        self.value.is_some()
    }

    /// Borrow the value, if any
    #[inline]
    pub fn value(&self) -> Option<&T> {
        self.value.as_ref()
    }

    /// Consume and return the value, if any
    #[inline]
    pub fn into_value(self) -> Option<T> {
        self.value
    }
}

impl<T> From<Option<T>> for NullableResponse<T> {
    fn from(value: Option<T>) -> Self {
        NullableResponse { value }
    }
}

/// Descriptor of a table, returned by `create_if_not_exists`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TableItem {
    name: String,
}

impl TableItem {
    /// Describe the table with the given name
    pub fn new(name: impl Into<String>) -> Self {
        TableItem { name: name.into() }
    }

    /// Table name
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }
}
