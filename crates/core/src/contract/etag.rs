//! Opaque entity version marker
//!
//! Every stored entity carries an `ETag`. A successful add, update or upsert
//! replaces it with a freshly generated one, so a caller holding an old etag
//! can detect concurrent modification.
//!
//! ## Wildcard
//!
//! [`ETag::ALL`] (`*`) matches every stored etag and disables the
//! precondition check.
//!
//! ```
//! use tablefake_core::ETag;
//!
//! let stored = ETag::generate();
//! assert!(ETag::ALL.matches(&stored));
//! assert!(stored.matches(&stored));
//! assert!(!ETag::new("123").matches(&stored));
//! ```

use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;

/// Opaque version marker used for optimistic concurrency
///
/// The default value is the empty etag, which matches nothing but itself.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ETag(Cow<'static, str>);

impl ETag {
    /// Match-all wildcard
    pub const ALL: ETag = ETag(Cow::Borrowed("*"));

    /// Create an etag from an arbitrary string
    pub fn new(value: impl Into<String>) -> Self {
        ETag(Cow::Owned(value.into()))
    }

    /// Generate a fresh, globally unique etag
    pub fn generate() -> Self {
        ETag(Cow::Owned(uuid::Uuid::new_v4().to_string()))
    }

    /// The raw etag string
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Check if this is the match-all wildcard
    #[inline]
    pub fn is_all(&self) -> bool {
        self.0 == "*"
    }

    /// Check if this is the empty etag
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Check whether `self`, used as an if-match precondition, accepts `stored`
    pub fn matches(&self, stored: &ETag) -> bool {
        self.is_all() || self == stored
    }
}

impl fmt::Display for ETag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ETag {
    fn from(value: &str) -> Self {
        ETag::new(value)
    }
}

impl From<String> for ETag {
    fn from(value: String) -> Self {
        ETag(Cow::Owned(value))
    }
}
