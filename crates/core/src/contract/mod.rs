//! Contract types shared by every table client
//!
//! ## Module Structure
//!
//! - `etag`: opaque version markers and the match-all wildcard
//! - `timestamp`: microsecond last-modified timestamps
//! - `response`: result envelopes (`Response`, `NullableResponse`, `TableItem`)

pub mod etag;
pub mod response;
pub mod timestamp;

// Re-exports
pub use etag::ETag;
pub use response::{NullableResponse, RawResponse, Response, TableItem};
pub use timestamp::Timestamp;
