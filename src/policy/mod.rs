//! Caching-header policy engine.
//!
//! Decides which caching-related response headers to emit for a page, given
//! its classification, whether the requester is authenticated, and the
//! runtime options snapshot:
//!
//! - **Cache-Control**: `s-maxage=<ttl>` for anonymous traffic, with the TTL
//!   selected per page class; a hard `no-cache` directive for authenticated
//!   requests.
//! - **Etag**: MD5 digest of the fully captured response body.
//! - **Last-Modified**: the content modification time for single content,
//!   otherwise the current time.
//!
//! The decisions themselves are pure functions; [`middleware`] wires them
//! into the axum response path as one explicit, ordered pipeline.

mod cache_control;
mod config;
mod etag;
mod last_modified;
mod middleware;
mod pipeline;

pub use cache_control::{AUTHENTICATED_CACHE_CONTROL, cache_control};
pub use config::{DURATION_CHOICES, PolicyConfig, is_legal_duration};
pub use etag::body_digest;
pub use last_modified::{http_date, last_modified};
pub use middleware::{PolicyState, caching_headers_layer};
pub use pipeline::{EmittedHeaders, emit_headers};
