//! Etag computation over the captured response body.

use md5::{Digest, Md5};

/// Digest the complete rendered body into an `Etag` value.
///
/// MD5 is deliberate: the tag only needs to be cheap and stable for cache
/// revalidation, not collision-resistant against an adversary. The value is
/// emitted verbatim, without the surrounding quotes RFC 9110 prescribes,
/// to stay wire-compatible with what upstream proxies already validate
/// against.
pub fn body_digest(body: &[u8]) -> String {
    let mut hasher = Md5::new();
    hasher.update(body);
    hex::encode(hasher.finalize())
}
