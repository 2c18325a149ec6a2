//! Ordered header-emission pipeline.
//!
//! One call per response, after rendering: Cache-Control first, then Etag
//! (when a captured body is available), then Last-Modified. Every write goes
//! through the same gate: once response headers have been transmitted, a
//! write is a silent no-op, never an error, and never a reason to drop body
//! content.

use axum::http::{
    HeaderMap, HeaderName, HeaderValue,
    header::{CACHE_CONTROL, ETAG, LAST_MODIFIED},
};
use time::OffsetDateTime;
use tracing::warn;

use crate::domain::classification::PageContext;

use super::{cache_control::cache_control, config::PolicyConfig, etag::body_digest,
    last_modified::last_modified};

/// Which headers one pipeline run actually wrote.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EmittedHeaders {
    pub cache_control: bool,
    pub etag: bool,
    pub last_modified: bool,
}

/// Run the full header decision pipeline against a response's header map.
///
/// `captured_body` is the complete rendered body when capture succeeded;
/// `None` means the body could not be buffered and the Etag phase is
/// skipped. `headers_sent` reflects the response sink: when true, all
/// writes are no-ops.
pub fn emit_headers(
    headers: &mut HeaderMap,
    headers_sent: bool,
    config: &PolicyConfig,
    ctx: &PageContext,
    captured_body: Option<&[u8]>,
    now: OffsetDateTime,
) -> EmittedHeaders {
    let mut emitted = EmittedHeaders::default();

    emitted.cache_control = write_header(
        headers,
        headers_sent,
        CACHE_CONTROL,
        cache_control(config, ctx),
    );

    if config.etag_enabled {
        if let Some(body) = captured_body {
            emitted.etag = write_header(headers, headers_sent, ETAG, body_digest(body));
        }
    }

    if config.last_modified_enabled {
        match last_modified(ctx, now) {
            Ok(value) => {
                emitted.last_modified = write_header(headers, headers_sent, LAST_MODIFIED, value);
            }
            Err(error) => {
                warn!(
                    target = "lacquer::policy",
                    error = %error,
                    "failed to format Last-Modified, header skipped"
                );
            }
        }
    }

    emitted
}

fn write_header(headers: &mut HeaderMap, headers_sent: bool, name: HeaderName, value: String) -> bool {
    if headers_sent {
        return false;
    }
    match HeaderValue::from_str(&value) {
        Ok(parsed) => {
            headers.insert(name, parsed);
            true
        }
        Err(error) => {
            warn!(
                target = "lacquer::policy",
                header = %name,
                error = %error,
                "header value not representable, write skipped"
            );
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::classification::PageClass;
    use time::macros::datetime;

    fn config() -> PolicyConfig {
        PolicyConfig {
            homepage_ttl: 600,
            single_ttl: 3600,
            archive_ttl: 1800,
            default_ttl: 300,
            etag_enabled: true,
            last_modified_enabled: true,
            emoji_scripts_enabled: true,
        }
    }

    fn now() -> OffsetDateTime {
        datetime!(2024-03-01 08:30:00 UTC)
    }

    #[test]
    fn full_header_set_in_order() {
        let mut headers = HeaderMap::new();
        let ctx = PageContext::new(PageClass::Single, false)
            .with_modified_at(Some(datetime!(2024-01-15 10:00:00 UTC)));

        let emitted = emit_headers(&mut headers, false, &config(), &ctx, Some(b"body"), now());

        assert!(emitted.cache_control && emitted.etag && emitted.last_modified);
        let names: Vec<_> = headers.keys().map(|name| name.as_str()).collect();
        assert_eq!(names, ["cache-control", "etag", "last-modified"]);
        assert_eq!(headers[CACHE_CONTROL], "s-maxage=3600");
        assert_eq!(headers[ETAG], "841a2d689ad86bd1611447453c22c6fc");
        assert_eq!(headers[LAST_MODIFIED], "Mon, 15 Jan 2024 10:00:00 GMT");
    }

    #[test]
    fn writes_are_no_ops_once_headers_sent() {
        let mut headers = HeaderMap::new();
        let ctx = PageContext::new(PageClass::Home, false);

        let emitted = emit_headers(&mut headers, true, &config(), &ctx, Some(b"body"), now());

        assert_eq!(emitted, EmittedHeaders::default());
        assert!(headers.is_empty());
    }

    #[test]
    fn etag_skipped_without_captured_body() {
        let mut headers = HeaderMap::new();
        let ctx = PageContext::new(PageClass::Home, false);

        let emitted = emit_headers(&mut headers, false, &config(), &ctx, None, now());

        assert!(emitted.cache_control);
        assert!(!emitted.etag);
        assert!(headers.get(ETAG).is_none());
        assert!(headers.get(CACHE_CONTROL).is_some());
    }

    #[test]
    fn disabled_features_emit_cache_control_only() {
        let mut headers = HeaderMap::new();
        let mut config = config();
        config.etag_enabled = false;
        config.last_modified_enabled = false;
        let ctx = PageContext::new(PageClass::Archive, false);

        emit_headers(&mut headers, false, &config, &ctx, Some(b"body"), now());

        assert_eq!(headers.len(), 1);
        assert_eq!(headers[CACHE_CONTROL], "s-maxage=1800");
    }

    #[test]
    fn etag_value_is_unquoted_digest_of_body() {
        let mut headers = HeaderMap::new();
        let ctx = PageContext::new(PageClass::Other, false);
        let body = b"<html>rendered</html>";

        emit_headers(&mut headers, false, &config(), &ctx, Some(body), now());

        let etag = headers[ETAG].to_str().expect("ascii etag");
        assert_eq!(etag, super::super::etag::body_digest(body));
        assert!(!etag.contains('"'));
    }
}
