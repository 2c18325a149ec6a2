//! Caching-header middleware for the public router.
//!
//! One explicit pipeline per request: load the options snapshot, work out
//! whether the requester is authenticated, let the route render, then read
//! the classification off the response and emit the header set. Body capture
//! for the Etag only happens for bounded bodies; a streaming response passes
//! through untouched rather than being dropped or truncated.

use std::sync::Arc;

use axum::{
    body::{Body, HttpBody},
    extract::{Request, State},
    http::{HeaderMap, StatusCode, header::COOKIE},
    middleware::Next,
    response::{IntoResponse, Response},
};
use bytes::Bytes;
use metrics::counter;
use subtle::ConstantTimeEq;
use time::OffsetDateTime;
use tracing::{debug, error, warn};

use crate::application::repos::OptionsStore;
use crate::domain::classification::{Classified, PageContext};
use crate::domain::entities::OptionsRecord;

use super::{config::PolicyConfig, pipeline::emit_headers};

/// Session cookie the admin surface issues; its presence with the configured
/// token marks a public request as authenticated.
pub const SESSION_COOKIE: &str = "lacquer_session";

/// Bodies larger than this are never buffered for the Etag digest.
const ETAG_CAPTURE_LIMIT_BYTES: usize = 4 * 1024 * 1024;

/// Shared state for the caching-header middleware.
#[derive(Clone)]
pub struct PolicyState {
    pub options: Arc<dyn OptionsStore>,
    pub session_token: Option<Arc<str>>,
}

/// Middleware applying the caching-header policy to every public response.
pub async fn caching_headers_layer(
    State(state): State<PolicyState>,
    request: Request,
    next: Next,
) -> Response {
    // One snapshot per request; a store failure degrades to defaults rather
    // than taking the page down.
    let record = match state.options.load().await {
        Ok(record) => record,
        Err(error) => {
            warn!(
                target = "lacquer::policy",
                error = %error,
                "options store unavailable, using default policy"
            );
            OptionsRecord::default()
        }
    };
    let config = PolicyConfig::from(&record);
    let authenticated = is_authenticated(request.headers(), state.session_token.as_deref());

    let response = next.run(request).await;
    finalize(&config, authenticated, response).await
}

async fn finalize(config: &PolicyConfig, authenticated: bool, response: Response) -> Response {
    let classified = response
        .extensions()
        .get::<Classified>()
        .cloned()
        .unwrap_or_default();
    let ctx = PageContext::new(classified.class, authenticated)
        .with_modified_at(classified.modified_at);

    let (mut parts, body) = response.into_parts();

    let (body, captured) = if config.etag_enabled {
        match capture_body(body).await {
            Ok(outcome) => outcome,
            Err(failure) => return failure,
        }
    } else {
        (body, None)
    };

    let emitted = emit_headers(
        &mut parts.headers,
        false,
        config,
        &ctx,
        captured.as_deref(),
        OffsetDateTime::now_utc(),
    );

    if emitted.cache_control {
        counter!("lacquer_cache_control_emitted_total").increment(1);
    }
    if emitted.etag {
        counter!("lacquer_etag_emitted_total").increment(1);
    }
    if emitted.last_modified {
        counter!("lacquer_last_modified_emitted_total").increment(1);
    }

    debug!(
        target = "lacquer::policy",
        class = ctx.class.as_str(),
        authenticated = ctx.authenticated,
        cache_control = emitted.cache_control,
        etag = emitted.etag,
        last_modified = emitted.last_modified,
        "caching headers applied"
    );

    Response::from_parts(parts, body)
}

/// Buffer a bounded body so the digest covers it exactly once, handing the
/// identical bytes back for delivery. Unbounded or oversized bodies skip the
/// capture phase and stream through unchanged.
async fn capture_body(body: Body) -> Result<(Body, Option<Bytes>), Response> {
    let bounded = body
        .size_hint()
        .upper()
        .is_some_and(|upper| upper <= ETAG_CAPTURE_LIMIT_BYTES as u64);

    if !bounded {
        counter!("lacquer_etag_capture_skipped_total").increment(1);
        debug!(
            target = "lacquer::policy",
            "response body not bufferable, etag skipped"
        );
        return Ok((body, None));
    }

    match axum::body::to_bytes(body, ETAG_CAPTURE_LIMIT_BYTES).await {
        Ok(bytes) => Ok((Body::from(bytes.clone()), Some(bytes))),
        Err(error) => {
            error!(
                target = "lacquer::policy",
                error = %error,
                "failed to collect response body"
            );
            Err(StatusCode::INTERNAL_SERVER_ERROR.into_response())
        }
    }
}

/// A request is authenticated when it presents the admin session cookie and
/// the value matches the configured token. The compare is constant-time so
/// the cookie cannot be guessed byte by byte.
fn is_authenticated(headers: &HeaderMap, session_token: Option<&str>) -> bool {
    let Some(expected) = session_token else {
        return false;
    };
    match session_cookie(headers) {
        Some(value) => value.as_bytes().ct_eq(expected.as_bytes()).into(),
        None => false,
    }
}

fn session_cookie(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(COOKIE)?
        .to_str()
        .ok()?
        .split(';')
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == SESSION_COOKIE)
        .map(|(_, value)| value)
}
