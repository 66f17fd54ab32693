//! Request logging middleware.
//!
//! Logs connection metadata, the full header set and the raw body of every
//! inbound request before any routing or authentication runs. The body is
//! buffered and handed on unchanged, so downstream extractors see exactly the
//! bytes that were logged.
//!
//! A body whose declared `Content-Length` exceeds [`MAX_BODY_BYTES`] is not
//! buffered or logged; the request is forwarded as-is, so routes that ignore
//! the body (the probes) still answer and body extractors apply their own
//! limit.

use std::{collections::BTreeMap, net::SocketAddr};

use axum::{
    body::{to_bytes, Body},
    extract::{ConnectInfo, Request},
    http::{header, HeaderMap, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use tracing::{info, warn};

/// Largest body the logger will buffer. Matches axum's default extractor limit.
pub const MAX_BODY_BYTES: usize = 2 * 1024 * 1024;

/// Headers as a name → values map, for structured logging.
///
/// Values that are not valid UTF-8 are decoded lossily.
pub fn header_map(headers: &HeaderMap) -> BTreeMap<String, Vec<String>> {
    let mut map: BTreeMap<String, Vec<String>> = BTreeMap::new();
    for (name, value) in headers {
        map.entry(name.as_str().to_owned())
            .or_default()
            .push(String::from_utf8_lossy(value.as_bytes()).into_owned());
    }
    map
}

/// Axum middleware that logs every request, then forwards it.
///
/// The peer address comes from `ConnectInfo`, which is only present when the
/// app is served with `into_make_service_with_connect_info` (not in tests).
pub async fn request_log_middleware(req: Request, next: Next) -> Response {
    let peer = req
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|c| c.0);

    let (parts, body) = req.into_parts();

    info!(
        ip = %peer.map(|p| p.ip().to_string()).unwrap_or_else(|| "-".into()),
        port = peer.map(|p| p.port()).unwrap_or_default(),
        protocol = %parts.uri.scheme_str().unwrap_or("http"),
        version = ?parts.version,
        method = %parts.method,
        path = %parts.uri.path(),
        "request"
    );
    info!(headers = ?header_map(&parts.headers), "request headers");

    let declared_len = parts
        .headers
        .get(header::CONTENT_LENGTH)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse::<usize>().ok());
    if let Some(len) = declared_len.filter(|&len| len > MAX_BODY_BYTES) {
        // Too big to buffer: forward untouched and let the route decide.
        warn!(content_length = len, limit = MAX_BODY_BYTES, "request body not logged");
        return next.run(Request::from_parts(parts, body)).await;
    }

    let bytes = match to_bytes(body, MAX_BODY_BYTES).await {
        Ok(bytes) => bytes,
        Err(e) => {
            warn!(error = %e, limit = MAX_BODY_BYTES, "failed to read request body");
            return StatusCode::BAD_REQUEST.into_response();
        }
    };
    info!(body = %String::from_utf8_lossy(&bytes), "request body");

    next.run(Request::from_parts(parts, Body::from(bytes))).await
}
