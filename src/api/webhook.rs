//! `/webhook/*` routes.
//!
//! Every route here sits behind [`bearer_auth_middleware`]. A rejected request
//! gets a bare `401` with no body and never reaches the handler, so its body
//! is not processed. The reason and the full header set are logged at
//! `error` server-side only.

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::{header, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use bytes::Bytes;
use tracing::{error, info, warn};

use crate::{
    api::request_log::header_map,
    auth::{authenticate, AuthError},
    event::NostrEvent,
    state::AppState,
};

/// Build the router mounted under `/webhook`.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/test", get(test_handler).post(test_handler))
        .route_layer(middleware::from_fn_with_state(
            Arc::clone(&state),
            bearer_auth_middleware,
        ))
        .with_state(state)
}

/// Axum middleware: requires `Authorization: Bearer <secret>`.
pub async fn bearer_auth_middleware(
    State(state): State<Arc<AppState>>,
    req: Request,
    next: Next,
) -> Response {
    let outcome = match req.headers().get(header::AUTHORIZATION) {
        None => authenticate("", state.secret()),
        // `to_str` only admits visible ASCII; secrets may be any UTF-8.
        Some(value) => match std::str::from_utf8(value.as_bytes()) {
            Ok(value) => authenticate(value, state.secret()),
            Err(_) => Err(AuthError::MalformedHeader),
        },
    };

    match outcome {
        Ok(()) => next.run(req).await,
        Err(e) => {
            error!(error = %e, headers = ?header_map(req.headers()), "authentication failed");
            StatusCode::UNAUTHORIZED.into_response()
        }
    }
}

/// `GET|POST /webhook/test`: acknowledge an authenticated delivery.
///
/// A non-empty body is decoded as a [`NostrEvent`] and logged. A body that
/// doesn't decode is logged as a warning; the delivery is still acknowledged.
pub async fn test_handler(body: Bytes) -> &'static str {
    if !body.is_empty() {
        log_event(&body);
    }
    "ok"
}

fn log_event(body: &[u8]) {
    match NostrEvent::from_body(body) {
        Ok(event) => info!(
            id = %event.id,
            pubkey = %event.pubkey,
            created_at = %event
                .created_at_utc()
                .map(|t| t.to_rfc3339())
                .unwrap_or_else(|| event.created_at.to_string()),
            kind = event.kind,
            tags = ?event.tags,
            content = %event.content,
            sig = %event.sig,
            "event"
        ),
        Err(e) => warn!(error = %e, "body is not a nostr event"),
    }
}
