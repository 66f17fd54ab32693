//! HTTP surface of nostr-webhook.
//!
//! [`app`] assembles the routes and wraps them in the middleware pipeline.
//! The pipeline is an explicit ordered stack, outermost first:
//!
//! 1. `TraceLayer`: one span per request, status and latency on response
//! 2. panic recovery: panics below become a generic `500`
//! 3. request id: assigns `X-Request-ID` and scopes the log lines
//! 4. request logger: peer, method, path, headers and body
//!
//! Authentication is not part of the global pipeline: it is a route layer on
//! `/webhook/*` only, so the probes and unmatched paths never see it.

use std::sync::Arc;

use axum::{middleware, routing::get, Router};
use tower::ServiceBuilder;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};

use crate::state::AppState;

pub mod health;
pub mod recovery;
pub mod request_id;
pub mod request_log;
pub mod webhook;

/// Build the complete application: routes plus middleware pipeline.
pub fn app(state: Arc<AppState>) -> Router {
    with_pipeline(
        Router::new()
            .route("/health", get(health::health))
            .route("/livez", get(health::livez))
            .route("/readyz", get(health::readyz))
            .nest("/webhook", webhook::router(state)),
    )
}

/// Wrap `routes` in the cross-cutting middleware stack.
pub fn with_pipeline(routes: Router) -> Router {
    routes.layer(
        ServiceBuilder::new()
            .layer(
                TraceLayer::new_for_http()
                    .make_span_with(DefaultMakeSpan::new().level(tracing::Level::INFO))
                    .on_response(DefaultOnResponse::new().level(tracing::Level::INFO)),
            )
            .layer(recovery::catch_panic_layer())
            .layer(middleware::from_fn(request_id::request_id_middleware))
            .layer(middleware::from_fn(request_log::request_log_middleware)),
    )
}
