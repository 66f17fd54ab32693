//! Liveness and readiness probe endpoints.
//!
//! None of these touch authentication or any dependency, so they are safe to
//! point Docker / Kubernetes probes at.

use axum::http::StatusCode;

/// `GET /health`: always returns `200 OK` with the body `ok`.
pub async fn health() -> &'static str {
    "ok"
}

/// `GET /livez`: the process is up and serving.
pub async fn livez() -> (StatusCode, &'static str) {
    (StatusCode::OK, "OK")
}

/// `GET /readyz`: ready for traffic. The secret is loaded before the
/// listener binds, so a server that answers is always ready.
pub async fn readyz() -> (StatusCode, &'static str) {
    (StatusCode::OK, "OK")
}
