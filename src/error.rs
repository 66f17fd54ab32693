//! Unified HTTP error type for axum request handlers and middleware.
//!
//! [`AppError`] wraps [`anyhow::Error`] and converts it into a `500` response
//! via [`IntoResponse`]. The detail goes to the server log only; callers get a
//! fixed body so nothing about the failure leaks over the wire.
//!
//! # Example
//!
//! ```rust,ignore
//! async fn my_handler() -> Result<&'static str, AppError> {
//!     some_fallible_operation()?;
//!     Ok("ok")
//! }
//! ```

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

/// Body returned for every internal failure.
pub const GENERIC_ERROR: &str = "internal server error";

/// Wraps [`anyhow::Error`] so it can be returned from axum handlers.
///
/// Any type that implements `Into<anyhow::Error>` (which includes `io::Error`,
/// `axum::Error`, and any `#[derive(thiserror::Error)]` type) can be
/// converted into an [`AppError`] via the blanket [`From`] implementation.
#[derive(Debug)]
pub struct AppError(anyhow::Error);

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        tracing::error!(error = %format!("{:#}", self.0), "request failed");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": GENERIC_ERROR })),
        )
            .into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(e: E) -> Self {
        Self(e.into())
    }
}
