//! Shared application state injected into handlers via [`axum::extract::State`].

use crate::config::Config;

/// Read-only state built once at startup and shared as `Arc<AppState>`.
///
/// Nothing here is mutated while serving, so handlers never lock.
#[derive(Debug)]
pub struct AppState {
    pub config: Config,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// The bearer secret every `/webhook/*` request must present.
    pub fn secret(&self) -> &str {
        &self.config.secret
    }
}
