//! Configuration for nostr-webhook.
//!
//! Everything is read from the process environment once at startup and
//! validated before the server opens a port. A missing secret is fatal: the
//! service never serves traffic without one.
//!
//! | Variable       | Required | Default | Meaning                              |
//! |----------------|----------|---------|--------------------------------------|
//! | `SECRET`       | yes      | none    | Bearer token expected on `/webhook/*` |
//! | `WEBHOOK_PORT` | no       | `3000`  | TCP port to listen on (all interfaces) |

use std::{env::VarError, fmt};

/// Environment variable holding the shared bearer secret.
pub const SECRET_ENV: &str = "SECRET";

/// Environment variable overriding the listening port.
pub const PORT_ENV: &str = "WEBHOOK_PORT";

/// Errors raised while loading [`Config`].
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("missing SECRET environment variable")]
    MissingSecret,

    #[error("invalid WEBHOOK_PORT value `{0}`: expected a port number")]
    InvalidPort(String),

    #[error("{0} environment variable is not valid UTF-8")]
    NotUnicode(&'static str),
}

/// Process-wide configuration. Immutable once loaded.
#[derive(Clone, PartialEq, Eq)]
pub struct Config {
    /// Token expected after `Bearer ` in the `Authorization` header.
    pub secret: String,

    /// Port the HTTP listener binds on `0.0.0.0`.
    pub port: u16,
}

impl Config {
    /// Load configuration from the process environment.
    ///
    /// A variable that is set but not valid UTF-8 is reported as such rather
    /// than as missing.
    pub fn from_env() -> Result<Self, ConfigError> {
        for key in [SECRET_ENV, PORT_ENV] {
            if let Err(VarError::NotUnicode(_)) = std::env::var(key) {
                return Err(ConfigError::NotUnicode(key));
            }
        }
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup.
    ///
    /// An empty `SECRET` counts as unset: with an empty secret the header
    /// `Authorization: Bearer ` would authenticate.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let secret = lookup(SECRET_ENV)
            .filter(|s| !s.is_empty())
            .ok_or(ConfigError::MissingSecret)?;

        let port = match lookup(PORT_ENV) {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .map_err(|_| ConfigError::InvalidPort(raw))?,
            None => defaults::port(),
        };

        Ok(Self { secret, port })
    }
}

/// Port the listener uses, without requiring the secret.
///
/// Used by the `--healthcheck` probe, which must run even where `SECRET`
/// isn't exported to the probe's environment.
pub fn port_from_env() -> u16 {
    std::env::var(PORT_ENV)
        .ok()
        .and_then(|v| v.trim().parse::<u16>().ok())
        .unwrap_or_else(defaults::port)
}

// Keep the secret out of logs and panic messages.
impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("secret", &"<redacted>")
            .field("port", &self.port)
            .finish()
    }
}

mod defaults {
    pub fn port() -> u16 { 3000 }
}
