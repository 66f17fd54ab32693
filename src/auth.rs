//! Bearer-token check for the webhook routes.
//!
//! The only accepted shape is `Authorization: Bearer <secret>`: exactly two
//! tokens separated by a single space, the scheme spelled `Bearer` exactly.
//! Every failure is reported to the caller as a bare `401`; the
//! [`AuthError`] variant exists only for the server log.
//!
//! # Security note
//! The token comparison runs in time independent of where the first
//! mismatching byte is. Inputs of different lengths are rejected up front,
//! so the secret's length is observable through timing.

/// Why a request failed authentication.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    #[error("missing authorization header")]
    MissingHeader,

    #[error("invalid authorization header")]
    MalformedHeader,

    #[error("invalid bearer token")]
    InvalidToken,
}

/// The scheme token that must precede the secret.
pub const BEARER_SCHEME: &str = "Bearer";

/// Validate an `Authorization` header value against the configured secret.
///
/// An absent header should be passed as `""`.
pub fn authenticate(authorization: &str, secret: &str) -> Result<(), AuthError> {
    if authorization.is_empty() {
        return Err(AuthError::MissingHeader);
    }

    let parts: Vec<&str> = authorization.split(' ').collect();
    let [scheme, token] = parts.as_slice() else {
        return Err(AuthError::MalformedHeader);
    };

    // Evaluate both halves so a wrong scheme costs the same as a wrong token.
    let scheme_ok = *scheme == BEARER_SCHEME;
    let token_ok = constant_time_eq(token, secret);
    if scheme_ok && token_ok {
        Ok(())
    } else {
        Err(AuthError::InvalidToken)
    }
}

fn constant_time_eq(a: &str, b: &str) -> bool {
    if a.len() != b.len() {
        return false;
    }

    a.bytes()
        .zip(b.bytes())
        .map(|(x, y)| x ^ y)
        .fold(0, |acc, x| acc | x)
        == 0
}
