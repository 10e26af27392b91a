//! Bearer-token gate for the search tool

use http::{header::AUTHORIZATION, HeaderMap};

/// Process-wide authentication settings, fixed at startup
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthConfig {
    /// Whether callers must present a token
    pub enabled: bool,
    /// The token callers must present
    pub expected_token: Option<String>,
}

impl AuthConfig {
    /// Authentication switched off (development only)
    pub fn disabled() -> Self {
        Self::default()
    }

    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            enabled: true,
            expected_token: Some(token.into()),
        }
    }

    /// Enabled but no token configured; every request is rejected
    pub fn is_misconfigured(&self) -> bool {
        self.enabled && self.expected_token.as_deref().map_or(true, str::is_empty)
    }
}

/// Check a presented credential against the configuration.
///
/// With auth disabled everything passes. With auth enabled an absent or empty
/// credential fails, and so does everything when no token is configured.
pub fn verify(presented: Option<&str>, config: &AuthConfig) -> bool {
    if !config.enabled {
        return true;
    }

    let presented = match presented {
        Some(token) if !token.is_empty() => token,
        _ => return false,
    };

    match config.expected_token.as_deref() {
        Some(expected) if !expected.is_empty() => {
            ring::constant_time::verify_slices_are_equal(presented.as_bytes(), expected.as_bytes())
                .is_ok()
        }
        _ => false,
    }
}

/// Extract the token of an `Authorization: Bearer <token>` header
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?.trim();
    let (scheme, token) = value.split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }
    let token = token.trim();
    (!token.is_empty()).then_some(token)
}

/// Mask a secret for log output, keeping only its length visible
pub fn mask(secret: &str) -> String {
    "*".repeat(secret.chars().count())
}
