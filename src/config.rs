//! Server configuration read from the environment

use crate::{
    auth::AuthConfig,
    error::{SearchError, SearchResult},
    providers::google::{GoogleConfig, DEFAULT_BASE_URL},
    utils::http::{DEFAULT_TIMEOUT, DEFAULT_USER_AGENT},
};
use std::time::Duration;

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 9000;
pub const DEFAULT_PATH: &str = "/mcp";

/// Everything the server needs, built once at startup
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub google: GoogleConfig,
    pub host: String,
    pub port: u16,
    /// Path the MCP endpoint is mounted at
    pub path: String,
    pub auth: AuthConfig,
    /// Timeout for calls to the search API
    pub request_timeout: Duration,
    pub user_agent: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            google: GoogleConfig::default(),
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            path: DEFAULT_PATH.to_string(),
            auth: AuthConfig::disabled(),
            request_timeout: DEFAULT_TIMEOUT,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl ServerConfig {
    /// Read configuration from process environment variables
    pub fn from_env() -> SearchResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> SearchResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let port = match lookup("HTTP_PORT") {
            Some(raw) => raw.trim().parse::<u16>().map_err(|_| {
                SearchError::ConfigError(format!("HTTP_PORT must be a port number, got {raw:?}"))
            })?,
            None => defaults.port,
        };

        let request_timeout = match lookup("REQUEST_TIMEOUT") {
            Some(raw) => parse_seconds("REQUEST_TIMEOUT", &raw)?,
            None => defaults.request_timeout,
        };

        Ok(Self {
            google: GoogleConfig {
                api_key: lookup("GOOGLE_API_KEY").unwrap_or_default(),
                cx: lookup("GOOGLE_CSE_ID").unwrap_or_default(),
                base_url: lookup("GOOGLE_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            },
            host: lookup("HTTP_HOST").unwrap_or(defaults.host),
            port,
            path: normalize_path(&lookup("MCP_PATH").unwrap_or(defaults.path)),
            auth: AuthConfig {
                enabled: lookup("ENABLE_AUTH").is_some_and(|v| v.trim().eq_ignore_ascii_case("true")),
                expected_token: lookup("API_TOKEN").filter(|t| !t.is_empty()),
            },
            request_timeout,
            user_agent: lookup("USER_AGENT").unwrap_or(defaults.user_agent),
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn endpoint_url(&self) -> String {
        format!("http://{}:{}{}/", self.host, self.port, self.path)
    }
}

/// Parse a positive number of seconds (fractions allowed)
pub fn parse_seconds(name: &str, raw: &str) -> SearchResult<Duration> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|secs| *secs > 0.0)
        .and_then(|secs| Duration::try_from_secs_f64(secs).ok())
        .ok_or_else(|| {
            SearchError::ConfigError(format!("{name} must be a positive number of seconds, got {raw:?}"))
        })
}

/// Ensure a mount path starts with '/' and has no trailing '/'
fn normalize_path(path: &str) -> String {
    let trimmed = path.trim().trim_matches('/');
    format!("/{trimmed}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(vars: &[(&str, &str)]) -> SearchResult<ServerConfig> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ServerConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.bind_addr(), "127.0.0.1:9000");
        assert_eq!(config.path, "/mcp");
        assert_eq!(config.endpoint_url(), "http://127.0.0.1:9000/mcp/");
        assert!(!config.auth.enabled);
        assert_eq!(config.request_timeout, Duration::from_secs(15));
        assert_eq!(config.google.base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn test_full_environment() {
        let config = config_from(&[
            ("GOOGLE_API_KEY", "key"),
            ("GOOGLE_CSE_ID", "engine"),
            ("HTTP_HOST", "0.0.0.0"),
            ("HTTP_PORT", "8080"),
            ("MCP_PATH", "search/"),
            ("ENABLE_AUTH", "TRUE"),
            ("API_TOKEN", "secret"),
            ("REQUEST_TIMEOUT", "2.5"),
            ("USER_AGENT", "test-agent"),
        ])
        .unwrap();

        assert_eq!(config.google.api_key, "key");
        assert_eq!(config.google.cx, "engine");
        assert_eq!(config.bind_addr(), "0.0.0.0:8080");
        assert_eq!(config.path, "/search");
        assert_eq!(config.auth, AuthConfig::with_token("secret"));
        assert_eq!(config.request_timeout, Duration::from_millis(2500));
        assert_eq!(config.user_agent, "test-agent");
    }

    #[test]
    fn test_enable_auth_only_accepts_true() {
        for value in ["1", "yes", "on", "false", ""] {
            let config = config_from(&[("ENABLE_AUTH", value)]).unwrap();
            assert!(!config.auth.enabled, "ENABLE_AUTH={value:?} should not enable auth");
        }
    }

    #[test]
    fn test_empty_token_is_unset() {
        let config = config_from(&[("ENABLE_AUTH", "true"), ("API_TOKEN", "")]).unwrap();
        assert!(config.auth.enabled);
        assert_eq!(config.auth.expected_token, None);
        assert!(config.auth.is_misconfigured());
    }

    #[test]
    fn test_invalid_numbers_are_config_errors() {
        let err = config_from(&[("HTTP_PORT", "ninety")]).unwrap_err();
        assert!(matches!(err, SearchError::ConfigError(_)));

        let err = config_from(&[("REQUEST_TIMEOUT", "-3")]).unwrap_err();
        assert!(err.to_string().contains("REQUEST_TIMEOUT"));
    }

    #[test]
    fn test_out_of_range_timeout_is_config_error() {
        let err = config_from(&[("REQUEST_TIMEOUT", "1e20")]).unwrap_err();
        assert!(matches!(err, SearchError::ConfigError(_)));

        for raw in ["1e30", "inf", "NaN"] {
            assert!(parse_seconds("TIMEOUT", raw).is_err(), "{raw} should be rejected");
        }
    }
}
