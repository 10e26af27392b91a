//! Client-side settings: environment defaults and the JSON server list

use crate::{
    config::parse_seconds,
    error::{SearchError, SearchResult},
};
use serde::{Deserialize, Serialize};
use std::{collections::BTreeMap, path::Path, time::Duration};

pub const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:9000/mcp/";
pub const DEFAULT_CLIENT_TIMEOUT: Duration = Duration::from_secs(30);
pub const DEFAULT_CLIENT_USER_AGENT: &str =
    concat!("google-search-mcp-client/", env!("CARGO_PKG_VERSION"));
pub const STREAMABLE_HTTP: &str = "streamable-http";

/// Client defaults taken from the environment
#[derive(Debug, Clone)]
pub struct ClientSettings {
    /// Token sent as `Authorization: Bearer`
    pub api_token: Option<String>,
    pub server_url: String,
    pub timeout: Duration,
    pub user_agent: String,
}

impl ClientSettings {
    pub fn from_env() -> SearchResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> SearchResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let timeout = match lookup("TIMEOUT") {
            Some(raw) => parse_seconds("TIMEOUT", &raw)?,
            None => DEFAULT_CLIENT_TIMEOUT,
        };

        Ok(Self {
            api_token: lookup("CLIENT_API_TOKEN").filter(|t| !t.is_empty()),
            server_url: lookup("SERVER_URL").unwrap_or_else(|| DEFAULT_SERVER_URL.to_string()),
            timeout,
            user_agent: lookup("USER_AGENT")
                .unwrap_or_else(|| DEFAULT_CLIENT_USER_AGENT.to_string()),
        })
    }
}

fn default_transport() -> String {
    STREAMABLE_HTTP.to_string()
}

/// One named server entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerEndpoint {
    pub url: String,
    #[serde(default = "default_transport")]
    pub transport: String,
    #[serde(default)]
    pub headers: BTreeMap<String, String>,
}

impl ServerEndpoint {
    /// Endpoint without any authentication header
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            transport: default_transport(),
            headers: BTreeMap::new(),
        }
    }

    /// Endpoint authenticating with `Authorization: Bearer <token>`
    pub fn with_bearer(url: impl Into<String>, token: &str) -> Self {
        Self::new(url).header("Authorization", format!("Bearer {token}"))
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }
}

/// A client configuration document: `{"mcpServers": {"name": {...}}}`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    #[serde(rename = "mcpServers", default)]
    pub servers: BTreeMap<String, ServerEndpoint>,
}

impl ClientConfig {
    /// Load a configuration file, substituting `${VAR}` header values
    pub fn load(path: impl AsRef<Path>) -> SearchResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| {
            SearchError::ConfigError(format!("cannot read {}: {e}", path.display()))
        })?;
        Self::parse(&text, |key| std::env::var(key).ok())
            .map_err(|e| match e {
                SearchError::ConfigError(msg) => {
                    SearchError::ConfigError(format!("{}: {msg}", path.display()))
                }
                other => other,
            })
    }

    /// Parse a configuration document with an explicit variable lookup
    pub fn parse<F>(text: &str, lookup: F) -> SearchResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config: ClientConfig = serde_json::from_str(text)
            .map_err(|e| SearchError::ConfigError(format!("invalid JSON: {e}")))?;

        for (name, endpoint) in config.servers.iter_mut() {
            if endpoint.transport != STREAMABLE_HTTP {
                return Err(SearchError::ConfigError(format!(
                    "server '{name}' uses unsupported transport '{}'",
                    endpoint.transport
                )));
            }
            for value in endpoint.headers.values_mut() {
                substitute_env(value, &lookup);
            }
        }

        Ok(config)
    }

    /// The named server, or the only/first one when no name is given
    pub fn server(&self, name: Option<&str>) -> Option<(&str, &ServerEndpoint)> {
        match name {
            Some(name) => self.servers.get_key_value(name).map(|(k, v)| (k.as_str(), v)),
            None => self.servers.iter().next().map(|(k, v)| (k.as_str(), v)),
        }
    }
}

/// Replace a whole-value `${VAR}` placeholder; unset variables keep the placeholder
fn substitute_env<F>(value: &mut String, lookup: &F)
where
    F: Fn(&str) -> Option<String>,
{
    let Some(var) = value
        .strip_prefix("${")
        .and_then(|rest| rest.strip_suffix('}'))
    else {
        return;
    };

    match lookup(var).filter(|v| !v.is_empty()) {
        Some(resolved) => *value = resolved,
        None => log::warn!("Environment variable {var} is not set, using the literal default"),
    }
}
