//! HTTP utilities for calling the search API

use crate::error::{SearchError, SearchResult};
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;
use url::Url;

/// Default request timeout for the search API
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);

/// Default user agent sent to the search API
pub const DEFAULT_USER_AGENT: &str = concat!("google-search-mcp/", env!("CARGO_PKG_VERSION"));

/// Error body shape used by Google JSON APIs
#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    error: ApiErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ApiErrorDetail {
    #[serde(default)]
    message: String,
}

/// HTTP client wrapper with search-specific functionality
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
}

impl HttpClient {
    /// Create a new HTTP client with default settings
    pub fn new() -> SearchResult<Self> {
        Self::with_options(DEFAULT_TIMEOUT, DEFAULT_USER_AGENT)
    }

    /// Create a new HTTP client with custom timeout and user agent
    pub fn with_options(timeout: Duration, user_agent: &str) -> SearchResult<Self> {
        let client = Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .build()
            .map_err(|e| SearchError::ConfigError(format!("failed to create HTTP client: {e}")))?;

        Ok(Self { client })
    }

    /// Make a GET request and deserialize the JSON response
    pub async fn get_json<T>(&self, url: &str) -> SearchResult<T>
    where
        T: DeserializeOwned,
    {
        let response = self.client.get(url).send().await?;
        handle_response_json(response).await
    }
}

/// Deserialize a success body, or turn an error status into [`SearchError::Api`]
async fn handle_response_json<T>(response: Response) -> SearchResult<T>
where
    T: DeserializeOwned,
{
    let status = response.status();

    if status.is_success() {
        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    } else {
        let body = response.text().await.unwrap_or_default();
        Err(SearchError::Api {
            status: status.as_u16(),
            message: api_error_message(status, &body),
        })
    }
}

/// Pull the human-readable message out of an API error body
pub fn api_error_message(status: reqwest::StatusCode, body: &str) -> String {
    match serde_json::from_str::<ApiErrorBody>(body) {
        Ok(parsed) if !parsed.error.message.is_empty() => parsed.error.message,
        _ => format!("Request failed with status: {status}"),
    }
}

/// Build a URL with query parameters, keeping their order
pub fn build_url(base_url: &str, params: &[(&str, String)]) -> SearchResult<String> {
    let mut url = Url::parse(base_url)?;

    for (key, value) in params {
        url.query_pairs_mut().append_pair(key, value);
    }

    Ok(url.to_string())
}
