//! Google Custom Search API provider

use crate::{
    error::{SearchError, SearchResult},
    types::{
        ProviderConfig, SearchPage, SearchProvider, SearchResult as SearchResultType,
        MAX_NUM_RESULTS,
    },
    utils::http::{build_url, HttpClient},
};
use serde::Deserialize;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://www.googleapis.com/customsearch/v1";

/// Google Custom Search API response types
#[derive(Debug, Deserialize)]
struct GoogleSearchItem {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    link: Option<String>,
    #[serde(default)]
    snippet: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GoogleSearchResponse {
    #[serde(default)]
    items: Option<Vec<GoogleSearchItem>>,
    #[serde(rename = "searchInformation", default)]
    search_information: Option<GoogleSearchInfo>,
}

#[derive(Debug, Deserialize)]
struct GoogleSearchInfo {
    #[serde(rename = "totalResults", default)]
    total_results: Option<String>,
}

/// Google Custom Search configuration
#[derive(Debug, Clone)]
pub struct GoogleConfig {
    /// Google API key
    pub api_key: String,
    /// Custom Search Engine ID
    pub cx: String,
    /// Base URL for the API
    pub base_url: String,
}

impl Default for GoogleConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            cx: String::new(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}

impl ProviderConfig for GoogleConfig {
    fn validate(&self) -> Result<(), SearchError> {
        if self.api_key.is_empty() {
            return Err(SearchError::ConfigError(
                "Google API key is required".to_string(),
            ));
        }
        if self.cx.is_empty() {
            return Err(SearchError::ConfigError(
                "Google Search Engine ID (cx) is required".to_string(),
            ));
        }
        Ok(())
    }
}

/// Google Custom Search provider
#[derive(Debug)]
pub struct GoogleProvider {
    config: GoogleConfig,
    http_client: HttpClient,
}

impl GoogleProvider {
    /// Create a new Google provider with API key and Search Engine ID
    pub fn new(api_key: &str, cx: &str) -> SearchResult<Self> {
        Self::with_config(GoogleConfig {
            api_key: api_key.to_string(),
            cx: cx.to_string(),
            ..Default::default()
        })
    }

    /// Create a new Google provider with custom configuration
    pub fn with_config(config: GoogleConfig) -> SearchResult<Self> {
        config.validate()?;

        Ok(Self {
            config,
            http_client: HttpClient::new()?,
        })
    }

    /// Create a provider whose HTTP client uses the given timeout and user agent
    pub fn with_client_options(
        config: GoogleConfig,
        timeout: Duration,
        user_agent: &str,
    ) -> SearchResult<Self> {
        config.validate()?;

        Ok(Self {
            config,
            http_client: HttpClient::with_options(timeout, user_agent)?,
        })
    }

    /// Build the search URL with parameters
    fn build_search_url(&self, query: &str, num_results: u32) -> SearchResult<String> {
        let num = num_results.clamp(1, MAX_NUM_RESULTS);
        let params = [
            ("key", self.config.api_key.clone()),
            ("cx", self.config.cx.clone()),
            ("q", query.to_string()),
            ("num", num.to_string()),
        ];

        build_url(&self.config.base_url, &params)
    }
}

#[async_trait::async_trait]
impl SearchProvider for GoogleProvider {
    fn name(&self) -> &str {
        "google"
    }

    async fn search(&self, query: &str, num_results: u32) -> SearchResult<SearchPage> {
        log::debug!("Google Search request: query={query:?}, num={num_results}");

        let url = self.build_search_url(query, num_results)?;
        let response: GoogleSearchResponse = self.http_client.get_json(&url).await?;

        let items: Vec<SearchResultType> = response
            .items
            .unwrap_or_default()
            .into_iter()
            .map(|item| SearchResultType {
                title: item.title.unwrap_or_default(),
                link: item.link.unwrap_or_default(),
                snippet: item.snippet.unwrap_or_default(),
            })
            .collect();

        log::debug!("Google Search returned {} results", items.len());

        Ok(SearchPage {
            items,
            total_results: response.search_information.and_then(|info| info.total_results),
        })
    }
}
