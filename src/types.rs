//! Core types and traits shared by the server, the provider and the client

use crate::error::SearchError;
use serde::{Deserialize, Serialize};

/// Number of results requested when the caller does not say
pub const DEFAULT_NUM_RESULTS: u32 = 5;

/// Largest page the Custom Search API serves per request
pub const MAX_NUM_RESULTS: u32 = 10;

/// A single normalized search hit
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SearchResult {
    /// Title of the web page
    #[serde(default)]
    pub title: String,
    /// URL of the web page
    #[serde(default)]
    pub link: String,
    /// Snippet/description of the web page
    #[serde(default)]
    pub snippet: String,
}

/// One search tool invocation
#[derive(Debug, Clone)]
pub struct SearchRequest {
    /// The search query text
    pub query: String,
    /// Requested number of results
    pub num_results: u32,
    /// Credential presented by the caller, if any
    pub credential: Option<String>,
}

impl SearchRequest {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            num_results: DEFAULT_NUM_RESULTS,
            credential: None,
        }
    }

    pub fn with_num_results(mut self, num_results: u32) -> Self {
        self.num_results = num_results;
        self
    }

    pub fn with_credential(mut self, credential: Option<String>) -> Self {
        self.credential = credential;
        self
    }

    /// Result count clamped to what the API accepts
    pub fn bounded_num_results(&self) -> u32 {
        self.num_results.clamp(1, MAX_NUM_RESULTS)
    }
}

/// Uniform response envelope of the search tool.
///
/// A successful envelope carries `total_results` and never `error`; a failed
/// one carries `error`, no `total_results` and an empty result list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResponse {
    success: bool,
    #[serde(default)]
    results: Vec<SearchResult>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    total_results: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl SearchResponse {
    pub fn success(results: Vec<SearchResult>, total_results: impl Into<String>) -> Self {
        Self {
            success: true,
            results,
            total_results: Some(total_results.into()),
            error: None,
        }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            results: Vec::new(),
            total_results: None,
            error: Some(error.into()),
        }
    }

    pub fn is_success(&self) -> bool {
        self.success
    }

    pub fn results(&self) -> &[SearchResult] {
        &self.results
    }

    pub fn total_results(&self) -> Option<&str> {
        self.total_results.as_deref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_else(|_| {
            serde_json::json!({ "success": false, "results": [], "error": "unserializable response" })
        })
    }
}

/// One page of results as reported by the provider
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchPage {
    pub items: Vec<SearchResult>,
    /// Provider's estimate of the total hit count
    pub total_results: Option<String>,
}

/// Trait that the upstream search API wrapper must satisfy
#[async_trait::async_trait]
pub trait SearchProvider: Send + Sync + std::fmt::Debug {
    /// Name of the search provider
    fn name(&self) -> &str;

    /// Run one query; provider-reported failures come back as [`SearchError::Api`]
    async fn search(&self, query: &str, num_results: u32) -> Result<SearchPage, SearchError>;
}

/// Provider configuration trait for consistent configuration patterns
pub trait ProviderConfig {
    /// Validate the configuration
    fn validate(&self) -> Result<(), SearchError>;
}
