//! The `search_google` tool body: gate, provider call, envelope mapping

use crate::{
    auth::{self, AuthConfig},
    error::SearchError,
    types::{SearchPage, SearchProvider, SearchRequest, SearchResponse},
};
use std::sync::Arc;

pub const AUTH_FAILED_MESSAGE: &str = "Authentication failed: Invalid or missing API token";

/// Runs searches on behalf of tool calls. Cheap to clone.
#[derive(Debug, Clone)]
pub struct SearchService {
    provider: Arc<dyn SearchProvider>,
    auth: Arc<AuthConfig>,
}

impl SearchService {
    pub fn new(provider: Arc<dyn SearchProvider>, auth: Arc<AuthConfig>) -> Self {
        Self { provider, auth }
    }

    /// Run one search. Never fails: every error becomes a failure envelope.
    pub async fn search(&self, request: &SearchRequest) -> SearchResponse {
        if !auth::verify(request.credential.as_deref(), &self.auth) {
            log::warn!("Rejected search request: invalid or missing token");
            return SearchResponse::failure(AUTH_FAILED_MESSAGE);
        }

        let query = request.query.trim();
        if query.is_empty() {
            return SearchResponse::failure(
                SearchError::InvalidInput("query must not be empty".to_string()).to_string(),
            );
        }

        let num_results = request.bounded_num_results();
        log::info!(
            "Searching with provider '{}': query={query:?}, num_results={num_results}",
            self.provider.name()
        );

        let outcome = self.provider.search(query, num_results).await;
        if let Err(error) = &outcome {
            log::warn!(
                "Search with provider '{}' failed: {error}. {}",
                self.provider.name(),
                troubleshooting_hint(error)
            );
        }
        to_response(outcome)
    }
}

/// Map a provider outcome onto the response envelope
pub fn to_response(outcome: Result<SearchPage, SearchError>) -> SearchResponse {
    match outcome {
        Ok(page) => {
            let total = page.total_results.unwrap_or_else(|| "0".to_string());
            SearchResponse::success(page.items, total)
        }
        Err(error @ SearchError::Api { .. }) => SearchResponse::failure(format!("API Error: {error}")),
        Err(error) => SearchResponse::failure(error.to_string()),
    }
}

/// Operator-facing hint for a failed search
fn troubleshooting_hint(error: &SearchError) -> &'static str {
    match error {
        SearchError::Api {
            status: 401 | 403, ..
        } => "This is likely an authentication issue. Check that GOOGLE_API_KEY is valid and has the Custom Search API enabled.",
        SearchError::Api { status: 400, .. } => {
            "This is likely due to invalid request parameters. Check the query and GOOGLE_CSE_ID."
        }
        SearchError::Api { status: 429, .. } => {
            "The daily query quota is exhausted or requests are too frequent. Try again later."
        }
        SearchError::Api {
            status: 500..=599, ..
        } => "The search API is experiencing server issues. Try again later.",
        SearchError::Timeout | SearchError::HttpError { .. } => {
            "Check network connectivity to the search API or raise REQUEST_TIMEOUT."
        }
        _ => "Make sure the Google API key is valid and the Search Engine ID (cx) is correct.",
    }
}
