//! Error types for the search server and client

use thiserror::Error;

/// Result type alias for search operations
pub type SearchResult<T> = std::result::Result<T, SearchError>;

/// Errors raised while talking to the search API or loading configuration
#[derive(Error, Debug, Clone)]
pub enum SearchError {
    /// HTTP request failed before the API could answer
    #[error("HTTP request failed: {message}")]
    HttpError { message: String },

    /// The search API answered with a structured error (bad key, quota, invalid request)
    #[error("{message}")]
    Api { status: u16, message: String },

    /// Invalid input parameters
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Parsing error
    #[error("Parsing error: {0}")]
    ParseError(String),

    /// Timeout error
    #[error("Request timed out")]
    Timeout,

    /// MCP session or tool-call failure
    #[error("MCP error: {0}")]
    Mcp(String),

    /// Generic error for unhandled cases
    #[error("Search error: {0}")]
    Other(String),
}

impl From<reqwest::Error> for SearchError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_timeout() {
            SearchError::Timeout
        } else if error.is_decode() {
            SearchError::ParseError(format!("invalid response body: {error}"))
        } else {
            SearchError::HttpError {
                message: error.to_string(),
            }
        }
    }
}

impl From<serde_json::Error> for SearchError {
    fn from(error: serde_json::Error) -> Self {
        SearchError::ParseError(format!("JSON parsing failed: {error}"))
    }
}

impl From<url::ParseError> for SearchError {
    fn from(error: url::ParseError) -> Self {
        SearchError::InvalidInput(format!("Invalid URL: {error}"))
    }
}
