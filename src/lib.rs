//! # Google Search MCP
//!
//! A Model Context Protocol server exposing one tool, `search_google`, which forwards a
//! query to the Google Custom Search JSON API and returns normalized results in a uniform
//! envelope. The server speaks streamable HTTP; callers authenticate with an
//! `Authorization: Bearer` header when authentication is enabled.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use google_search_mcp::{config::ServerConfig, server};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // GOOGLE_API_KEY, GOOGLE_CSE_ID, HTTP_HOST, HTTP_PORT, ENABLE_AUTH, API_TOKEN ...
//!     let config = ServerConfig::from_env()?;
//!     server::serve(config).await?;
//!     Ok(())
//! }
//! ```
//!
//! The search logic can also be used without the transport:
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use google_search_mcp::{
//!     auth::AuthConfig, providers::GoogleProvider, search::SearchService, SearchRequest,
//! };
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let provider = GoogleProvider::new("api_key", "cx_id")?;
//! let service = SearchService::new(Arc::new(provider), Arc::new(AuthConfig::disabled()));
//! let response = service.search(&SearchRequest::new("rust programming")).await;
//! for result in response.results() {
//!     println!("{}: {}", result.title, result.link);
//! }
//! # Ok(())
//! # }
//! ```

pub mod auth;
pub mod client;
pub mod config;
pub mod error;
pub mod providers;
pub mod search;
pub mod server;
pub mod types;
pub mod utils;

// Re-export common types
pub use error::{SearchError, SearchResult as Result};
pub use types::{SearchPage, SearchProvider, SearchRequest, SearchResponse, SearchResult};
