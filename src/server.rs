//! MCP server exposing the `search_google` tool over streamable HTTP

use crate::{
    auth::{bearer_token, mask},
    config::ServerConfig,
    error::{SearchError, SearchResult},
    providers::google::GoogleProvider,
    search::SearchService,
    types::{SearchRequest, SearchResponse, DEFAULT_NUM_RESULTS, MAX_NUM_RESULTS},
};
use rmcp::{
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::{CallToolResult, Content, ServerCapabilities, ServerInfo},
    service::RequestContext,
    tool, tool_handler, tool_router,
    transport::streamable_http_server::{
        session::local::LocalSessionManager, StreamableHttpServerConfig, StreamableHttpService,
    },
    ErrorData as McpError, RoleServer, ServerHandler,
};
use schemars::JsonSchema;
use serde::Deserialize;
use std::{future::Future, sync::Arc};
use tokio::net::TcpListener;

pub const TOOL_NAME: &str = "search_google";

fn default_num_results() -> i64 {
    i64::from(DEFAULT_NUM_RESULTS)
}

/// Arguments of the `search_google` tool
#[derive(Debug, Deserialize, JsonSchema)]
pub struct SearchArgs {
    /// The search query string
    pub query: String,
    /// Number of search results to return (1-10, default 5)
    #[serde(default = "default_num_results")]
    pub num_results: i64,
}

impl SearchArgs {
    /// Requested count clamped into the range the API serves
    pub fn bounded_num_results(&self) -> u32 {
        // Clamped into 1..=10, so the cast is lossless.
        self.num_results.clamp(1, i64::from(MAX_NUM_RESULTS)) as u32
    }
}

/// rmcp handler wrapping a [`SearchService`]
#[derive(Clone)]
pub struct GoogleSearchServer {
    search: SearchService,
    tool_router: ToolRouter<Self>,
}

#[tool_router]
impl GoogleSearchServer {
    pub fn new(search: SearchService) -> Self {
        Self {
            search,
            tool_router: Self::tool_router(),
        }
    }

    #[tool(
        description = "Perform a Google search and return formatted results. Returns an object with `success`, `results` (title, link, snippet), and `total_results` on success or `error` on failure."
    )]
    async fn search_google(
        &self,
        Parameters(args): Parameters<SearchArgs>,
        context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, McpError> {
        // The transport stores the HTTP request head of each call in the context.
        let credential = context
            .extensions
            .get::<http::request::Parts>()
            .and_then(|parts| bearer_token(&parts.headers))
            .map(str::to_string);

        let num_results = args.bounded_num_results();
        let request = SearchRequest::new(args.query)
            .with_num_results(num_results)
            .with_credential(credential);

        let response = self.search.search(&request).await;
        Ok(tool_result(&response))
    }
}

#[tool_handler]
impl ServerHandler for GoogleSearchServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(
                "Google Custom Search. Call search_google with a query; when the server requires \
                 authentication send `Authorization: Bearer <token>` on the HTTP connection."
                    .to_string(),
            ),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }
}

/// Envelope as structured content, with a text copy for clients that only read text
pub fn tool_result(response: &SearchResponse) -> CallToolResult {
    let payload = response.to_json();
    let mut result = CallToolResult::structured(payload.clone());
    result.content = vec![Content::text(payload.to_string())];
    result
}

/// Build the HTTP router serving the MCP endpoint at `path` (with and without trailing slash)
pub fn router(search: SearchService, path: &str) -> axum::Router {
    let service = StreamableHttpService::new(
        move || Ok(GoogleSearchServer::new(search.clone())),
        Arc::new(LocalSessionManager::default()),
        StreamableHttpServerConfig::default(),
    );

    let path = path.trim_end_matches('/');
    if path.is_empty() {
        return axum::Router::new().fallback_service(service);
    }
    axum::Router::new()
        .route_service(path, service.clone())
        .route_service(&format!("{path}/"), service)
}

/// Build the search service described by the configuration
pub fn build_search_service(config: &ServerConfig) -> SearchResult<SearchService> {
    let provider = GoogleProvider::with_client_options(
        config.google.clone(),
        config.request_timeout,
        &config.user_agent,
    )?;
    Ok(SearchService::new(
        Arc::new(provider),
        Arc::new(config.auth.clone()),
    ))
}

/// Serve on an already bound listener until `shutdown` resolves
pub async fn serve_with_listener<F>(
    listener: TcpListener,
    search: SearchService,
    path: &str,
    shutdown: F,
) -> SearchResult<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let app = router(search, path);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await
        .map_err(|e| SearchError::Other(format!("server error: {e}")))
}

/// Bind the configured address and serve until Ctrl-C
pub async fn serve(config: ServerConfig) -> SearchResult<()> {
    let search = build_search_service(&config)?;
    log_startup(&config);

    let listener = TcpListener::bind(config.bind_addr()).await.map_err(|e| {
        SearchError::ConfigError(format!("cannot bind {}: {e}", config.bind_addr()))
    })?;

    serve_with_listener(listener, search, &config.path, async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            log::error!("failed to listen for Ctrl-C: {e}");
        }
        log::info!("Shutting down");
    })
    .await
}

fn log_startup(config: &ServerConfig) {
    log::info!("Starting Google Search MCP server with streamable HTTP transport");
    log::info!("Server will be available at: {}", config.endpoint_url());

    if !config.auth.enabled {
        log::warn!("Authentication: DISABLED (insecure mode)");
        return;
    }

    log::info!("Authentication: ENABLED (Bearer token required)");
    if config.auth.is_misconfigured() {
        log::warn!("Authentication enabled but no API_TOKEN configured; every search will be rejected");
    } else if let Some(token) = config.auth.expected_token.as_deref() {
        log::info!("API token: {}", mask(token));
    }
}
