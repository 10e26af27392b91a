//! MCP client session calling the `search_google` tool

use super::config::ServerEndpoint;
use crate::{
    error::{SearchError, SearchResult},
    server::TOOL_NAME,
    types::SearchResponse,
};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use rmcp::{
    model::{CallToolRequestParam, CallToolResult, RawContent},
    service::{RunningService, ServiceError, ServiceExt},
    transport::{
        streamable_http_client::StreamableHttpClientTransportConfig, StreamableHttpClientTransport,
    },
    RoleClient,
};
use std::{collections::BTreeMap, time::Duration};
use tokio::time::timeout;

type McpRunningService = RunningService<RoleClient, ()>;

fn mcp_error(context: &str, error: ServiceError) -> SearchError {
    match error {
        ServiceError::McpError(data) => SearchError::Mcp(format!("{context}: {}", data.message)),
        other => SearchError::Mcp(format!("{context}: {other}")),
    }
}

/// Convert a configured header map into HTTP headers
pub fn header_map(headers: &BTreeMap<String, String>) -> SearchResult<HeaderMap> {
    let mut map = HeaderMap::new();
    for (name, value) in headers {
        let name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|e| SearchError::ConfigError(format!("invalid header name {name:?}: {e}")))?;
        let value = HeaderValue::from_str(value)
            .map_err(|e| SearchError::ConfigError(format!("invalid value for header {name}: {e}")))?;
        map.insert(name, value);
    }
    Ok(map)
}

/// A connected MCP session against one server endpoint
pub struct SearchClient {
    service: McpRunningService,
    timeout: Duration,
}

impl SearchClient {
    /// Open a session; every HTTP request carries the endpoint's headers
    pub async fn connect(
        endpoint: &ServerEndpoint,
        user_agent: &str,
        call_timeout: Duration,
    ) -> SearchResult<Self> {
        let http = reqwest::Client::builder()
            .user_agent(user_agent)
            .default_headers(header_map(&endpoint.headers)?)
            .build()
            .map_err(|e| SearchError::ConfigError(format!("failed to create HTTP client: {e}")))?;

        let transport = StreamableHttpClientTransport::with_client(
            http,
            StreamableHttpClientTransportConfig::with_uri(endpoint.url.clone()),
        );

        let service = timeout(call_timeout, ().serve(transport))
            .await
            .map_err(|_| SearchError::Timeout)?
            .map_err(|e| SearchError::Mcp(format!("failed to connect to {}: {e}", endpoint.url)))?;

        if let Some(info) = service.peer_info() {
            log::debug!(
                "Connected to {} {} (protocol {})",
                info.server_info.name,
                info.server_info.version,
                info.protocol_version
            );
        }

        Ok(Self {
            service,
            timeout: call_timeout,
        })
    }

    /// Names of the tools the server exposes
    pub async fn list_tools(&self) -> SearchResult<Vec<String>> {
        let tools = timeout(self.timeout, self.service.list_tools(Default::default()))
            .await
            .map_err(|_| SearchError::Timeout)?
            .map_err(|e| mcp_error("failed to list tools", e))?;

        Ok(tools.tools.into_iter().map(|t| t.name.to_string()).collect())
    }

    /// Call `search_google` and decode the envelope
    pub async fn search(&self, query: &str, num_results: u32) -> SearchResult<SearchResponse> {
        let arguments = serde_json::json!({
            "query": query,
            "num_results": num_results,
        });

        let result = timeout(
            self.timeout,
            self.service.call_tool(CallToolRequestParam {
                name: TOOL_NAME.into(),
                arguments: arguments.as_object().cloned(),
            }),
        )
        .await
        .map_err(|_| SearchError::Timeout)?
        .map_err(|e| mcp_error("tool call failed", e))?;

        decode_response(result)
    }

    /// Close the session
    pub async fn close(self) -> SearchResult<()> {
        self.service
            .cancel()
            .await
            .map(|_| ())
            .map_err(|e| SearchError::Mcp(format!("failed to close session: {e}")))
    }
}

/// Decode the envelope from structured content, falling back to the text block
pub fn decode_response(result: CallToolResult) -> SearchResult<SearchResponse> {
    let text = result.content.iter().find_map(|c| match &c.raw {
        RawContent::Text(t) => Some(t.text.clone()),
        _ => None,
    });

    if result.is_error == Some(true) {
        return Err(SearchError::Mcp(
            text.unwrap_or_else(|| "tool reported an error".to_string()),
        ));
    }

    if let Some(value) = result.structured_content {
        return Ok(serde_json::from_value(value)?);
    }

    match text {
        Some(text) => Ok(serde_json::from_str(&text)?),
        None => Err(SearchError::ParseError(
            "tool result carried no content".to_string(),
        )),
    }
}

/// Plain HTTP reachability check; returns the status code the server answered with
pub async fn probe(url: &str, probe_timeout: Duration) -> SearchResult<u16> {
    let client = reqwest::Client::builder()
        .timeout(probe_timeout)
        .build()
        .map_err(|e| SearchError::ConfigError(format!("failed to create HTTP client: {e}")))?;
    let response = client.get(url).send().await?;
    Ok(response.status().as_u16())
}
