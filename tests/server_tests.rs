//! End-to-end tests: MCP client -> streamable HTTP server -> mocked Custom Search API

use google_search_mcp::{
    auth::AuthConfig,
    client::{probe, SearchClient, ServerEndpoint},
    providers::{GoogleConfig, GoogleProvider},
    search::{SearchService, AUTH_FAILED_MESSAGE},
    server::{serve_with_listener, TOOL_NAME},
};
use serde_json::json;
use std::{sync::Arc, time::Duration};
use tokio::{net::TcpListener, sync::oneshot};
use wiremock::{
    matchers::{method, path},
    Mock, MockServer, ResponseTemplate,
};

const TIMEOUT: Duration = Duration::from_secs(10);
const USER_AGENT: &str = "server-tests";

struct TestServer {
    url: String,
    _shutdown: oneshot::Sender<()>,
}

async fn start_server(google: &MockServer, auth: AuthConfig) -> TestServer {
    let provider = GoogleProvider::with_config(GoogleConfig {
        api_key: "test-key".to_string(),
        cx: "test-cx".to_string(),
        base_url: format!("{}/customsearch/v1", google.uri()),
    })
    .unwrap();
    let search = SearchService::new(Arc::new(provider), Arc::new(auth));

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let (tx, rx) = oneshot::channel::<()>();
    tokio::spawn(serve_with_listener(listener, search, "/mcp", async move {
        let _ = rx.await;
    }));

    TestServer {
        url: format!("http://{addr}/mcp/"),
        _shutdown: tx,
    }
}

async fn mock_google(expected_calls: u64) -> MockServer {
    let google = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/customsearch/v1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "searchInformation": {"totalResults": "2"},
            "items": [
                {"title": "FastMCP tutorial", "link": "https://example.com/1", "snippet": "one"},
                {"title": "MCP in Rust", "link": "https://example.com/2", "snippet": "two"}
            ]
        })))
        .expect(expected_calls)
        .mount(&google)
        .await;
    google
}

#[tokio::test]
async fn test_tool_is_listed() {
    let google = mock_google(0).await;
    let server = start_server(&google, AuthConfig::disabled()).await;

    let client = SearchClient::connect(&ServerEndpoint::new(&server.url), USER_AGENT, TIMEOUT)
        .await
        .unwrap();
    let tools = client.list_tools().await.unwrap();
    client.close().await.unwrap();

    assert_eq!(tools, vec![TOOL_NAME.to_string()]);
}

#[tokio::test]
async fn test_search_without_auth() {
    let google = mock_google(1).await;
    let server = start_server(&google, AuthConfig::disabled()).await;

    let client = SearchClient::connect(&ServerEndpoint::new(&server.url), USER_AGENT, TIMEOUT)
        .await
        .unwrap();
    let response = client.search("FastMCP tutorial", 3).await.unwrap();
    client.close().await.unwrap();

    assert!(response.is_success());
    assert_eq!(response.total_results(), Some("2"));
    assert_eq!(response.results().len(), 2);
    assert_eq!(response.results()[1].title, "MCP in Rust");
}

#[tokio::test]
async fn test_bearer_header_passes_gate() {
    let google = mock_google(1).await;
    let server = start_server(&google, AuthConfig::with_token("secret")).await;

    let endpoint = ServerEndpoint::with_bearer(&server.url, "secret").header("X-Client-ID", "tests");
    let client = SearchClient::connect(&endpoint, USER_AGENT, TIMEOUT).await.unwrap();
    let response = client.search("Rust programming", 2).await.unwrap();
    client.close().await.unwrap();

    assert!(response.is_success(), "unexpected failure: {:?}", response.error());
}

#[tokio::test]
async fn test_missing_or_wrong_bearer_is_rejected() {
    let google = mock_google(0).await;
    let server = start_server(&google, AuthConfig::with_token("secret")).await;

    for endpoint in [
        ServerEndpoint::new(&server.url),
        ServerEndpoint::with_bearer(&server.url, "not-the-secret"),
    ] {
        let client = SearchClient::connect(&endpoint, USER_AGENT, TIMEOUT).await.unwrap();
        let response = client.search("Rust programming", 2).await.unwrap();
        client.close().await.unwrap();

        assert!(!response.is_success());
        assert_eq!(response.error(), Some(AUTH_FAILED_MESSAGE));
        assert!(response.results().is_empty());
    }
}

#[tokio::test]
async fn test_reachability_check_passes_status_through() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/mcp/"))
        .respond_with(ResponseTemplate::new(405))
        .expect(1)
        .mount(&server)
        .await;

    let status = probe(&format!("{}/mcp/", server.uri()), TIMEOUT).await.unwrap();
    assert_eq!(status, 405);
}

#[tokio::test]
async fn test_reachability_check_fails_on_closed_port() {
    let result = probe("http://127.0.0.1:1/mcp/", TIMEOUT).await;
    assert!(result.is_err());
}
