//! Client configuration file tests
//!
//! These tests touch process environment variables, so they run serially.

use google_search_mcp::{client::ClientConfig, SearchError};
use serial_test::serial;
use std::env;
use std::io::Write;
use tempfile::NamedTempFile;

fn write_config(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

const CONFIG_WITH_PLACEHOLDERS: &str = r#"{
    "mcpServers": {
        "google-search": {
            "url": "http://127.0.0.1:9000/mcp/",
            "transport": "streamable-http",
            "headers": {
                "Authorization": "${GSM_TEST_AUTH}",
                "X-Client-ID": "${GSM_TEST_UNSET_CLIENT_ID}",
                "Content-Type": "application/json"
            }
        },
        "staging": {
            "url": "http://staging.internal:9000/mcp/"
        }
    }
}"#;

#[test]
#[serial]
fn test_load_substitutes_environment() {
    env::set_var("GSM_TEST_AUTH", "Bearer from-env");
    env::remove_var("GSM_TEST_UNSET_CLIENT_ID");

    let file = write_config(CONFIG_WITH_PLACEHOLDERS);
    let config = ClientConfig::load(file.path()).unwrap();

    let (name, endpoint) = config.server(Some("google-search")).unwrap();
    assert_eq!(name, "google-search");
    assert_eq!(endpoint.url, "http://127.0.0.1:9000/mcp/");
    assert_eq!(endpoint.headers["Authorization"], "Bearer from-env");
    // Unset variables keep the literal placeholder
    assert_eq!(endpoint.headers["X-Client-ID"], "${GSM_TEST_UNSET_CLIENT_ID}");
    assert_eq!(endpoint.headers["Content-Type"], "application/json");

    env::remove_var("GSM_TEST_AUTH");
}

#[test]
#[serial]
fn test_load_selects_named_server() {
    let file = write_config(CONFIG_WITH_PLACEHOLDERS);
    let config = ClientConfig::load(file.path()).unwrap();

    assert_eq!(config.servers.len(), 2);
    let (_, staging) = config.server(Some("staging")).unwrap();
    assert_eq!(staging.url, "http://staging.internal:9000/mcp/");
    assert!(config.server(Some("missing")).is_none());
}

#[test]
fn test_malformed_file_aborts_load() {
    let file = write_config(r#"{"mcpServers": {"google-search": {"url": "#);

    let err = ClientConfig::load(file.path()).unwrap_err();
    match err {
        SearchError::ConfigError(msg) => {
            assert!(msg.contains("invalid JSON"), "unexpected message: {msg}");
            assert!(msg.contains(&file.path().display().to_string()));
        }
        other => panic!("Expected ConfigError, got {other:?}"),
    }
}

#[test]
fn test_missing_file_aborts_load() {
    let dir = tempfile::tempdir().unwrap();
    let err = ClientConfig::load(dir.path().join("client_config.json")).unwrap_err();
    assert!(matches!(err, SearchError::ConfigError(ref m) if m.contains("cannot read")));
}

#[test]
fn test_server_entry_requires_url() {
    let file = write_config(r#"{"mcpServers": {"a": {"transport": "streamable-http"}}}"#);
    assert!(ClientConfig::load(file.path()).is_err());
}
