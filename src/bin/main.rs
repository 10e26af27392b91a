//! google-search-mcp - MCP server exposing Google Custom Search over streamable HTTP
//!
//! Configuration comes from the environment (optionally a `.env` file):
//! GOOGLE_API_KEY, GOOGLE_CSE_ID, HTTP_HOST, HTTP_PORT, MCP_PATH, ENABLE_AUTH,
//! API_TOKEN, REQUEST_TIMEOUT, USER_AGENT.

use anyhow::Context;
use clap::Parser;
use google_search_mcp::{config::ServerConfig, server};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "google-search-mcp")]
#[command(about = "Google Custom Search MCP server (streamable HTTP)")]
#[command(version)]
struct Cli {
    /// Bind host (overrides HTTP_HOST)
    #[arg(long)]
    host: Option<String>,

    /// Bind port (overrides HTTP_PORT)
    #[arg(short, long)]
    port: Option<u16>,

    /// Mount path of the MCP endpoint (overrides MCP_PATH)
    #[arg(long)]
    path: Option<String>,

    /// Environment file to load before reading configuration
    #[arg(long, default_value = ".env")]
    env_file: PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // A missing env file is fine; the process environment still applies.
    let env_loaded = dotenv::from_path(&cli.env_file).is_ok();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    if env_loaded {
        log::debug!("Loaded environment from {}", cli.env_file.display());
    }

    let mut config = ServerConfig::from_env().context("invalid server configuration")?;
    if let Some(host) = cli.host {
        config.host = host;
    }
    if let Some(port) = cli.port {
        config.port = port;
    }
    if let Some(path) = cli.path {
        config.path = format!("/{}", path.trim_matches('/'));
    }

    server::serve(config).await.context("server failed")?;
    Ok(())
}
