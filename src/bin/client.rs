//! search-client - example client for the google-search-mcp server
//!
//! Environment: CLIENT_API_TOKEN, SERVER_URL, TIMEOUT, USER_AGENT.

use anyhow::{bail, Context};
use clap::{Parser, Subcommand, ValueEnum};
use colored::*;
use google_search_mcp::{
    client::{probe, ClientConfig, ClientSettings, SearchClient, ServerEndpoint},
    SearchResponse,
};
use std::path::{Path, PathBuf};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

#[derive(Parser)]
#[command(name = "search-client")]
#[command(about = "Example client for the Google Search MCP server")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table", global = true)]
    format: OutputFormat,
}

#[derive(Subcommand)]
enum Commands {
    /// Check that the server URL answers HTTP requests
    Test,
    /// Search without any credentials (development servers)
    NoAuth,
    /// Search with a bearer token from CLIENT_API_TOKEN
    Auth,
    /// Search with a bearer token plus custom client headers
    Custom,
    /// Search using a server entry from a JSON config file
    Config {
        /// Path of the client configuration file
        #[arg(long, default_value = "client_config.json")]
        file: PathBuf,

        /// Server entry to use (defaults to the first one)
        #[arg(long)]
        server: Option<String>,
    },
    /// Run a single search
    Search {
        /// Search query
        query: String,

        /// Number of results
        #[arg(short, long, default_value = "5")]
        num_results: u32,
    },
    /// Read queries from stdin until `quit` or `exit`
    Interactive {
        /// Number of results per query
        #[arg(short, long, default_value = "5")]
        num_results: u32,
    },
    /// Run the connectivity check and every demo (default)
    All,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum OutputFormat {
    Table,
    Json,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();
    let settings = ClientSettings::from_env().context("invalid client settings")?;

    print_banner(&settings);

    match cli.command.unwrap_or(Commands::All) {
        Commands::Test => test_connection(&settings).await,
        Commands::NoAuth => connect_without_auth(&settings, cli.format).await,
        Commands::Auth => connect_with_auth(&settings, cli.format).await,
        Commands::Custom => connect_with_custom_headers(&settings, cli.format).await,
        Commands::Config { file, server } => {
            connect_from_config_file(&settings, &file, server.as_deref(), cli.format).await
        }
        Commands::Search { query, num_results } => {
            quick_search(&settings, &query, num_results, cli.format).await
        }
        Commands::Interactive { num_results } => {
            interactive_mode(&settings, num_results, cli.format).await
        }
        Commands::All => {
            run_all(&settings, cli.format).await;
            Ok(())
        }
    }
}

fn print_banner(settings: &ClientSettings) {
    println!("{}", "Google Search MCP client".bold().blue());
    println!("{}", "─".repeat(60).dimmed());
    println!("Server URL: {}", settings.server_url);
    println!(
        "API token:  {}",
        if settings.api_token.is_some() { "set".green() } else { "not set".yellow() }
    );
    println!("Timeout:    {:?}", settings.timeout);
    println!("{}", "─".repeat(60).dimmed());
}

async fn run_all(settings: &ClientSettings, format: OutputFormat) {
    report(test_connection(settings).await);
    report(connect_without_auth(settings, format).await);
    report(connect_with_auth(settings, format).await);
    report(connect_with_custom_headers(settings, format).await);
    report(
        connect_from_config_file(settings, Path::new("client_config.json"), None, format).await,
    );
}

fn report(outcome: anyhow::Result<()>) {
    if let Err(e) = outcome {
        eprintln!("{} {e:#}", "Error:".red().bold());
    }
}

async fn test_connection(settings: &ClientSettings) -> anyhow::Result<()> {
    println!("\n{}", "=== Server connection test ===".bold());
    let status = probe(&settings.server_url, settings.timeout)
        .await
        .with_context(|| format!("cannot reach {}", settings.server_url))?;

    if status == 200 {
        println!("{} {}", "✓ Server reachable:".green(), settings.server_url);
    } else {
        println!(
            "{} {} answered HTTP {status}",
            "✗ Unexpected status:".yellow(),
            settings.server_url
        );
    }
    Ok(())
}

async fn connect_without_auth(settings: &ClientSettings, format: OutputFormat) -> anyhow::Result<()> {
    println!("\n{}", "=== Connection without authentication ===".bold());
    let endpoint = ServerEndpoint::new(&settings.server_url);
    run_search(settings, &endpoint, "MCP tutorial", 3, format).await
}

async fn connect_with_auth(settings: &ClientSettings, format: OutputFormat) -> anyhow::Result<()> {
    println!("\n{}", "=== Connection with bearer token ===".bold());
    let Some(token) = settings.api_token.as_deref() else {
        println!("{}", "Warning: set CLIENT_API_TOKEN to run this example".yellow());
        println!("Example: export CLIENT_API_TOKEN='your_api_token_here'");
        return Ok(());
    };

    let endpoint = ServerEndpoint::with_bearer(&settings.server_url, token)
        .header("User-Agent", settings.user_agent.clone());
    run_search(settings, &endpoint, "Rust programming", 2, format).await
}

async fn connect_with_custom_headers(
    settings: &ClientSettings,
    format: OutputFormat,
) -> anyhow::Result<()> {
    println!("\n{}", "=== Connection with custom headers ===".bold());
    let Some(token) = settings.api_token.as_deref() else {
        println!("{}", "Warning: set CLIENT_API_TOKEN to run this example".yellow());
        return Ok(());
    };

    let endpoint = ServerEndpoint::with_bearer(&settings.server_url, token)
        .header("User-Agent", settings.user_agent.clone())
        .header("X-Client-ID", "example-client")
        .header("X-Request-ID", "req-12345");
    run_search(settings, &endpoint, "artificial intelligence", 3, format).await
}

async fn connect_from_config_file(
    settings: &ClientSettings,
    file: &Path,
    server: Option<&str>,
    format: OutputFormat,
) -> anyhow::Result<()> {
    println!("\n{}", "=== Connection from configuration file ===".bold());
    let config = ClientConfig::load(file)?;

    let Some((name, endpoint)) = config.server(server) else {
        bail!("no server entry {} in {}", server.unwrap_or("(any)"), file.display());
    };
    println!("Using server '{}' at {}", name.bold(), endpoint.url);

    run_search(settings, endpoint, "data science", 3, format).await
}

async fn quick_search(
    settings: &ClientSettings,
    query: &str,
    num_results: u32,
    format: OutputFormat,
) -> anyhow::Result<()> {
    println!("\n{} {}", "=== Quick search:".bold(), query.bold());
    run_search(settings, &default_endpoint(settings), query, num_results, format).await
}

async fn interactive_mode(
    settings: &ClientSettings,
    num_results: u32,
    format: OutputFormat,
) -> anyhow::Result<()> {
    println!("\n{}", "=== Interactive search ===".bold());
    println!("Enter a query, or 'quit' / 'exit' to leave.\n");

    let client = SearchClient::connect(
        &default_endpoint(settings),
        &settings.user_agent,
        settings.timeout,
    )
    .await
    .context("connection failed")?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();

    loop {
        stdout.write_all(b"search > ").await?;
        stdout.flush().await?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        let query = line.trim();

        if query.eq_ignore_ascii_case("quit") || query.eq_ignore_ascii_case("exit") {
            break;
        }
        if query.is_empty() {
            continue;
        }

        match client.search(query, num_results).await {
            Ok(response) => display_response(&response, format),
            Err(e) => eprintln!("{} {e}", "Search error:".red()),
        }
        println!();
    }

    println!("Bye!");
    close_quietly(client).await;
    Ok(())
}

/// Bearer-authenticated when a token is configured, plain otherwise
fn default_endpoint(settings: &ClientSettings) -> ServerEndpoint {
    match settings.api_token.as_deref() {
        Some(token) => ServerEndpoint::with_bearer(&settings.server_url, token),
        None => ServerEndpoint::new(&settings.server_url),
    }
}

async fn run_search(
    settings: &ClientSettings,
    endpoint: &ServerEndpoint,
    query: &str,
    num_results: u32,
    format: OutputFormat,
) -> anyhow::Result<()> {
    let client = SearchClient::connect(endpoint, &settings.user_agent, settings.timeout)
        .await
        .context("connection failed")?;

    let outcome = client.search(query, num_results).await;
    if let Ok(response) = &outcome {
        display_response(response, format);
    }
    close_quietly(client).await;

    outcome.context("search failed")?;
    Ok(())
}

/// End the session; the results are already printed, so a failure is only logged
async fn close_quietly(client: SearchClient) {
    if let Err(e) = client.close().await {
        log::warn!("Failed to close MCP session: {e}");
    }
}

fn display_response(response: &SearchResponse, format: OutputFormat) {
    match format {
        OutputFormat::Json => match serde_json::to_string_pretty(response) {
            Ok(json) => println!("{json}"),
            Err(e) => eprintln!("{} {e}", "Cannot render response:".red()),
        },
        OutputFormat::Table => {
            if !response.is_success() {
                println!(
                    "{} {}",
                    "Search failed:".red().bold(),
                    response.error().unwrap_or("unknown error")
                );
                return;
            }

            println!("{}", "Search Results".bold().blue());
            println!("{}", "─".repeat(60).dimmed());
            for (i, result) in response.results().iter().enumerate() {
                println!("{}. {}", (i + 1).to_string().bold(), result.title.bold());
                println!("   Link: {}", result.link.blue().underline());
                println!("   Snippet: {}", result.snippet.italic());
                println!();
            }
            println!(
                "{} {}",
                "Total results:".bold(),
                response.total_results().unwrap_or("0")
            );
        }
    }
}
