//! Client side: settings, the JSON server list and the MCP session

pub mod config;
pub mod session;

pub use config::{ClientConfig, ClientSettings, ServerEndpoint};
pub use session::{probe, SearchClient};
