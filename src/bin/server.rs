//! Checklist MCP HTTP server
//!
//! Run with: checklist-mcp-server

use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use checklist_mcp::config::{
    ServerConfig, DEFAULT_DESCRIPTION, DEFAULT_PRIVACY_TEXT, DEFAULT_SERVER_NAME,
    DEFAULT_TERMS_TEXT,
};
use checklist_mcp::error::Result;
use checklist_mcp::http::McpHttpServer;
use checklist_mcp::tools::default_registry;

#[derive(Parser, Debug)]
#[command(name = "checklist-mcp-server")]
#[command(about = "MCP JSON-RPC server for execution checklists and web text extraction")]
struct Args {
    /// Interface to bind
    #[arg(long, env = "MCP_HOST", default_value = "0.0.0.0")]
    host: IpAddr,

    /// Port to listen on
    #[arg(long, env = "PORT", default_value = "8000")]
    port: u16,

    /// Server name reported by initialize and the manifest
    #[arg(long, env = "MCP_SERVER_NAME", default_value = DEFAULT_SERVER_NAME)]
    server_name: String,

    /// Manifest description
    #[arg(long, env = "MCP_SERVER_DESCRIPTION", default_value = DEFAULT_DESCRIPTION)]
    description: String,

    /// Domain verification token served at /.well-known/openai-apps-challenge
    #[arg(long, env = "MCP_VERIFICATION_TOKEN")]
    verification_token: Option<String>,

    /// Privacy page text
    #[arg(long, env = "MCP_PRIVACY_TEXT", default_value = DEFAULT_PRIVACY_TEXT)]
    privacy_text: String,

    /// Terms page text
    #[arg(long, env = "MCP_TERMS_TEXT", default_value = DEFAULT_TERMS_TEXT)]
    terms_text: String,

    /// Timeout for web page fetches in seconds
    #[arg(long, env = "MCP_FETCH_TIMEOUT_SECS", default_value = "15")]
    fetch_timeout_secs: u64,

    /// Maximum characters returned by the web text extractor
    #[arg(long, env = "MCP_MAX_TEXT_CHARS", default_value = "20000")]
    max_text_chars: usize,
}

impl Args {
    fn into_config(self) -> ServerConfig {
        ServerConfig {
            bind_addr: SocketAddr::new(self.host, self.port),
            server_name: self.server_name,
            server_version: checklist_mcp::VERSION.to_string(),
            description: self.description,
            verification_token: self.verification_token.filter(|t| !t.trim().is_empty()),
            privacy_text: self.privacy_text,
            terms_text: self.terms_text,
            fetch_timeout: Duration::from_secs(self.fetch_timeout_secs),
            max_text_chars: self.max_text_chars,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(false),
        )
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = Args::parse().into_config();
    config.validate()?;

    if config.verification_token.is_none() {
        tracing::warn!("No verification token configured; the challenge endpoint will return 404");
    }

    let registry = default_registry(&config)?;
    tracing::info!(
        tools = registry.len(),
        name = %config.server_name,
        "Checklist MCP server starting..."
    );

    McpHttpServer::new(config, registry).start().await
}
