//! Server configuration
//!
//! Built once at startup (the binary fills it from CLI flags and
//! environment variables) and shared read-only with the HTTP layer.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::time::Duration;

use crate::error::{McpServerError, Result};
use crate::tools::web_text::{DEFAULT_FETCH_TIMEOUT, DEFAULT_MAX_CHARS};

pub const DEFAULT_PORT: u16 = 8000;
pub const DEFAULT_SERVER_NAME: &str = "Execution Checklist Tool";
pub const DEFAULT_DESCRIPTION: &str =
    "Convert input text into a structured execution checklist (JSON-only output) and extract readable text from web pages.";
pub const DEFAULT_PRIVACY_TEXT: &str = "No user data is stored.";
pub const DEFAULT_TERMS_TEXT: &str = "Provided as-is. No user data is stored.";

/// Runtime configuration for the MCP HTTP server
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address the HTTP listener binds to
    pub bind_addr: SocketAddr,
    /// Name reported by `initialize` and the manifest
    pub server_name: String,
    pub server_version: String,
    /// Manifest description
    pub description: String,
    /// Plaintext token served at `/.well-known/openai-apps-challenge`
    pub verification_token: Option<String>,
    pub privacy_text: String,
    pub terms_text: String,
    /// Wall-clock bound on the web extractor's outbound fetch
    pub fetch_timeout: Duration,
    /// Character cap on extracted web text
    pub max_text_chars: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::new(IpAddr::V4(Ipv4Addr::UNSPECIFIED), DEFAULT_PORT),
            server_name: DEFAULT_SERVER_NAME.to_string(),
            server_version: env!("CARGO_PKG_VERSION").to_string(),
            description: DEFAULT_DESCRIPTION.to_string(),
            verification_token: None,
            privacy_text: DEFAULT_PRIVACY_TEXT.to_string(),
            terms_text: DEFAULT_TERMS_TEXT.to_string(),
            fetch_timeout: DEFAULT_FETCH_TIMEOUT,
            max_text_chars: DEFAULT_MAX_CHARS,
        }
    }
}

impl ServerConfig {
    /// Reject settings the server cannot run with
    pub fn validate(&self) -> Result<()> {
        if self.fetch_timeout.is_zero() {
            return Err(McpServerError::Config(
                "fetch timeout must be greater than zero".to_string(),
            ));
        }
        if self.max_text_chars == 0 {
            return Err(McpServerError::Config(
                "max text chars must be greater than zero".to_string(),
            ));
        }
        if self.server_name.trim().is_empty() {
            return Err(McpServerError::Config(
                "server name must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}
