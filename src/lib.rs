//! Checklist MCP - tool-invocation server over HTTP
//!
//! Exposes a small set of tools (an execution checklist generator and a web
//! text extractor) through MCP's JSON-RPC methods `initialize`, `tools/list`
//! and `tools/call`.

pub mod config;
pub mod error;
pub mod http;
pub mod mcp;
pub mod tools;

pub use config::ServerConfig;
pub use error::{McpServerError, Result};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
