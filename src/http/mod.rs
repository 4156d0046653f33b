//! HTTP transport
//!
//! Binds the MCP handler to `/mcp` and serves the manifest, the domain
//! verification token and the static informational pages.

mod server;

pub use server::{cors_layer, AppState, McpHttpServer, MCP_GET_SENTINEL};
