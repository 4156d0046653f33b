//! MCP (Model Context Protocol) server implementation
//!
//! JSON-RPC 2.0 tool discovery and invocation, independent of transport.

pub mod executor;
pub mod handler;
pub mod manifest;
pub mod protocol;
pub mod registry;
pub mod validate;

pub use executor::ToolExecutor;
pub use handler::McpHandler;
pub use manifest::McpManifest;
pub use protocol::{
    methods, InitializeResult, McpRequest, McpResponse, Method, Outcome, RpcError, ToolContent,
    ToolResult,
};
pub use registry::{RegisteredTool, ToolAnnotations, ToolRegistry, ToolSpec};
pub use validate::{validate, Arguments};
