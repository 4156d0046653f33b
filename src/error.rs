//! Error types for the checklist MCP server

use serde_json::{json, Value};
use thiserror::Error;

/// Result type alias for server operations
pub type Result<T> = std::result::Result<T, McpServerError>;

/// JSON-RPC error codes used on the wire
pub mod codes {
    pub const METHOD_NOT_FOUND: i64 = -32601;
    pub const INVALID_PARAMS: i64 = -32602;
    pub const TOOL_EXECUTION_FAILED: i64 = -32000;
}

/// Main error type for the server
#[derive(Error, Debug)]
pub enum McpServerError {
    #[error("Method not found")]
    MethodNotFound(Option<String>),

    #[error("Unknown tool")]
    UnknownTool(Option<String>),

    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Invalid type for field {field}: expected {expected}")]
    InvalidType { field: String, expected: String },

    #[error("Invalid enum value for field {field}")]
    InvalidEnum { field: String, value: Value },

    #[error("Unexpected field: {0}")]
    UnexpectedField(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Upstream returned status {status} for {url}")]
    UpstreamStatus { status: u16, url: String },

    #[error("Tool execution failed: {0}")]
    ToolExecution(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl McpServerError {
    /// Whether the error was raised while validating tool arguments
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            McpServerError::MissingField(_)
                | McpServerError::InvalidType { .. }
                | McpServerError::InvalidEnum { .. }
                | McpServerError::UnexpectedField(_)
        )
    }

    /// Get error code for MCP protocol
    pub fn code(&self) -> i64 {
        match self {
            McpServerError::MethodNotFound(_) => codes::METHOD_NOT_FOUND,
            McpServerError::UnknownTool(_)
            | McpServerError::MissingField(_)
            | McpServerError::InvalidType { .. }
            | McpServerError::InvalidEnum { .. }
            | McpServerError::UnexpectedField(_) => codes::INVALID_PARAMS,
            _ => codes::TOOL_EXECUTION_FAILED,
        }
    }

    /// Structured detail carried in the JSON-RPC `error.data` field
    pub fn data(&self) -> Option<Value> {
        match self {
            McpServerError::MethodNotFound(method) => Some(json!({ "method": method })),
            McpServerError::UnknownTool(name) => Some(json!({ "name": name })),
            McpServerError::MissingField(field) | McpServerError::UnexpectedField(field) => {
                Some(json!({ "field": field }))
            }
            McpServerError::InvalidType { field, expected } => {
                Some(json!({ "field": field, "expected": expected }))
            }
            McpServerError::InvalidEnum { field, value } => {
                Some(json!({ "field": field, "value": value }))
            }
            McpServerError::UpstreamStatus { status, url } => Some(json!({
                "detail": self.to_string(),
                "status": status,
                "url": url,
            })),
            McpServerError::Config(_) | McpServerError::Io(_) => None,
            _ => Some(json!({ "detail": self.to_string() })),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_follow_taxonomy() {
        assert_eq!(McpServerError::MethodNotFound(None).code(), -32601);
        assert_eq!(McpServerError::UnknownTool(Some("x".into())).code(), -32602);
        assert_eq!(McpServerError::MissingField("text".into()).code(), -32602);
        assert_eq!(McpServerError::InvalidUrl("ftp://x".into()).code(), -32000);
        assert_eq!(
            McpServerError::UpstreamStatus {
                status: 404,
                url: "http://x".into()
            }
            .code(),
            -32000
        );
    }

    #[test]
    fn test_data_carries_offending_name() {
        let err = McpServerError::UnknownTool(Some("nope".into()));
        assert_eq!(err.data(), Some(json!({"name": "nope"})));

        let err = McpServerError::MethodNotFound(None);
        assert_eq!(err.data(), Some(json!({"method": null})));
    }
}
