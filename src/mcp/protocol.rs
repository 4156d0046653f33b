//! MCP JSON-RPC protocol implementation

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{McpServerError, Result};

/// JSON-RPC version tag carried by every envelope
pub const JSONRPC_VERSION: &str = "2.0";

/// MCP protocol revision advertised by `initialize`
pub const PROTOCOL_VERSION: &str = "2024-11-05";

/// Standard MCP methods
pub mod methods {
    pub const INITIALIZE: &str = "initialize";
    pub const LIST_TOOLS: &str = "tools/list";
    pub const CALL_TOOL: &str = "tools/call";
}

/// The closed set of methods this server answers
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Method {
    Initialize,
    ListTools,
    CallTool,
    /// Anything else, including a missing or non-string `method`
    Unknown(Option<String>),
}

impl Method {
    pub fn parse(method: Option<&str>) -> Self {
        match method {
            Some(methods::INITIALIZE) => Method::Initialize,
            Some(methods::LIST_TOOLS) => Method::ListTools,
            Some(methods::CALL_TOOL) => Method::CallTool,
            other => Method::Unknown(other.map(str::to_string)),
        }
    }
}

/// MCP JSON-RPC request
///
/// Built leniently from whatever the client sent: a body that is not a JSON
/// object still yields a request, with an unknown method and a null id.
#[derive(Debug, Clone)]
pub struct McpRequest {
    pub id: Value,
    pub method: Method,
    pub params: Value,
}

impl McpRequest {
    /// Parse a raw request body
    pub fn from_slice(body: &[u8]) -> Self {
        match serde_json::from_slice::<Value>(body) {
            Ok(value) => Self::from_value(value),
            Err(e) => {
                tracing::debug!(error = %e, "unparsable JSON-RPC body");
                Self::from_value(Value::Null)
            }
        }
    }

    pub fn from_value(value: Value) -> Self {
        let Value::Object(mut map) = value else {
            return Self {
                id: Value::Null,
                method: Method::Unknown(None),
                params: Value::Null,
            };
        };

        let method = Method::parse(map.get("method").and_then(Value::as_str));
        Self {
            id: map.remove("id").unwrap_or(Value::Null),
            method,
            params: map.remove("params").unwrap_or(Value::Null),
        }
    }
}

/// MCP JSON-RPC response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct McpResponse {
    pub jsonrpc: String,
    #[serde(default)]
    pub id: Value,
    #[serde(flatten)]
    pub outcome: Outcome,
}

/// Exactly one of `result` or `error`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    Result(Value),
    Error(RpcError),
}

/// JSON-RPC error object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RpcError {
    pub code: i64,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl McpResponse {
    /// Create a success response
    pub fn success(id: Value, result: Value) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            id,
            outcome: Outcome::Result(result),
        }
    }

    /// Create an error response
    pub fn error(id: Value, code: i64, message: String, data: Option<Value>) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            id,
            outcome: Outcome::Error(RpcError {
                code,
                message,
                data,
            }),
        }
    }

    /// Create error from McpServerError
    pub fn from_error(id: Value, err: &McpServerError) -> Self {
        Self::error(id, err.code(), err.to_string(), err.data())
    }

    pub fn result(&self) -> Option<&Value> {
        match &self.outcome {
            Outcome::Result(value) => Some(value),
            Outcome::Error(_) => None,
        }
    }
}

/// MCP initialize result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InitializeResult {
    #[serde(rename = "protocolVersion")]
    pub protocol_version: String,
    #[serde(rename = "serverInfo")]
    pub server_info: ServerInfo,
    pub capabilities: ServerCapabilities,
}

/// Server capabilities
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ServerCapabilities {
    pub tools: ToolsCapability,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ToolsCapability {}

/// Server info
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerInfo {
    pub name: String,
    pub version: String,
}

impl InitializeResult {
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            protocol_version: PROTOCOL_VERSION.to_string(),
            server_info: ServerInfo {
                name: name.into(),
                version: version.into(),
            },
            capabilities: ServerCapabilities::default(),
        }
    }
}

/// Tool call result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolResult {
    pub content: Vec<ToolContent>,
    #[serde(default)]
    pub meta: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ToolContent {
    #[serde(rename = "text")]
    Text { text: String },
}

impl ToolResult {
    /// Create a text result
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            content: vec![ToolContent::Text { text: text.into() }],
            meta: Map::new(),
        }
    }

    /// Create a result whose single text block carries `value` as a JSON string
    pub fn json(value: &impl Serialize) -> Result<Self> {
        Ok(Self::text(serde_json::to_string(value)?))
    }

    pub fn with_meta(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.meta.insert(key.into(), value.into());
        self
    }

    /// Text of the first content block
    pub fn first_text(&self) -> Option<&str> {
        self.content.first().map(|block| match block {
            ToolContent::Text { text } => text.as_str(),
        })
    }
}
