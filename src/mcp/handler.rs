//! JSON-RPC method dispatch
//!
//! Every request resolves to exactly one envelope: `initialize`,
//! `tools/list` and `tools/call` produce results, anything else (including
//! bodies that are not JSON objects) produces `Method not found`.

use std::sync::Arc;

use serde_json::{json, Value};

use crate::error::{McpServerError, Result};

use super::executor::ToolExecutor;
use super::protocol::{InitializeResult, McpRequest, McpResponse, Method, ToolResult};
use super::registry::ToolRegistry;
use super::validate::validate;

/// Stateless MCP request handler
#[derive(Debug, Clone)]
pub struct McpHandler {
    registry: Arc<ToolRegistry>,
    executor: ToolExecutor,
    initialize: InitializeResult,
}

impl McpHandler {
    pub fn new(
        registry: Arc<ToolRegistry>,
        server_name: impl Into<String>,
        server_version: impl Into<String>,
    ) -> Self {
        Self {
            executor: ToolExecutor::new(registry.clone()),
            registry,
            initialize: InitializeResult::new(server_name, server_version),
        }
    }

    /// Handle a raw request body
    pub async fn handle_body(&self, body: &[u8]) -> McpResponse {
        self.handle_request(McpRequest::from_slice(body)).await
    }

    pub async fn handle_request(&self, request: McpRequest) -> McpResponse {
        let McpRequest { id, method, params } = request;
        tracing::debug!(method = ?method, id = %id, "JSON-RPC request");

        match method {
            Method::Initialize => McpResponse::success(id, json!(self.initialize)),
            Method::ListTools => McpResponse::success(id, json!({ "tools": self.registry.list() })),
            Method::CallTool => match self.call_tool(&params).await {
                Ok(result) => match serde_json::to_value(result) {
                    Ok(value) => McpResponse::success(id, value),
                    Err(e) => McpResponse::from_error(id, &McpServerError::Serialization(e)),
                },
                Err(e) => {
                    if e.is_validation() || matches!(e, McpServerError::UnknownTool(_)) {
                        tracing::info!(error = %e, "rejected tools/call");
                    }
                    McpResponse::from_error(id, &e)
                }
            },
            Method::Unknown(method) => {
                tracing::debug!(method = ?method, "method not found");
                McpResponse::from_error(id, &McpServerError::MethodNotFound(method))
            }
        }
    }

    async fn call_tool(&self, params: &Value) -> Result<ToolResult> {
        let name = params.get("name").and_then(Value::as_str);
        let Some(name) = name else {
            return Err(McpServerError::UnknownTool(None));
        };

        let entry = self.registry.lookup(name)?;
        let raw = params.get("arguments").cloned().unwrap_or(Value::Null);
        let arguments = validate(&entry.spec, raw)?;

        self.executor.execute(name, &arguments).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ServerConfig;
    use crate::tools::default_registry;
    use pretty_assertions::assert_eq;

    fn handler() -> McpHandler {
        let registry = default_registry(&ServerConfig::default()).unwrap();
        McpHandler::new(Arc::new(registry), "Execution Checklist Tool", "1.0.0")
    }

    async fn call(body: Value) -> Value {
        let response = handler().handle_request(McpRequest::from_value(body)).await;
        serde_json::to_value(response).unwrap()
    }

    #[tokio::test]
    async fn test_initialize_is_idempotent() {
        let h = handler();
        let a = h
            .handle_body(br#"{"jsonrpc":"2.0","id":1,"method":"initialize"}"#)
            .await;
        let b = h
            .handle_body(br#"{"jsonrpc":"2.0","id":"two","method":"initialize","params":{"x":1}}"#)
            .await;

        let a = serde_json::to_string(a.result().unwrap()).unwrap();
        let b = serde_json::to_string(b.result().unwrap()).unwrap();
        assert_eq!(a, b);
        assert!(a.contains(r#""capabilities":{"tools":{}}"#));
    }

    #[tokio::test]
    async fn test_tools_list_in_registration_order() {
        let resp = call(json!({"jsonrpc": "2.0", "id": 2, "method": "tools/list"})).await;
        let names: Vec<_> = resp["result"]["tools"]
            .as_array()
            .unwrap()
            .iter()
            .map(|t| t["name"].as_str().unwrap().to_string())
            .collect();
        assert_eq!(names, vec!["generate_checklist", "extract_web_text"]);
        assert!(resp["result"]["tools"][0].get("inputSchema").is_some());
    }

    #[tokio::test]
    async fn test_tools_call_checklist() {
        let resp = call(json!({
            "jsonrpc": "2.0",
            "id": 3,
            "method": "tools/call",
            "params": {"name": "generate_checklist", "arguments": {"text": "ship", "max_steps": 100}}
        }))
        .await;

        assert!(resp.get("error").is_none());
        assert_eq!(resp["id"], json!(3));
        assert_eq!(resp["result"]["content"][0]["type"], "text");
        let text = resp["result"]["content"][0]["text"].as_str().unwrap();
        let payload: Value = serde_json::from_str(text).unwrap();
        assert_eq!(payload["steps"].as_array().unwrap().len(), 12);
        assert_eq!(resp["result"]["meta"], json!({"audience": "agent"}));
    }

    #[tokio::test]
    async fn test_unknown_tool_echoes_name() {
        let resp = call(json!({
            "jsonrpc": "2.0",
            "id": 4,
            "method": "tools/call",
            "params": {"name": "generate_checklists", "arguments": {"text": "x"}}
        }))
        .await;
        assert_eq!(resp["error"]["code"], json!(-32602));
        assert_eq!(resp["error"]["data"]["name"], json!("generate_checklists"));
        assert!(resp.get("result").is_none());
    }

    #[tokio::test]
    async fn test_missing_name_is_invalid_params() {
        let resp = call(json!({"jsonrpc": "2.0", "id": 5, "method": "tools/call"})).await;
        assert_eq!(resp["error"]["code"], json!(-32602));
        assert_eq!(resp["error"]["data"]["name"], Value::Null);
    }

    #[tokio::test]
    async fn test_validation_failure_names_field() {
        let resp = call(json!({
            "jsonrpc": "2.0",
            "id": 6,
            "method": "tools/call",
            "params": {"name": "generate_checklist", "arguments": {"text": "   "}}
        }))
        .await;
        assert_eq!(resp["error"]["code"], json!(-32602));
        assert_eq!(resp["error"]["data"]["field"], json!("text"));

        let resp = call(json!({
            "jsonrpc": "2.0",
            "id": 7,
            "method": "tools/call",
            "params": {"name": "generate_checklist", "arguments": {"text": "x", "audience": "human"}}
        }))
        .await;
        assert_eq!(resp["error"]["code"], json!(-32602));
        assert_eq!(resp["error"]["data"]["field"], json!("audience"));
    }

    #[tokio::test]
    async fn test_unknown_method() {
        let resp = call(json!({"jsonrpc": "2.0", "id": 8, "method": "resources/list"})).await;
        assert_eq!(resp["error"]["code"], json!(-32601));
        assert_eq!(resp["error"]["data"]["method"], json!("resources/list"));
    }

    #[tokio::test]
    async fn test_malformed_body() {
        let resp = handler().handle_body(b"\"not json").await;
        let value = serde_json::to_value(resp).unwrap();
        assert_eq!(value["jsonrpc"], "2.0");
        assert_eq!(value["id"], Value::Null);
        assert_eq!(value["error"]["code"], json!(-32601));
    }

    #[tokio::test]
    async fn test_extractor_rejects_bad_scheme_as_execution_failure() {
        let resp = call(json!({
            "jsonrpc": "2.0",
            "id": 9,
            "method": "tools/call",
            "params": {"name": "extract_web_text", "arguments": {"url": "ftp://example.com/file"}}
        }))
        .await;
        assert_eq!(resp["error"]["code"], json!(-32000));
        assert!(resp["error"]["data"]["detail"].is_string());
    }
}
