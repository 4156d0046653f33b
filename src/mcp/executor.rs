//! Tool execution by exact name

use std::sync::Arc;
use std::time::Instant;

use crate::error::{codes, McpServerError, Result};

use super::protocol::ToolResult;
use super::registry::ToolRegistry;
use super::validate::Arguments;

/// Dispatches validated calls to registered tool implementations
#[derive(Debug, Clone)]
pub struct ToolExecutor {
    registry: Arc<ToolRegistry>,
}

impl ToolExecutor {
    pub fn new(registry: Arc<ToolRegistry>) -> Self {
        Self { registry }
    }

    /// Run a tool. Any failure raised by the tool itself comes back as a
    /// tool-execution error, never as a protocol error.
    pub async fn execute(&self, name: &str, arguments: &Arguments) -> Result<ToolResult> {
        let entry = self.registry.lookup(name)?;
        let started = Instant::now();

        match entry.tool.run(arguments).await {
            Ok(result) => {
                tracing::info!(
                    tool = %name,
                    elapsed_ms = started.elapsed().as_millis() as u64,
                    "tool call succeeded"
                );
                Ok(result)
            }
            Err(e) => {
                tracing::warn!(
                    tool = %name,
                    elapsed_ms = started.elapsed().as_millis() as u64,
                    error = %e,
                    "tool call failed"
                );
                if e.code() == codes::TOOL_EXECUTION_FAILED {
                    Err(e)
                } else {
                    Err(McpServerError::ToolExecution(e.to_string()))
                }
            }
        }
    }
}
