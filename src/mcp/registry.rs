//! Tool registry: the fixed, ordered catalog of tool descriptors and their
//! implementations.
//!
//! The registry is assembled once at startup through [`ToolRegistryBuilder`]
//! and shared read-only behind an `Arc` afterwards.

use std::collections::HashMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{McpServerError, Result};
use crate::tools::Tool;

/// MCP tool descriptor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolSpec {
    pub name: String,
    pub description: String,
    #[serde(rename = "inputSchema")]
    pub input_schema: Value,
    pub annotations: ToolAnnotations,
}

/// Risk hints advertised to clients
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolAnnotations {
    #[serde(rename = "readOnlyHint")]
    pub read_only: bool,
    #[serde(rename = "openWorldHint")]
    pub open_world: bool,
    #[serde(rename = "destructiveHint")]
    pub destructive: bool,
}

/// A descriptor paired with the implementation that serves it
#[derive(Clone)]
pub struct RegisteredTool {
    pub spec: ToolSpec,
    pub tool: Arc<dyn Tool>,
}

impl std::fmt::Debug for RegisteredTool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegisteredTool")
            .field("spec", &self.spec)
            .finish_non_exhaustive()
    }
}

/// Immutable tool catalog
#[derive(Debug, Default)]
pub struct ToolRegistry {
    entries: Vec<RegisteredTool>,
    index: HashMap<String, usize>,
}

impl ToolRegistry {
    pub fn builder() -> ToolRegistryBuilder {
        ToolRegistryBuilder::default()
    }

    /// Tool descriptors in registration order
    pub fn list(&self) -> Vec<&ToolSpec> {
        self.entries.iter().map(|entry| &entry.spec).collect()
    }

    /// Find a tool by exact name
    pub fn lookup(&self, name: &str) -> Result<&RegisteredTool> {
        self.index
            .get(name)
            .map(|&i| &self.entries[i])
            .ok_or_else(|| McpServerError::UnknownTool(Some(name.to_string())))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Collects `(ToolSpec, Tool)` pairs before the registry is frozen
#[derive(Default)]
pub struct ToolRegistryBuilder {
    entries: Vec<RegisteredTool>,
}

impl ToolRegistryBuilder {
    pub fn register(mut self, spec: ToolSpec, tool: impl Tool + 'static) -> Self {
        self.entries.push(RegisteredTool {
            spec,
            tool: Arc::new(tool),
        });
        self
    }

    /// Freeze the catalog. Fails on duplicate names or non-object schemas.
    pub fn build(self) -> Result<ToolRegistry> {
        let mut index = HashMap::with_capacity(self.entries.len());

        for (i, entry) in self.entries.iter().enumerate() {
            let spec = &entry.spec;
            if spec.input_schema.get("type").and_then(Value::as_str) != Some("object") {
                return Err(McpServerError::Config(format!(
                    "tool '{}' must declare an object input schema",
                    spec.name
                )));
            }
            if index.insert(spec.name.clone(), i).is_some() {
                return Err(McpServerError::Config(format!(
                    "tool '{}' registered twice",
                    spec.name
                )));
            }
        }

        tracing::debug!(tools = self.entries.len(), "tool registry built");
        Ok(ToolRegistry {
            entries: self.entries,
            index,
        })
    }
}
