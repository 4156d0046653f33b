//! Static MCP manifest served at `/.well-known/mcp.json`

use serde::{Deserialize, Serialize};

use super::registry::{ToolRegistry, ToolSpec};

pub const MANIFEST_SCHEMA_VERSION: &str = "v1";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct McpManifest {
    pub schema_version: String,
    pub name: String,
    pub description: String,
    pub tools: Vec<ToolSpec>,
}

impl McpManifest {
    pub fn new(name: &str, description: &str, registry: &ToolRegistry) -> Self {
        Self {
            schema_version: MANIFEST_SCHEMA_VERSION.to_string(),
            name: name.to_string(),
            description: description.to_string(),
            tools: registry.list().into_iter().cloned().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ServerConfig;
    use crate::tools::default_registry;

    #[test]
    fn test_manifest_lists_registry() {
        let registry = default_registry(&ServerConfig::default()).unwrap();
        let manifest = McpManifest::new("n", "d", &registry);
        let value = serde_json::to_value(&manifest).unwrap();

        assert_eq!(value["schema_version"], "v1");
        assert_eq!(value["tools"].as_array().unwrap().len(), registry.len());
        assert_eq!(value["tools"][0]["name"], "generate_checklist");
        assert_eq!(value["tools"][0]["annotations"]["readOnlyHint"], true);
    }
}
