//! Tool implementations served over MCP
//!
//! Each tool is an independent unit implementing [`Tool`]. The server's
//! catalog is assembled in [`default_registry`]; adding a tool means adding
//! one more `register` call there, nothing in the dispatch path changes.

pub mod checklist;
pub mod web_text;

pub use checklist::{generate_checklist, Checklist, ChecklistStep, ChecklistTool};
pub use web_text::{html_to_text, ExtractedText, WebPage, WebTextExtractor, WebTextTool};

use async_trait::async_trait;

use crate::config::ServerConfig;
use crate::error::Result;
use crate::mcp::protocol::ToolResult;
use crate::mcp::registry::ToolRegistry;
use crate::mcp::validate::Arguments;

/// A callable tool. Arguments arrive already validated against the tool's
/// input schema.
#[async_trait]
pub trait Tool: Send + Sync {
    async fn run(&self, args: &Arguments) -> Result<ToolResult>;
}

/// Build the registry of every tool this server exposes
pub fn default_registry(config: &ServerConfig) -> Result<ToolRegistry> {
    let extractor = WebTextExtractor::new(config.fetch_timeout, config.max_text_chars)?;

    ToolRegistry::builder()
        .register(checklist::spec(), ChecklistTool)
        .register(web_text::spec(), WebTextTool::new(extractor))
        .build()
}
