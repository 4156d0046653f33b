//! Checklist generator
//!
//! Turns a piece of free text into a fixed-shape execution checklist. The
//! steps come from a static template; the input text only has to be present.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::error::{McpServerError, Result};
use crate::mcp::protocol::ToolResult;
use crate::mcp::registry::{ToolAnnotations, ToolSpec};
use crate::mcp::validate::Arguments;

use super::Tool;

pub const TOOL_NAME: &str = "generate_checklist";

pub const MIN_STEPS: usize = 3;
pub const MAX_STEPS: usize = 12;
pub const DEFAULT_STEPS: usize = 8;

/// The only audience currently supported
pub const AUDIENCE_AGENT: &str = "agent";

const VERIFY_INSTRUCTION: &str = "Confirm this step is completed and recorded.";

/// (title, action) pairs, in execution order
const STEP_TEMPLATE: [(&str, &str); MAX_STEPS] = [
    ("Clarify scope", "Write down goals, boundaries, and constraints."),
    ("List inputs", "Collect required info, links, and credentials."),
    ("Break into tasks", "Split work into ordered tasks with owners."),
    ("Define acceptance", "Define how you will verify each task is done."),
    ("Execute", "Do tasks in order and record results."),
    ("Review", "Check gaps and fix issues."),
    (
        "Package artifacts",
        "Put outputs in the right places (repo, doc, links).",
    ),
    ("Final check", "Run a final end-to-end verification."),
    ("Submit", "Submit and record submission details."),
    ("Monitor", "Watch for review feedback and respond."),
    (
        "Document learnings",
        "Write what worked and what to reuse next time.",
    ),
    ("Template it", "Extract a reusable template for future runs."),
];

/// Generated checklist, serialized into the tool's text block
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Checklist {
    #[serde(rename = "type")]
    pub kind: String,
    pub audience: String,
    pub context: Option<String>,
    pub steps: Vec<ChecklistStep>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChecklistStep {
    pub id: String,
    pub title: String,
    pub action: String,
    pub verify: String,
    pub artifacts: Vec<String>,
}

/// Build a checklist with `max_steps` steps (clamped to 3..=12)
pub fn generate_checklist(max_steps: usize, audience: &str) -> Checklist {
    let n = max_steps.clamp(MIN_STEPS, MAX_STEPS);

    let steps = STEP_TEMPLATE
        .iter()
        .take(n)
        .enumerate()
        .map(|(i, (title, action))| ChecklistStep {
            id: (i + 1).to_string(),
            title: title.to_string(),
            action: action.to_string(),
            verify: VERIFY_INSTRUCTION.to_string(),
            artifacts: Vec::new(),
        })
        .collect();

    Checklist {
        kind: "checklist".to_string(),
        audience: audience.to_string(),
        context: None,
        steps,
    }
}

pub fn spec() -> ToolSpec {
    ToolSpec {
        name: TOOL_NAME.to_string(),
        description: "Generate a structured execution checklist from input text. Output is JSON-only (as text).".to_string(),
        input_schema: json!({
            "type": "object",
            "properties": {
                "text": {"type": "string", "description": "Source text to convert into checklist steps"},
                "max_steps": {
                    "type": "integer",
                    "minimum": MIN_STEPS,
                    "maximum": MAX_STEPS,
                    "default": DEFAULT_STEPS,
                    "description": "Maximum number of steps"
                },
                "audience": {
                    "type": "string",
                    "enum": [AUDIENCE_AGENT],
                    "default": AUDIENCE_AGENT,
                    "description": "Audience must be 'agent'"
                }
            },
            "required": ["text"],
            "additionalProperties": false
        }),
        annotations: ToolAnnotations {
            read_only: true,
            open_world: false,
            destructive: false,
        },
    }
}

/// `generate_checklist` tool
#[derive(Debug, Clone, Copy, Default)]
pub struct ChecklistTool;

#[async_trait]
impl Tool for ChecklistTool {
    async fn run(&self, args: &Arguments) -> Result<ToolResult> {
        if args.get("text").and_then(Value::as_str).is_none() {
            return Err(McpServerError::MissingField("text".to_string()));
        }

        let max_steps = args
            .get("max_steps")
            .and_then(Value::as_i64)
            .map(|n| n.clamp(MIN_STEPS as i64, MAX_STEPS as i64) as usize)
            .unwrap_or(DEFAULT_STEPS);
        let audience = args
            .get("audience")
            .and_then(Value::as_str)
            .unwrap_or(AUDIENCE_AGENT);

        let checklist = generate_checklist(max_steps, audience);
        Ok(ToolResult::json(&checklist)?.with_meta("audience", audience))
    }
}
