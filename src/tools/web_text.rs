//! Web text extractor
//!
//! Fetches a single `http`/`https` page and reduces its HTML to readable
//! text. Non-content elements (scripts, styles, noscript, templates, the
//! document head and title, comments) are dropped with their content, block tags
//! become line breaks, everything else is stripped, and the result is capped
//! at a fixed number of characters.

use std::time::Duration;

use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::error::{McpServerError, Result};
use crate::mcp::protocol::ToolResult;
use crate::mcp::registry::{ToolAnnotations, ToolSpec};
use crate::mcp::validate::Arguments;

use super::Tool;

pub const TOOL_NAME: &str = "extract_web_text";

/// Default cap on returned characters
pub const DEFAULT_MAX_CHARS: usize = 20_000;

/// Default wall-clock bound for the outbound fetch
pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(15);

/// Response bodies are read up to this many bytes
pub const MAX_BODY_BYTES: usize = 5 * 1024 * 1024;

const USER_AGENT: &str = concat!("checklist-mcp/", env!("CARGO_PKG_VERSION"));

const MAX_REDIRECTS: usize = 5;

static NON_CONTENT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?is)<script\b[^>]*>.*?</script\s*>|<style\b[^>]*>.*?</style\s*>|<noscript\b[^>]*>.*?</noscript\s*>|<template\b[^>]*>.*?</template\s*>|<head\b[^>]*>.*?</head\s*>|<title\b[^>]*>.*?</title\s*>|<!--.*?-->",
    )
    .unwrap()
});

// Opening tags left behind when the closing tag never arrives
static UNCLOSED_NON_CONTENT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)<(?:script|style|noscript|template)\b.*\z").unwrap());

static TITLE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)<title\b[^>]*>(.*?)</title\s*>").unwrap());

static BLOCK_TAG: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)</?(?:p|div|br|hr|li|ul|ol|dl|dt|dd|h[1-6]|tr|table|thead|tbody|section|article|header|footer|nav|main|aside|blockquote|pre|form|figure|figcaption)\b[^>]*>",
    )
    .unwrap()
});

// A bare `<` in running text is not a tag
static ANY_TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)</?[A-Za-z!?][^>]*>").unwrap());

static ENTITY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"&(#[0-9]{1,7}|#[xX][0-9a-fA-F]{1,6}|[a-zA-Z]{2,8});").unwrap());

static INLINE_SPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[ \t\f\v\u{a0}]+").unwrap());

static BLANK_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n{3,}").unwrap());

/// Text reduced from an HTML document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedText {
    pub title: Option<String>,
    pub text: String,
    pub truncated: bool,
}

/// Reduce an HTML document to plain text of at most `max_chars` characters
pub fn html_to_text(html: &str, max_chars: usize) -> ExtractedText {
    let title = TITLE
        .captures(html)
        .map(|caps| collapse_inline(&decode_entities(&ANY_TAG.replace_all(&caps[1], ""))))
        .filter(|t| !t.is_empty());

    let body = NON_CONTENT.replace_all(html, "\n");
    let body = UNCLOSED_NON_CONTENT.replace(&body, "");
    let body = BLOCK_TAG.replace_all(&body, "\n");
    let body = ANY_TAG.replace_all(&body, "");
    let body = decode_entities(&body);

    let lines: Vec<String> = body
        .replace("\r\n", "\n")
        .replace('\r', "\n")
        .split('\n')
        .map(collapse_inline)
        .collect();
    let joined = lines.join("\n");
    let collapsed = BLANK_RUN.replace_all(joined.trim(), "\n\n");

    let (text, truncated) = truncate_chars(&collapsed, max_chars);
    ExtractedText {
        title,
        text,
        truncated,
    }
}

fn collapse_inline(line: &str) -> String {
    INLINE_SPACE.replace_all(line.trim(), " ").trim().to_string()
}

fn truncate_chars(text: &str, max_chars: usize) -> (String, bool) {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => (text[..byte_idx].trim_end().to_string(), true),
        None => (text.to_string(), false),
    }
}

fn decode_entities(text: &str) -> String {
    ENTITY
        .replace_all(text, |caps: &Captures| {
            let entity = &caps[1];
            let decoded = if let Some(hex) = entity
                .strip_prefix("#x")
                .or_else(|| entity.strip_prefix("#X"))
            {
                u32::from_str_radix(hex, 16).ok().and_then(char::from_u32)
            } else if let Some(dec) = entity.strip_prefix('#') {
                dec.parse::<u32>().ok().and_then(char::from_u32)
            } else {
                match entity {
                    "amp" => Some('&'),
                    "lt" => Some('<'),
                    "gt" => Some('>'),
                    "quot" => Some('"'),
                    "apos" => Some('\''),
                    "nbsp" => Some('\u{a0}'),
                    "ndash" => Some('\u{2013}'),
                    "mdash" => Some('\u{2014}'),
                    "hellip" => Some('\u{2026}'),
                    "copy" => Some('\u{a9}'),
                    _ => None,
                }
            };
            decoded
                .map(String::from)
                .unwrap_or_else(|| caps[0].to_string())
        })
        .into_owned()
}

/// Parse and check an outbound URL
pub fn parse_url(raw: &str) -> Result<reqwest::Url> {
    let url = reqwest::Url::parse(raw.trim())
        .map_err(|e| McpServerError::InvalidUrl(format!("{}: {}", raw, e)))?;

    match url.scheme() {
        "http" | "https" => {}
        other => {
            return Err(McpServerError::InvalidUrl(format!(
                "unsupported scheme '{}'",
                other
            )))
        }
    }
    if url.host_str().is_none() {
        return Err(McpServerError::InvalidUrl(format!("{}: missing host", raw)));
    }

    Ok(url)
}

/// A fetched and reduced page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WebPage {
    pub title: Option<String>,
    pub text: String,
    pub url: String,
    #[serde(skip)]
    pub truncated: bool,
}

/// HTTP fetcher bound to a timeout and a character cap
#[derive(Debug, Clone)]
pub struct WebTextExtractor {
    client: reqwest::Client,
    max_chars: usize,
}

impl WebTextExtractor {
    pub fn new(timeout: Duration, max_chars: usize) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .redirect(reqwest::redirect::Policy::limited(MAX_REDIRECTS))
            .build()?;

        Ok(Self { client, max_chars })
    }

    /// Fetch `url` once and extract its text
    pub async fn extract(&self, url: &str) -> Result<WebPage> {
        let url = parse_url(url)?;
        tracing::debug!(url = %url, "fetching page");

        let mut response = self.client.get(url.clone()).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(McpServerError::UpstreamStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }
        let final_url = response.url().to_string();

        let mut body = Vec::new();
        while let Some(chunk) = response.chunk().await? {
            let room = MAX_BODY_BYTES - body.len();
            body.extend_from_slice(&chunk[..chunk.len().min(room)]);
            if body.len() >= MAX_BODY_BYTES {
                tracing::debug!(url = %final_url, "response body capped");
                break;
            }
        }

        let html = String::from_utf8_lossy(&body);
        let extracted = html_to_text(&html, self.max_chars);

        Ok(WebPage {
            title: extracted.title,
            text: extracted.text,
            url: final_url,
            truncated: extracted.truncated,
        })
    }
}

pub fn spec() -> ToolSpec {
    ToolSpec {
        name: TOOL_NAME.to_string(),
        description: "Fetch a web page over http(s) and return its readable text (scripts and styles removed, length capped). Output is JSON-only (as text).".to_string(),
        input_schema: json!({
            "type": "object",
            "properties": {
                "url": {"type": "string", "description": "Absolute http:// or https:// URL to fetch"}
            },
            "required": ["url"],
            "additionalProperties": false
        }),
        annotations: ToolAnnotations {
            read_only: true,
            open_world: true,
            destructive: false,
        },
    }
}

/// `extract_web_text` tool
#[derive(Debug, Clone)]
pub struct WebTextTool {
    extractor: WebTextExtractor,
}

impl WebTextTool {
    pub fn new(extractor: WebTextExtractor) -> Self {
        Self { extractor }
    }
}

#[async_trait]
impl Tool for WebTextTool {
    async fn run(&self, args: &Arguments) -> Result<ToolResult> {
        let url = args
            .get("url")
            .and_then(Value::as_str)
            .ok_or_else(|| McpServerError::MissingField("url".to_string()))?;

        let page = self.extractor.extract(url).await?;
        let chars = page.text.chars().count();

        Ok(ToolResult::json(&page)?
            .with_meta("source_url", page.url.clone())
            .with_meta("truncated", page.truncated)
            .with_meta("chars", chars))
    }
}
