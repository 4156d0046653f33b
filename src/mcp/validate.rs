//! Schema-driven argument validation for `tools/call`
//!
//! Arguments are checked against the subset of JSON Schema that tool
//! descriptors use: `properties` with `type`, `enum`, `default`,
//! `minimum`/`maximum`, plus `required` and `additionalProperties`.
//!
//! Out-of-range numbers are clamped into bounds rather than rejected, and an
//! integer that cannot be coerced falls back to the declared default, so
//! sloppy probes still get a usable call.

use serde_json::{json, Map, Value};

use crate::error::{McpServerError, Result};

use super::registry::ToolSpec;

/// Normalized tool arguments
pub type Arguments = Map<String, Value>;

/// Validate and normalize raw `arguments` against a tool's input schema
pub fn validate(spec: &ToolSpec, raw: Value) -> Result<Arguments> {
    let mut raw = match raw {
        Value::Null => Map::new(),
        Value::Object(map) => map,
        _ => {
            return Err(McpServerError::InvalidType {
                field: "arguments".to_string(),
                expected: "object".to_string(),
            })
        }
    };

    let schema = &spec.input_schema;
    let empty = Map::new();
    let properties = schema
        .get("properties")
        .and_then(Value::as_object)
        .unwrap_or(&empty);
    let required: Vec<&str> = schema
        .get("required")
        .and_then(Value::as_array)
        .map(|names| names.iter().filter_map(Value::as_str).collect())
        .unwrap_or_default();
    let allow_extra = schema
        .get("additionalProperties")
        .and_then(Value::as_bool)
        .unwrap_or(true);

    let mut normalized = Map::with_capacity(properties.len());

    for (name, prop) in properties {
        let supplied = raw.remove(name).filter(|v| !v.is_null());
        let default = prop.get("default");

        let value = match supplied {
            Some(value) => coerce(name, prop, value)?.or_else(|| default.cloned()),
            None => default.cloned(),
        };

        match value {
            Some(value) => {
                check_enum(name, prop, &value)?;
                normalized.insert(name.clone(), value);
            }
            None if required.contains(&name.as_str()) => {
                return Err(McpServerError::MissingField(name.clone()));
            }
            None => {}
        }
    }

    if !allow_extra {
        if let Some(extra) = raw.keys().next() {
            return Err(McpServerError::UnexpectedField(extra.clone()));
        }
    }

    Ok(normalized)
}

/// Coerce a supplied value to the declared type.
///
/// `Ok(None)` means "treat as absent": an empty string, or an integer that
/// could not be coerced (the caller substitutes the default). Integer strings
/// must be whole numbers; booleans count as 0 and 1.
fn coerce(name: &str, prop: &Value, value: Value) -> Result<Option<Value>> {
    let invalid = |expected: &str| McpServerError::InvalidType {
        field: name.to_string(),
        expected: expected.to_string(),
    };

    match prop.get("type").and_then(Value::as_str) {
        Some("string") => match value {
            // Enum members match verbatim
            Value::String(_) if prop.get("enum").is_some() => Ok(Some(value)),
            Value::String(s) => {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    Ok(None)
                } else {
                    Ok(Some(Value::String(trimmed.to_string())))
                }
            }
            _ => Err(invalid("string")),
        },
        Some("integer") => match coerce_integer(&value) {
            Some(n) => Ok(Some(json!(clamp_integer(n, prop)))),
            None if prop.get("default").is_some() => Ok(None),
            None => Err(invalid("integer")),
        },
        Some("number") => match coerce_number(&value) {
            Some(n) => Ok(Some(json!(clamp_number(n, prop)))),
            None if prop.get("default").is_some() => Ok(None),
            None => Err(invalid("number")),
        },
        Some("boolean") => match value {
            Value::Bool(_) => Ok(Some(value)),
            Value::String(s) if s.trim().eq_ignore_ascii_case("true") => Ok(Some(json!(true))),
            Value::String(s) if s.trim().eq_ignore_ascii_case("false") => Ok(Some(json!(false))),
            _ => Err(invalid("boolean")),
        },
        Some("object") if !value.is_object() => Err(invalid("object")),
        Some("array") if !value.is_array() => Err(invalid("array")),
        _ => Ok(Some(value)),
    }
}

fn coerce_integer(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| {
            n.as_f64()
                .filter(|f| f.is_finite())
                .map(|f| f.trunc() as i64)
        }),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        Value::Bool(b) => Some(i64::from(*b)),
        _ => None,
    }
}

fn coerce_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
    .filter(|f| f.is_finite())
}

fn clamp_integer(n: i64, prop: &Value) -> i64 {
    let mut n = n;
    if let Some(min) = prop.get("minimum").and_then(Value::as_i64) {
        n = n.max(min);
    }
    if let Some(max) = prop.get("maximum").and_then(Value::as_i64) {
        n = n.min(max);
    }
    n
}

fn clamp_number(n: f64, prop: &Value) -> f64 {
    let mut n = n;
    if let Some(min) = prop.get("minimum").and_then(Value::as_f64) {
        n = n.max(min);
    }
    if let Some(max) = prop.get("maximum").and_then(Value::as_f64) {
        n = n.min(max);
    }
    n
}

fn check_enum(name: &str, prop: &Value, value: &Value) -> Result<()> {
    match prop.get("enum").and_then(Value::as_array) {
        Some(members) if !members.contains(value) => Err(McpServerError::InvalidEnum {
            field: name.to_string(),
            value: value.clone(),
        }),
        _ => Ok(()),
    }
}
