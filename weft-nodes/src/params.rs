//! Helpers for reading the `params` object of a node configuration.

use weft_core::{Result, WeftError};

fn field_error(node: &str, field: &str, cause: &str) -> WeftError {
    WeftError::ConfigField {
        node: node.to_string(),
        field: format!("params.{field}"),
        cause: cause.to_string(),
    }
}

/// The node's `params` object, or JSON null when absent.
pub(crate) fn object(config: &serde_json::Value) -> &serde_json::Value {
    config.get("params").unwrap_or(&serde_json::Value::Null)
}

/// An optional integer parameter with a default.
pub(crate) fn i64_or(
    config: &serde_json::Value,
    node: &str,
    field: &str,
    default: i64,
) -> Result<i64> {
    match object(config).get(field) {
        None => Ok(default),
        Some(value) => value
            .as_i64()
            .ok_or_else(|| field_error(node, field, "must be an integer")),
    }
}

/// A required string parameter.
pub(crate) fn required_str(
    config: &serde_json::Value,
    node: &str,
    field: &str,
) -> Result<String> {
    object(config)
        .get(field)
        .and_then(serde_json::Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| field_error(node, field, "is missing or not a string"))
}

/// A required parameter of any JSON shape.
pub(crate) fn required_value(
    config: &serde_json::Value,
    node: &str,
    field: &str,
) -> Result<serde_json::Value> {
    object(config)
        .get(field)
        .cloned()
        .ok_or_else(|| field_error(node, field, "is missing"))
}
