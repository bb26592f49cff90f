//! Helpers shared by the tool groups.

use crate::error::invalid_args;
use rmcp::model::{CallToolResult, Content, ErrorData, JsonObject, Tool};
use schemars::JsonSchema;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;

/// Arguments of a tool that takes none.
#[derive(Debug, Default, Deserialize, JsonSchema)]
pub struct NoArgs {}

/// JSON schema of an argument type, as an MCP input schema.
pub fn schema_of<T: JsonSchema>() -> Arc<JsonObject> {
    let schema = schemars::schema_for!(T);
    Arc::new(schema.as_object().cloned().unwrap_or_default())
}

/// Tool definition whose input schema is derived from `T`.
pub fn make_tool<T: JsonSchema>(name: &str, description: &str) -> Tool {
    Tool::new(name.to_string(), description.to_string(), schema_of::<T>())
}

/// Decodes tool arguments.
pub fn parse_args<T: DeserializeOwned>(tool: &str, args: Value) -> Result<T, ErrorData> {
    let args = if args.is_null() {
        Value::Object(Default::default())
    } else {
        args
    };
    serde_json::from_value(args).map_err(|e| invalid_args(tool, e))
}

/// Plain-text success result.
pub fn text_result(text: impl Into<String>) -> CallToolResult {
    CallToolResult::success(vec![Content::text(text.into())])
}

/// Pretty-printed JSON success result.
pub fn serialize_response<T: serde::Serialize>(value: &T) -> Result<CallToolResult, ErrorData> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| ErrorData::internal_error(e.to_string(), None))?;
    Ok(text_result(json))
}

/// Concatenated text content of a result.
pub fn result_text(result: &CallToolResult) -> String {
    result
        .content
        .iter()
        .filter_map(|c| c.as_text().map(|t| t.text.as_str()))
        .collect::<Vec<_>>()
        .join("\n")
}
