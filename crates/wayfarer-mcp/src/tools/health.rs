//! The `health` tool.

use super::support::{NoArgs, make_tool, serialize_response};
use crate::registry::{ToolRegistry, ToolResult};
use rmcp::model::Tool;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Tool name.
pub const HEALTH_TOOL: &str = "health";

/// Body of a `health` reply.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Always `healthy` while the server answers.
    pub status: String,
    /// Server name.
    pub server_name: String,
    /// Server version.
    pub version: String,
    /// Tools exposed by the server, this one included.
    pub tool_count: usize,
}

/// Registry holding the `health` tool.
#[derive(Debug, Clone)]
pub struct HealthTools {
    response: HealthResponse,
}

impl HealthTools {
    /// `tool_count` counts every tool the server exposes, this one included.
    pub fn new(server_name: impl Into<String>, version: impl Into<String>, tool_count: usize) -> Self {
        Self {
            response: HealthResponse {
                status: "healthy".to_string(),
                server_name: server_name.into(),
                version: version.into(),
                tool_count,
            },
        }
    }
}

impl ToolRegistry for HealthTools {
    fn tools(&self) -> Vec<Tool> {
        vec![make_tool::<NoArgs>(
            HEALTH_TOOL,
            "Check server health and report the number of tools",
        )]
    }

    fn call(&self, name: &str, _args: Value) -> Option<ToolResult> {
        if name != HEALTH_TOOL {
            return None;
        }
        let response = self.response.clone();
        Some(Box::pin(async move { serialize_response(&response) }))
    }
}
