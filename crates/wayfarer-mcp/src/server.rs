//! MCP server over a [`ToolRegistry`].

use crate::error::{Error, Result};
use crate::registry::ToolRegistry;
use rmcp::model::{
    CallToolRequestParams, CallToolResult, ErrorData, Implementation, ListToolsResult,
    PaginatedRequestParams, ServerCapabilities, ServerInfo, Tool,
};
use rmcp::service::{RequestContext, RoleServer};
use rmcp::{ServerHandler, ServiceExt};
use serde_json::Value;
use std::sync::Arc;
use tokio::io::{AsyncRead, AsyncWrite};

/// Instructions sent to clients when none are configured.
pub const DEFAULT_INSTRUCTIONS: &str = "Travel concierge tools. Call ask_user whenever the \
    request is ambiguous; use nominatim_search, nearby_search_with_walk and plan_trip for \
    places, walking times and itineraries.";

/// Serves a registry's tools to one MCP client.
pub struct McpServer<R: ToolRegistry> {
    registry: Arc<R>,
    name: String,
    version: String,
    instructions: String,
}

impl<R: ToolRegistry + 'static> McpServer<R> {
    /// Server named after this crate.
    pub fn new(registry: R) -> Self {
        Self::with_shared(Arc::new(registry))
    }

    /// Server over a registry shared with other owners.
    pub fn with_shared(registry: Arc<R>) -> Self {
        Self {
            registry,
            name: env!("CARGO_PKG_NAME").to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            instructions: DEFAULT_INSTRUCTIONS.to_string(),
        }
    }

    /// Sets the advertised name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the advertised version.
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    /// Sets the instructions sent on initialize.
    pub fn with_instructions(mut self, instructions: impl Into<String>) -> Self {
        self.instructions = instructions.into();
        self
    }

    /// Advertised name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Tools the server lists.
    pub fn tool_list(&self) -> Vec<Tool> {
        self.registry.tools()
    }

    /// Runs one tool call; unknown names are an invalid-params error.
    pub async fn dispatch(
        &self,
        name: &str,
        args: Value,
    ) -> std::result::Result<CallToolResult, ErrorData> {
        let Some(call) = self.registry.call(name, args) else {
            tracing::warn!(tool = name, "call to unknown tool");
            return Err(ErrorData::invalid_params(format!("unknown tool: {name}"), None));
        };
        tracing::debug!(tool = name, "tool call");
        let result = call.await;
        if let Err(e) = &result {
            tracing::warn!(tool = name, error = %e.message, "tool call failed");
        }
        result
    }

    /// Serves over an arbitrary byte stream pair until the client leaves.
    pub async fn serve_io<I, O>(self, input: I, output: O) -> Result<()>
    where
        I: AsyncRead + Send + Unpin + 'static,
        O: AsyncWrite + Send + Unpin + 'static,
    {
        let tools = self.registry.tool_count();
        let name = self.name.clone();
        let service = self
            .serve((input, output))
            .await
            .map_err(|e| Error::transport(e.to_string()))?;
        tracing::info!(server = %name, tools, "MCP session started");

        let reason = service
            .waiting()
            .await
            .map_err(|e| Error::transport(e.to_string()))?;
        tracing::info!(server = %name, ?reason, "MCP session ended");
        Ok(())
    }

    /// Serves over stdin/stdout.
    pub async fn serve_stdio(self) -> Result<()> {
        self.serve_io(tokio::io::stdin(), tokio::io::stdout()).await
    }
}

impl<R: ToolRegistry + 'static> ServerHandler for McpServer<R> {
    fn get_info(&self) -> ServerInfo {
        ServerInfo::new(ServerCapabilities::builder().enable_tools().build())
            .with_instructions(self.instructions.clone())
            .with_server_info(Implementation::new(self.name.clone(), self.version.clone()))
    }

    async fn list_tools(
        &self,
        _request: Option<PaginatedRequestParams>,
        _context: RequestContext<RoleServer>,
    ) -> std::result::Result<ListToolsResult, ErrorData> {
        Ok(ListToolsResult::with_all_items(self.tool_list()))
    }

    async fn call_tool(
        &self,
        request: CallToolRequestParams,
        _context: RequestContext<RoleServer>,
    ) -> std::result::Result<CallToolResult, ErrorData> {
        let args = Value::Object(request.arguments.unwrap_or_default());
        self.dispatch(&request.name, args).await
    }
}
