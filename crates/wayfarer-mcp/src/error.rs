//! Error types for wayfarer-mcp.

use rmcp::model::ErrorData;
use thiserror::Error;

/// Result type alias for wayfarer-mcp operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while running the server.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// The MCP transport failed to start or stopped abnormally.
    #[error("MCP transport error: {0}")]
    Transport(String),
}

impl Error {
    /// Create a transport error.
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport(message.into())
    }
}

/// Conversion of domain errors into MCP error payloads.
pub trait McpErrorExt {
    /// Maps the error onto an rmcp [`ErrorData`].
    fn to_mcp_error(&self) -> ErrorData;
}

impl McpErrorExt for wayfarer_core::Error {
    fn to_mcp_error(&self) -> ErrorData {
        match self {
            wayfarer_core::Error::Validation { .. } => {
                ErrorData::invalid_params(self.to_string(), None)
            }
            _ => ErrorData::internal_error(self.to_string(), None),
        }
    }
}

/// Maps a failure to decode tool arguments.
pub fn invalid_args(tool: &str, err: serde_json::Error) -> ErrorData {
    ErrorData::invalid_params(format!("invalid arguments for {tool}: {err}"), None)
}
