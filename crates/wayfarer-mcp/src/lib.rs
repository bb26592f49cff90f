//! Wayfarer MCP: tools served over the Model Context Protocol.
//!
//! Depends on `wayfarer-core` and `wayfarer-geo` (dependency level 2).
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                      wayfarer-mcp                        │
//! ├──────────────────────────────────────────────────────────┤
//! │  ToolRegistry trait, CompositeRegistry                   │
//! ├──────────────────────────────────────────────────────────┤
//! │  McpServer (rmcp ServerHandler, stdio transport)         │
//! ├──────────────────────────────────────────────────────────┤
//! │  HealthTools  health                                     │
//! │  HumanTools   ask_user                                   │
//! │  GeoTools     nominatim_search, osrm_walking_time,       │
//! │               wikipedia_summary, nearby_search_with_walk │
//! │  TripTools    plan_trip                                  │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! The agent in `wayfarer-agent` dispatches through the same registries,
//! so both surfaces share tool definitions and behavior.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod registry;
pub mod server;
pub mod tools;

/// rmcp model types used in tool signatures.
pub use rmcp::model;

pub use error::{Error, McpErrorExt, Result};
pub use registry::{CompositeRegistry, ToolRegistry, ToolResult};
pub use server::McpServer;
pub use tools::support::{make_tool, result_text, serialize_response};
pub use tools::{GeoTools, HealthTools, HumanTools, TripTools};
