//! `user-mcp`: Wayfarer's MCP server on stdio.
//!
//! stdout carries the protocol, so logs go to stderr and questions for the
//! human go to the controlling terminal.

#![forbid(unsafe_code)]

use anyhow::{Context, Result};
use clap::Parser;
use std::sync::Arc;
use wayfarer_core::{HumanPrompt, LinePrompt, ScriptedPrompt, WayfarerConfig};
use wayfarer_geo::{GeoBackend, OsmBackend};
use wayfarer_mcp::tools::{GeoTools, HealthTools, HumanTools, TripTools};
use wayfarer_mcp::{CompositeRegistry, McpServer, ToolRegistry};

/// MCP server exposing ask_user and the travel tools over stdio.
#[derive(Debug, Parser)]
#[command(name = "user-mcp", version, about)]
struct Cli {
    /// Path to a configuration file
    #[arg(short, long)]
    config: Option<String>,

    /// Serve only ask_user and health
    #[arg(long)]
    no_travel_tools: bool,
}

fn human_prompt() -> Arc<dyn HumanPrompt> {
    match LinePrompt::tty() {
        Ok(prompt) => Arc::new(prompt),
        Err(e) => {
            tracing::warn!(error = %e, "no terminal for ask_user, questions will go unanswered");
            Arc::new(ScriptedPrompt::default())
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,wayfarer_mcp=debug,wayfarer_geo=debug".into()),
        )
        .init();

    let cli = Cli::parse();
    let config = WayfarerConfig::load(cli.config.as_deref()).context("loading configuration")?;
    let travel = config.server.travel_tools && !cli.no_travel_tools;

    let backend: Arc<dyn GeoBackend> =
        Arc::new(OsmBackend::new(&config.geo).context("building geo clients")?);

    let tools = CompositeRegistry::new()
        .add(HumanTools::new(human_prompt()))
        .add_if(travel, GeoTools::new(Arc::clone(&backend)))
        .add_if(travel, TripTools::new(backend));
    let version = env!("CARGO_PKG_VERSION");
    let total = tools.tool_count() + 1;
    let tools = tools.add(HealthTools::new(&config.server.name, version, total));

    tracing::info!(
        server = %config.server.name,
        travel,
        tools = total,
        "starting MCP server on stdio"
    );

    McpServer::new(tools)
        .with_name(&config.server.name)
        .with_version(version)
        .serve_stdio()
        .await?;
    Ok(())
}
