//! `wayfarer`: talk to the travel agent from a terminal.

#![forbid(unsafe_code)]

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use wayfarer_agent::Agent;
use wayfarer_cli::commands::{self, DEFAULT_RUN_PROMPT, DEFAULT_SAVE_PROMPT};
use wayfarer_cli::config_handlers::handle_config_command;
use wayfarer_cli::{Cli, Command};
use wayfarer_core::human::AGENT_BANNER;
use wayfarer_core::{LinePrompt, WayfarerConfig};

fn init_tracing(debug: bool) {
    let default = if debug {
        "info,wayfarer_agent=debug,wayfarer_geo=debug,wayfarer_mcp=debug"
    } else {
        "warn"
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default.into()),
        )
        .init();
}

/// Loads the configuration, starts logging and builds an agent whose
/// questions share the terminal with the REPL.
fn setup(config_path: Option<&str>) -> Result<(Agent, Arc<LinePrompt>)> {
    let config = WayfarerConfig::load(config_path).context("loading configuration")?;
    init_tracing(config.agent.debug);

    let console = Arc::new(LinePrompt::stdio().with_banner(AGENT_BANNER));
    let agent = Agent::from_config(&config, console.clone()).context("building the agent")?;
    tracing::debug!(?agent, "agent ready");
    Ok((agent, console))
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config_path = cli.config.as_deref();
    let mut stdout = std::io::stdout();

    match cli.command {
        Command::Config { action } => {
            init_tracing(false);
            handle_config_command(config_path, action, &mut stdout, &mut std::io::stderr())?;
        }
        Command::Chat => {
            let (agent, console) = setup(config_path)?;
            commands::chat(&agent, &console, &mut stdout).await?;
        }
        Command::Run { prompt } => {
            let (agent, _) = setup(config_path)?;
            let prompt = commands::prompt_or(&prompt, DEFAULT_RUN_PROMPT);
            commands::run(&agent, &prompt, &mut stdout).await?;
        }
        Command::Save { out, prompt } => {
            let (agent, _) = setup(config_path)?;
            let prompt = commands::prompt_or(&prompt, DEFAULT_SAVE_PROMPT);
            let file = out.unwrap_or_else(|| {
                commands::default_results_file(chrono::Utc::now().timestamp())
            });
            commands::save(&agent, &prompt, &PathBuf::from(file), &mut stdout).await?;
        }
    }
    Ok(())
}
