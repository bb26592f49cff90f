//! Command-line definitions.

use clap::{Parser, Subcommand};

/// Wayfarer travel concierge
#[derive(Parser, Debug)]
#[command(name = "wayfarer", version)]
#[command(about = "Tool-calling travel concierge on OpenStreetMap data", long_about = None)]
pub struct Cli {
    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Top-level subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Interactive chat with the agent
    Chat,

    /// Answer one prompt and print the reply
    Run {
        /// Prompt words (a walking tour of Algiers when omitted)
        prompt: Vec<String>,
    },

    /// Answer one prompt and save the reply as Markdown
    Save {
        /// Output file (default results_<unix-time>.md)
        #[arg(long)]
        out: Option<String>,

        /// Prompt words (a café search in Algiers when omitted)
        prompt: Vec<String>,
    },

    /// Inspect or create the configuration file
    Config {
        /// Config action
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// `config` subcommands.
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Print the resolved config file path
    Path,

    /// Print one value by dotted key (e.g. agent.model)
    Get {
        /// Dotted key
        key: String,
    },

    /// Write a default config file
    Init {
        /// Where to write it (default: the platform config dir)
        #[arg(long)]
        file: Option<String>,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}
