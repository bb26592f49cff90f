//! Wayfarer CLI: chat, one-shot and save front ends for the agent, plus
//! configuration management.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod cli;
pub mod commands;
pub mod config_handlers;

pub use cli::{Cli, Command, ConfigAction};
