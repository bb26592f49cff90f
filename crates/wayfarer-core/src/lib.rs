//! Wayfarer Core: shared types, errors, configuration and utilities.
//!
//! This crate has no internal Wayfarer dependencies (dependency level 0).
//!
//! # Modules
//!
//! - [`error`]: Error types and Result alias
//! - [`config`]: Layered TOML/env configuration
//! - [`geo`]: Coordinates, distances, travel modes
//! - [`human`]: Clarifying questions put to the human

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod config;
pub mod error;
pub mod geo;
pub mod human;

// Re-export key types at crate root for convenience
pub use config::{AgentConfig, GeoConfig, ServerConfig, WayfarerConfig};
pub use error::{Error, Result};
pub use geo::{Coordinates, TravelMode};
pub use human::{HumanPrompt, LinePrompt, Question, ScriptedPrompt};
