//! Handlers for the `config` subcommands.

use crate::cli::ConfigAction;
use std::io::Write;
use std::path::PathBuf;
use wayfarer_core::config::{PROJECT_NAME, format_toml_value, get_nested_value};
use wayfarer_core::{Error, Result, WayfarerConfig};

/// Dispatches a config subcommand, printing results to `out` and hints to
/// `hints`.
pub fn handle_config_command(
    config_path: Option<&str>,
    action: ConfigAction,
    out: &mut impl Write,
    hints: &mut impl Write,
) -> Result<()> {
    match action {
        ConfigAction::Path => cmd_config_path(config_path, out, hints),
        ConfigAction::Get { key } => cmd_config_get(config_path, &key, out),
        ConfigAction::Init { file, force } => {
            cmd_config_init(file.as_deref().or(config_path), force, out)
        }
    }
}

/// Show the resolved config file path.
pub fn cmd_config_path(
    config_path: Option<&str>,
    out: &mut impl Write,
    hints: &mut impl Write,
) -> Result<()> {
    let path = WayfarerConfig::resolve_config_path(config_path)
        .ok_or_else(|| Error::config("Could not determine config directory for this platform"))?;
    writeln!(out, "{}", path.display())?;
    if !path.exists() {
        writeln!(
            hints,
            "(file does not exist, run `{PROJECT_NAME} config init` to create it)"
        )?;
    }
    Ok(())
}

/// Get a configuration value by dotted key.
pub fn cmd_config_get(config_path: Option<&str>, key: &str, out: &mut impl Write) -> Result<()> {
    let config = WayfarerConfig::load(config_path)?;
    let value = toml::Value::try_from(&config).map_err(|e| Error::config(e.to_string()))?;
    match get_nested_value(&value, key) {
        Some(val) => {
            writeln!(out, "{}", format_toml_value(val))?;
            Ok(())
        }
        None => Err(Error::config(format!(
            "Key '{key}' not found in configuration"
        ))),
    }
}

/// Create a default configuration file.
pub fn cmd_config_init(file: Option<&str>, force: bool, out: &mut impl Write) -> Result<()> {
    let path = match file {
        Some(p) => PathBuf::from(p),
        None => WayfarerConfig::default_config_path()
            .ok_or_else(|| Error::config("Could not determine config directory"))?,
    };

    if path.exists() && !force {
        return Err(Error::config(format!(
            "Config file already exists at {}. Use --force to overwrite.",
            path.display()
        )));
    }

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }

    let toml_str = WayfarerConfig::default().to_toml_string()?;
    std::fs::write(&path, toml_str)?;

    writeln!(out, "Config file created at {}", path.display())?;
    Ok(())
}
