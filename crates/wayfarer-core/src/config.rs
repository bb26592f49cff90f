//! Configuration for Wayfarer.
//!
//! Values come from three layers, later ones winning:
//!
//! 1. built-in defaults,
//! 2. a TOML file (`--config`, `$WAYFARER_CONFIG`, or
//!    `<config_dir>/wayfarer/config.toml`),
//! 3. environment variables (`OPENAI_API_KEY`, `OPENAI_BASE_URL`, `MODEL`,
//!    `TEMPERATURE`, `DEBUG`, `WAYFARER_USER_AGENT`).

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Project name used for the config directory.
pub const PROJECT_NAME: &str = "wayfarer";

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV: &str = "WAYFARER_CONFIG";

/// Sampling temperature used when none is configured.
pub const DEFAULT_TEMPERATURE: f32 = 0.2;

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WayfarerConfig {
    /// Geo/travel HTTP clients.
    pub geo: GeoConfig,
    /// LLM agent.
    pub agent: AgentConfig,
    /// MCP server.
    pub server: ServerConfig,
}

/// Settings for the OpenStreetMap-family clients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeoConfig {
    /// `User-Agent` sent to every service. Nominatim's usage policy asks
    /// for a real contact address here.
    pub user_agent: String,
    /// `Accept-Language` header.
    pub accept_language: String,
    /// Nominatim base URL.
    pub nominatim_url: String,
    /// OSRM base URL.
    pub osrm_url: String,
    /// Overpass interpreter endpoint.
    pub overpass_url: String,
    /// Wikipedia REST base URL.
    pub wikipedia_url: String,
    /// Timeout for Nominatim and OSRM requests.
    pub timeout_secs: u64,
    /// Timeout for Overpass requests.
    pub overpass_timeout_secs: u64,
    /// Timeout for Wikipedia requests.
    pub wikipedia_timeout_secs: u64,
}

impl Default for GeoConfig {
    fn default() -> Self {
        Self {
            user_agent: "wayfarer/0.1 (contact@example.com)".to_string(),
            accept_language: "en".to_string(),
            nominatim_url: "https://nominatim.openstreetmap.org".to_string(),
            osrm_url: "https://router.project-osrm.org".to_string(),
            overpass_url: "https://overpass-api.de/api/interpreter".to_string(),
            wikipedia_url: "https://en.wikipedia.org/api/rest_v1".to_string(),
            timeout_secs: 15,
            overpass_timeout_secs: 30,
            wikipedia_timeout_secs: 12,
        }
    }
}

/// Settings for the tool-calling agent.
#[derive(Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentConfig {
    /// API key for the chat completions endpoint.
    pub api_key: String,
    /// Base URL of an OpenAI-compatible API.
    pub base_url: String,
    /// Model name.
    pub model: String,
    /// Sampling temperature.
    pub temperature: f32,
    /// Maximum model turns per request.
    pub max_steps: usize,
    /// Log every model turn and tool call.
    pub debug: bool,
    /// Retries for transient LLM failures.
    pub max_retries: usize,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: "https://api.openai.com/v1".to_string(),
            model: "gpt-4o-mini".to_string(),
            temperature: DEFAULT_TEMPERATURE,
            max_steps: 8,
            debug: false,
            max_retries: 3,
        }
    }
}

impl std::fmt::Debug for AgentConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AgentConfig")
            .field("api_key", &if self.api_key.is_empty() { "" } else { "***" })
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("temperature", &self.temperature)
            .field("max_steps", &self.max_steps)
            .field("debug", &self.debug)
            .field("max_retries", &self.max_retries)
            .finish()
    }
}

/// Settings for the MCP server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Name reported to MCP clients.
    pub name: String,
    /// Expose the geo and trip tools next to `ask_user`.
    pub travel_tools: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            name: "user-mcp".to_string(),
            travel_tools: true,
        }
    }
}

impl WayfarerConfig {
    /// Default config file location for this platform.
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join(PROJECT_NAME).join("config.toml"))
    }

    /// Resolves the config file: explicit path, then `$WAYFARER_CONFIG`,
    /// then the platform default.
    pub fn resolve_config_path(explicit: Option<&str>) -> Option<PathBuf> {
        if let Some(p) = explicit {
            return Some(PathBuf::from(p));
        }
        if let Ok(p) = std::env::var(CONFIG_ENV) {
            if !p.is_empty() {
                return Some(PathBuf::from(p));
            }
        }
        Self::default_config_path()
    }

    /// Loads the file (if present) and applies process environment overrides.
    pub fn load(explicit: Option<&str>) -> Result<Self> {
        let mut config = match Self::resolve_config_path(explicit) {
            Some(path) if path.exists() => Self::from_file(&path)?,
            Some(path) if explicit.is_some() => {
                return Err(Error::config(format!(
                    "Config file does not exist: {}",
                    path.display()
                )));
            }
            _ => Self::default(),
        };
        config.apply_env(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Parses a TOML file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
            .map_err(|e| Error::config(format!("Failed to parse {}: {e}", path.display())))
    }

    /// Parses TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::config(e.to_string()))
    }

    /// Serializes to pretty TOML.
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| Error::config(e.to_string()))
    }

    /// Applies environment overrides read through `lookup`.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(key) = lookup("OPENAI_API_KEY") {
            self.agent.api_key = key;
        }
        if let Some(url) = lookup("OPENAI_BASE_URL").filter(|u| !u.is_empty()) {
            self.agent.base_url = url;
        }
        if let Some(model) = lookup("MODEL").filter(|m| !m.is_empty()) {
            self.agent.model = model;
        }
        if let Some(raw) = lookup("TEMPERATURE") {
            self.agent.temperature = raw.trim().parse().unwrap_or_else(|_| {
                tracing::warn!(value = %raw, "invalid TEMPERATURE, using default");
                DEFAULT_TEMPERATURE
            });
        }
        if let Some(raw) = lookup("DEBUG") {
            self.agent.debug = parse_flag(&raw);
        }
        if let Some(ua) = lookup("WAYFARER_USER_AGENT").filter(|u| !u.is_empty()) {
            self.geo.user_agent = ua;
        }
    }
}

/// `1`, `true` and `yes` (any case) are truthy; everything else is not.
pub fn parse_flag(raw: &str) -> bool {
    matches!(raw.trim().to_lowercase().as_str(), "1" | "true" | "yes")
}

/// Navigate a dotted key path in a TOML value tree.
pub fn get_nested_value<'a>(value: &'a toml::Value, key: &str) -> Option<&'a toml::Value> {
    let mut current = value;
    for part in key.split('.') {
        current = current.as_table()?.get(part)?;
    }
    Some(current)
}

/// Format a TOML value for display on stdout.
pub fn format_toml_value(value: &toml::Value) -> String {
    match value {
        toml::Value::String(s) => s.clone(),
        toml::Value::Integer(i) => i.to_string(),
        toml::Value::Float(f) => f.to_string(),
        toml::Value::Boolean(b) => b.to_string(),
        toml::Value::Datetime(dt) => dt.to_string(),
        toml::Value::Array(_) | toml::Value::Table(_) => {
            toml::to_string_pretty(value).unwrap_or_else(|_| format!("{value:?}"))
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = WayfarerConfig::default();
        assert_eq!(config.agent.model, "gpt-4o-mini");
        assert_eq!(config.agent.temperature, 0.2);
        assert_eq!(config.agent.max_steps, 8);
        assert_eq!(config.geo.timeout_secs, 15);
        assert_eq!(config.server.name, "user-mcp");
        assert!(config.server.travel_tools);
    }

    #[test]
    fn test_env_overrides() {
        let mut config = WayfarerConfig::default();
        config.apply_env(env(&[
            ("OPENAI_API_KEY", "sk-test"),
            ("MODEL", "gpt-4o"),
            ("TEMPERATURE", "0.7"),
            ("DEBUG", "Yes"),
        ]));
        assert_eq!(config.agent.api_key, "sk-test");
        assert_eq!(config.agent.model, "gpt-4o");
        assert!((config.agent.temperature - 0.7).abs() < f32::EPSILON);
        assert!(config.agent.debug);
    }

    #[test]
    fn test_invalid_temperature_falls_back() {
        let mut config = WayfarerConfig::default();
        config.agent.temperature = 0.9;
        config.apply_env(env(&[("TEMPERATURE", "warm")]));
        assert_eq!(config.agent.temperature, 0.2);
    }

    #[test]
    fn test_parse_flag() {
        assert!(parse_flag("1"));
        assert!(parse_flag("TRUE"));
        assert!(parse_flag(" yes "));
        assert!(!parse_flag("false"));
        assert!(!parse_flag("on"));
        assert!(!parse_flag(""));
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = WayfarerConfig::from_toml_str(
            r#"
            [agent]
            model = "local-model"

            [geo]
            user_agent = "me (me@example.org)"
            "#,
        )
        .unwrap();
        assert_eq!(config.agent.model, "local-model");
        assert_eq!(config.agent.max_steps, 8);
        assert_eq!(config.geo.user_agent, "me (me@example.org)");
        assert_eq!(config.geo.osrm_url, "https://router.project-osrm.org");
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let err = WayfarerConfig::from_toml_str("[agent\nmodel=").unwrap_err();
        assert!(matches!(err, Error::Config { .. }));
    }

    #[test]
    fn test_toml_roundtrip_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        let mut config = WayfarerConfig::default();
        config.server.travel_tools = false;
        std::fs::write(&path, config.to_toml_string().unwrap()).unwrap();

        let loaded = WayfarerConfig::from_file(&path).unwrap();
        assert!(!loaded.server.travel_tools);
    }

    #[test]
    fn test_load_missing_explicit_file_fails() {
        let err = WayfarerConfig::load(Some("/nonexistent/wayfarer.toml")).unwrap_err();
        assert!(err.to_string().contains("does not exist"));
    }

    #[test]
    fn test_resolve_explicit_path_wins() {
        let path = WayfarerConfig::resolve_config_path(Some("/tmp/x.toml")).unwrap();
        assert_eq!(path, PathBuf::from("/tmp/x.toml"));
    }

    #[test]
    fn test_get_nested_value() {
        let value = toml::Value::try_from(WayfarerConfig::default()).unwrap();
        let model = get_nested_value(&value, "agent.model").unwrap();
        assert_eq!(format_toml_value(model), "gpt-4o-mini");
        assert!(get_nested_value(&value, "agent.missing").is_none());
    }

    #[test]
    fn test_debug_redacts_api_key() {
        let mut config = AgentConfig::default();
        config.api_key = "sk-secret".to_string();
        let shown = format!("{config:?}");
        assert!(!shown.contains("sk-secret"));
    }
}
