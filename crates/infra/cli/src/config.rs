//! CLI configuration.

use billplz_core::{parse_config, BillplzConfig, ConfigError};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Settings for the tool itself, read from the `[cli]` table.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    /// Log level.
    pub log_level: String,
    /// Pretty-print JSON output.
    pub pretty: bool,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            pretty: true,
        }
    }
}

/// Both configuration tables of a config file.
#[derive(Debug, Clone, Default)]
pub struct Settings {
    pub cli: CliConfig,
    pub billplz: BillplzConfig,
}

/// Loads settings from `path`, or defaults when no file is given.
pub fn load_settings(path: Option<&Path>) -> Result<Settings, ConfigError> {
    match path {
        Some(path) => {
            let content =
                std::fs::read_to_string(path).map_err(|e| ConfigError::IoError(e.to_string()))?;
            parse_settings(&content)
        }
        None => Ok(Settings::default()),
    }
}

/// Parses settings from TOML text.
pub fn parse_settings(content: &str) -> Result<Settings, ConfigError> {
    let config: toml::Value =
        toml::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))?;

    let cli: CliConfig = config
        .get("cli")
        .map(|v| toml::Value::try_into(v.clone()))
        .transpose()
        .map_err(|e| ConfigError::ParseError(e.to_string()))?
        .unwrap_or_default();

    Ok(Settings {
        cli,
        billplz: parse_config(content)?,
    })
}
