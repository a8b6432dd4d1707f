//! # Billplz CLI
//!
//! Support code for the `billplz` binary: configuration loading, callback
//! payload files, and JSON output.

mod config;

pub use config::{load_settings, parse_settings, CliConfig, Settings};

use billplz_core::{BillplzError, ConfigError};
use billplz_webhooks::{BillCallback, CallbackPayload, CallbackReceiver, WebhookError};
use serde::Serialize;
use std::path::Path;
use thiserror::Error;

/// Errors surfaced by CLI commands.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Billplz(#[from] BillplzError),

    #[error(transparent)]
    Webhook(#[from] WebhookError),

    #[error("Failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write output: {0}")]
    Output(#[from] serde_json::Error),

    #[error("Invalid log level: {0}")]
    InvalidLogLevel(String),
}

/// Parses a `--log-level` or `[cli] log_level` value such as `debug`.
pub fn parse_log_level(level: &str) -> Result<tracing::Level, CliError> {
    level
        .parse()
        .map_err(|_| CliError::InvalidLogLevel(level.to_string()))
}

/// Reads a callback body from a file.
///
/// Bodies starting with `{` are parsed as JSON, anything else as a
/// form-encoded body.
pub fn read_payload(path: &Path) -> Result<CallbackPayload, CliError> {
    let content = std::fs::read_to_string(path).map_err(|source| CliError::Io {
        path: path.display().to_string(),
        source,
    })?;
    parse_payload(&content)
}

/// Parses a callback body, JSON or form-encoded.
pub fn parse_payload(content: &str) -> Result<CallbackPayload, CliError> {
    let trimmed = content.trim();
    if trimmed.starts_with('{') {
        Ok(CallbackPayload::from_json(trimmed.as_bytes())?)
    } else {
        Ok(CallbackPayload::from_form(trimmed))
    }
}

/// Outcome of checking one callback.
#[derive(Debug, Serialize)]
pub struct VerifyReport {
    pub valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub callback: Option<BillCallback>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Verifies a callback against `x_signature_key`.
///
/// A bad or missing signature is reported, not returned as an error.
pub fn verify_payload(payload: &CallbackPayload, x_signature_key: &str) -> Result<VerifyReport, CliError> {
    if x_signature_key.is_empty() {
        return Err(BillplzError::missing_config("x_signature_key").into());
    }

    let report = match CallbackReceiver::new(x_signature_key).verify(payload) {
        Ok(callback) => VerifyReport {
            valid: true,
            callback: Some(callback),
            error: None,
        },
        Err(err @ (WebhookError::InvalidSignature | WebhookError::MissingSignature)) => VerifyReport {
            valid: false,
            callback: None,
            error: Some(err.to_string()),
        },
        Err(err) => return Err(err.into()),
    };
    Ok(report)
}

/// Renders a value as JSON.
pub fn render<T: Serialize>(value: &T, pretty: bool) -> Result<String, CliError> {
    let output = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    Ok(output)
}
