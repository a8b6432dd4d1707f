//! Error types for the Billplz client.
//!
//! This module defines the `BillplzError` enum which represents every failure
//! a gateway call can produce: transport failures, non-2xx API responses,
//! configuration mistakes caught before a call is made, and decoding errors.

use serde_json::Value;
use thiserror::Error;

/// The main error type for Billplz operations.
#[derive(Debug, Error)]
pub enum BillplzError {
    // ==================== Transport Errors ====================
    /// The HTTP exchange itself failed (connection, TLS, timeout, decoding).
    ///
    /// The underlying `reqwest` error is kept untouched as the source.
    #[error(transparent)]
    Transport(#[from] reqwest::Error),

    /// The gateway answered with a non-2xx status.
    #[error("Billplz API error in '{action}': {status} {status_text}")]
    Api {
        action: String,
        status: u16,
        status_text: String,
        body: Value,
    },

    // ==================== Configuration Errors ====================
    /// The requested API version is not one the gateway serves.
    #[error("Unsupported API version: {version}")]
    UnsupportedVersion { version: String },

    /// A required configuration value is missing.
    #[error("Missing configuration: {key}")]
    MissingConfiguration { key: String },

    /// No id was passed and no default id is configured for the resource.
    #[error("Missing {resource} id: pass one explicitly or configure a default")]
    MissingId { resource: String },

    /// The configuration is otherwise invalid.
    #[error("Configuration error: {message}")]
    ConfigurationError { message: String },

    // ==================== Payload Errors ====================
    /// A payload could not be interpreted.
    #[error("Invalid payload: {message}")]
    InvalidPayload { message: String },

    /// Serialization/deserialization failed.
    #[error("Serialization error: {message}")]
    SerializationError { message: String },
}

impl BillplzError {
    /// Creates a new configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::ConfigurationError {
            message: message.into(),
        }
    }

    /// Creates a new missing configuration error.
    pub fn missing_config(key: impl Into<String>) -> Self {
        Self::MissingConfiguration { key: key.into() }
    }

    /// Creates a new missing id error.
    pub fn missing_id(resource: impl Into<String>) -> Self {
        Self::MissingId {
            resource: resource.into(),
        }
    }

    /// Creates a new invalid payload error.
    pub fn invalid_payload(message: impl Into<String>) -> Self {
        Self::InvalidPayload {
            message: message.into(),
        }
    }

    /// Returns true for errors raised before any request left the process.
    pub fn is_configuration_error(&self) -> bool {
        matches!(
            self,
            Self::UnsupportedVersion { .. }
                | Self::MissingConfiguration { .. }
                | Self::MissingId { .. }
                | Self::ConfigurationError { .. }
        )
    }

    /// Returns the HTTP status associated with this error, if the gateway sent one.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            Self::Transport(err) => err.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Returns the response body of an API error.
    pub fn body(&self) -> Option<&Value> {
        match self {
            Self::Api { body, .. } => Some(body),
            _ => None,
        }
    }
}

/// A Result type alias using BillplzError.
pub type BillplzResult<T> = Result<T, BillplzError>;

impl From<serde_json::Error> for BillplzError {
    fn from(err: serde_json::Error) -> Self {
        Self::SerializationError {
            message: err.to_string(),
        }
    }
}
