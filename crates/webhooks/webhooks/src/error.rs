//! Webhook error types.

use thiserror::Error;

/// Result type for webhook operations.
pub type WebhookResult<T> = Result<T, WebhookError>;

/// Error type for webhook operations.
#[derive(Debug, Error)]
pub enum WebhookError {
    /// The X-Signature did not match the payload.
    #[error("Invalid signature")]
    InvalidSignature,

    /// The payload carries no `x_signature` field.
    #[error("Missing x_signature field")]
    MissingSignature,

    /// Invalid payload.
    #[error("Invalid payload: {0}")]
    InvalidPayload(String),

    /// A field the typed callback needs is absent or malformed.
    #[error("Invalid field '{field}': {reason}")]
    InvalidField { field: String, reason: String },
}

impl From<serde_json::Error> for WebhookError {
    fn from(err: serde_json::Error) -> Self {
        WebhookError::InvalidPayload(err.to_string())
    }
}

impl From<WebhookError> for billplz_core::BillplzError {
    fn from(err: WebhookError) -> Self {
        billplz_core::BillplzError::invalid_payload(err.to_string())
    }
}
