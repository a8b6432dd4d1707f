//! Callback receiver for verifying incoming bill notifications.

use billplz_core::CallbackState;
use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

use crate::error::{WebhookError, WebhookResult};
use crate::payload::CallbackPayload;
use crate::signature::XSignature;

/// Verified bill notification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BillCallback {
    /// Bill ID.
    pub id: String,
    pub collection_id: Option<String>,
    pub paid: bool,
    pub state: CallbackState,
    /// Bill amount in sen.
    pub amount: Option<u64>,
    /// Amount actually paid, in sen.
    pub paid_amount: Option<u64>,
    pub due_at: Option<String>,
    pub email: Option<String>,
    pub mobile: Option<String>,
    pub name: Option<String>,
    pub url: Option<String>,
    /// Payment time as sent, e.g. `2015-03-09 16:23:59 +0800`.
    pub paid_at: Option<String>,
}

impl BillCallback {
    /// Reads the typed fields out of a payload. Does not check the signature.
    pub fn from_payload(payload: &CallbackPayload) -> WebhookResult<Self> {
        let id = text(payload, "id").ok_or_else(|| missing("id"))?;
        let state = text(payload, "state")
            .ok_or_else(|| missing("state"))?
            .parse::<CallbackState>()
            .map_err(|e| invalid("state", e.to_string()))?;
        let paid = match text(payload, "paid").as_deref() {
            Some("true") => true,
            Some("false") | None => false,
            Some(other) => return Err(invalid("paid", format!("expected a boolean, got '{}'", other))),
        };

        Ok(Self {
            id,
            collection_id: text(payload, "collection_id"),
            paid,
            state,
            amount: amount(payload, "amount")?,
            paid_amount: amount(payload, "paid_amount")?,
            due_at: text(payload, "due_at"),
            email: text(payload, "email"),
            mobile: text(payload, "mobile"),
            name: text(payload, "name"),
            url: text(payload, "url"),
            paid_at: text(payload, "paid_at"),
        })
    }

    /// Parses `paid_at`.
    pub fn paid_at_time(&self) -> Option<DateTime<FixedOffset>> {
        self.paid_at
            .as_deref()
            .and_then(|s| DateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S %z").ok())
    }
}

fn text(payload: &CallbackPayload, field: &str) -> Option<String> {
    match payload.get(field) {
        None | Some(crate::payload::CallbackValue::Null) => None,
        Some(value) => Some(value.to_string()).filter(|s| !s.is_empty()),
    }
}

fn amount(payload: &CallbackPayload, field: &str) -> WebhookResult<Option<u64>> {
    text(payload, field)
        .map(|s| {
            s.parse::<u64>()
                .map_err(|_| invalid(field, format!("expected an amount in sen, got '{}'", s)))
        })
        .transpose()
}

fn missing(field: &str) -> WebhookError {
    invalid(field, "missing")
}

fn invalid(field: &str, reason: impl Into<String>) -> WebhookError {
    WebhookError::InvalidField {
        field: field.to_string(),
        reason: reason.into(),
    }
}

/// Webhook receiver for verifying incoming callbacks.
#[derive(Debug, Clone)]
pub struct CallbackReceiver {
    signer: XSignature,
}

impl CallbackReceiver {
    /// Creates a new receiver for the given X-Signature key.
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            signer: XSignature::new(secret),
        }
    }

    /// Verifies the signature only.
    pub fn verify_signature(&self, payload: &CallbackPayload) -> WebhookResult<()> {
        if payload.signature().is_none() {
            return Err(WebhookError::MissingSignature);
        }
        if !self.signer.verify(payload) {
            tracing::debug!(
                source = "CallbackReceiver",
                bill_id = ?payload.get("id").map(|v| v.to_string()),
                "x_signature mismatch"
            );
            return Err(WebhookError::InvalidSignature);
        }
        Ok(())
    }

    /// Verifies a payload and reads the bill notification out of it.
    pub fn verify(&self, payload: &CallbackPayload) -> WebhookResult<BillCallback> {
        self.verify_signature(payload)?;
        BillCallback::from_payload(payload)
    }

    /// Verifies a JSON callback body.
    pub fn verify_json(&self, body: &[u8]) -> WebhookResult<BillCallback> {
        self.verify(&CallbackPayload::from_json(body)?)
    }

    /// Verifies a form-encoded callback body.
    pub fn verify_form(&self, body: &str) -> WebhookResult<BillCallback> {
        self.verify(&CallbackPayload::from_form(body))
    }
}
