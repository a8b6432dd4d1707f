//! # Billplz Webhooks
//!
//! Callback handling for Billplz providing:
//! - Flat callback payloads parsed from JSON or form bodies
//! - X-Signature generation and verification
//! - A receiver that verifies a callback and returns the typed bill notification
//!
//! ## Example
//!
//! ```rust,ignore
//! use billplz_webhooks::CallbackReceiver;
//!
//! let receiver = CallbackReceiver::new("S-s7b4J4IRZ7d3XvLBxVDKqw");
//!
//! // `body` is the form-encoded POST the gateway sent to the callback URL
//! let callback = receiver.verify_form(&body)?;
//! if callback.paid {
//!     mark_order_paid(&callback.id);
//! }
//! ```

mod error;
mod payload;
mod receiver;
mod signature;

pub use error::{WebhookError, WebhookResult};
pub use payload::{CallbackPayload, CallbackValue};
pub use receiver::{BillCallback, CallbackReceiver};
pub use signature::{verify, XSignature, SIGNABLE_FIELDS, SIGNATURE_FIELD};
