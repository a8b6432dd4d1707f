//! # Billplz
//!
//! Rust client for the Billplz payment gateway.
//!
//! The crate bundles the REST client, the shared configuration and types,
//! and X-Signature verification for callbacks.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use billplz::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), BillplzError> {
//!     let config = BillplzConfig::new(api_key, x_signature_key)
//!         .with_sandbox(true)
//!         .with_collection_id("inbmmepb");
//!     let client = BillplzClient::new(config)?;
//!
//!     // Create a bill
//!     let bill = CreateBill::new("api@billplz.com", "Michael", 200, callback_url, "Order #42");
//!     let bill = client.create_bill(&bill, &RequestOptions::new()).await?;
//!
//!     // Later, in the callback handler
//!     let callback = client.callback_receiver()?.verify_form(&body)?;
//!
//!     Ok(())
//! }
//! ```

// Re-export core types
pub use billplz_core::*;

pub use billplz_client::{dispatcher, BillplzClient, HttpMethod, RequestOptions};

/// Callback verification.
pub mod webhooks {
    pub use billplz_webhooks::*;
}

/// Prelude module for convenient imports.
pub mod prelude {
    pub use billplz_client::{BillplzClient, RequestOptions};
    pub use billplz_core::config::{BillplzConfig, Version};
    pub use billplz_core::error::{BillplzError, BillplzResult};
    pub use billplz_core::types::{Bill, CallbackState, CreateBill, CreateCollection, FpxBank};
    pub use billplz_webhooks::{BillCallback, CallbackPayload, CallbackReceiver, XSignature};
}
