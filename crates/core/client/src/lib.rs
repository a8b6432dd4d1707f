//! # Billplz Client
//!
//! Async client for the Billplz payment gateway REST API.
//!
//! ```rust,ignore
//! use billplz_client::{BillplzClient, RequestOptions};
//! use billplz_core::{BillplzConfig, CreateBill};
//!
//! let client = BillplzClient::new(
//!     BillplzConfig::new(api_key, x_signature_key)
//!         .with_sandbox(true)
//!         .with_collection_id("inbmmepb"),
//! )?;
//!
//! let bill = CreateBill::new("api@billplz.com", "Michael", 200, callback_url, "Order #42");
//! let bill = client.create_bill(&bill, &RequestOptions::new()).await?;
//! ```

mod api;
mod client;
pub mod dispatcher;

pub use client::BillplzClient;
pub use dispatcher::{ApiCall, ApiCaller, Dispatcher, HttpMethod, PreparedRequest, RequestOptions};
