//! Gateway operations, grouped by resource.
//!
//! Each module adds an `impl BillplzClient` block. An operation resolves its
//! URL, picks an action label, and makes exactly one dispatcher call.

mod bank_verification;
mod banks;
mod bills;
mod cards;
mod collections;
mod payment_methods;
mod payouts;
mod receipts;
mod webhook_rank;
