//! # Billplz Core
//!
//! This crate provides the foundational pieces shared by the Billplz client
//! crates: the endpoint configuration and base URL resolution, the error
//! taxonomy, the request/response models, and the bank code tables.

pub mod banks;
pub mod config;
pub mod error;
pub mod types;

// Re-export commonly used items at the crate root
pub use config::{base_url, load_config, parse_config, BillplzConfig, ConfigError, Version};
pub use error::{BillplzError, BillplzResult};
pub use types::{
    BankAccount, BankAccountCheck, BankAccountStatus, Bill, CallbackState, Card, CardCharge,
    CardProvider, ChargeCard, Collection, CollectionStatus, CreateBankAccount, CreateBill,
    CreateCard, CreateCollection, CreateOpenCollection, CreatePayout, CreatePayoutCollection,
    FpxBank, OpenCollection, PaymentGateway, PaymentMethod, Payout, PayoutCollection,
    PayoutStatus, ReceiptDeliveryConfig, SplitPayment, Transaction, UpdatePaymentMethods,
    WebhookRank,
};
