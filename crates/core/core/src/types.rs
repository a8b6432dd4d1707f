//! Request and response models for the Billplz API.
//!
//! Amounts are expressed in sen (the smallest currency unit), exactly as the
//! gateway sends and expects them. Optional request fields are skipped when
//! unset so the gateway applies its own defaults.

use serde::{Deserialize, Serialize};
use serde_json::Value;

// ==================== Collections ====================

/// Collection status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CollectionStatus {
    Active,
    Inactive,
}

/// Split payment rule attached to a collection.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SplitPayment {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Fixed amount (in sen) routed to the split recipient.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fixed_cut: Option<u64>,
    /// Percentage routed to the split recipient.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variable_cut: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub split_header: Option<bool>,
}

/// Payload for creating a collection.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateCollection {
    pub title: String,
    /// Logo as a URL or data URI.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub split_payment: Option<SplitPayment>,
}

impl CreateCollection {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }
}

/// Logo URLs generated by the gateway.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CollectionLogo {
    pub thumb_url: Option<String>,
    pub avatar_url: Option<String>,
}

/// A collection record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Collection {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub logo: CollectionLogo,
    #[serde(default)]
    pub split_payment: SplitPayment,
    pub status: Option<CollectionStatus>,
}

/// Paged collection listing.
#[derive(Debug, Clone, Deserialize)]
pub struct CollectionList {
    pub collections: Vec<Collection>,
    #[serde(default)]
    pub page: Option<u32>,
}

/// Payload for creating an open (payment form) collection.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateOpenCollection {
    pub title: String,
    pub description: String,
    /// Amount in sen; required unless `fixed_amount` is false.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fixed_amount: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fixed_quantity: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_button: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference_1_label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference_2_label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email_link: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tax: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub split_payment: Option<SplitPayment>,
}

/// An open collection record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenCollection {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub amount: Option<u64>,
    #[serde(default)]
    pub fixed_amount: Option<bool>,
    #[serde(default)]
    pub url: Option<String>,
    pub status: Option<CollectionStatus>,
}

/// Paged open collection listing.
#[derive(Debug, Clone, Deserialize)]
pub struct OpenCollectionList {
    pub open_collections: Vec<OpenCollection>,
    #[serde(default)]
    pub page: Option<u32>,
}

// ==================== Bills ====================

/// Bill state reported by the gateway and in callbacks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CallbackState {
    Due,
    Deleted,
    Paid,
}

impl CallbackState {
    pub fn as_str(&self) -> &'static str {
        match self {
            CallbackState::Due => "due",
            CallbackState::Deleted => "deleted",
            CallbackState::Paid => "paid",
        }
    }
}

impl std::str::FromStr for CallbackState {
    type Err = crate::error::BillplzError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "due" => Ok(CallbackState::Due),
            "deleted" => Ok(CallbackState::Deleted),
            "paid" => Ok(CallbackState::Paid),
            other => Err(crate::error::BillplzError::invalid_payload(format!(
                "unknown bill state '{}'",
                other
            ))),
        }
    }
}

/// Payload for creating a bill.
///
/// `collection_id` may be left unset; the client fills it from its
/// configured default collection.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateBill {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collection_id: Option<String>,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mobile: Option<String>,
    pub name: String,
    /// Amount in sen.
    pub amount: u64,
    pub callback_url: String,
    pub description: String,
    /// Due date, `YYYY-MM-DD`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub redirect_url: Option<String>,
    /// Let the gateway email/SMS the bill to the payer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deliver: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference_1_label: Option<String>,
    /// For direct FPX bills this carries the bank code.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference_1: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference_2_label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference_2: Option<String>,
}

impl CreateBill {
    pub fn new(
        email: impl Into<String>,
        name: impl Into<String>,
        amount: u64,
        callback_url: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            email: email.into(),
            name: name.into(),
            amount,
            callback_url: callback_url.into(),
            description: description.into(),
            ..Self::default()
        }
    }

    /// Routes the payer straight to an FPX bank, skipping the bank picker.
    pub fn with_fpx_bank(mut self, bank_code: impl Into<String>) -> Self {
        self.reference_1_label = Some("Bank Code".to_string());
        self.reference_1 = Some(bank_code.into());
        self
    }
}

/// A bill record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bill {
    pub id: String,
    pub collection_id: String,
    pub paid: bool,
    pub state: CallbackState,
    pub amount: u64,
    #[serde(default)]
    pub paid_amount: u64,
    pub due_at: Option<String>,
    pub email: Option<String>,
    pub mobile: Option<String>,
    pub name: String,
    pub url: String,
    pub reference_1_label: Option<String>,
    pub reference_1: Option<String>,
    pub reference_2_label: Option<String>,
    pub reference_2: Option<String>,
    pub redirect_url: Option<String>,
    pub callback_url: Option<String>,
    pub description: Option<String>,
    #[serde(default)]
    pub paid_at: Option<String>,
}

/// A payment attempt recorded against a bill.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    pub id: String,
    pub status: String,
    pub completed_at: Option<String>,
    pub payment_channel: Option<String>,
}

/// Transaction listing for a bill.
#[derive(Debug, Clone, Deserialize)]
pub struct TransactionList {
    pub bill_id: String,
    pub transactions: Vec<Transaction>,
    #[serde(default)]
    pub page: Option<u32>,
}

// ==================== Banks & gateways ====================

/// An FPX bank as listed by the gateway.
///
/// `display_bank_name` is not sent by the gateway; the client fills it from
/// the abbreviation table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FpxBank {
    pub name: String,
    #[serde(default)]
    pub display_bank_name: String,
    pub active: bool,
}

/// FPX bank listing envelope.
#[derive(Debug, Clone, Deserialize)]
pub struct FpxBankList {
    pub banks: Vec<FpxBank>,
}

/// A payment gateway (FPX bank, card processor, e-wallet).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentGateway {
    pub code: String,
    #[serde(default)]
    pub display_name: String,
    pub active: bool,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub extras: Option<Value>,
}

/// Payment gateway listing envelope.
#[derive(Debug, Clone, Deserialize)]
pub struct PaymentGatewayList {
    pub payment_gateways: Vec<PaymentGateway>,
}

/// A payment method enabled (or not) on a collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentMethod {
    pub code: String,
    #[serde(default)]
    pub name: Option<String>,
    pub active: bool,
}

/// Payment method listing envelope.
#[derive(Debug, Clone, Deserialize)]
pub struct PaymentMethodList {
    pub payment_methods: Vec<PaymentMethod>,
}

/// Payload for replacing the payment methods of a collection.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdatePaymentMethods {
    pub payment_methods: Vec<PaymentMethodCode>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentMethodCode {
    pub code: String,
}

impl UpdatePaymentMethods {
    pub fn new(codes: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            payment_methods: codes
                .into_iter()
                .map(|c| PaymentMethodCode { code: c.into() })
                .collect(),
        }
    }
}

// ==================== Payouts ====================

/// Payload for creating a payout (mass payment instruction) collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePayoutCollection {
    pub title: String,
}

/// A payout collection record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PayoutCollection {
    pub id: String,
    pub title: String,
    pub mass_payment_instructions_count: String,
    pub paid_amount: String,
    pub status: String,
}

/// Payout state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PayoutStatus {
    Processing,
    Completed,
    Refunded,
}

/// Payload for creating a payout.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreatePayout {
    pub mass_payment_instruction_collection_id: String,
    /// SWIFT code of the recipient bank, see [`crate::banks::BANK_CODES`].
    pub bank_code: String,
    pub bank_account_number: String,
    pub identity_number: String,
    pub name: String,
    pub description: String,
    /// Amount in sen.
    pub total: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notification: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recipient_notification: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference_id: Option<String>,
}

/// A payout record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Payout {
    pub id: String,
    pub status: PayoutStatus,
    #[serde(flatten)]
    pub details: CreatePayout,
}

// ==================== Bank account verification ====================

/// Verification state of a registered bank account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BankAccountStatus {
    Pending,
    Verified,
    Rejected,
}

/// Payload for registering a bank account for verification.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateBankAccount {
    pub name: String,
    pub id_no: String,
    pub acc_no: String,
    pub code: String,
    pub organization: bool,
}

/// A bank account registered for verification.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BankAccount {
    pub name: String,
    pub id_no: String,
    pub acc_no: String,
    pub code: String,
    pub organization: bool,
    pub authorization_date: Option<String>,
    pub status: BankAccountStatus,
    pub processed_at: Option<String>,
    pub rejected_desc: Option<String>,
}

/// Bank account listing envelope.
#[derive(Debug, Clone, Deserialize)]
pub struct BankAccountList {
    pub bank_verification_services: Vec<BankAccount>,
}

/// Result of a registered-account lookup by number.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BankAccountCheck {
    pub name: String,
}

// ==================== Receipt delivery ====================

/// Customer receipt delivery setting of a collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReceiptDeliveryConfig {
    pub id: String,
    /// One of `active`, `inactive` or `global`.
    pub customer_receipt_delivery: String,
}

// ==================== Webhook rank ====================

/// Rank the gateway assigns to the merchant's callback endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WebhookRank {
    pub rank: f64,
}

// ==================== Cards ====================

/// Card tokenization provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CardProvider {
    #[default]
    Senangpay,
    Ocbc,
}

impl CardProvider {
    /// Resource path for card tokens.
    pub fn cards_path(&self) -> &'static str {
        match self {
            CardProvider::Senangpay => "cards",
            CardProvider::Ocbc => "ocbc_cards",
        }
    }

    /// Bill sub-resource path for charging a token.
    pub fn charge_path(&self) -> &'static str {
        match self {
            CardProvider::Senangpay => "charge",
            CardProvider::Ocbc => "ocbc_charge",
        }
    }
}

/// Payload for tokenizing a card.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateCard {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub card_number: String,
    pub cvv: String,
    /// `MM/YY`.
    pub expiry: String,
}

/// A tokenized card.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Card {
    pub id: String,
    pub card_number: String,
    pub provider: Option<String>,
    pub token: String,
    pub fingerprint: Option<String>,
    pub status: String,
}

/// Payload for charging a tokenized card against a bill.
///
/// Unset fields are filled from the configured default card.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChargeCard {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub card_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

/// Result of a card charge.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CardCharge {
    pub amount: u64,
    pub status: String,
    pub reference_id: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_bill_skips_unset_fields() {
        let bill = CreateBill::new(
            "api@billplz.com",
            "Michael",
            200,
            "https://example.com/webhook",
            "Maecenas eu placerat ante.",
        );
        let json = serde_json::to_value(&bill).unwrap();

        assert_eq!(json["amount"], 200);
        assert!(json.get("collection_id").is_none());
        assert!(json.get("mobile").is_none());
    }

    #[test]
    fn test_fpx_bill_reference() {
        let bill = CreateBill::default().with_fpx_bank("BP-FKR01");
        assert_eq!(bill.reference_1_label.as_deref(), Some("Bank Code"));
        assert_eq!(bill.reference_1.as_deref(), Some("BP-FKR01"));
    }

    #[test]
    fn test_bill_deserialization() {
        let json = r#"{
            "id": "8X0Iyzaw",
            "collection_id": "inbmmepb",
            "paid": false,
            "state": "due",
            "amount": 200,
            "paid_amount": 0,
            "due_at": "2015-3-9",
            "email": "api@billplz.com",
            "mobile": null,
            "name": "MICHAEL YAP",
            "url": "https://www.billplz.com/bills/8X0Iyzaw",
            "reference_1_label": "Reference 1",
            "reference_1": null,
            "reference_2_label": "Reference 2",
            "reference_2": null,
            "redirect_url": null,
            "callback_url": "http://example.com/webhook/",
            "description": "Maecenas eu placerat ante."
        }"#;

        let bill: Bill = serde_json::from_str(json).unwrap();
        assert_eq!(bill.state, CallbackState::Due);
        assert!(!bill.paid);
        assert_eq!(bill.paid_at, None);
    }

    #[test]
    fn test_card_provider_paths() {
        assert_eq!(CardProvider::Senangpay.cards_path(), "cards");
        assert_eq!(CardProvider::Ocbc.cards_path(), "ocbc_cards");
        assert_eq!(CardProvider::Ocbc.charge_path(), "ocbc_charge");
        assert_eq!(
            serde_json::to_value(CardProvider::Senangpay).unwrap(),
            "senangpay"
        );
    }

    #[test]
    fn test_payout_flattens_details() {
        let json = r#"{
            "id": "afae4bqf",
            "status": "processing",
            "mass_payment_instruction_collection_id": "4po8no8h",
            "bank_code": "MBBEMYKL",
            "bank_account_number": "1234567890",
            "identity_number": "91234567890",
            "name": "Michael Yap",
            "description": "Maecenas eu placerat ante.",
            "total": 2000
        }"#;

        let payout: Payout = serde_json::from_str(json).unwrap();
        assert_eq!(payout.status, PayoutStatus::Processing);
        assert_eq!(payout.details.total, 2000);
        assert_eq!(payout.details.email, None);
    }

    #[test]
    fn test_callback_state_parsing() {
        assert_eq!("paid".parse::<CallbackState>().unwrap(), CallbackState::Paid);
        assert!("settled".parse::<CallbackState>().is_err());
    }
}
