//! X-Signature generation and verification.
//!
//! The gateway signs a callback by concatenating `<field><value>` for every
//! present signable field in a fixed order, joining them with `|`, and taking
//! the lowercase hex HMAC-SHA256 of that string with the merchant's
//! X-Signature key. Field names, order and separator are part of the wire
//! contract and must not change.

use hmac::{Hmac, Mac};
use sha2::Sha256;

use crate::payload::CallbackPayload;

type HmacSha256 = Hmac<Sha256>;

/// Signable fields, in canonical order.
pub const SIGNABLE_FIELDS: [&str; 12] = [
    "amount",
    "collection_id",
    "due_at",
    "email",
    "id",
    "mobile",
    "name",
    "paid_amount",
    "paid_at",
    "paid",
    "state",
    "url",
];

/// Field carrying the signature in a callback.
pub const SIGNATURE_FIELD: &str = "x_signature";

const SEPARATOR: char = '|';

/// Signer for generating and verifying X-Signatures.
#[derive(Clone)]
pub struct XSignature {
    secret: String,
}

impl XSignature {
    /// Creates a new signer with the given X-Signature key.
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
        }
    }

    /// Builds the string the gateway signs.
    ///
    /// Fields outside [`SIGNABLE_FIELDS`] are ignored. A payload with none of
    /// them yields the empty string.
    pub fn canonical_string(payload: &CallbackPayload) -> String {
        let mut source = String::new();
        for field in SIGNABLE_FIELDS {
            if let Some(value) = payload.get(field) {
                source.push_str(field);
                source.push_str(&value.to_string());
                source.push(SEPARATOR);
            }
        }
        source.pop();
        source
    }

    /// Computes the lowercase hex signature of a canonical string.
    pub fn sign_canonical(&self, source: &str) -> String {
        let mut mac =
            HmacSha256::new_from_slice(self.secret.as_bytes()).expect("HMAC can take key of any size");
        mac.update(source.as_bytes());
        hex::encode(mac.finalize().into_bytes())
    }

    /// Computes the signature of a payload.
    pub fn sign(&self, payload: &CallbackPayload) -> String {
        self.sign_canonical(&Self::canonical_string(payload))
    }

    /// Returns `payload` with its `x_signature` field set.
    pub fn sign_payload(&self, mut payload: CallbackPayload) -> CallbackPayload {
        let signature = self.sign(&payload);
        payload.insert(SIGNATURE_FIELD, signature);
        payload
    }

    /// Checks the payload's `x_signature` field.
    ///
    /// The comparison is exact and case-sensitive. A payload without the
    /// field never verifies.
    pub fn verify(&self, payload: &CallbackPayload) -> bool {
        match payload.signature() {
            Some(signature) => constant_time_compare(&self.sign(payload), &signature),
            None => false,
        }
    }
}

impl std::fmt::Debug for XSignature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("XSignature").finish_non_exhaustive()
    }
}

/// Verifies `payload` against `secret`.
pub fn verify(payload: &CallbackPayload, secret: &str) -> bool {
    XSignature::new(secret).verify(payload)
}

/// Constant-time string comparison to prevent timing attacks.
fn constant_time_compare(a: &str, b: &str) -> bool {
    if a.len() != b.len() {
        return false;
    }

    let mut result = 0u8;
    for (x, y) in a.bytes().zip(b.bytes()) {
        result |= x ^ y;
    }
    result == 0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::payload::CallbackValue;

    const SECRET: &str = "secret123";

    fn sample() -> CallbackPayload {
        CallbackPayload::new()
            .with("id", "bill1")
            .with("amount", 100u64)
            .with("paid", true)
            .with("state", "paid")
    }

    #[test]
    fn test_canonical_string_uses_fixed_order() {
        assert_eq!(
            XSignature::canonical_string(&sample()),
            "amount100|idbill1|paidtrue|statepaid"
        );
    }

    #[test]
    fn test_known_digest() {
        let payload = sample().with(
            "x_signature",
            "c9ea7253aa0c7101252d82a940eaa7d0162075823573a24f3b11fceb03848007",
        );
        assert!(verify(&payload, SECRET));
        assert!(!verify(&payload, "other-secret"));
    }

    #[test]
    fn test_sign_and_verify() {
        let signer = XSignature::new(SECRET);
        let payload = signer.sign_payload(sample());
        assert!(signer.verify(&payload));
    }

    #[test]
    fn test_any_signable_field_change_fails() {
        let signer = XSignature::new(SECRET);
        let signed = signer.sign_payload(
            sample()
                .with("collection_id", "inbmmepb")
                .with("due_at", "2020-12-31")
                .with("email", "api@billplz.com")
                .with("mobile", "+60112223333")
                .with("name", "MICHAEL YAP")
                .with("paid_amount", 100u64)
                .with("paid_at", "2020-12-31 15:30:00 +0800")
                .with("url", "https://www.billplz.com/bills/bill1"),
        );
        assert!(signer.verify(&signed));

        for field in SIGNABLE_FIELDS {
            let mut tampered = signed.clone();
            tampered.insert(field, "tampered");
            assert!(!signer.verify(&tampered), "changing '{}' should fail", field);
        }
    }

    #[test]
    fn test_non_signable_fields_ignored() {
        let signer = XSignature::new(SECRET);
        let signed = signer.sign_payload(sample());

        let extra = signed
            .clone()
            .with("transaction_id", "AC4GC031F42H")
            .with("transaction_status", "completed");
        assert!(signer.verify(&extra));

        let mut removed = signed.clone();
        removed.insert("reference_1", "ignored");
        removed.remove("reference_1");
        assert!(signer.verify(&removed));
    }

    #[test]
    fn test_insertion_order_irrelevant() {
        let forward = sample();
        let reverse = CallbackPayload::new()
            .with("state", "paid")
            .with("paid", true)
            .with("amount", 100u64)
            .with("id", "bill1");

        let signer = XSignature::new(SECRET);
        assert_eq!(signer.sign(&forward), signer.sign(&reverse));
    }

    #[test]
    fn test_empty_payload_hashes_empty_string() {
        let signer = XSignature::new(SECRET);
        let payload = CallbackPayload::new().with("x_signature", "deadbeef");

        assert_eq!(XSignature::canonical_string(&payload), "");
        assert_eq!(
            signer.sign(&payload),
            "0f4b258683a3a61038f955720a245894f3ef5462f5045b22735f5faf1594053d"
        );
        assert!(!signer.verify(&payload));
    }

    #[test]
    fn test_comparison_is_case_sensitive() {
        let signer = XSignature::new(SECRET);
        let upper = signer.sign(&sample()).to_uppercase();
        let payload = sample().with("x_signature", upper);
        assert!(!signer.verify(&payload));
    }

    #[test]
    fn test_missing_signature_fails() {
        assert!(!XSignature::new(SECRET).verify(&sample()));
    }

    #[test]
    fn test_string_and_typed_values_sign_alike() {
        let typed = sample();
        let stringly = CallbackPayload::new()
            .with("id", "bill1")
            .with("amount", "100")
            .with("paid", "true")
            .with("state", "paid");

        let signer = XSignature::new(SECRET);
        assert_eq!(signer.sign(&typed), signer.sign(&stringly));
    }

    #[test]
    fn test_integral_float_signs_like_integer() {
        let from_float = CallbackPayload::from_json(br#"{"id": "bill1", "amount": 100.0}"#).unwrap();
        assert_eq!(XSignature::canonical_string(&from_float), "amount100|idbill1");

        let from_int = CallbackPayload::new().with("id", "bill1").with("amount", 100u64);
        let signer = XSignature::new(SECRET);
        assert_eq!(signer.sign(&from_float), signer.sign(&from_int));
    }

    #[test]
    fn test_null_renders_as_text() {
        let payload = CallbackPayload::new()
            .with("id", "bill1")
            .with("mobile", CallbackValue::Null);
        assert_eq!(XSignature::canonical_string(&payload), "idbill1|mobilenull");
    }
}
