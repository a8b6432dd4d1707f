//! Flat callback payloads.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

use crate::error::{WebhookError, WebhookResult};

/// A scalar callback value.
///
/// Values render the way the gateway renders them when it builds the
/// X-Signature source string: numbers in decimal, booleans as `true`/`false`,
/// and null as `null`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CallbackValue {
    Bool(bool),
    Number(serde_json::Number),
    String(String),
    Null,
}

impl CallbackValue {
    /// Returns the string content, if this is a string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            CallbackValue::String(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for CallbackValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CallbackValue::Bool(b) => write!(f, "{}", b),
            CallbackValue::Number(n) => write_number(f, n),
            CallbackValue::String(s) => f.write_str(s),
            CallbackValue::Null => f.write_str("null"),
        }
    }
}

/// Integral floats render without a fractional part (`100.0` as `100`),
/// matching how the gateway stringifies JSON numbers.
fn write_number(f: &mut fmt::Formatter<'_>, n: &serde_json::Number) -> fmt::Result {
    match n.as_f64() {
        Some(x) if n.is_f64() && x.is_finite() && x.fract() == 0.0 && x.abs() < 1e21 => {
            if x == 0.0 {
                f.write_str("0")
            } else {
                write!(f, "{:.0}", x)
            }
        }
        _ => write!(f, "{}", n),
    }
}

impl From<&str> for CallbackValue {
    fn from(value: &str) -> Self {
        CallbackValue::String(value.to_string())
    }
}

impl From<String> for CallbackValue {
    fn from(value: String) -> Self {
        CallbackValue::String(value)
    }
}

impl From<bool> for CallbackValue {
    fn from(value: bool) -> Self {
        CallbackValue::Bool(value)
    }
}

impl From<u64> for CallbackValue {
    fn from(value: u64) -> Self {
        CallbackValue::Number(value.into())
    }
}

impl From<i64> for CallbackValue {
    fn from(value: i64) -> Self {
        CallbackValue::Number(value.into())
    }
}

impl From<i32> for CallbackValue {
    fn from(value: i32) -> Self {
        CallbackValue::Number(value.into())
    }
}

/// A webhook notification as a flat field map.
///
/// Field order is irrelevant; the signature is always computed over the
/// fixed canonical order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CallbackPayload {
    fields: HashMap<String, CallbackValue>,
}

impl CallbackPayload {
    /// Creates an empty payload.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a field, builder style.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<CallbackValue>) -> Self {
        self.insert(key, value);
        self
    }

    /// Inserts a field, returning the previous value.
    pub fn insert(
        &mut self,
        key: impl Into<String>,
        value: impl Into<CallbackValue>,
    ) -> Option<CallbackValue> {
        self.fields.insert(key.into(), value.into())
    }

    /// Removes a field.
    pub fn remove(&mut self, key: &str) -> Option<CallbackValue> {
        self.fields.remove(key)
    }

    /// Returns a field value.
    pub fn get(&self, key: &str) -> Option<&CallbackValue> {
        self.fields.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Iterates over all fields in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &CallbackValue)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Returns the `x_signature` field rendered as a string.
    pub fn signature(&self) -> Option<String> {
        self.get(crate::signature::SIGNATURE_FIELD).map(|v| v.to_string())
    }

    /// Parses a JSON object body. Nested objects and arrays are rejected.
    pub fn from_json(body: &[u8]) -> WebhookResult<Self> {
        serde_json::from_slice(body)
            .map_err(|e| WebhookError::InvalidPayload(format!("expected a flat JSON object: {}", e)))
    }

    /// Converts a JSON value. Nested objects and arrays are rejected.
    pub fn from_json_value(value: serde_json::Value) -> WebhookResult<Self> {
        serde_json::from_value(value)
            .map_err(|e| WebhookError::InvalidPayload(format!("expected a flat JSON object: {}", e)))
    }

    /// Parses an `application/x-www-form-urlencoded` body.
    ///
    /// Every value is kept as a string, which is how the gateway posts them.
    pub fn from_form(body: &str) -> Self {
        url::form_urlencoded::parse(body.as_bytes())
            .map(|(k, v)| (k.into_owned(), CallbackValue::String(v.into_owned())))
            .collect()
    }
}

impl<K, V> FromIterator<(K, V)> for CallbackPayload
where
    K: Into<String>,
    V: Into<CallbackValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            fields: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }
}
