//! The gateway client.

use std::sync::Arc;
use std::time::Duration;

use billplz_core::{BillplzConfig, BillplzError, BillplzResult, Version};
use billplz_webhooks::{CallbackPayload, CallbackReceiver, XSignature};

use crate::dispatcher::{Dispatcher, RequestOptions};

/// Thin client over the Billplz REST API.
///
/// The configuration is shared read-only between clones. Every `with_*`
/// method returns a new client; the one it was called on keeps working with
/// its old settings.
#[derive(Debug, Clone)]
pub struct BillplzClient {
    config: Arc<BillplzConfig>,
    dispatcher: Dispatcher,
}

impl BillplzClient {
    /// Creates a client after validating `config`.
    pub fn new(config: BillplzConfig) -> BillplzResult<Self> {
        Self::with_http_client(config, reqwest::Client::new())
    }

    /// Creates a client that sends through an existing `reqwest::Client`.
    pub fn with_http_client(config: BillplzConfig, http: reqwest::Client) -> BillplzResult<Self> {
        config.validate()?;

        let dispatcher = Dispatcher::new(http, config.api_key.clone(), config.debug)
            .with_timeout(config.timeout_ms.map(Duration::from_millis));

        Ok(Self {
            config: Arc::new(config),
            dispatcher,
        })
    }

    fn reconfigure(&self, f: impl FnOnce(BillplzConfig) -> BillplzConfig) -> BillplzResult<Self> {
        let config = f(BillplzConfig::clone(&self.config));
        Self::with_http_client(config, self.dispatcher.http_client().clone())
    }

    pub fn config(&self) -> &BillplzConfig {
        &self.config
    }

    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    /// Returns the active API version.
    pub fn version(&self) -> Version {
        self.config.version
    }

    /// Returns the API root for the active version.
    pub fn base_url(&self) -> String {
        self.config.resolve_base_url(None)
    }

    pub fn with_api_key(&self, api_key: impl Into<String>) -> BillplzResult<Self> {
        let api_key = api_key.into();
        self.reconfigure(|c| c.with_api_key(api_key))
    }

    pub fn with_x_signature_key(&self, key: impl Into<String>) -> BillplzResult<Self> {
        let key = key.into();
        self.reconfigure(|c| c.with_x_signature_key(key))
    }

    pub fn with_sandbox(&self, sandbox: bool) -> BillplzResult<Self> {
        self.reconfigure(|c| c.with_sandbox(sandbox))
    }

    /// Switches the active API version, e.g. `"v4"`.
    ///
    /// Unknown versions are rejected with [`BillplzError::UnsupportedVersion`].
    pub fn use_version(&self, version: &str) -> BillplzResult<Self> {
        let version: Version = version.parse()?;
        self.reconfigure(|c| c.with_version(version))
    }

    pub fn with_debug(&self, debug: bool) -> BillplzResult<Self> {
        self.reconfigure(|c| c.with_debug(debug))
    }

    pub fn with_collection_id(&self, id: impl Into<String>) -> BillplzResult<Self> {
        let id = id.into();
        self.reconfigure(|c| c.with_collection_id(id))
    }

    pub fn with_bill_id(&self, id: impl Into<String>) -> BillplzResult<Self> {
        let id = id.into();
        self.reconfigure(|c| c.with_bill_id(id))
    }

    pub fn with_account_number(&self, account_number: impl Into<String>) -> BillplzResult<Self> {
        let account_number = account_number.into();
        self.reconfigure(|c| c.with_account_number(account_number))
    }

    pub fn with_payout_collection_id(&self, id: impl Into<String>) -> BillplzResult<Self> {
        let id = id.into();
        self.reconfigure(|c| c.with_payout_collection_id(id))
    }

    pub fn with_payout_id(&self, id: impl Into<String>) -> BillplzResult<Self> {
        let id = id.into();
        self.reconfigure(|c| c.with_payout_id(id))
    }

    pub fn with_card(&self, card_id: impl Into<String>, card_token: impl Into<String>) -> BillplzResult<Self> {
        let (card_id, card_token) = (card_id.into(), card_token.into());
        self.reconfigure(|c| c.with_card(card_id, card_token))
    }

    /// Checks a callback payload against the configured X-Signature key, or
    /// against `key_override` when given.
    pub fn validate_x_signature(
        &self,
        payload: &CallbackPayload,
        key_override: Option<&str>,
    ) -> BillplzResult<bool> {
        let key = self.signing_key(key_override)?;
        Ok(XSignature::new(key).verify(payload))
    }

    /// Builds a receiver bound to the configured X-Signature key.
    pub fn callback_receiver(&self) -> BillplzResult<CallbackReceiver> {
        Ok(CallbackReceiver::new(self.signing_key(None)?))
    }

    fn signing_key<'a>(&'a self, key_override: Option<&'a str>) -> BillplzResult<&'a str> {
        let key = key_override.unwrap_or(&self.config.x_signature_key);
        if key.is_empty() {
            return Err(BillplzError::missing_config("x_signature_key"));
        }
        Ok(key)
    }

    /// Joins `path` onto the API root of `version` (active version when `None`).
    pub(crate) fn url(&self, version: Option<Version>, path: &str) -> String {
        format!("{}/{}", self.config.resolve_base_url(version), path)
    }
}

/// Picks the explicit id, else the configured default.
pub(crate) fn resolve_id(
    explicit: Option<&str>,
    default: Option<&String>,
    resource: &str,
) -> BillplzResult<String> {
    explicit
        .filter(|id| !id.is_empty())
        .or(default.map(String::as_str).filter(|id| !id.is_empty()))
        .map(str::to_string)
        .ok_or_else(|| BillplzError::missing_id(resource))
}

/// Adds a `page` query parameter without touching the caller's options.
pub(crate) fn paged(options: &RequestOptions, page: Option<u32>) -> RequestOptions {
    match page {
        Some(page) => options.clone().with_query("page", page.to_string()),
        None => options.clone(),
    }
}
