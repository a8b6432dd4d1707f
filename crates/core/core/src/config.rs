//! Endpoint configuration and base URL resolution.
//!
//! A [`BillplzConfig`] is an immutable value: it is built once (from code, a
//! TOML file, or the environment) and handed to the client. Reconfiguring
//! produces a new value instead of mutating one that calls may be reading.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{BillplzError, BillplzResult};
use crate::types::CardProvider;

/// Production API root for v3.
pub const BASE_URL_V3: &str = "https://www.billplz.com/api/v3";
/// Production API root for v4.
pub const BASE_URL_V4: &str = "https://www.billplz.com/api/v4";
/// Sandbox API root for v3.
pub const BASE_URL_SANDBOX_V3: &str = "https://www.billplz-sandbox.com/api/v3";
/// Sandbox API root for v4.
pub const BASE_URL_SANDBOX_V4: &str = "https://www.billplz-sandbox.com/api/v4";

/// Gateway API version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Version {
    #[default]
    V3,
    V4,
}

impl Version {
    /// Returns the path segment used in URLs.
    pub fn as_str(&self) -> &'static str {
        match self {
            Version::V3 => "v3",
            Version::V4 => "v4",
        }
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Version {
    type Err = BillplzError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "v3" => Ok(Version::V3),
            "v4" => Ok(Version::V4),
            _ => Err(BillplzError::UnsupportedVersion {
                version: s.to_string(),
            }),
        }
    }
}

/// Returns the fixed base URL for a (sandbox, version) pair.
pub fn base_url(sandbox: bool, version: Version) -> &'static str {
    match (sandbox, version) {
        (false, Version::V3) => BASE_URL_V3,
        (false, Version::V4) => BASE_URL_V4,
        (true, Version::V3) => BASE_URL_SANDBOX_V3,
        (true, Version::V4) => BASE_URL_SANDBOX_V4,
    }
}

/// Client configuration.
#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BillplzConfig {
    /// Default credential sent as `Authorization: Basic <api_key>`.
    pub api_key: String,
    /// Shared secret used to validate callback X-Signatures.
    pub x_signature_key: String,
    /// Talk to the sandbox hosts instead of production.
    pub sandbox: bool,
    /// Version used when an operation does not pin one.
    pub version: Version,
    /// Emit debug records for every call.
    pub debug: bool,
    /// Host override, resolved to `<api_host>/api/<version>`.
    pub api_host: Option<String>,
    /// Per-request timeout in milliseconds. `None` leaves it to the transport.
    pub timeout_ms: Option<u64>,

    // Default resource ids used when an operation is called without one.
    pub collection_id: Option<String>,
    pub bill_id: Option<String>,
    pub account_number: Option<String>,
    pub payout_collection_id: Option<String>,
    pub payout_id: Option<String>,
    pub card_id: Option<String>,
    pub card_token: Option<String>,
    pub card_provider: CardProvider,
}

impl Default for BillplzConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            x_signature_key: String::new(),
            sandbox: false,
            version: Version::V3,
            debug: true,
            api_host: None,
            timeout_ms: None,
            collection_id: None,
            bill_id: None,
            account_number: None,
            payout_collection_id: None,
            payout_id: None,
            card_id: None,
            card_token: None,
            card_provider: CardProvider::Senangpay,
        }
    }
}

impl fmt::Debug for BillplzConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BillplzConfig")
            .field("api_key", &"[redacted]")
            .field("x_signature_key", &"[redacted]")
            .field("sandbox", &self.sandbox)
            .field("version", &self.version)
            .field("debug", &self.debug)
            .field("api_host", &self.api_host)
            .field("timeout_ms", &self.timeout_ms)
            .field("collection_id", &self.collection_id)
            .field("card_provider", &self.card_provider)
            .finish_non_exhaustive()
    }
}

impl BillplzConfig {
    /// Creates a configuration for the given credentials.
    pub fn new(api_key: impl Into<String>, x_signature_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            x_signature_key: x_signature_key.into(),
            ..Self::default()
        }
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = api_key.into();
        self
    }

    pub fn with_x_signature_key(mut self, key: impl Into<String>) -> Self {
        self.x_signature_key = key.into();
        self
    }

    pub fn with_sandbox(mut self, sandbox: bool) -> Self {
        self.sandbox = sandbox;
        self
    }

    pub fn with_version(mut self, version: Version) -> Self {
        self.version = version;
        self
    }

    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// Routes every call to `host` instead of the gateway hosts.
    pub fn with_api_host(mut self, host: impl Into<String>) -> Self {
        self.api_host = Some(host.into());
        self
    }

    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = Some(timeout_ms);
        self
    }

    pub fn with_collection_id(mut self, id: impl Into<String>) -> Self {
        self.collection_id = Some(id.into());
        self
    }

    pub fn with_bill_id(mut self, id: impl Into<String>) -> Self {
        self.bill_id = Some(id.into());
        self
    }

    pub fn with_account_number(mut self, account_number: impl Into<String>) -> Self {
        self.account_number = Some(account_number.into());
        self
    }

    pub fn with_payout_collection_id(mut self, id: impl Into<String>) -> Self {
        self.payout_collection_id = Some(id.into());
        self
    }

    pub fn with_payout_id(mut self, id: impl Into<String>) -> Self {
        self.payout_id = Some(id.into());
        self
    }

    pub fn with_card(mut self, card_id: impl Into<String>, card_token: impl Into<String>) -> Self {
        self.card_id = Some(card_id.into());
        self.card_token = Some(card_token.into());
        self
    }

    pub fn with_card_provider(mut self, provider: CardProvider) -> Self {
        self.card_provider = provider;
        self
    }

    /// Resolves the API root for `version`, or for the active version when `None`.
    pub fn resolve_base_url(&self, version: Option<Version>) -> String {
        let version = version.unwrap_or(self.version);
        match &self.api_host {
            Some(host) => format!("{}/api/{}", host.trim_end_matches('/'), version),
            None => base_url(self.sandbox, version).to_string(),
        }
    }

    /// Checks the configuration before any call is made.
    pub fn validate(&self) -> BillplzResult<()> {
        if self.api_key.trim().is_empty() {
            return Err(BillplzError::missing_config("api_key"));
        }
        if let Some(host) = &self.api_host {
            if !(host.starts_with("http://") || host.starts_with("https://")) {
                return Err(BillplzError::config(format!(
                    "api_host must be an http(s) URL, got '{}'",
                    host
                )));
            }
        }
        Ok(())
    }

    /// Overlays `BILLPLZ_*` environment variables.
    pub fn apply_env(self) -> BillplzResult<Self> {
        self.apply_env_from(|key| std::env::var(key).ok())
    }

    /// Overlays values from `lookup`, keyed by `BILLPLZ_*` variable names.
    pub fn apply_env_from<F>(mut self, lookup: F) -> BillplzResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(key) = lookup("BILLPLZ_API_KEY") {
            self.api_key = key;
        }
        if let Some(key) = lookup("BILLPLZ_X_SIGNATURE_KEY") {
            self.x_signature_key = key;
        }
        if let Some(sandbox) = lookup("BILLPLZ_SANDBOX") {
            self.sandbox = parse_bool("BILLPLZ_SANDBOX", &sandbox)?;
        }
        if let Some(version) = lookup("BILLPLZ_VERSION") {
            self.version = version.parse()?;
        }
        if let Some(host) = lookup("BILLPLZ_API_HOST") {
            self.api_host = Some(host);
        }
        if let Some(id) = lookup("BILLPLZ_COLLECTION_ID") {
            self.collection_id = Some(id);
        }
        Ok(self)
    }
}

fn parse_bool(key: &str, value: &str) -> BillplzResult<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(BillplzError::config(format!(
            "{} must be a boolean, got '{}'",
            key, other
        ))),
    }
}

/// Configuration file error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    IoError(String),
    #[error("Parse error: {0}")]
    ParseError(String),
}

/// Loads configuration from the `[billplz]` table of a TOML file.
pub fn load_config(path: &str) -> Result<BillplzConfig, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::IoError(e.to_string()))?;
    parse_config(&content)
}

/// Parses configuration from TOML text.
pub fn parse_config(content: &str) -> Result<BillplzConfig, ConfigError> {
    let config: toml::Value =
        toml::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))?;

    let billplz: BillplzConfig = config
        .get("billplz")
        .map(|v| toml::Value::try_into(v.clone()))
        .transpose()
        .map_err(|e| ConfigError::ParseError(e.to_string()))?
        .unwrap_or_default();

    Ok(billplz)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_base_url_table() {
        assert_eq!(base_url(false, Version::V3), "https://www.billplz.com/api/v3");
        assert_eq!(base_url(false, Version::V4), "https://www.billplz.com/api/v4");
        assert_eq!(base_url(true, Version::V3), "https://www.billplz-sandbox.com/api/v3");
        assert_eq!(base_url(true, Version::V4), "https://www.billplz-sandbox.com/api/v4");
    }

    #[test]
    fn test_resolve_base_url_is_stable() {
        let config = BillplzConfig::new("key", "secret").with_sandbox(true);
        let first = config.resolve_base_url(None);
        for _ in 0..3 {
            assert_eq!(config.resolve_base_url(None), first);
        }
        assert_eq!(first, BASE_URL_SANDBOX_V3);
        assert_eq!(config.resolve_base_url(Some(Version::V4)), BASE_URL_SANDBOX_V4);

        let v4 = config.with_version(Version::V4).with_sandbox(false);
        assert_eq!(v4.resolve_base_url(None), BASE_URL_V4);
        assert_eq!(v4.resolve_base_url(Some(Version::V3)), BASE_URL_V3);
    }

    #[test]
    fn test_api_host_override() {
        let config = BillplzConfig::new("key", "secret").with_api_host("http://127.0.0.1:9000/");
        assert_eq!(config.resolve_base_url(None), "http://127.0.0.1:9000/api/v3");
        assert_eq!(
            config.resolve_base_url(Some(Version::V4)),
            "http://127.0.0.1:9000/api/v4"
        );
    }

    #[test]
    fn test_version_parsing() {
        assert_eq!("v3".parse::<Version>().unwrap(), Version::V3);
        assert_eq!("V4".parse::<Version>().unwrap(), Version::V4);

        let err = "v5".parse::<Version>().unwrap_err();
        assert!(err.is_configuration_error());
        assert_eq!(Version::V4.to_string(), "v4");
    }

    #[test]
    fn test_validate() {
        assert!(BillplzConfig::default().validate().is_err());
        assert!(BillplzConfig::new("key", "secret").validate().is_ok());

        let bad_host = BillplzConfig::new("key", "secret").with_api_host("localhost:9000");
        assert!(bad_host.validate().is_err());
    }

    #[test]
    fn test_apply_env_from() {
        let vars: HashMap<&str, &str> = HashMap::from([
            ("BILLPLZ_API_KEY", "env-key"),
            ("BILLPLZ_SANDBOX", "true"),
            ("BILLPLZ_VERSION", "v4"),
        ]);

        let config = BillplzConfig::new("file-key", "secret")
            .apply_env_from(|k| vars.get(k).map(|v| v.to_string()))
            .unwrap();

        assert_eq!(config.api_key, "env-key");
        assert_eq!(config.x_signature_key, "secret");
        assert!(config.sandbox);
        assert_eq!(config.version, Version::V4);
    }

    #[test]
    fn test_apply_env_rejects_unknown_version() {
        let result = BillplzConfig::default()
            .apply_env_from(|k| (k == "BILLPLZ_VERSION").then(|| "v9".to_string()));
        assert!(matches!(result, Err(BillplzError::UnsupportedVersion { .. })));
    }

    #[test]
    fn test_parse_config() {
        let config = parse_config(
            r#"
            [billplz]
            api_key = "73eb57f0-7d4e-42b9-a544-aeac6e4b0f81"
            x_signature_key = "S-s7b4J4IRZ7d3XvLBxVDKqw"
            sandbox = true
            version = "v4"
            collection_id = "inbmmepb"
            card_provider = "ocbc"
            "#,
        )
        .unwrap();

        assert!(config.sandbox);
        assert!(config.debug);
        assert_eq!(config.version, Version::V4);
        assert_eq!(config.collection_id.as_deref(), Some("inbmmepb"));
        assert_eq!(config.card_provider, CardProvider::Ocbc);
    }

    #[test]
    fn test_parse_config_rejects_unknown_version() {
        let result = parse_config("[billplz]\nversion = \"v5\"\n");
        assert!(matches!(result, Err(ConfigError::ParseError(_))));
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let config = BillplzConfig::new("top-secret-key", "top-secret-sig");
        let rendered = format!("{:?}", config);
        assert!(!rendered.contains("top-secret"));
    }
}
