//! Request dispatch.
//!
//! A [`Dispatcher`] turns an [`ApiCall`] descriptor plus per-call
//! [`RequestOptions`] into exactly one HTTP exchange. It applies the Basic
//! authorization header, records a debug line for the outcome, and hands back
//! the response body on success or the original failure otherwise. It never
//! retries.

use std::fmt;
use std::time::Duration;

use billplz_core::{BillplzError, BillplzResult};
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

/// Source tag attached to every dispatch log record.
pub const LOG_SOURCE: &str = "BillplzClient";

/// HTTP verbs used by the gateway API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl HttpMethod {
    /// Whether calls with this verb carry a request body.
    pub fn has_body(&self) -> bool {
        matches!(self, HttpMethod::Post | HttpMethod::Put | HttpMethod::Patch)
    }

    fn as_reqwest(&self) -> reqwest::Method {
        match self {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Post => reqwest::Method::POST,
            HttpMethod::Put => reqwest::Method::PUT,
            HttpMethod::Patch => reqwest::Method::PATCH,
            HttpMethod::Delete => reqwest::Method::DELETE,
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_reqwest().as_str())
    }
}

/// Descriptor of a single API call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiCall {
    pub method: HttpMethod,
    /// Fully resolved URL.
    pub url: String,
    /// Label used in log records and API errors.
    pub action: &'static str,
}

impl ApiCall {
    pub fn new(method: HttpMethod, url: impl Into<String>, action: &'static str) -> Self {
        Self {
            method,
            url: url.into(),
            action,
        }
    }
}

/// Per-call options.
///
/// `api_key` replaces the configured credential for this call only. It is
/// consumed into the Authorization header and forwarded nowhere else.
#[derive(Clone, Default)]
pub struct RequestOptions {
    pub api_key: Option<String>,
    pub query: Vec<(String, String)>,
    pub timeout: Option<Duration>,
}

impl RequestOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn with_query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

impl fmt::Debug for RequestOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RequestOptions")
            .field("api_key", &self.api_key.as_ref().map(|_| "[redacted]"))
            .field("query", &self.query)
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// A request ready to go on the wire.
#[derive(Debug, Clone, PartialEq)]
pub struct PreparedRequest {
    pub method: HttpMethod,
    pub url: String,
    /// Full Authorization header value.
    pub authorization: String,
    pub query: Vec<(String, String)>,
    pub timeout: Option<Duration>,
    pub body: Option<Value>,
}

/// Issues authenticated calls against the gateway.
#[derive(Clone)]
pub struct Dispatcher {
    http: reqwest::Client,
    api_key: String,
    debug: bool,
    timeout: Option<Duration>,
}

impl Dispatcher {
    /// Creates a dispatcher using `api_key` as the default credential.
    pub fn new(http: reqwest::Client, api_key: impl Into<String>, debug: bool) -> Self {
        Self {
            http,
            api_key: api_key.into(),
            debug,
            timeout: None,
        }
    }

    /// Sets the default per-request timeout.
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Returns the underlying HTTP client.
    pub fn http_client(&self) -> &reqwest::Client {
        &self.http
    }

    /// Builds a caller bound to one call descriptor.
    pub fn caller(&self, method: HttpMethod, url: impl Into<String>, action: &'static str) -> ApiCaller<'_> {
        ApiCaller {
            dispatcher: self,
            call: ApiCall::new(method, url, action),
        }
    }

    /// Resolves headers, options and body for a call without sending it.
    ///
    /// Bodyless verbs reject a body. Verbs with a body send `{}` when none
    /// is given.
    pub fn prepare(
        &self,
        call: &ApiCall,
        body: Option<Value>,
        options: &RequestOptions,
    ) -> BillplzResult<PreparedRequest> {
        let body = match (call.method.has_body(), body) {
            (false, Some(_)) => {
                return Err(BillplzError::config(format!(
                    "{} '{}' does not take a request body",
                    call.method, call.action
                )));
            }
            (false, None) => None,
            (true, Some(body)) => Some(body),
            (true, None) => Some(Value::Object(Default::default())),
        };

        // An empty override counts as absent
        let credential = options
            .api_key
            .as_deref()
            .filter(|key| !key.is_empty())
            .unwrap_or(&self.api_key);
        if credential.trim().is_empty() {
            return Err(BillplzError::missing_config("api_key"));
        }

        Ok(PreparedRequest {
            method: call.method,
            url: call.url.clone(),
            authorization: format!("Basic {}", credential),
            query: options.query.clone(),
            timeout: options.timeout.or(self.timeout),
            body,
        })
    }

    /// Sends a prepared request and decodes the response body.
    pub async fn execute<T: DeserializeOwned>(
        &self,
        call: &ApiCall,
        prepared: PreparedRequest,
    ) -> BillplzResult<T> {
        let mut request = self
            .http
            .request(prepared.method.as_reqwest(), &prepared.url)
            .header(AUTHORIZATION, prepared.authorization);

        if !prepared.query.is_empty() {
            request = request.query(&prepared.query);
        }
        if let Some(timeout) = prepared.timeout {
            request = request.timeout(timeout);
        }
        if let Some(body) = &prepared.body {
            request = request.header(CONTENT_TYPE, "application/json").json(body);
        }

        let response = match request.send().await {
            Ok(response) => response,
            Err(err) => {
                self.log_failure(
                    call,
                    err.status().map(|s| s.as_u16()),
                    err.status().and_then(|s| s.canonical_reason()),
                    None,
                );
                return Err(BillplzError::Transport(err));
            }
        };

        let status = response.status();
        let status_text = status.canonical_reason().unwrap_or_default();

        if !status.is_success() {
            let body = read_error_body(call, status.as_u16(), response.bytes().await);
            self.log_failure(call, Some(status.as_u16()), Some(status_text), Some(&body));
            return Err(BillplzError::Api {
                action: call.action.to_string(),
                status: status.as_u16(),
                status_text: status_text.to_string(),
                body,
            });
        }

        if self.debug {
            tracing::debug!(
                source = LOG_SOURCE,
                action = call.action,
                status = status.as_u16(),
                status_text,
            );
        }

        let bytes = response.bytes().await?;
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(serde_json::from_value(Value::Null)?);
        }
        Ok(serde_json::from_slice(&bytes)?)
    }

    fn log_failure(
        &self,
        call: &ApiCall,
        status: Option<u16>,
        status_text: Option<&str>,
        body: Option<&Value>,
    ) {
        if !self.debug {
            return;
        }
        let body = body.map(|b| b.to_string()).unwrap_or_default();
        tracing::debug!(
            source = LOG_SOURCE,
            action = call.action,
            status = ?status,
            status_text = ?status_text,
            body = %body,
        );
    }
}

impl fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dispatcher")
            .field("debug", &self.debug)
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

/// Decodes an error response body. A body that cannot be read is logged and
/// treated as empty so the status still reaches the caller.
fn read_error_body<B: AsRef<[u8]>>(call: &ApiCall, status: u16, read: reqwest::Result<B>) -> Value {
    match read {
        Ok(bytes) => decode_error_body(bytes.as_ref()),
        Err(err) => {
            tracing::warn!(
                source = LOG_SOURCE,
                action = call.action,
                status,
                error = %err,
                "failed to read error response body"
            );
            Value::Null
        }
    }
}

fn decode_error_body(bytes: &[u8]) -> Value {
    if bytes.is_empty() {
        return Value::Null;
    }
    serde_json::from_slice(bytes)
        .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(bytes).into_owned()))
}

/// A dispatcher bound to one call descriptor.
pub struct ApiCaller<'a> {
    dispatcher: &'a Dispatcher,
    call: ApiCall,
}

impl ApiCaller<'_> {
    /// Returns the call descriptor.
    pub fn call(&self) -> &ApiCall {
        &self.call
    }

    /// Sends the call without a request body.
    pub async fn send<T: DeserializeOwned>(&self, options: &RequestOptions) -> BillplzResult<T> {
        let prepared = self.dispatcher.prepare(&self.call, None, options)?;
        self.dispatcher.execute(&self.call, prepared).await
    }

    /// Sends the call with a JSON body.
    pub async fn send_json<B, T>(&self, body: &B, options: &RequestOptions) -> BillplzResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let body = serde_json::to_value(body)?;
        let prepared = self.dispatcher.prepare(&self.call, Some(body), options)?;
        self.dispatcher.execute(&self.call, prepared).await
    }
}
