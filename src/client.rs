//! Client for the Cache service
//!
//! This module provides the HTTP client for storing and retrieving cache entries.
//! Both operations hit the same resource, `<base>/v1/cache`, and carry the entry
//! identity in the `x-cache-key`, `x-cache-namespace` and `x-cache-scope` headers.

use crate::config::ClientConfig;
use crate::error::{Error, Result};
use crate::key::CacheKey;
use crate::status::{DefaultStatusPolicy, StatusPolicy};
use hyper::ext::ReasonPhrase;
use reqwest::header::USER_AGENT;
use reqwest::{Client as ReqwestClient, Method, RequestBuilder, Response, StatusCode};
use std::borrow::Cow;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, instrument};
use url::Url;

/// Path of the cache resource, appended to the base address
pub const CACHE_PATH: &str = "/v1/cache";

/// Client for the Cache service
///
/// The client holds no per-call state, so one instance (or its clones, which share
/// the connection pool) can serve any number of concurrent callers.
///
/// # Examples
///
/// ```
/// use cache_client::{Client, Kind};
/// use std::time::Duration;
///
/// let client = Client::builder("http://cache:8080")
///     .timeout(Duration::from_secs(5))
///     .status_policy(|status: reqwest::StatusCode| {
///         if status.is_server_error() { Kind::ServiceUnavailable } else { Kind::BadRequest }
///     })
///     .build();
/// assert_eq!(client.base_url(), "http://cache:8080");
/// ```
#[derive(Clone)]
pub struct Client {
    /// Base address of the service, used verbatim as the URL prefix
    addr: String,

    /// The underlying reqwest client
    http_client: ReqwestClient,

    /// Maps unexpected statuses to error kinds
    policy: Arc<dyn StatusPolicy>,

    /// Timeout applied to each request
    timeout: Option<Duration>,

    /// User agent sent with each request
    user_agent: Option<String>,
}

/// Builder for [`Client`]; options are applied in the order they are called
pub struct ClientBuilder {
    addr: String,
    http_client: Option<ReqwestClient>,
    policy: Arc<dyn StatusPolicy>,
    timeout: Option<Duration>,
    user_agent: Option<String>,
}

impl ClientBuilder {
    fn new(addr: String) -> Self {
        Self {
            addr,
            http_client: None,
            policy: Arc::new(DefaultStatusPolicy),
            timeout: None,
            user_agent: None,
        }
    }

    /// Use the given transport instead of a fresh one
    pub fn http_client(mut self, http_client: ReqwestClient) -> Self {
        self.http_client = Some(http_client);
        self
    }

    /// Use a custom mapping from unexpected statuses to error kinds
    pub fn status_policy(mut self, policy: impl StatusPolicy + 'static) -> Self {
        self.policy = Arc::new(policy);
        self
    }

    /// Set the timeout applied to each request
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set the user agent sent with each request
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Take the address, timeout and user agent from a configuration
    pub fn config(mut self, config: &ClientConfig) -> Self {
        self.addr = config.base_url.clone();
        self.timeout = config.timeout();
        self.user_agent = config.user_agent.clone();
        self
    }

    /// Build the client
    pub fn build(self) -> Client {
        Client {
            addr: self.addr,
            http_client: self.http_client.unwrap_or_default(),
            policy: self.policy,
            timeout: self.timeout,
            user_agent: self.user_agent,
        }
    }
}

impl Client {
    /// Create a client for the given base address with default options
    ///
    /// The address is not validated here; a malformed address makes every
    /// operation fail with an `Internal` error.
    pub fn new(addr: impl Into<String>) -> Self {
        Self::builder(addr).build()
    }

    /// Start building a client for the given base address
    pub fn builder(addr: impl Into<String>) -> ClientBuilder {
        ClientBuilder::new(addr.into())
    }

    /// Create a client from a configuration
    pub fn from_config(config: &ClientConfig) -> Self {
        Self::builder(config.base_url.clone()).config(config).build()
    }

    /// The configured base address
    pub fn base_url(&self) -> &str {
        &self.addr
    }

    /// Store `value` under `key`, replacing any previous value
    #[instrument(
        skip(self, key, value),
        fields(namespace = %key.namespace(), scope = %key.scope(), key = %key.key()),
        level = "debug"
    )]
    pub async fn set(&self, key: &CacheKey, value: impl Into<Vec<u8>>) -> Result<()> {
        let url = self.endpoint()?;
        let value = value.into();

        debug!(bytes = value.len(), "Sending POST request to {}", url);
        let response = self
            .request(Method::POST, url, key)
            .body(value)
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::CREATED || status == StatusCode::OK {
            Ok(())
        } else {
            Err(self.unexpected_status(&response))
        }
    }

    /// Retrieve the value stored under `key`
    ///
    /// Returns [`Error::NotFound`] when the service has no such entry.
    #[instrument(
        skip(self, key),
        fields(namespace = %key.namespace(), scope = %key.scope(), key = %key.key()),
        level = "debug"
    )]
    pub async fn get(&self, key: &CacheKey) -> Result<Vec<u8>> {
        let url = self.endpoint()?;

        debug!("Sending GET request to {}", url);
        let response = self.request(Method::GET, url, key).send().await?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            debug!("Entry not found");
            return Err(Error::NotFound);
        }
        if status != StatusCode::OK {
            return Err(self.unexpected_status(&response));
        }

        let value = response.bytes().await?;
        debug!(bytes = value.len(), "Received value");
        Ok(value.to_vec())
    }

    /// Build the cache resource URL from the base address
    fn endpoint(&self) -> Result<Url> {
        let invalid = |source: url::ParseError| Error::InvalidUrl {
            url: self.addr.clone(),
            source,
        };

        let base = Url::parse(&self.addr).map_err(invalid)?;
        // e.g. "localhost:8080" parses with "localhost" as the scheme
        if base.cannot_be_a_base() {
            return Err(invalid(url::ParseError::RelativeUrlWithoutBase));
        }
        if base.host_str().is_none() {
            return Err(invalid(url::ParseError::EmptyHost));
        }

        let url = format!("{}{}", self.addr, CACHE_PATH);
        match Url::parse(&url) {
            Ok(parsed) => Ok(parsed),
            Err(source) => Err(Error::InvalidUrl { url, source }),
        }
    }

    fn request(&self, method: Method, url: Url, key: &CacheKey) -> RequestBuilder {
        let mut request = self.http_client.request(method, url);

        for (name, value) in key.headers() {
            request = request.header(name, value);
        }
        if let Some(user_agent) = &self.user_agent {
            request = request.header(USER_AGENT, user_agent.as_str());
        }
        if let Some(timeout) = self.timeout {
            request = request.timeout(timeout);
        }

        request
    }

    fn unexpected_status(&self, response: &Response) -> Error {
        let status = response.status();
        let status_text = format!("{} {}", status.as_u16(), reason_phrase(response));
        error!("Cache error: unexpected response {}", status_text);
        Error::Status {
            kind: self.policy.kind(status),
            status_code: status.as_u16(),
            message: format!("unexpected response: {}", status_text),
        }
    }
}

/// The reason phrase the server sent, or the standard one for the status
fn reason_phrase(response: &Response) -> Cow<'_, str> {
    if let Some(reason) = response.extensions().get::<ReasonPhrase>() {
        return String::from_utf8_lossy(reason.as_bytes());
    }
    Cow::Borrowed(response.status().canonical_reason().unwrap_or_default())
}
