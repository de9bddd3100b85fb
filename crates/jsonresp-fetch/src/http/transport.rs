/*
[INPUT]:  URL, merged request options, transport configuration
[OUTPUT]: One decoded JSON value per request, or a transport error
[POS]:    HTTP layer - injected HTTP client capability
[UPDATE]: When adding transports or changing request construction
*/

use std::collections::{BTreeMap, VecDeque};
use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::{Client, Method, RequestBuilder, Url};
use serde_json::Value;
use tokio::sync::Mutex;

use crate::http::{FetchError, Result};
use crate::types::RequestOptions;

/// HTTP client capability the facade delegates to
///
/// Each verb resolves to a single JSON value. Failures (network, status,
/// decode) are reported as errors and passed through untouched by callers.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    async fn get(&self, url: &str, options: &RequestOptions) -> Result<Value>;

    async fn post(&self, url: &str, options: &RequestOptions) -> Result<Value>;

    async fn put(&self, url: &str, options: &RequestOptions) -> Result<Value>;

    async fn remove(&self, url: &str, options: &RequestOptions) -> Result<Value>;
}

/// reqwest-backed transport configuration
#[derive(Debug, Clone)]
pub struct TransportConfig {
    pub base_url: Option<String>,
    pub timeout: Duration,
    pub connect_timeout: Duration,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
        }
    }
}

/// Production transport built on a shared reqwest client
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    http_client: Client,
    base_url: Option<Url>,
}

impl ReqwestTransport {
    /// Create a transport with default configuration and no base URL
    pub fn new() -> Result<Self> {
        Self::with_config(TransportConfig::default())
    }

    pub fn with_config(config: TransportConfig) -> Result<Self> {
        let http_client = Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .build()?;

        let base_url = config.base_url.as_deref().map(Url::parse).transpose()?;

        Ok(Self {
            http_client,
            base_url,
        })
    }

    pub fn base_url(&self) -> Option<&Url> {
        self.base_url.as_ref()
    }

    /// Resolve `url` against the base URL, if one is configured
    fn resolve_url(&self, url: &str) -> Result<Url> {
        match &self.base_url {
            Some(base) => Ok(base.join(url)?),
            None => Ok(Url::parse(url)?),
        }
    }

    fn build_request(
        &self,
        method: Method,
        url: &str,
        options: &RequestOptions,
    ) -> Result<RequestBuilder> {
        let carries_body = matches!(method, Method::POST | Method::PUT);
        let mut builder = self.http_client.request(method, self.resolve_url(url)?);

        if let Some(headers) = &options.headers {
            builder = builder.headers(header_map(headers)?);
        }
        if let Some(timeout) = options.timeout_duration() {
            builder = builder.timeout(timeout);
        }
        if carries_body {
            if let Some(data) = &options.data {
                builder = builder.json(data);
            }
        } else if let Some(pairs) = options.query_pairs()? {
            builder = builder.query(&pairs);
        }

        Ok(builder)
    }

    /// Send the request and decode the body as JSON; an empty body is `null`
    async fn send_json(&self, builder: RequestBuilder) -> Result<Value> {
        let response = builder.send().await?.error_for_status()?;
        let bytes = response.bytes().await?;
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Value::Null);
        }
        Ok(serde_json::from_slice(&bytes)?)
    }

    async fn execute(&self, method: Method, url: &str, options: &RequestOptions) -> Result<Value> {
        let builder = self.build_request(method, url, options)?;
        self.send_json(builder).await
    }
}

fn header_map(headers: &BTreeMap<String, String>) -> Result<HeaderMap> {
    let mut map = HeaderMap::with_capacity(headers.len());
    for (name, value) in headers {
        let name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|e| FetchError::Config(format!("Invalid header name {name:?}: {e}")))?;
        let value = HeaderValue::from_str(value)
            .map_err(|e| FetchError::Config(format!("Invalid header value for {name}: {e}")))?;
        map.insert(name, value);
    }
    Ok(map)
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn get(&self, url: &str, options: &RequestOptions) -> Result<Value> {
        self.execute(Method::GET, url, options).await
    }

    async fn post(&self, url: &str, options: &RequestOptions) -> Result<Value> {
        self.execute(Method::POST, url, options).await
    }

    async fn put(&self, url: &str, options: &RequestOptions) -> Result<Value> {
        self.execute(Method::PUT, url, options).await
    }

    async fn remove(&self, url: &str, options: &RequestOptions) -> Result<Value> {
        self.execute(Method::DELETE, url, options).await
    }
}

/// A request observed by [`MockTransport`]
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedRequest {
    pub method: Method,
    pub url: String,
    pub options: RequestOptions,
}

/// Mock transport for testing
///
/// Replies with queued values in order and records every request it sees.
/// An empty queue resolves to a transport error.
#[derive(Debug, Default)]
pub struct MockTransport {
    replies: Mutex<VecDeque<std::result::Result<Value, String>>>,
    requests: Mutex<Vec<RecordedRequest>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a mock that answers the next request with `value`
    pub fn replying(value: Value) -> Self {
        Self {
            replies: Mutex::new(VecDeque::from([Ok(value)])),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub async fn push_reply(&self, value: Value) {
        self.replies.lock().await.push_back(Ok(value));
    }

    /// Queue a transport-level failure
    pub async fn push_failure(&self, message: &str) {
        self.replies.lock().await.push_back(Err(message.to_string()));
    }

    pub async fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().await.clone()
    }

    async fn respond(&self, method: Method, url: &str, options: &RequestOptions) -> Result<Value> {
        self.requests.lock().await.push(RecordedRequest {
            method,
            url: url.to_string(),
            options: options.clone(),
        });

        match self.replies.lock().await.pop_front() {
            Some(Ok(value)) => Ok(value),
            Some(Err(message)) => Err(FetchError::Transport(message)),
            None => Err(FetchError::Transport("no reply queued".to_string())),
        }
    }
}

#[async_trait]
impl HttpTransport for MockTransport {
    async fn get(&self, url: &str, options: &RequestOptions) -> Result<Value> {
        self.respond(Method::GET, url, options).await
    }

    async fn post(&self, url: &str, options: &RequestOptions) -> Result<Value> {
        self.respond(Method::POST, url, options).await
    }

    async fn put(&self, url: &str, options: &RequestOptions) -> Result<Value> {
        self.respond(Method::PUT, url, options).await
    }

    async fn remove(&self, url: &str, options: &RequestOptions) -> Result<Value> {
        self.respond(Method::DELETE, url, options).await
    }
}
