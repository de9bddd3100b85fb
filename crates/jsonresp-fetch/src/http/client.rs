/*
[INPUT]:  Stored request options, injected transport, per-call overrides
[OUTPUT]: Raw JSON results or validated response envelopes
[POS]:    HTTP layer - client facade over the transport
[UPDATE]: When adding verbs or changing the validation pipeline
*/

use std::fmt;

use reqwest::Method;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

use crate::config::FetchConfig;
use crate::http::response::{raise_if_application_error, validate_structure};
use crate::http::transport::{HttpTransport, ReqwestTransport};
use crate::http::Result;
use crate::types::{JsonResp, RequestOptions};

/// HTTP verbs supported by the facade
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Verb {
    Get,
    Post,
    Put,
    Remove,
}

impl Verb {
    pub fn method(self) -> Method {
        match self {
            Verb::Get => Method::GET,
            Verb::Post => Method::POST,
            Verb::Put => Method::PUT,
            Verb::Remove => Method::DELETE,
        }
    }
}

impl fmt::Display for Verb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.method().as_str())
    }
}

/// Client facade: stored defaults plus envelope-aware verb operations
///
/// The stored options are copied in at construction and never change;
/// per-call options are merged over them into a fresh value for each call.
#[derive(Debug)]
pub struct Fetch<T> {
    transport: T,
    config: RequestOptions,
}

impl Fetch<ReqwestTransport> {
    /// Create a reqwest-backed client from a loaded configuration
    pub fn from_config(config: &FetchConfig) -> Result<Self> {
        let transport = ReqwestTransport::with_config(config.transport_config())?;
        Ok(Self::new(transport, config.client.clone()))
    }
}

impl<T: HttpTransport> Fetch<T> {
    pub fn new(transport: T, config: RequestOptions) -> Self {
        Self { transport, config }
    }

    /// Stored default request options
    pub fn config(&self) -> &RequestOptions {
        &self.config
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Merge, dispatch on `verb`, and decode the result as `R`
    pub async fn request<R: DeserializeOwned>(
        &self,
        verb: Verb,
        url: &str,
        options: Option<RequestOptions>,
    ) -> Result<R> {
        let value = self.dispatch(verb, url, options.as_ref()).await?;
        Ok(serde_json::from_value(value)?)
    }

    /// Like [`Fetch::request`], but the response must be a `{ err, msg?, dat? }`
    /// envelope with `err == 0`
    pub async fn xrequest<D: DeserializeOwned>(
        &self,
        verb: Verb,
        url: &str,
        options: Option<RequestOptions>,
    ) -> Result<JsonResp<D>> {
        let value = self.dispatch(verb, url, options.as_ref()).await?;

        let envelope = JsonResp::from_validated(validate_structure(value)?)?;
        raise_if_application_error(&envelope)?;
        envelope.decode_dat()
    }

    async fn dispatch(
        &self,
        verb: Verb,
        url: &str,
        options: Option<&RequestOptions>,
    ) -> Result<Value> {
        let args = self.config.merge(options);
        debug!(%verb, url, "dispatching request");

        match verb {
            Verb::Get => self.transport.get(url, &args).await,
            Verb::Post => self.transport.post(url, &args).await,
            Verb::Put => self.transport.put(url, &args).await,
            Verb::Remove => self.transport.remove(url, &args).await,
        }
    }

    // ### Raw responses

    /// GET, result decoded as `R` (use `Value` for the untouched JSON)
    pub async fn get<R: DeserializeOwned>(
        &self,
        url: &str,
        options: Option<RequestOptions>,
    ) -> Result<R> {
        self.request(Verb::Get, url, options).await
    }

    /// POST, result decoded as `R`
    pub async fn post<R: DeserializeOwned>(
        &self,
        url: &str,
        options: Option<RequestOptions>,
    ) -> Result<R> {
        self.request(Verb::Post, url, options).await
    }

    /// PUT, result decoded as `R`
    pub async fn put<R: DeserializeOwned>(
        &self,
        url: &str,
        options: Option<RequestOptions>,
    ) -> Result<R> {
        self.request(Verb::Put, url, options).await
    }

    /// DELETE, result decoded as `R`
    pub async fn remove<R: DeserializeOwned>(
        &self,
        url: &str,
        options: Option<RequestOptions>,
    ) -> Result<R> {
        self.request(Verb::Remove, url, options).await
    }

    // ### Envelope responses

    /// GET returning a validated envelope whose `dat` is decoded as `D`
    pub async fn xget<D: DeserializeOwned>(
        &self,
        url: &str,
        options: Option<RequestOptions>,
    ) -> Result<JsonResp<D>> {
        self.xrequest(Verb::Get, url, options).await
    }

    pub async fn xpost<D: DeserializeOwned>(
        &self,
        url: &str,
        options: Option<RequestOptions>,
    ) -> Result<JsonResp<D>> {
        self.xrequest(Verb::Post, url, options).await
    }

    pub async fn xput<D: DeserializeOwned>(
        &self,
        url: &str,
        options: Option<RequestOptions>,
    ) -> Result<JsonResp<D>> {
        self.xrequest(Verb::Put, url, options).await
    }

    pub async fn xremove<D: DeserializeOwned>(
        &self,
        url: &str,
        options: Option<RequestOptions>,
    ) -> Result<JsonResp<D>> {
        self.xrequest(Verb::Remove, url, options).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::transport::MockTransport;
    use crate::http::FetchError;
    use serde_json::json;

    #[test]
    fn test_verb_methods() {
        assert_eq!(Verb::Get.method(), Method::GET);
        assert_eq!(Verb::Remove.method(), Method::DELETE);
        assert_eq!(Verb::Put.to_string(), "PUT");
    }

    #[tokio::test]
    async fn test_dispatch_uses_verb_method() {
        let transport = MockTransport::new();
        for _ in 0..4 {
            transport.push_reply(json!({"err": 0})).await;
        }
        let fetch = Fetch::new(transport, RequestOptions::default());

        for verb in [Verb::Get, Verb::Post, Verb::Put, Verb::Remove] {
            let resp: JsonResp = fetch.xrequest(verb, "/api/x", None).await.unwrap();
            assert!(resp.is_ok());
        }

        let methods: Vec<Method> = fetch
            .transport()
            .requests()
            .await
            .into_iter()
            .map(|r| r.method)
            .collect();
        assert_eq!(
            methods,
            vec![Method::GET, Method::POST, Method::PUT, Method::DELETE]
        );
    }

    #[tokio::test]
    async fn test_structural_check_runs_before_application_check() {
        let fetch = Fetch::new(
            MockTransport::replying(json!({"err": "1", "msg": "not found"})),
            RequestOptions::default(),
        );

        let err = fetch.xget::<Value>("/api/x", None).await.unwrap_err();
        assert!(err.is_structural());
    }

    #[tokio::test]
    async fn test_application_error_wins_over_dat_decoding() {
        #[derive(Debug, serde::Deserialize)]
        #[allow(dead_code)]
        struct Item {
            id: u32,
        }

        let fetch = Fetch::new(
            MockTransport::replying(json!({"err": 2, "msg": "denied", "dat": "not an item"})),
            RequestOptions::default(),
        );

        let err = fetch.xget::<Item>("/api/x", None).await.unwrap_err();
        assert_eq!(err.application_code(), Some(2));
    }

    #[tokio::test]
    async fn test_transport_error_passes_through() {
        let transport = MockTransport::new();
        transport.push_failure("connection refused").await;
        let fetch = Fetch::new(transport, RequestOptions::default());

        let err = fetch.xpost::<Value>("/api/x", None).await.unwrap_err();
        match err {
            FetchError::Transport(message) => assert_eq!(message, "connection refused"),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
