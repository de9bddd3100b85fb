/*
[INPUT]:  Stored client defaults and per-call overrides
[OUTPUT]: Merged request options handed to the transport
[POS]:    Data layer - request option record and merge policy
[UPDATE]: When adding request options or changing merge semantics
*/

use std::collections::BTreeMap;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::http::{FetchError, Result};

/// Request options shared by the stored client config and per-call overrides
///
/// Every field is optional; `None` means "not set" and never clears a value
/// during [`RequestOptions::merge`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RequestOptions {
    /// Request headers, replaced wholesale on merge
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub headers: Option<BTreeMap<String, String>>,
    /// Payload: query parameters for GET/DELETE, JSON body for POST/PUT
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    /// Per-request timeout in milliseconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_ms: Option<u64>,
}

impl RequestOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a single header, keeping any already present
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers
            .get_or_insert_with(BTreeMap::new)
            .insert(name.into(), value.into());
        self
    }

    /// Replace the header map
    pub fn headers(mut self, headers: BTreeMap<String, String>) -> Self {
        self.headers = Some(headers);
        self
    }

    pub fn data(mut self, data: Value) -> Self {
        self.data = Some(data);
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout_ms = Some(u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX));
        self
    }

    pub fn timeout_duration(&self) -> Option<Duration> {
        self.timeout_ms.map(Duration::from_millis)
    }

    /// Shallow merge: fields set in `overrides` replace ours, the rest are kept.
    ///
    /// Neither input is modified.
    pub fn merge(&self, overrides: Option<&RequestOptions>) -> RequestOptions {
        let Some(overrides) = overrides else {
            return self.clone();
        };

        RequestOptions {
            headers: overrides.headers.clone().or_else(|| self.headers.clone()),
            data: overrides.data.clone().or_else(|| self.data.clone()),
            timeout_ms: overrides.timeout_ms.or(self.timeout_ms),
        }
    }

    /// Flatten `data` into query pairs.
    ///
    /// Objects yield one pair per key (`null` entries skipped, strings as-is,
    /// other values JSON-encoded). Unset or `null` data yields `None`; any
    /// other non-object payload cannot be expressed as a query string.
    pub fn query_pairs(&self) -> Result<Option<Vec<(String, String)>>> {
        match &self.data {
            None | Some(Value::Null) => Ok(None),
            Some(Value::Object(map)) => Ok(Some(
                map.iter()
                    .filter(|(_, value)| !value.is_null())
                    .map(|(key, value)| (key.clone(), query_value(value)))
                    .collect(),
            )),
            Some(other) => Err(FetchError::Config(format!(
                "GET/DELETE data must be an object, got {}",
                json_kind(other)
            ))),
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

fn query_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
