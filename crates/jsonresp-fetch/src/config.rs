/*
[INPUT]:  YAML configuration file or string
[OUTPUT]: Parsed client defaults and transport settings
[POS]:    Configuration layer - client setup
[UPDATE]: When adding new configuration options
*/

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::http::transport::TransportConfig;
use crate::http::{FetchError, Result};
use crate::types::RequestOptions;

/// Top-level configuration for a [`Fetch`](crate::Fetch) client
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct FetchConfig {
    /// Default request options merged under every call
    #[serde(default)]
    pub client: RequestOptions,
    /// Settings for the reqwest transport
    #[serde(default)]
    pub transport: TransportSettings,
}

/// Transport section of the configuration file
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TransportSettings {
    /// Base URL relative request paths are joined onto
    #[serde(default)]
    pub base_url: Option<String>,
    /// Total request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Connect timeout in seconds
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
}

impl Default for TransportSettings {
    fn default() -> Self {
        Self {
            base_url: None,
            timeout_secs: default_timeout_secs(),
            connect_timeout_secs: default_connect_timeout_secs(),
        }
    }
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_connect_timeout_secs() -> u64 {
    10
}

impl FetchConfig {
    /// Load configuration from YAML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            FetchError::Config(format!("Failed to read {}: {e}", path.display()))
        })?;
        Self::from_yaml_str(&content)
    }

    pub fn from_yaml_str(content: &str) -> Result<Self> {
        serde_yaml::from_str(content)
            .map_err(|e| FetchError::Config(format!("Failed to parse config: {e}")))
    }

    pub fn transport_config(&self) -> TransportConfig {
        TransportConfig {
            base_url: self.transport.base_url.clone(),
            timeout: Duration::from_secs(self.transport.timeout_secs),
            connect_timeout: Duration::from_secs(self.transport.connect_timeout_secs),
        }
    }
}
