/*
[INPUT]:  Error sources (transport, envelope validation, serialization, config)
[OUTPUT]: Structured error types distinguishing contract and business failures
[POS]:    Error handling layer - unified error types for entire crate
[UPDATE]: When adding new error sources or improving error messages
*/

use thiserror::Error;

/// Message used when the server reports `err != 0` without a `msg`
pub const DEFAULT_ERROR_MESSAGE: &str = "Fetch Error without error message";

/// Main error type for envelope-checked fetching
#[derive(Error, Debug)]
pub enum FetchError {
    /// HTTP request failed (network failure, non-2xx status, body decode)
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Response is not a well-formed `{ err, msg?, dat? }` envelope
    #[error("Invalid response envelope: {0}")]
    Structural(String),

    /// Envelope is well-formed but reports a non-zero `err`
    #[error("{message}")]
    Application { code: i128, message: String },

    /// Serialization/deserialization failed
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// URL parsing failed
    #[error("Invalid URL: {0}")]
    UrlParse(#[from] url::ParseError),

    /// Failure reported by a non-reqwest transport
    #[error("Transport error: {0}")]
    Transport(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl FetchError {
    /// Create an application error, falling back to the default message
    /// when the server did not supply one
    pub fn application(code: i128, message: Option<&str>) -> Self {
        let message = match message {
            Some(msg) if !msg.is_empty() => msg.to_string(),
            _ => DEFAULT_ERROR_MESSAGE.to_string(),
        };
        FetchError::Application { code, message }
    }

    /// Check if the envelope itself was malformed
    pub fn is_structural(&self) -> bool {
        matches!(self, FetchError::Structural(_))
    }

    /// Check if the server reported a business-logic failure
    pub fn is_application(&self) -> bool {
        matches!(self, FetchError::Application { .. })
    }

    /// The server-reported `err` code, if this is an application error
    pub fn application_code(&self) -> Option<i128> {
        match self {
            FetchError::Application { code, .. } => Some(*code),
            _ => None,
        }
    }

    /// Check if the failure happened below the envelope layer
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            FetchError::Http(_)
                | FetchError::Serialization(_)
                | FetchError::UrlParse(_)
                | FetchError::Transport(_)
        )
    }
}

/// Result type alias for fetch operations
pub type Result<T> = std::result::Result<T, FetchError>;
