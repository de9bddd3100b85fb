/*
[INPUT]:  Crate modules and public type definitions
[OUTPUT]: Public envelope-checked fetch crate surface
[POS]:    Crate root - module wiring
[UPDATE]: When public modules or exports change
*/

pub mod config;
pub mod http;
pub mod types;

pub use config::{FetchConfig, TransportSettings};

// Re-export commonly used types from http
pub use http::{
    DEFAULT_ERROR_MESSAGE,
    Fetch,
    FetchError,
    HttpTransport,
    MockTransport,
    RecordedRequest,
    ReqwestTransport,
    Result,
    TransportConfig,
    Verb,
    raise_if_application_error,
    validate_structure,
};

// Re-export all types
pub use types::*;
