/*
[INPUT]:  Stored request options and an HTTP transport
[OUTPUT]: Raw JSON results and validated response envelopes
[POS]:    HTTP layer - facade, transport boundary, envelope validation
[UPDATE]: When adding transports or changing the validation pipeline
*/

pub mod client;
pub mod error;
pub mod response;
pub mod transport;

pub use error::{DEFAULT_ERROR_MESSAGE, FetchError, Result};
pub use response::{raise_if_application_error, validate_structure};
pub use transport::{
    HttpTransport, MockTransport, RecordedRequest, ReqwestTransport, TransportConfig,
};

pub use client::{Fetch, Verb};
