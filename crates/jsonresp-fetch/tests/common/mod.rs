/*
[INPUT]:  Test configuration and mock server requirements
[OUTPUT]: Shared test utilities, fixtures, and mock helpers
[POS]:    Test infrastructure - shared across all test modules
[UPDATE]: When adding new test patterns or fixtures
*/

//! Common test utilities for jsonresp-fetch tests

use jsonresp_fetch::{Fetch, FetchConfig, ReqwestTransport, TransportSettings};
use wiremock::MockServer;

/// Setup a mock HTTP server for testing
pub async fn setup_mock_server() -> MockServer {
    MockServer::start().await
}

/// Build a reqwest-backed client pointed at the mock server
pub fn client_for(server: &MockServer) -> Fetch<ReqwestTransport> {
    let config = FetchConfig {
        transport: TransportSettings {
            base_url: Some(server.uri()),
            ..TransportSettings::default()
        },
        ..FetchConfig::default()
    };
    Fetch::from_config(&config).expect("client init")
}
