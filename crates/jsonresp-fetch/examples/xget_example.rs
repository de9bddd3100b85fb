/*
[INPUT]:  Optional YAML config path (first CLI argument)
[OUTPUT]: Raw and envelope-checked responses printed to stdout
[POS]:    Examples - raw vs envelope-checked requests
[UPDATE]: When the facade's public verbs change
*/

use jsonresp_fetch::*;
use serde_json::Value;
use tracing_subscriber::EnvFilter;

/// Example: fetch the same endpoint raw and with envelope checks
///
/// Run with `RUST_LOG=jsonresp_fetch=debug` to see dispatched requests.
#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("=== jsonresp-fetch Example ===\n");

    let config = match std::env::args().nth(1) {
        Some(path) => match FetchConfig::from_file(&path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Failed to load {}: {}", path, e);
                return;
            }
        },
        None => FetchConfig {
            transport: TransportSettings {
                base_url: Some("http://localhost:8080".to_string()),
                ..TransportSettings::default()
            },
            ..FetchConfig::default()
        },
    };

    let client = match Fetch::from_config(&config) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to create client: {}", e);
            return;
        }
    };

    println!("Raw GET /api/status...");
    match client.get::<Value>("/api/status", None).await {
        Ok(value) => println!("✓ Raw: {}", value),
        Err(e) => println!("✗ Error: {}", e),
    }

    println!("\nEnvelope GET /api/status...");
    match client.xget::<Value>("/api/status", None).await {
        Ok(resp) => println!("✓ dat: {:?}", resp.dat),
        Err(e) if e.is_application() => {
            println!("✗ Server error {:?}: {}", e.application_code(), e)
        }
        Err(e) if e.is_structural() => println!("✗ Malformed envelope: {}", e),
        Err(e) => println!("✗ Transport error: {}", e),
    }

    println!("\n✓ Example complete");
}
