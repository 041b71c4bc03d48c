//! Listening party server entry point
//!
//! Run with:
//! ```bash
//! cargo run -p party-api --bin party-server
//! ```
//!
//! Configuration is loaded from environment variables or a `.env` file.

use party_common::{try_init_tracing_with_config, AppConfig, Environment, TracingConfig};
use tracing::{error, info};

#[tokio::main]
async fn main() {
    // The tracing preset follows APP_ENV; the rest of the config loads after
    let env = std::env::var("APP_ENV")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(Environment::Development);

    if let Err(e) = try_init_tracing_with_config(TracingConfig::for_environment(env)) {
        eprintln!("Warning: Failed to initialize tracing: {e}");
    }

    if let Err(e) = run().await {
        error!(error = %e, "Server failed to start");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    info!("Starting listening party server...");

    let config = AppConfig::from_env().map_err(|e| {
        error!(error = %e, "Failed to load configuration");
        e
    })?;

    info!(
        env = ?config.app.env,
        address = %config.server.address(),
        upload_dir = %config.storage.upload_dir,
        "Configuration loaded"
    );

    party_api::run(config).await?;

    Ok(())
}
