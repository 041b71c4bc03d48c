//! Server setup and initialization
//!
//! Provides the application builder and server runner. The HTTP routes and
//! the sync gateway share one listener and one session registry.

use std::sync::Arc;

use axum::Router;
use party_common::{AppConfig, AppError};
use party_gateway::{create_gateway, GatewayState, SessionRegistry};
use tokio::net::TcpListener;
use tracing::{error, info};

use crate::middleware::apply_middleware_with_config;
use crate::routes::{create_router, health_routes};
use crate::state::AppState;
use crate::storage::LocalMediaStore;

/// Build the complete Axum application with all routes and middleware
pub fn create_app(state: AppState) -> Result<Router, AppError> {
    let config = state.config().clone();

    let gateway = create_gateway(GatewayState::with_registry(
        Arc::clone(state.registry()),
        config.gateway.clone(),
    ));

    let router = apply_middleware_with_config(
        create_router(&config.storage).with_state(state.clone()),
        &config.rate_limit,
        &config.cors,
        config.app.env.is_production(),
    )?;

    // WebSocket joins and health checks are not rate limited
    Ok(router
        .merge(gateway)
        .merge(health_routes().with_state(state)))
}

/// Initialize all dependencies and create AppState
///
/// Creates the upload directory if it does not exist.
pub async fn create_app_state(config: AppConfig) -> Result<AppState, AppError> {
    let store = LocalMediaStore::new(
        &config.storage.upload_dir,
        config.storage.max_file_size_bytes(),
    );

    store.init().await.map_err(|e| {
        error!(
            upload_dir = %config.storage.upload_dir,
            error = %e,
            "Failed to create upload directory"
        );
        AppError::from(e)
    })?;
    info!(upload_dir = %store.root().display(), "Upload directory ready");

    Ok(AppState::new(
        Arc::new(store),
        SessionRegistry::new_shared(),
        config,
    ))
}

/// Run the HTTP server
pub async fn run_server(app: Router, addr: &str) -> Result<(), AppError> {
    info!("Starting HTTP server on {}", addr);

    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| AppError::Config(format!("Failed to bind to {addr}: {e}")))?;

    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .await
        .map_err(|e| AppError::Config(format!("Server error: {e}")))?;

    Ok(())
}

/// Run the complete server with configuration
pub async fn run(config: AppConfig) -> Result<(), AppError> {
    let addr = config.server.address();

    let state = create_app_state(config).await?;
    let app = create_app(state)?;

    run_server(app, &addr).await
}
