//! Application state
//!
//! Holds the shared state for the HTTP handlers: the media store, the live
//! session registry (shared with the gateway) and configuration.

use std::sync::Arc;

use party_common::AppConfig;
use party_core::MediaStore;
use party_gateway::SessionRegistry;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    /// Where uploaded media lives
    store: Arc<dyn MediaStore>,
    /// Live sessions, shared with the gateway
    registry: Arc<SessionRegistry>,
    /// Application configuration
    config: Arc<AppConfig>,
}

impl AppState {
    /// Create a new AppState
    pub fn new(store: Arc<dyn MediaStore>, registry: Arc<SessionRegistry>, config: AppConfig) -> Self {
        Self {
            store,
            registry,
            config: Arc::new(config),
        }
    }

    /// Get the media store
    pub fn store(&self) -> &dyn MediaStore {
        self.store.as_ref()
    }

    /// Get the session registry
    pub fn registry(&self) -> &Arc<SessionRegistry> {
        &self.registry
    }

    /// Get the application configuration
    pub fn config(&self) -> &AppConfig {
        &self.config
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("store", &"MediaStore")
            .field("registry", &self.registry)
            .field("config", &"AppConfig")
            .finish()
    }
}
