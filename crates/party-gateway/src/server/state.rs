//! Gateway state
//!
//! Shared state for the WebSocket routes.

use crate::broadcast::Broadcaster;
use crate::session::SessionRegistry;
use party_common::GatewayConfig;
use std::sync::Arc;

/// Gateway application state
#[derive(Clone)]
pub struct GatewayState {
    /// Live sessions
    registry: Arc<SessionRegistry>,
    /// Fan-out to session members
    broadcaster: Broadcaster,
    /// Gateway configuration
    config: Arc<GatewayConfig>,
}

impl GatewayState {
    /// Create gateway state with an empty registry
    #[must_use]
    pub fn new(config: GatewayConfig) -> Self {
        Self::with_registry(SessionRegistry::new_shared(), config)
    }

    /// Create gateway state around an existing registry
    #[must_use]
    pub fn with_registry(registry: Arc<SessionRegistry>, config: GatewayConfig) -> Self {
        Self {
            registry,
            broadcaster: Broadcaster::new(config.delivery_timeout()),
            config: Arc::new(config),
        }
    }

    /// Get the session registry
    pub fn registry(&self) -> &Arc<SessionRegistry> {
        &self.registry
    }

    /// Get the broadcaster
    pub fn broadcaster(&self) -> &Broadcaster {
        &self.broadcaster
    }

    /// Get the gateway configuration
    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }
}

impl std::fmt::Debug for GatewayState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GatewayState")
            .field("registry", &self.registry)
            .field("config", &self.config)
            .finish()
    }
}
