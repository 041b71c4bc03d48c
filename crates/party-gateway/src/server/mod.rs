//! Gateway server setup
//!
//! Provides the WebSocket routes for listening sessions.

mod handler;
mod state;

pub use handler::session_socket_handler;
pub use state::GatewayState;

use axum::{routing::get, Router};

/// Create the gateway router
pub fn create_router() -> Router<GatewayState> {
    Router::new().route("/ws/:id", get(session_socket_handler))
}

/// Build the gateway routes with their state applied
pub fn create_gateway(state: GatewayState) -> Router {
    create_router().with_state(state)
}
