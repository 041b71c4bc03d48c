//! # party-api
//!
//! HTTP server built with Axum. Accepts audio uploads, serves stored media
//! and the player pages, and hosts the realtime sync gateway on the same
//! port.

pub mod handlers;
pub mod middleware;
pub mod response;
pub mod routes;
pub mod server;
pub mod state;
pub mod storage;

pub use server::{create_app, create_app_state, run, run_server};
pub use state::AppState;
