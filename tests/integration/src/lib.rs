//! Integration test utilities for the listening party server
//!
//! This crate provides helpers for running end-to-end tests against
//! the HTTP routes and the sync gateway.

pub mod fixtures;

pub use fixtures::*;
pub use helpers::*;
