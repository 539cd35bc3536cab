//! Vodbay API Library
//!
//! This crate provides the HTTP API handlers, middleware, and application setup.

// Module declarations
mod handlers;
mod services;
mod telemetry;
mod utils;

// Public modules
pub mod auth;
pub mod error;
pub mod setup;
pub mod state;

// Re-exports
pub use error::ErrorResponse;
