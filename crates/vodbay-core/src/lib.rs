//! Core domain types for the vodbay ingestion service.
//!
//! This crate holds the pieces shared by every layer: the error taxonomy,
//! runtime configuration, aspect classification, and the video record model
//! with its locator representation.

pub mod aspect;
pub mod config;
pub mod error;
pub mod models;

pub use aspect::AspectBucket;
pub use config::{Config, UrlPolicy};
pub use error::{AppError, ErrorMetadata, LogLevel};
