//! Application setup and initialization
//!
//! This module contains all application initialization logic extracted from main.rs
//! for better organization and testability.

pub mod database;
pub mod routes;
pub mod server;
pub mod storage;

use crate::state::AppState;
use anyhow::{Context, Result};
use std::sync::Arc;
use vodbay_core::Config;
use vodbay_processing::{FastStartRemuxer, FfprobeInspector};

/// Initialize the entire application
pub async fn initialize_app(config: Config) -> Result<(Arc<AppState>, axum::Router)> {
    // Validate configuration first - fail fast on misconfiguration
    config
        .validate()
        .context("Configuration validation failed")?;

    // Initialize telemetry first
    crate::telemetry::init_telemetry(&config);

    tracing::info!("Configuration loaded and validated successfully");

    // Setup database
    let pool = database::setup_database(&config).await?;

    // Setup storage
    let storage = storage::setup_storage(&config)?;

    // Media tooling shells out to ffprobe/ffmpeg; paths come from config
    let inspector = Arc::new(FfprobeInspector::new(
        config.ffprobe_path.clone(),
        config.media_tool_timeout_secs,
    ));
    let remuxer = Arc::new(FastStartRemuxer::new(
        config.ffmpeg_path.clone(),
        config.media_tool_timeout_secs,
    ));

    let state = Arc::new(AppState::new(
        config.clone(),
        pool,
        storage,
        inspector,
        remuxer,
    ));

    // Setup routes
    let router = routes::setup_routes(&config, state.clone()).await?;

    Ok((state, router))
}
