//! Storage setup and initialization

use anyhow::Result;
use std::sync::Arc;
use vodbay_core::Config;
use vodbay_storage::{ObjectStorage, S3Storage};

/// Setup the object storage backend from config
pub fn setup_storage(config: &Config) -> Result<Arc<dyn ObjectStorage>> {
    tracing::info!("Initializing object storage...");
    let storage = S3Storage::new(
        config.s3_bucket.clone(),
        config.s3_region.clone(),
        config.s3_endpoint.clone(),
    )?;

    tracing::info!(
        bucket = %config.s3_bucket,
        region = %config.s3_region,
        endpoint = config.s3_endpoint.as_deref().unwrap_or("default"),
        "Object storage initialized successfully"
    );

    Ok(Arc::new(storage))
}
