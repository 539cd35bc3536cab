//! Common utilities for file upload handlers

use std::path::Path;

use axum::extract::multipart::{Field, Multipart};
use vodbay_core::AppError;
use vodbay_processing::StagedArtifact;

/// A staged media payload together with its validated content type.
pub struct StagedUpload {
    pub artifact: StagedArtifact,
    pub content_type: String,
}

/// Normalize MIME type by stripping parameters (e.g. "image/jpeg; charset=utf-8" -> "image/jpeg").
fn normalize_mime_type(content_type: &str) -> &str {
    content_type
        .split(';')
        .next()
        .map(|s| s.trim())
        .unwrap_or(content_type)
}

/// Validate content type against allowlist. Compares normalized MIME type only
/// (no parameter bypass). Returns the normalized lowercase MIME type.
pub fn validate_content_type(
    content_type: &str,
    allowed_types: &[String],
) -> Result<String, AppError> {
    let normalized = normalize_mime_type(content_type).to_lowercase();
    if !allowed_types.iter().any(|ct| normalized == ct.to_lowercase()) {
        return Err(AppError::InvalidInput(format!(
            "Invalid content type. Allowed types: {}",
            allowed_types.join(", ")
        )));
    }
    Ok(normalized)
}

/// Pull the field named `field_name` out of the multipart stream and stage
/// its content to a temp file. The first matching field wins; other fields
/// are skipped.
///
/// The content type is validated before any byte is written, so rejected
/// uploads never touch the filesystem. The returned artifact is rewound and
/// ready to read.
pub async fn stage_media_field(
    mut multipart: Multipart,
    field_name: &str,
    allowed_types: &[String],
    staging_dir: Option<&Path>,
    size_limit: u64,
) -> Result<StagedUpload, AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::InvalidInput(format!("Failed to read multipart: {}", e)))?
    {
        if field.name() != Some(field_name) {
            continue;
        }

        let content_type = field
            .content_type()
            .ok_or_else(|| {
                AppError::InvalidInput(format!("Field '{}' is missing a content type", field_name))
            })?
            .to_string();
        let content_type = validate_content_type(&content_type, allowed_types)?;

        let artifact = stage_field(field, staging_dir, size_limit).await?;
        return Ok(StagedUpload {
            artifact,
            content_type,
        });
    }

    Err(AppError::InvalidInput(format!(
        "No field named '{}' in multipart body",
        field_name
    )))
}

async fn stage_field(
    mut field: Field<'_>,
    staging_dir: Option<&Path>,
    size_limit: u64,
) -> Result<StagedArtifact, AppError> {
    let mut artifact = StagedArtifact::create_in(staging_dir, size_limit).await?;

    while let Some(chunk) = field
        .chunk()
        .await
        .map_err(|e| AppError::InvalidInput(format!("Failed to read file data: {}", e)))?
    {
        artifact.write_chunk(&chunk).await?;
    }

    artifact.rewind().await?;
    Ok(artifact)
}
