//! Unified media upload service
//!
//! One pipeline handles both upload kinds through the same sequence:
//! authorize → stage → (inspect → classify → remux, video only) → key →
//! transfer → record update → (resolve, video only). A failed step ends the
//! run; staged files are removed when their handles drop, on every path.

use std::sync::Arc;
use std::time::Duration;

use axum::extract::Multipart;
use chrono::Utc;
use uuid::Uuid;

use vodbay_core::models::{MediaLocator, Video};
use vodbay_core::{AppError, AspectBucket, UrlPolicy};
use vodbay_processing::StagedArtifact;
use vodbay_storage::object_key;

use crate::auth::Principal;
use crate::state::AppState;
use crate::utils::upload::stage_media_field;

/// Multipart field carrying a thumbnail payload.
const THUMBNAIL_FIELD: &str = "thumbnail";

/// Multipart field carrying a video payload.
const VIDEO_FIELD: &str = "video";

/// Orchestrates the ingestion pipeline for one upload request.
pub struct MediaUploadService {
    state: Arc<AppState>,
}

impl MediaUploadService {
    pub fn new(state: &Arc<AppState>) -> Self {
        Self {
            state: state.clone(),
        }
    }

    /// Complete thumbnail workflow: authorize → stage → key → transfer →
    /// update record. Thumbnails are stored as-is and the record gets their
    /// public URL.
    #[tracing::instrument(skip(self, principal, multipart), fields(video_id = %video_id, user_id = %principal.user_id, media = "thumbnail"))]
    pub async fn upload_thumbnail(
        &self,
        principal: Principal,
        video_id: Uuid,
        multipart: Multipart,
    ) -> Result<Video, AppError> {
        let config = &self.state.config;

        // 1. Authorize against the record owner
        let video = self.authorize(principal, video_id).await?;

        // 2. Stage the payload
        let upload = stage_media_field(
            multipart,
            THUMBNAIL_FIELD,
            &config.thumbnail_content_types,
            config.staging_dir.as_deref(),
            config.thumbnail_max_bytes,
        )
        .await?;

        // 3. Generate the destination key
        let key = object_key(None, &upload.content_type);

        // 4. Transfer to object storage
        self.transfer(&upload.artifact, &key, &upload.content_type)
            .await?;

        // 5. Point the record at the public URL of the stored object
        let locator = MediaLocator::Direct(self.state.storage.public_url(&key));
        let updated = self
            .state
            .videos
            .set_thumbnail_locator(video.id, &locator)
            .await?;

        tracing::info!(
            key = %key,
            size_bytes = upload.artifact.len(),
            "Thumbnail upload complete"
        );
        Ok(updated)
    }

    /// Complete video workflow: authorize → stage → inspect → classify →
    /// remux → key → transfer → update record → resolve. The remuxed
    /// artifact is what lands in storage; the record first gets the stored
    /// reference, then resolution rewrites it per policy.
    #[tracing::instrument(skip(self, principal, multipart), fields(video_id = %video_id, user_id = %principal.user_id, media = "video"))]
    pub async fn upload_video(
        &self,
        principal: Principal,
        video_id: Uuid,
        multipart: Multipart,
    ) -> Result<Video, AppError> {
        let config = &self.state.config;

        // 1. Authorize against the record owner
        let video = self.authorize(principal, video_id).await?;

        // 2. Stage the payload
        let upload = stage_media_field(
            multipart,
            VIDEO_FIELD,
            &config.video_content_types,
            config.staging_dir.as_deref(),
            config.video_max_bytes,
        )
        .await?;

        // 3. Inspect dimensions and classify the aspect
        let info = self.state.inspector.inspect(upload.artifact.path()).await?;
        let aspect = AspectBucket::from_dimensions(info.width, info.height);

        // 4. Remux so the moov atom leads and playback can start mid-download
        let remuxed = self
            .state
            .remuxer
            .remux_faststart(upload.artifact.path())
            .await?;

        // 5. Generate the destination key under the aspect prefix
        let key = object_key(Some(aspect), &upload.content_type);

        // 6. Transfer the remuxed artifact
        self.transfer(&remuxed, &key, &upload.content_type).await?;

        // 7. Record the stored reference
        let locator = MediaLocator::stored(self.state.storage.bucket(), &key);
        let updated = self
            .state
            .videos
            .set_video_locator(video.id, &locator)
            .await?;

        tracing::info!(
            key = %key,
            aspect = %aspect,
            width = info.width,
            height = info.height,
            size_bytes = remuxed.len(),
            "Video upload complete"
        );

        // 8. Resolve the locator for the response
        self.resolve_video_url(updated).await
    }

    /// Resolve a stored video reference into a client-usable URL.
    ///
    /// Direct policy constructs the URL on the fly and leaves the record
    /// alone. Signed policy mints a short-lived URL and persists it,
    /// replacing the stored reference for good. Records already holding a
    /// URL pass through untouched.
    pub async fn resolve_video_url(&self, video: Video) -> Result<Video, AppError> {
        let (bucket, key) = match &video.video_url {
            Some(MediaLocator::StoredRef { bucket, key }) => (bucket.clone(), key.clone()),
            _ => return Ok(video),
        };

        match self.state.config.url_policy {
            UrlPolicy::Direct => {
                let mut resolved = video;
                resolved.video_url = Some(MediaLocator::Direct(
                    self.state.storage.public_url_in(&bucket, &key),
                ));
                Ok(resolved)
            }
            UrlPolicy::Signed => {
                let ttl_secs = self.state.config.signed_url_ttl_secs;
                let url = self
                    .state
                    .storage
                    .presigned_get_url(&key, Duration::from_secs(ttl_secs))
                    .await
                    .map_err(|e| AppError::Signing(e.to_string()))?;

                let locator = MediaLocator::Signed {
                    url,
                    expires_at: Utc::now() + chrono::Duration::seconds(ttl_secs as i64),
                };
                self.state.videos.set_video_locator(video.id, &locator).await
            }
        }
    }

    /// Load the record and check the caller owns it. Runs before anything
    /// touches the filesystem or the object store.
    async fn authorize(&self, principal: Principal, video_id: Uuid) -> Result<Video, AppError> {
        let video = self
            .state
            .videos
            .get(video_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Video not found".to_string()))?;

        if video.user_id != principal.user_id {
            return Err(AppError::Unauthorized(
                "Authenticated user does not own this video".to_string(),
            ));
        }

        Ok(video)
    }

    async fn transfer(
        &self,
        artifact: &StagedArtifact,
        key: &str,
        content_type: &str,
    ) -> Result<(), AppError> {
        let reader = artifact.reader().await?;
        self.state
            .storage
            .put_stream(key, content_type, artifact.len(), reader)
            .await
            .map_err(|e| AppError::Transfer(e.to_string()))?;
        Ok(())
    }
}
