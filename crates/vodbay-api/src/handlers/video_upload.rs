use crate::auth::models::Principal;
use crate::error::HttpAppError;
use crate::services::upload::MediaUploadService;
use crate::state::AppState;
use axum::{
    extract::{Multipart, Path, State},
    response::IntoResponse,
    Json,
};
use std::sync::Arc;
use uuid::Uuid;
use vodbay_core::models::VideoResponse;

/// `POST /videos/{videoID}/video`
///
/// Multipart form with a `video` field (MP4). The payload is inspected,
/// remuxed for faststart playback, stored under an aspect-bucketed key, and
/// the updated record comes back with its locator already resolved.
#[tracing::instrument(
    skip(state, multipart),
    fields(user_id = %principal.user_id, video_id = %id, operation = "upload_video")
)]
pub async fn upload_video(
    State(state): State<Arc<AppState>>,
    principal: Principal,
    Path(id): Path<Uuid>,
    multipart: Multipart,
) -> Result<impl IntoResponse, HttpAppError> {
    let service = MediaUploadService::new(&state);
    let video = service.upload_video(principal, id, multipart).await?;
    Ok(Json(VideoResponse::from(video)))
}
