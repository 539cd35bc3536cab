use crate::auth::models::Principal;
use crate::error::{HttpAppError, ValidatedJson};
use crate::services::upload::MediaUploadService;
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Json,
};
use std::sync::Arc;
use uuid::Uuid;
use vodbay_core::models::{NewVideo, Video, VideoResponse};
use vodbay_core::AppError;

/// `POST /videos`
///
/// Creates a draft record owned by the caller. Locators start out null and
/// are filled in by subsequent uploads.
#[tracing::instrument(
    skip(state, body),
    fields(user_id = %principal.user_id, operation = "create_video")
)]
pub async fn create_video(
    State(state): State<Arc<AppState>>,
    principal: Principal,
    ValidatedJson(body): ValidatedJson<NewVideo>,
) -> Result<impl IntoResponse, HttpAppError> {
    let title = body.title.trim();
    if title.is_empty() {
        return Err(AppError::InvalidInput("Title must not be empty".to_string()).into());
    }

    let video = Video::new(principal.user_id, title.to_string(), body.description);
    state.videos.create(&video).await?;

    Ok(Json(VideoResponse::from(video)))
}

/// `GET /videos/{videoID}`
///
/// Returns the caller's record. A `bucket,key` video locator is resolved
/// on the way out, so clients always see a usable URL once an upload has
/// landed.
#[tracing::instrument(
    skip(state),
    fields(user_id = %principal.user_id, video_id = %id, operation = "get_video")
)]
pub async fn get_video(
    State(state): State<Arc<AppState>>,
    principal: Principal,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpAppError> {
    let video = state
        .videos
        .get(id)
        .await
        .map_err(HttpAppError::from)?
        .ok_or_else(|| AppError::NotFound("Video not found".to_string()))?;

    if video.user_id != principal.user_id {
        return Err(AppError::Unauthorized(
            "Authenticated user does not own this video".to_string(),
        )
        .into());
    }

    let service = MediaUploadService::new(&state);
    let video = service.resolve_video_url(video).await?;

    Ok(Json(VideoResponse::from(video)))
}
