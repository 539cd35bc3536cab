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

/// `POST /videos/{videoID}/thumbnail`
///
/// Multipart form with a `thumbnail` field (JPEG or PNG). Responds with the
/// updated record; its thumbnail locator is the stored object's public URL.
#[tracing::instrument(
    skip(state, multipart),
    fields(user_id = %principal.user_id, video_id = %id, operation = "upload_thumbnail")
)]
pub async fn upload_thumbnail(
    State(state): State<Arc<AppState>>,
    principal: Principal,
    Path(id): Path<Uuid>,
    multipart: Multipart,
) -> Result<impl IntoResponse, HttpAppError> {
    let service = MediaUploadService::new(&state);
    let video = service.upload_thumbnail(principal, id, multipart).await?;
    Ok(Json(VideoResponse::from(video)))
}
