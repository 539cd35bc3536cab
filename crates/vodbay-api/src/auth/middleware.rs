use crate::auth::models::Principal;
use crate::error::HttpAppError;
use crate::state::AppState;
use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::sync::Arc;
use vodbay_core::AppError;

/// Bearer token authentication middleware.
///
/// Verifies the `Authorization: Bearer <jwt>` header and stores the caller
/// identity in request extensions for handlers to pick up. Requests without
/// a usable token are rejected before any body byte is read.
pub async fn auth_middleware(
    State(state): State<Arc<AppState>>,
    mut request: Request,
    next: Next,
) -> Response {
    let auth_header = match request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
    {
        Some(value) => value,
        None => {
            return HttpAppError(AppError::Unauthenticated(
                "Missing Authorization header".to_string(),
            ))
            .into_response();
        }
    };

    let token = match auth_header.strip_prefix("Bearer ") {
        Some(token) => token,
        None => {
            return HttpAppError(AppError::Unauthenticated(
                "Authorization header must use the Bearer scheme".to_string(),
            ))
            .into_response();
        }
    };

    let claims = match state.jwt.verify_token(token) {
        Ok(claims) => claims,
        Err(err) => return HttpAppError(err).into_response(),
    };

    request.extensions_mut().insert(Principal {
        user_id: claims.sub,
    });

    next.run(request).await
}
