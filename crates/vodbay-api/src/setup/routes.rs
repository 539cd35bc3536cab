//! Route configuration and setup

use crate::handlers;
use crate::state::AppState;
use axum::{
    extract::DefaultBodyLimit,
    http::{HeaderValue, Method},
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;
use vodbay_core::Config;

/// Setup all application routes
pub async fn setup_routes(
    config: &Config,
    state: Arc<AppState>,
) -> Result<Router<()>, anyhow::Error> {
    let cors = setup_cors(config)?;

    let public_routes = public_routes();
    let protected_routes = protected_routes().layer(axum::middleware::from_fn_with_state(
        state.clone(),
        crate::auth::middleware::auth_middleware,
    ));

    // Axum's built-in 2 MB body cap is replaced by a single limit sized
    // for the largest accepted payload; per-kind ceilings are enforced
    // while staging.
    let app = public_routes
        .merge(protected_routes)
        .layer(RequestBodyLimitLayer::new(
            config.video_max_bytes.max(config.thumbnail_max_bytes) as usize,
        ))
        .layer(DefaultBodyLimit::disable())
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    Ok(app)
}

fn setup_cors(config: &Config) -> Result<CorsLayer, anyhow::Error> {
    let cors = if config.cors_origins.contains(&"*".to_string()) {
        tracing::warn!("CORS configured to allow all origins - not recommended for production");
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
            .allow_headers(Any)
    } else {
        let origins: Result<Vec<HeaderValue>, _> =
            config.cors_origins.iter().map(|o| o.parse()).collect();
        CorsLayer::new()
            .allow_origin(origins.unwrap_or_default())
            .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
            .allow_headers(Any)
    };
    Ok(cors)
}

fn public_routes() -> Router<Arc<AppState>> {
    Router::new().route("/healthz", get(handlers::health::health_check))
}

fn protected_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/videos", post(handlers::videos::create_video))
        .route("/videos/{id}", get(handlers::videos::get_video))
        .route(
            "/videos/{id}/thumbnail",
            post(handlers::thumbnail_upload::upload_thumbnail),
        )
        .route(
            "/videos/{id}/video",
            post(handlers::video_upload::upload_video),
        )
}
