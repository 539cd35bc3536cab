//! Application state shared across all requests.

use std::sync::Arc;

use sqlx::SqlitePool;

use crate::auth::JwtService;
use vodbay_core::Config;
use vodbay_db::VideoRepository;
use vodbay_processing::{MediaInspector, Remuxer};
use vodbay_storage::ObjectStorage;

/// Shared application state.
///
/// Handlers receive this behind an `Arc`. The pool and repository clone
/// cheaply and everything else is already reference counted.
pub struct AppState {
    pub config: Config,
    pub jwt: JwtService,
    pub db_pool: SqlitePool,
    pub videos: VideoRepository,
    pub storage: Arc<dyn ObjectStorage>,
    pub inspector: Arc<dyn MediaInspector>,
    pub remuxer: Arc<dyn Remuxer>,
}

impl AppState {
    pub fn new(
        config: Config,
        db_pool: SqlitePool,
        storage: Arc<dyn ObjectStorage>,
        inspector: Arc<dyn MediaInspector>,
        remuxer: Arc<dyn Remuxer>,
    ) -> Self {
        let jwt = JwtService::new(&config.jwt_secret, config.jwt_expiry_hours);
        let videos = VideoRepository::new(db_pool.clone());
        Self {
            config,
            jwt,
            db_pool,
            videos,
            storage,
            inspector,
            remuxer,
        }
    }
}

// Compile-time assertion that AppState can be shared across request tasks.
fn _assert_app_state_send_sync() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<AppState>();
}
