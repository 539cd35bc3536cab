//! Test helpers: build AppState and router for integration tests.
//!
//! Run from workspace root: `cargo test -p vodbay-api --test videos_test` or
//! `cargo test -p vodbay-api`. The router is the real one; storage and the
//! media tools are in-memory doubles, the database is in-memory SQLite.

#![allow(dead_code)]

pub mod auth;
pub mod fixtures;
pub mod media;
pub mod storage;

use axum_test::multipart::{MultipartForm, Part};
use axum_test::TestServer;
use sqlx::SqlitePool;
use std::path::Path;
use std::sync::Arc;
use tempfile::TempDir;
use uuid::Uuid;
use vodbay_api::setup::routes;
use vodbay_api::state::AppState;
use vodbay_core::{Config, UrlPolicy};
use vodbay_db::VideoRepository;

use media::{CannedRemuxer, FixedInspector};
use storage::InMemoryStorage;

/// Bucket name used by the test config and storage double.
pub const TEST_BUCKET: &str = "vodbay-test-media";

/// Test application: server, pool, and handles into the doubles.
pub struct TestApp {
    pub server: TestServer,
    pub pool: SqlitePool,
    pub storage: Arc<InMemoryStorage>,
    pub inspector: Arc<FixedInspector>,
    pub remuxer: Arc<CannedRemuxer>,
    pub staging_dir: TempDir,
}

impl TestApp {
    pub fn client(&self) -> &TestServer {
        &self.server
    }

    pub fn videos(&self) -> VideoRepository {
        VideoRepository::new(self.pool.clone())
    }

    /// Number of files currently sitting in the staging directory.
    pub fn staged_file_count(&self) -> usize {
        std::fs::read_dir(self.staging_dir.path())
            .expect("Failed to read staging directory")
            .count()
    }
}

/// Setup a test app under the signed URL policy (the default).
pub async fn setup_test_app() -> TestApp {
    setup_test_app_with_policy(UrlPolicy::Signed).await
}

/// Setup a test app with the given URL resolution policy.
pub async fn setup_test_app_with_policy(url_policy: UrlPolicy) -> TestApp {
    let staging_dir = tempfile::tempdir().expect("Failed to create staging directory");
    let config = create_test_config(staging_dir.path(), url_policy);

    // A single connection keeps every query on the same in-memory database.
    let pool = vodbay_db::connect(&config.database_url, config.db_max_connections)
        .await
        .expect("Failed to connect to test database");
    vodbay_db::migrate(&pool)
        .await
        .expect("Failed to run migrations");

    let storage = Arc::new(InMemoryStorage::new(TEST_BUCKET));
    let inspector = Arc::new(FixedInspector::landscape());
    let remuxer = Arc::new(CannedRemuxer::new(fixtures::REMUXED_BYTES));

    let state = Arc::new(AppState::new(
        config.clone(),
        pool.clone(),
        storage.clone(),
        inspector.clone(),
        remuxer.clone(),
    ));

    let app = routes::setup_routes(&config, state)
        .await
        .expect("Failed to setup routes");
    let server = TestServer::new(app.into_make_service()).expect("Failed to create test server");

    TestApp {
        server,
        pool,
        storage,
        inspector,
        remuxer,
        staging_dir,
    }
}

/// Create a draft record through the API; returns its id.
pub async fn create_video_record(app: &TestApp, token: &str, title: &str) -> Uuid {
    let response = app
        .client()
        .post("/videos")
        .add_header("Authorization", format!("Bearer {}", token))
        .json(&serde_json::json!({ "title": title }))
        .await;
    assert_eq!(response.status_code(), 200);

    let data: serde_json::Value = response.json();
    Uuid::parse_str(data.get("id").and_then(|v| v.as_str()).expect("id missing"))
        .expect("Invalid UUID in create response")
}

/// Build a single-file multipart body.
pub fn multipart_file(field: &str, file_name: &str, mime: &str, data: Vec<u8>) -> MultipartForm {
    let part = Part::bytes(bytes::Bytes::from(data))
        .file_name(file_name)
        .mime_type(mime);
    MultipartForm::new().add_part(field, part)
}

fn create_test_config(staging_dir: &Path, url_policy: UrlPolicy) -> Config {
    Config {
        server_port: 0,
        cors_origins: vec!["*".to_string()],
        database_url: "sqlite::memory:".to_string(),
        db_max_connections: 1,
        jwt_secret: auth::TEST_JWT_SECRET.to_string(),
        jwt_expiry_hours: 24,
        s3_bucket: TEST_BUCKET.to_string(),
        s3_region: "us-east-1".to_string(),
        s3_endpoint: None,
        url_policy,
        signed_url_ttl_secs: 300,
        thumbnail_max_bytes: 10 * 1024 * 1024,
        thumbnail_content_types: vec!["image/jpeg".to_string(), "image/png".to_string()],
        video_max_bytes: 100 * 1024 * 1024,
        video_content_types: vec!["video/mp4".to_string()],
        ffmpeg_path: "ffmpeg".to_string(),
        ffprobe_path: "ffprobe".to_string(),
        media_tool_timeout_secs: None,
        staging_dir: Some(staging_dir.to_path_buf()),
        environment: "test".to_string(),
    }
}
