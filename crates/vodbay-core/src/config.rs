//! Configuration module
//!
//! Runtime configuration for the vodbay API, loaded once at startup from the
//! environment (with `.env` support) and carried inside the application
//! state. Nothing here is global; every component receives the values it
//! needs through the state struct.

use std::env;
use std::path::PathBuf;
use std::str::FromStr;

const SERVER_PORT: u16 = 4000;
const DB_MAX_CONNECTIONS: u32 = 5;
const JWT_EXPIRY_HOURS: i64 = 24;
const SIGNED_URL_TTL_SECS: u64 = 300;
const THUMBNAIL_MAX_SIZE_MB: u64 = 10;
const VIDEO_MAX_SIZE_MB: u64 = 10 * 1024;

/// How video locators are resolved into client-usable URLs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UrlPolicy {
    /// Construct a public bucket URL; assumes the bucket allows anonymous reads.
    Direct,
    /// Mint a time-limited pre-signed URL and persist it on the record.
    Signed,
}

impl FromStr for UrlPolicy {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "direct" => Ok(UrlPolicy::Direct),
            "signed" => Ok(UrlPolicy::Signed),
            other => Err(anyhow::anyhow!(
                "URL_POLICY must be 'direct' or 'signed', got '{}'",
                other
            )),
        }
    }
}

/// Application configuration.
#[derive(Clone, Debug)]
pub struct Config {
    pub server_port: u16,
    pub cors_origins: Vec<String>,
    pub database_url: String,
    pub db_max_connections: u32,
    pub jwt_secret: String,
    pub jwt_expiry_hours: i64,
    // Object storage
    pub s3_bucket: String,
    pub s3_region: String,
    pub s3_endpoint: Option<String>, // Custom endpoint for S3-compatible providers (MinIO etc.)
    pub url_policy: UrlPolicy,
    pub signed_url_ttl_secs: u64,
    // Upload limits and allow-lists
    pub thumbnail_max_bytes: u64,
    pub thumbnail_content_types: Vec<String>,
    pub video_max_bytes: u64,
    pub video_content_types: Vec<String>,
    // External media tools
    pub ffmpeg_path: String,
    pub ffprobe_path: String,
    /// Upper bound for one ffprobe/ffmpeg invocation. `None` leaves the
    /// tools unbounded, which matches the historical behavior.
    pub media_tool_timeout_secs: Option<u64>,
    /// Directory for staged upload files. `None` uses the system temp dir.
    pub staging_dir: Option<PathBuf>,
    pub environment: String,
}

impl Config {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();

        let environment = env::var("ENVIRONMENT")
            .or_else(|_| env::var("APP_ENV"))
            .unwrap_or_else(|_| "development".to_string());

        let cors_origins = env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "*".to_string())
            .split(',')
            .map(|s| s.trim().to_string())
            .collect();

        let url_policy = env::var("URL_POLICY")
            .unwrap_or_else(|_| "signed".to_string())
            .parse::<UrlPolicy>()?;

        let thumbnail_content_types = env::var("THUMBNAIL_CONTENT_TYPES")
            .unwrap_or_else(|_| "image/jpeg,image/png".to_string())
            .split(',')
            .map(|s| s.trim().to_lowercase())
            .collect();

        let video_content_types = env::var("VIDEO_CONTENT_TYPES")
            .unwrap_or_else(|_| "video/mp4".to_string())
            .split(',')
            .map(|s| s.trim().to_lowercase())
            .collect();

        let config = Config {
            server_port: env::var("PORT")
                .unwrap_or_else(|_| SERVER_PORT.to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("PORT must be a valid number"))?,
            cors_origins,
            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| "sqlite:vodbay.db?mode=rwc".to_string()),
            db_max_connections: env::var("DB_MAX_CONNECTIONS")
                .unwrap_or_else(|_| DB_MAX_CONNECTIONS.to_string())
                .parse()
                .unwrap_or(DB_MAX_CONNECTIONS),
            jwt_secret: env::var("JWT_SECRET")
                .map_err(|_| anyhow::anyhow!("JWT_SECRET must be set for authentication"))?,
            jwt_expiry_hours: env::var("JWT_EXPIRY_HOURS")
                .unwrap_or_else(|_| JWT_EXPIRY_HOURS.to_string())
                .parse()
                .unwrap_or(JWT_EXPIRY_HOURS),
            s3_bucket: env::var("S3_BUCKET")
                .map_err(|_| anyhow::anyhow!("S3_BUCKET must be set for object storage"))?,
            s3_region: env::var("S3_REGION")
                .or_else(|_| env::var("AWS_REGION"))
                .unwrap_or_else(|_| "us-east-1".to_string()),
            s3_endpoint: env::var("S3_ENDPOINT").ok(),
            url_policy,
            signed_url_ttl_secs: env::var("SIGNED_URL_TTL_SECS")
                .unwrap_or_else(|_| SIGNED_URL_TTL_SECS.to_string())
                .parse()
                .unwrap_or(SIGNED_URL_TTL_SECS),
            thumbnail_max_bytes: env::var("THUMBNAIL_MAX_SIZE_MB")
                .unwrap_or_else(|_| THUMBNAIL_MAX_SIZE_MB.to_string())
                .parse::<u64>()
                .unwrap_or(THUMBNAIL_MAX_SIZE_MB)
                * 1024
                * 1024,
            thumbnail_content_types,
            video_max_bytes: env::var("VIDEO_MAX_SIZE_MB")
                .unwrap_or_else(|_| VIDEO_MAX_SIZE_MB.to_string())
                .parse::<u64>()
                .unwrap_or(VIDEO_MAX_SIZE_MB)
                * 1024
                * 1024,
            video_content_types,
            ffmpeg_path: env::var("FFMPEG_PATH").unwrap_or_else(|_| "ffmpeg".to_string()),
            ffprobe_path: env::var("FFPROBE_PATH").unwrap_or_else(|_| "ffprobe".to_string()),
            media_tool_timeout_secs: env::var("MEDIA_TOOL_TIMEOUT_SECS")
                .ok()
                .and_then(|s| s.parse().ok()),
            staging_dir: env::var("STAGING_DIR").ok().map(PathBuf::from),
            environment,
        };

        config.validate()?;
        Ok(config)
    }

    /// Check if the application is running in production mode
    pub fn is_production(&self) -> bool {
        let env = self.environment.to_lowercase();
        env == "production" || env == "prod"
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if self.jwt_secret.trim().is_empty() {
            return Err(anyhow::anyhow!("JWT_SECRET must not be empty"));
        }
        if self.jwt_secret.len() < 32 {
            tracing::warn!("JWT_SECRET is shorter than 32 bytes; use a longer secret");
        }
        if self.s3_bucket.trim().is_empty() {
            return Err(anyhow::anyhow!("S3_BUCKET must not be empty"));
        }
        if self.thumbnail_max_bytes == 0 || self.video_max_bytes == 0 {
            return Err(anyhow::anyhow!("Upload size limits must be non-zero"));
        }
        if self.signed_url_ttl_secs == 0 {
            return Err(anyhow::anyhow!("SIGNED_URL_TTL_SECS must be non-zero"));
        }
        if self.is_production() && self.cors_origins.iter().any(|o| o == "*") {
            return Err(anyhow::anyhow!(
                "CORS_ORIGINS cannot be '*' in production. Please specify explicit origins."
            ));
        }
        Ok(())
    }
}
