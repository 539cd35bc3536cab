use chrono::{DateTime, Utc};
use sqlx::{FromRow, SqlitePool};
use uuid::Uuid;

use vodbay_core::models::{MediaLocator, Video};
use vodbay_core::AppError;

/// Row shape as persisted. Ids and locators are TEXT; locators carry the
/// string form of [`MediaLocator`].
#[derive(Debug, FromRow)]
struct VideoRow {
    id: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    title: String,
    description: Option<String>,
    user_id: String,
    thumbnail_url: Option<String>,
    video_url: Option<String>,
}

impl VideoRow {
    fn into_video(self) -> Result<Video, AppError> {
        Ok(Video {
            id: Uuid::parse_str(&self.id)?,
            created_at: self.created_at,
            updated_at: self.updated_at,
            title: self.title,
            description: self.description,
            user_id: Uuid::parse_str(&self.user_id)?,
            thumbnail_url: self.thumbnail_url.as_deref().map(MediaLocator::parse),
            video_url: self.video_url.as_deref().map(MediaLocator::parse),
        })
    }
}

/// Video record repository
#[derive(Clone)]
pub struct VideoRepository {
    pool: SqlitePool,
}

impl VideoRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    #[tracing::instrument(skip(self, video), fields(db.table = "videos", db.operation = "insert", db.record_id = %video.id))]
    pub async fn create(&self, video: &Video) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO videos (id, created_at, updated_at, title, description, user_id, thumbnail_url, video_url)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(video.id.to_string())
        .bind(video.created_at)
        .bind(video.updated_at)
        .bind(&video.title)
        .bind(&video.description)
        .bind(video.user_id.to_string())
        .bind(video.thumbnail_url.as_ref().map(|l| l.as_record_string()))
        .bind(video.video_url.as_ref().map(|l| l.as_record_string()))
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    #[tracing::instrument(skip(self), fields(db.table = "videos", db.operation = "select", db.record_id = %id))]
    pub async fn get(&self, id: Uuid) -> Result<Option<Video>, AppError> {
        let row: Option<VideoRow> = sqlx::query_as(
            r#"
            SELECT id, created_at, updated_at, title, description, user_id, thumbnail_url, video_url
            FROM videos
            WHERE id = ?
            "#,
        )
        .bind(id.to_string())
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(row) => Ok(Some(row.into_video()?)),
            None => Ok(None),
        }
    }

    #[tracing::instrument(skip(self), fields(db.table = "videos", db.operation = "select", user_id = %user_id))]
    pub async fn list_by_user(&self, user_id: Uuid) -> Result<Vec<Video>, AppError> {
        let rows: Vec<VideoRow> = sqlx::query_as(
            r#"
            SELECT id, created_at, updated_at, title, description, user_id, thumbnail_url, video_url
            FROM videos
            WHERE user_id = ?
            ORDER BY created_at DESC
            "#,
        )
        .bind(user_id.to_string())
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(VideoRow::into_video).collect()
    }

    /// Points the record's thumbnail at `locator` and returns the updated
    /// record. Overwrites any previous locator.
    #[tracing::instrument(skip(self, locator), fields(db.table = "videos", db.operation = "update", db.record_id = %id))]
    pub async fn set_thumbnail_locator(
        &self,
        id: Uuid,
        locator: &MediaLocator,
    ) -> Result<Video, AppError> {
        let result = sqlx::query(
            r#"
            UPDATE videos
            SET thumbnail_url = ?, updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(locator.as_record_string())
        .bind(Utc::now())
        .bind(id.to_string())
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::RecordUpdate(format!("Failed to update thumbnail locator: {}", e)))?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Video not found".to_string()));
        }

        self.get(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Video not found".to_string()))
    }

    /// Points the record's video at `locator` and returns the updated record.
    #[tracing::instrument(skip(self, locator), fields(db.table = "videos", db.operation = "update", db.record_id = %id))]
    pub async fn set_video_locator(
        &self,
        id: Uuid,
        locator: &MediaLocator,
    ) -> Result<Video, AppError> {
        let result = sqlx::query(
            r#"
            UPDATE videos
            SET video_url = ?, updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(locator.as_record_string())
        .bind(Utc::now())
        .bind(id.to_string())
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::RecordUpdate(format!("Failed to update video locator: {}", e)))?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Video not found".to_string()));
        }

        self.get(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Video not found".to_string()))
    }
}
