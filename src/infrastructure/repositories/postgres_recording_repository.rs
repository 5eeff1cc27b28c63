use super::recording_repository::RecordingRepository;
use crate::domain::recording::{Recording, RecordingStatus};
use crate::domain::speaker_id::SpeakerId;
use crate::error::AppResult;
use crate::infrastructure::db::DbPool;
use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

pub struct PostgresRecordingRepository {
    pool: Arc<DbPool>,
}

impl PostgresRecordingRepository {
    pub fn new(pool: Arc<DbPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RecordingRepository for PostgresRecordingRepository {
    async fn create(&self, recording: &Recording) -> AppResult<()> {
        let pool = self.pool.as_ref();
        sqlx::query(
            r#"
            INSERT INTO recordings (
                id, speaker_id, speaker_name, native_language, recorded_language,
                phrase_index, phrase_text, file_name, blob_key, mime_type,
                size_bytes, status, created_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
            "#,
        )
        .bind(recording.id)
        .bind(recording.speaker_id)
        .bind(&recording.speaker_name)
        .bind(recording.native_language)
        .bind(recording.recorded_language)
        .bind(recording.phrase_index)
        .bind(&recording.phrase_text)
        .bind(&recording.file_name)
        .bind(&recording.blob_key)
        .bind(&recording.mime_type)
        .bind(recording.size_bytes)
        .bind(recording.status)
        .bind(recording.created_at)
        .execute(pool)
        .await?;

        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Recording>> {
        let pool = self.pool.as_ref();
        let recording = sqlx::query_as::<_, Recording>("SELECT * FROM recordings WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await?;

        Ok(recording)
    }

    async fn list(&self, speaker_id: Option<SpeakerId>) -> AppResult<Vec<Recording>> {
        let pool = self.pool.as_ref();
        let recordings = sqlx::query_as::<_, Recording>(
            r#"
            SELECT *
            FROM recordings
            WHERE ($1::BIGINT IS NULL OR speaker_id = $1)
            ORDER BY created_at DESC
            "#,
        )
        .bind(speaker_id)
        .fetch_all(pool)
        .await?;

        Ok(recordings)
    }

    async fn update_status(
        &self,
        id: Uuid,
        status: RecordingStatus,
    ) -> AppResult<Option<Recording>> {
        let pool = self.pool.as_ref();
        let recording = sqlx::query_as::<_, Recording>(
            r#"
            UPDATE recordings
            SET status = $1
            WHERE id = $2
            RETURNING *
            "#,
        )
        .bind(status)
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(recording)
    }
}
