use super::profile_repository::ProfileRepository;
use crate::domain::speaker::SpeakerProfile;
use crate::domain::speaker_id::SpeakerId;
use crate::error::{map_unique_violation, AppResult};
use crate::infrastructure::db::{check_connection, DbPool};
use async_trait::async_trait;
use std::sync::Arc;

const PROFILE_COLUMNS: &str =
    "uid, speaker_id, full_name, language, email, whatsapp_number, created_at";

pub struct PostgresProfileRepository {
    pool: Arc<DbPool>,
}

impl PostgresProfileRepository {
    pub fn new(pool: Arc<DbPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProfileRepository for PostgresProfileRepository {
    async fn ping(&self) -> AppResult<()> {
        check_connection(&self.pool).await?;
        Ok(())
    }

    async fn create(&self, profile: &SpeakerProfile) -> AppResult<()> {
        let pool = self.pool.as_ref();
        sqlx::query(
            r#"
            INSERT INTO speaker_profiles (uid, speaker_id, full_name, language, email, whatsapp_number, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(&profile.uid)
        .bind(profile.speaker_id)
        .bind(&profile.full_name)
        .bind(profile.language)
        .bind(&profile.email)
        .bind(&profile.whatsapp_number)
        .bind(profile.created_at)
        .execute(pool)
        .await
        .map_err(|e| map_unique_violation(e, "Speaker profile"))?;

        Ok(())
    }

    async fn find_by_uid(&self, uid: &str) -> AppResult<Option<SpeakerProfile>> {
        let pool = self.pool.as_ref();
        let profile = sqlx::query_as::<_, SpeakerProfile>(&format!(
            "SELECT {} FROM speaker_profiles WHERE uid = $1",
            PROFILE_COLUMNS
        ))
        .bind(uid)
        .fetch_optional(pool)
        .await?;

        Ok(profile)
    }

    async fn find_by_speaker_id(&self, speaker_id: SpeakerId) -> AppResult<Option<SpeakerProfile>> {
        let pool = self.pool.as_ref();
        let profile = sqlx::query_as::<_, SpeakerProfile>(&format!(
            "SELECT {} FROM speaker_profiles WHERE speaker_id = $1",
            PROFILE_COLUMNS
        ))
        .bind(speaker_id)
        .fetch_optional(pool)
        .await?;

        Ok(profile)
    }

    async fn list_all(&self) -> AppResult<Vec<SpeakerProfile>> {
        let pool = self.pool.as_ref();
        let profiles = sqlx::query_as::<_, SpeakerProfile>(&format!(
            "SELECT {} FROM speaker_profiles ORDER BY speaker_id",
            PROFILE_COLUMNS
        ))
        .fetch_all(pool)
        .await?;

        Ok(profiles)
    }
}
