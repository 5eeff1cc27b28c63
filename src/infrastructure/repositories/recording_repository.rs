use crate::domain::recording::{Recording, RecordingStatus};
use crate::domain::speaker_id::SpeakerId;
use crate::error::AppResult;
use async_trait::async_trait;
use uuid::Uuid;

/// Metadata log of uploaded recordings
#[async_trait]
pub trait RecordingRepository: Send + Sync {
    async fn create(&self, recording: &Recording) -> AppResult<()>;

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Recording>>;

    /// Recordings newest first, optionally restricted to one speaker
    async fn list(&self, speaker_id: Option<SpeakerId>) -> AppResult<Vec<Recording>>;

    /// Returns the updated recording, `None` if it does not exist
    async fn update_status(&self, id: Uuid, status: RecordingStatus)
        -> AppResult<Option<Recording>>;
}
