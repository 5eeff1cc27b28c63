use crate::domain::speaker::SpeakerProfile;
use crate::domain::speaker_id::SpeakerId;
use crate::error::AppResult;
use async_trait::async_trait;

/// Repository for speaker profiles, keyed by identity-provider handle.
///
/// Profiles are written once at registration and never updated.
#[async_trait]
pub trait ProfileRepository: Send + Sync {
    /// Cheap reachability check used by the readiness probe
    async fn ping(&self) -> AppResult<()>;

    /// Store a new profile.
    ///
    /// # Errors
    /// `AppError::Conflict` if the uid or speaker id is already taken
    async fn create(&self, profile: &SpeakerProfile) -> AppResult<()>;

    async fn find_by_uid(&self, uid: &str) -> AppResult<Option<SpeakerProfile>>;

    async fn find_by_speaker_id(&self, speaker_id: SpeakerId) -> AppResult<Option<SpeakerProfile>>;

    async fn list_all(&self) -> AppResult<Vec<SpeakerProfile>>;
}
