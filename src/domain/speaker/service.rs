use super::error::SpeakerServiceError;
use super::SpeakerProfile;
use crate::domain::speaker_id::SpeakerId;
use crate::infrastructure::repositories::ProfileRepository;
use std::sync::Arc;

pub struct SpeakerService {
    profile_repo: Arc<dyn ProfileRepository>,
}

impl SpeakerService {
    pub fn new(profile_repo: Arc<dyn ProfileRepository>) -> Self {
        Self { profile_repo }
    }

    /// Profile owned by an identity-provider handle
    pub async fn get_by_uid(&self, uid: &str) -> Result<SpeakerProfile, SpeakerServiceError> {
        self.profile_repo
            .find_by_uid(uid)
            .await
            .map_err(|e| SpeakerServiceError::Dependency(e.to_string()))?
            .ok_or(SpeakerServiceError::NotFound)
    }

    /// Profile by its human-readable identifier; malformed ids are simply not found
    pub async fn get_by_speaker_id(&self, raw: &str) -> Result<SpeakerProfile, SpeakerServiceError> {
        let speaker_id: SpeakerId = raw.parse().map_err(|_| SpeakerServiceError::NotFound)?;

        self.profile_repo
            .find_by_speaker_id(speaker_id)
            .await
            .map_err(|e| SpeakerServiceError::Dependency(e.to_string()))?
            .ok_or(SpeakerServiceError::NotFound)
    }

    /// All registered speakers ordered by speaker id
    pub async fn list(&self) -> Result<Vec<SpeakerProfile>, SpeakerServiceError> {
        let mut profiles = self
            .profile_repo
            .list_all()
            .await
            .map_err(|e| SpeakerServiceError::Dependency(e.to_string()))?;
        profiles.sort_by_key(|p| p.speaker_id);

        tracing::debug!(count = profiles.len(), "Fetched registered speakers");
        Ok(profiles)
    }
}
