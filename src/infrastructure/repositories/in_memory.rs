//! Process-local store implementations.
//!
//! Used for `STORAGE_BACKEND=memory` development runs and by tests. They
//! honour the same contracts as the PostgreSQL repositories, including the
//! atomicity of counter compare-and-set, but keep nothing across restarts.

use super::counter_repository::{CasOutcome, CounterRepository, CounterSnapshot};
use super::profile_repository::ProfileRepository;
use super::recording_repository::RecordingRepository;
use crate::domain::recording::{Recording, RecordingStatus};
use crate::domain::speaker::SpeakerProfile;
use crate::domain::speaker_id::SpeakerId;
use crate::error::{AppError, AppResult};
use async_trait::async_trait;
use parking_lot::{Mutex, RwLock};
use serde_json::Value as JsonValue;
use std::collections::HashMap;
use uuid::Uuid;

#[derive(Default)]
pub struct InMemoryCounterRepository {
    records: Mutex<HashMap<String, CounterSnapshot>>,
}

impl InMemoryCounterRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Overwrite a record regardless of its version
    #[cfg(test)]
    pub fn seed(&self, name: &str, value: JsonValue) {
        let mut records = self.records.lock();
        let version = records.get(name).map(|r| r.version + 1).unwrap_or(1);
        records.insert(name.to_string(), CounterSnapshot { value, version });
    }
}

#[async_trait]
impl CounterRepository for InMemoryCounterRepository {
    async fn read(&self, name: &str) -> AppResult<Option<CounterSnapshot>> {
        Ok(self.records.lock().get(name).cloned())
    }

    async fn compare_and_set(
        &self,
        name: &str,
        expected_version: Option<i64>,
        value: JsonValue,
    ) -> AppResult<CasOutcome> {
        let mut records = self.records.lock();
        let current_version = records.get(name).map(|r| r.version);

        if current_version != expected_version {
            return Ok(CasOutcome::Conflict);
        }

        let version = current_version.map(|v| v + 1).unwrap_or(1);
        records.insert(name.to_string(), CounterSnapshot { value, version });
        Ok(CasOutcome::Committed)
    }
}

#[derive(Default)]
pub struct InMemoryProfileRepository {
    profiles: RwLock<HashMap<String, SpeakerProfile>>,
}

impl InMemoryProfileRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProfileRepository for InMemoryProfileRepository {
    async fn ping(&self) -> AppResult<()> {
        Ok(())
    }

    async fn create(&self, profile: &SpeakerProfile) -> AppResult<()> {
        let mut profiles = self.profiles.write();

        let taken = profiles.contains_key(&profile.uid)
            || profiles.values().any(|p| p.speaker_id == profile.speaker_id);
        if taken {
            return Err(AppError::Conflict("Speaker profile already exists".to_string()));
        }

        profiles.insert(profile.uid.clone(), profile.clone());
        Ok(())
    }

    async fn find_by_uid(&self, uid: &str) -> AppResult<Option<SpeakerProfile>> {
        Ok(self.profiles.read().get(uid).cloned())
    }

    async fn find_by_speaker_id(&self, speaker_id: SpeakerId) -> AppResult<Option<SpeakerProfile>> {
        Ok(self
            .profiles
            .read()
            .values()
            .find(|p| p.speaker_id == speaker_id)
            .cloned())
    }

    async fn list_all(&self) -> AppResult<Vec<SpeakerProfile>> {
        let mut profiles: Vec<SpeakerProfile> = self.profiles.read().values().cloned().collect();
        profiles.sort_by_key(|p| p.speaker_id);
        Ok(profiles)
    }
}

#[derive(Default)]
pub struct InMemoryRecordingRepository {
    recordings: RwLock<Vec<Recording>>,
}

impl InMemoryRecordingRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RecordingRepository for InMemoryRecordingRepository {
    async fn create(&self, recording: &Recording) -> AppResult<()> {
        self.recordings.write().push(recording.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Recording>> {
        Ok(self.recordings.read().iter().find(|r| r.id == id).cloned())
    }

    async fn list(&self, speaker_id: Option<SpeakerId>) -> AppResult<Vec<Recording>> {
        let mut recordings: Vec<Recording> = self
            .recordings
            .read()
            .iter()
            .filter(|r| speaker_id.map_or(true, |id| r.speaker_id == id))
            .cloned()
            .collect();
        recordings.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(recordings)
    }

    async fn update_status(
        &self,
        id: Uuid,
        status: RecordingStatus,
    ) -> AppResult<Option<Recording>> {
        let mut recordings = self.recordings.write();
        Ok(recordings.iter_mut().find(|r| r.id == id).map(|r| {
            r.status = status;
            r.clone()
        }))
    }
}
