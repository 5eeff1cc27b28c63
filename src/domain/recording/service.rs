use super::error::RecordingServiceError;
use super::{recording_file_name, Recording, RecordingStatus};
use crate::domain::speaker::{Language, SpeakerProfile};
use crate::domain::speaker_id::SpeakerId;
use crate::infrastructure::repositories::{AudioStorage, RecordingRepository};
use chrono::Utc;
use std::sync::Arc;
use uuid::Uuid;

const DEFAULT_MIME_TYPE: &str = "audio/webm";

/// Raw multipart fields of an upload; everything is checked by `submit`
#[derive(Debug, Default)]
pub struct RecordingUpload {
    pub audio: Option<Vec<u8>>,
    pub original_name: Option<String>,
    pub mime_type: Option<String>,
    pub language: Option<String>,
    /// 0-based position within the recording session
    pub phrase_index: Option<String>,
    pub phrase_text: Option<String>,
}

pub struct RecordingService {
    recording_repo: Arc<dyn RecordingRepository>,
    audio_storage: Arc<dyn AudioStorage>,
    key_prefix: String,
    max_upload_bytes: usize,
}

impl RecordingService {
    pub fn new(
        recording_repo: Arc<dyn RecordingRepository>,
        audio_storage: Arc<dyn AudioStorage>,
        key_prefix: String,
        max_upload_bytes: usize,
    ) -> Self {
        Self {
            recording_repo,
            audio_storage,
            key_prefix,
            max_upload_bytes,
        }
    }

    /// Store the audio blob, then log its metadata as pending review
    pub async fn submit(
        &self,
        speaker: &SpeakerProfile,
        upload: RecordingUpload,
    ) -> Result<Recording, RecordingServiceError> {
        let audio = upload
            .audio
            .filter(|a| !a.is_empty())
            .ok_or_else(|| RecordingServiceError::Invalid("Audio file is required".to_string()))?;
        if audio.len() > self.max_upload_bytes {
            return Err(RecordingServiceError::TooLarge {
                limit: self.max_upload_bytes,
            });
        }

        let language: Language = upload
            .language
            .as_deref()
            .ok_or_else(|| RecordingServiceError::Invalid("Language is required".to_string()))?
            .parse()
            .map_err(RecordingServiceError::Invalid)?;

        let phrase_index: u32 = upload
            .phrase_index
            .as_deref()
            .map(str::trim)
            .ok_or_else(|| RecordingServiceError::Invalid("Phrase index is required".to_string()))?
            .parse::<u32>()
            .ok()
            .filter(|i| *i < i32::MAX as u32)
            .ok_or_else(|| {
                RecordingServiceError::Invalid("Phrase index must be a non-negative integer".to_string())
            })?;

        let phrase_text = upload
            .phrase_text
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .ok_or_else(|| RecordingServiceError::Invalid("Phrase text is required".to_string()))?;

        let mime_type = upload
            .mime_type
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| DEFAULT_MIME_TYPE.to_string());

        let created_at = Utc::now();
        let file_name = recording_file_name(
            speaker.speaker_id,
            language,
            phrase_index,
            created_at,
            upload.original_name.as_deref(),
        );
        let blob_key = format!("{}{}", self.key_prefix, file_name);
        let size_bytes = audio.len() as i64;

        self.audio_storage
            .put(&blob_key, audio, &mime_type)
            .await
            .map_err(RecordingServiceError::Storage)?;

        let recording = Recording {
            id: Uuid::new_v4(),
            speaker_id: speaker.speaker_id,
            speaker_name: speaker.full_name.clone(),
            native_language: speaker.language,
            recorded_language: language,
            phrase_index: phrase_index as i32 + 1,
            phrase_text,
            file_name,
            blob_key,
            mime_type,
            size_bytes,
            status: RecordingStatus::Pending,
            created_at,
        };
        self.recording_repo.create(&recording).await?;

        tracing::info!(
            recording_id = %recording.id,
            speaker_id = %recording.speaker_id,
            file_name = %recording.file_name,
            size_bytes = recording.size_bytes,
            "Recording stored"
        );
        Ok(recording)
    }

    /// Recordings newest first, optionally for a single speaker
    pub async fn list(&self, speaker_id: Option<&str>) -> Result<Vec<Recording>, RecordingServiceError> {
        let speaker_id = speaker_id
            .map(|raw| raw.parse::<SpeakerId>())
            .transpose()
            .map_err(|e| RecordingServiceError::Invalid(e.to_string()))?;

        Ok(self.recording_repo.list(speaker_id).await?)
    }

    /// Metadata and audio bytes of a recording
    pub async fn fetch_audio(&self, id: Uuid) -> Result<(Recording, Vec<u8>), RecordingServiceError> {
        let recording = self
            .recording_repo
            .find_by_id(id)
            .await?
            .ok_or(RecordingServiceError::NotFound)?;

        let audio = self
            .audio_storage
            .get(&recording.blob_key)
            .await
            .map_err(RecordingServiceError::Storage)?
            .ok_or_else(|| {
                tracing::warn!(recording_id = %id, blob_key = %recording.blob_key, "Recording blob missing");
                RecordingServiceError::NotFound
            })?;

        Ok((recording, audio))
    }

    pub async fn update_status(&self, id: Uuid, status: &str) -> Result<Recording, RecordingServiceError> {
        let status: RecordingStatus = status.trim().parse().map_err(RecordingServiceError::Invalid)?;

        let recording = self
            .recording_repo
            .update_status(id, status)
            .await?
            .ok_or(RecordingServiceError::NotFound)?;

        tracing::info!(recording_id = %id, status = %status, "Recording reviewed");
        Ok(recording)
    }
}
