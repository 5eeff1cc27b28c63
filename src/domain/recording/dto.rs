use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::model::{Recording, RecordingStatus};
use crate::domain::speaker::Language;
use crate::domain::speaker_id::SpeakerId;

/// Recording metadata as exposed over HTTP; the blob key stays internal
#[derive(Debug, Serialize, Deserialize)]
pub struct RecordingResponse {
    pub id: Uuid,
    pub speaker_id: SpeakerId,
    pub speaker_name: String,
    pub native_language: Language,
    pub recorded_language: Language,
    pub phrase_index: i32,
    pub phrase_text: String,
    pub file_name: String,
    pub mime_type: String,
    pub size_bytes: i64,
    pub status: RecordingStatus,
    pub created_at: DateTime<Utc>,
}

impl From<Recording> for RecordingResponse {
    fn from(r: Recording) -> Self {
        Self {
            id: r.id,
            speaker_id: r.speaker_id,
            speaker_name: r.speaker_name,
            native_language: r.native_language,
            recorded_language: r.recorded_language,
            phrase_index: r.phrase_index,
            phrase_text: r.phrase_text,
            file_name: r.file_name,
            mime_type: r.mime_type,
            size_bytes: r.size_bytes,
            status: r.status,
            created_at: r.created_at,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct RecordingListQuery {
    pub speaker_id: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UpdateRecordingStatusRequest {
    pub status: String,
}
