use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::domain::speaker::Language;
use crate::domain::speaker_id::SpeakerId;

const DEFAULT_EXTENSION: &str = "webm";

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Recording {
    pub id: Uuid,
    pub speaker_id: SpeakerId,
    pub speaker_name: String,
    pub native_language: Language,
    pub recorded_language: Language,
    /// 1-based position of the phrase within the recording session
    pub phrase_index: i32,
    pub phrase_text: String,
    pub file_name: String,
    pub blob_key: String,
    pub mime_type: String,
    pub size_bytes: i64,
    pub status: RecordingStatus,
    pub created_at: DateTime<Utc>,
}

/// Review state of an uploaded recording
#[derive(Debug, Clone, Copy, Serialize, Deserialize, sqlx::Type, PartialEq, Eq)]
#[sqlx(type_name = "text")]
#[sqlx(rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum RecordingStatus {
    Pending,
    Verified,
    Rejected,
}

impl fmt::Display for RecordingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordingStatus::Pending => write!(f, "pending"),
            RecordingStatus::Verified => write!(f, "verified"),
            RecordingStatus::Rejected => write!(f, "rejected"),
        }
    }
}

impl FromStr for RecordingStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(RecordingStatus::Pending),
            "verified" => Ok(RecordingStatus::Verified),
            "rejected" => Ok(RecordingStatus::Rejected),
            other => Err(format!("Invalid status: {}", other)),
        }
    }
}

/// Build the stored file name for a recording.
///
/// Shape: `{speakerId}_{language}_phrase{n}_{timestamp}.{ext}` where `n` is
/// 1-based and the timestamp is RFC 3339 with `:` and `.` replaced by `-`.
pub fn recording_file_name(
    speaker_id: SpeakerId,
    language: Language,
    phrase_index: u32,
    recorded_at: DateTime<Utc>,
    original_name: Option<&str>,
) -> String {
    let timestamp = recorded_at
        .to_rfc3339_opts(SecondsFormat::Millis, true)
        .replace(&[':', '.'][..], "-");

    format!(
        "{}_{}_phrase{}_{}.{}",
        speaker_id,
        language.as_str().to_lowercase(),
        phrase_index + 1,
        timestamp,
        file_extension(original_name)
    )
}

fn file_extension(original_name: Option<&str>) -> String {
    original_name
        .and_then(|name| name.rsplit_once('.'))
        .map(|(_, ext)| ext)
        .filter(|ext| !ext.is_empty() && ext.chars().all(|c| c.is_ascii_alphanumeric()))
        .map(|ext| ext.to_lowercase())
        .unwrap_or_else(|| DEFAULT_EXTENSION.to_string())
}
