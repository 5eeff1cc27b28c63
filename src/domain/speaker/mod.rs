pub mod error;
pub mod model;
pub mod service;

pub use error::SpeakerServiceError;
pub use model::{Language, SpeakerProfile};
pub use service::SpeakerService;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::speaker_id::SpeakerId;

/// Public view of a speaker profile
#[derive(Debug, Serialize, Deserialize)]
pub struct SpeakerResponse {
    pub speaker_id: SpeakerId,
    pub full_name: String,
    pub language: Language,
    pub email: String,
    pub whatsapp_number: String,
    pub created_at: DateTime<Utc>,
}

impl From<SpeakerProfile> for SpeakerResponse {
    fn from(profile: SpeakerProfile) -> Self {
        Self {
            speaker_id: profile.speaker_id,
            full_name: profile.full_name,
            language: profile.language,
            email: profile.email,
            whatsapp_number: profile.whatsapp_number,
            created_at: profile.created_at,
        }
    }
}
