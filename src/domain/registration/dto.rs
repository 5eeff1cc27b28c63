use serde::{Deserialize, Serialize};

use crate::domain::speaker::SpeakerResponse;
use crate::domain::speaker_id::SpeakerId;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub full_name: String,
    pub email: String,
    pub password: String,
    pub whatsapp_number: String,
    /// Native language, `Sinhala` or `Tamil`
    pub language: String,
}

/// Returned only once the whole registration has succeeded
#[derive(Debug, Serialize, Deserialize)]
pub struct RegisterResponse {
    pub token: String,
    pub expires_in: i64,
    pub speaker_id: SpeakerId,
    pub speaker: SpeakerResponse,
}
