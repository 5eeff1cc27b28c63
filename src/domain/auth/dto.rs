use serde::{Deserialize, Serialize};

use crate::domain::speaker_id::SpeakerId;

#[derive(Debug, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Session token handed out after registration or login
#[derive(Debug, Serialize, Deserialize)]
pub struct TokenResponse {
    pub token: String,
    pub expires_in: i64,
    pub speaker_id: SpeakerId,
}
