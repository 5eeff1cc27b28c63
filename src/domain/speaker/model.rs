use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;
use std::str::FromStr;

use crate::domain::speaker_id::SpeakerId;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct SpeakerProfile {
    /// Opaque identity-provider handle the profile is keyed by
    pub uid: String,
    pub speaker_id: SpeakerId,
    pub full_name: String,
    pub language: Language,
    pub email: String,
    pub whatsapp_number: String,
    pub created_at: DateTime<Utc>,
}

/// Languages phrases can be generated and recorded in
#[derive(Debug, Clone, Copy, Serialize, Deserialize, sqlx::Type, PartialEq, Eq, Hash)]
#[sqlx(type_name = "text")]
#[sqlx(rename_all = "lowercase")]
pub enum Language {
    Sinhala,
    Tamil,
    English,
}

impl Language {
    /// Whether speakers may register with this as their primary language
    pub fn is_native_option(&self) -> bool {
        matches!(self, Language::Sinhala | Language::Tamil)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Language::Sinhala => "Sinhala",
            Language::Tamil => "Tamil",
            Language::English => "English",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "sinhala" => Ok(Language::Sinhala),
            "tamil" => Ok(Language::Tamil),
            "english" => Ok(Language::English),
            other => Err(format!("Unsupported language: {}", other)),
        }
    }
}
