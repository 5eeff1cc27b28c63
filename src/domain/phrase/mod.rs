pub mod error;
pub mod service;

pub use error::PhraseServiceError;
pub use service::PhraseService;

use serde::{Deserialize, Serialize};

use crate::domain::speaker::Language;

#[derive(Debug, Deserialize)]
pub struct PhraseQuery {
    /// Defaults to the speaker's native language
    pub language: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PhraseResponse {
    pub language: Language,
    pub phrase: String,
}
