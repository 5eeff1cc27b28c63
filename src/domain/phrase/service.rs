use super::error::PhraseServiceError;
use crate::domain::speaker::Language;
use crate::infrastructure::repositories::PhraseRepository;
use std::sync::Arc;

const QUOTES: &[char] = &['"', '\'', '“', '”', '‘', '’', '«', '»'];

pub struct PhraseService {
    phrase_repo: Arc<dyn PhraseRepository>,
}

impl PhraseService {
    pub fn new(phrase_repo: Arc<dyn PhraseRepository>) -> Self {
        Self { phrase_repo }
    }

    /// One sentence to read aloud in the given language
    pub async fn generate(&self, language: Language) -> Result<String, PhraseServiceError> {
        let raw = self
            .phrase_repo
            .generate(language)
            .await
            .map_err(PhraseServiceError::Generator)?;

        let phrase = clean_phrase(&raw);
        if phrase.is_empty() {
            tracing::warn!(language = %language, "Phrase generator returned nothing usable");
            return Err(PhraseServiceError::Empty);
        }

        tracing::debug!(language = %language, chars = phrase.chars().count(), "Generated phrase");
        Ok(phrase)
    }
}

/// Trim whitespace and any quotes wrapped around the sentence
fn clean_phrase(raw: &str) -> String {
    raw.trim().trim_matches(QUOTES).trim().to_string()
}
