use crate::domain::speaker::Language;
use async_trait::async_trait;

/// Repository for reading-phrase generation.
/// Abstracts the text generation provider.
#[async_trait]
pub trait PhraseRepository: Send + Sync {
    /// Generate one short, natural sentence in `language`
    ///
    /// # Errors
    /// Returns error if the provider is unavailable or returns nothing usable
    async fn generate(&self, language: Language) -> Result<String, String>;
}
