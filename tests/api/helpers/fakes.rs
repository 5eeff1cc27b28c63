use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::HashMap;
use voiceid_backend::domain::speaker::Language;
use voiceid_backend::infrastructure::repositories::{AudioStorage, PhraseRepository};

/// Blob store backed by a map
#[derive(Default)]
pub struct MemoryAudioStorage {
    blobs: Mutex<HashMap<String, (Vec<u8>, String)>>,
}

impl MemoryAudioStorage {
    pub fn keys(&self) -> Vec<String> {
        self.blobs.lock().keys().cloned().collect()
    }
}

#[async_trait]
impl AudioStorage for MemoryAudioStorage {
    async fn put(&self, key: &str, data: Vec<u8>, mime_type: &str) -> Result<(), String> {
        self.blobs
            .lock()
            .insert(key.to_string(), (data, mime_type.to_string()));
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, String> {
        Ok(self.blobs.lock().get(key).map(|(data, _)| data.clone()))
    }
}

/// Phrase generator answering with a fixed sentence per language
pub struct CannedPhraseRepository;

#[async_trait]
impl PhraseRepository for CannedPhraseRepository {
    async fn generate(&self, language: Language) -> Result<String, String> {
        Ok(format!("\"A short {} sentence to read aloud.\"\n", language))
    }
}
