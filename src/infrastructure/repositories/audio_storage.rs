use async_trait::async_trait;

/// Repository for recorded audio payloads.
/// Abstracts the blob store holding the clips (S3 in production).
#[async_trait]
pub trait AudioStorage: Send + Sync {
    /// Store `data` under `key` with the given mime type, replacing any previous object
    async fn put(&self, key: &str, data: Vec<u8>, mime_type: &str) -> Result<(), String>;

    /// Fetch the payload stored under `key`, `None` if there is none
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, String>;
}
