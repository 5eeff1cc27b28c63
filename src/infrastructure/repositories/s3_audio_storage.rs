use super::audio_storage::AudioStorage;
use async_trait::async_trait;
use aws_sdk_s3::{primitives::ByteStream, Client as S3Client};
use std::sync::Arc;

/// Amazon S3 implementation of the audio storage
pub struct S3AudioStorage {
    s3_client: Arc<S3Client>,
    bucket: String,
}

impl S3AudioStorage {
    pub fn new(s3_client: Arc<S3Client>, bucket: String) -> Self {
        Self { s3_client, bucket }
    }
}

#[async_trait]
impl AudioStorage for S3AudioStorage {
    async fn put(&self, key: &str, data: Vec<u8>, mime_type: &str) -> Result<(), String> {
        let size = data.len();

        self.s3_client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .content_type(mime_type)
            .body(ByteStream::from(data))
            .send()
            .await
            .map_err(|e| {
                tracing::error!(
                    bucket = %self.bucket,
                    key = key,
                    error = %e,
                    "S3 upload failed"
                );
                format!("S3 upload failed: {}", e)
            })?;

        tracing::info!(bucket = %self.bucket, key = key, size_bytes = size, "Audio stored");
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, String> {
        let output = match self
            .s3_client
            .get_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
        {
            Ok(output) => output,
            Err(e) => {
                let service_error = e.into_service_error();
                if service_error.is_no_such_key() {
                    tracing::warn!(bucket = %self.bucket, key = key, "Audio object not found");
                    return Ok(None);
                }
                return Err(format!("S3 download failed: {}", service_error));
            }
        };

        let bytes = output
            .body
            .collect()
            .await
            .map_err(|e| format!("Failed to read S3 object body: {}", e))?
            .into_bytes();

        Ok(Some(bytes.to_vec()))
    }
}
