use crate::error::AppError;

#[derive(Debug, thiserror::Error)]
pub enum RecordingServiceError {
    #[error("invalid recording: {0}")]
    Invalid(String),
    #[error("audio exceeds the {limit} byte upload limit")]
    TooLarge { limit: usize },
    #[error("recording not found")]
    NotFound,
    #[error("audio storage error: {0}")]
    Storage(String),
    #[error("dependency error: {0}")]
    Dependency(String),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl From<AppError> for RecordingServiceError {
    fn from(err: AppError) -> Self {
        match err {
            AppError::NotFound(_) => RecordingServiceError::NotFound,
            _ => RecordingServiceError::Dependency(err.to_string()),
        }
    }
}

impl From<RecordingServiceError> for AppError {
    fn from(err: RecordingServiceError) -> Self {
        match err {
            RecordingServiceError::Invalid(msg) => AppError::BadRequest(msg),
            RecordingServiceError::TooLarge { .. } => AppError::PayloadTooLarge(err.to_string()),
            RecordingServiceError::NotFound => AppError::NotFound("Recording not found".to_string()),
            RecordingServiceError::Storage(msg) => AppError::ExternalService(msg),
            RecordingServiceError::Dependency(msg) => AppError::Internal(msg),
            RecordingServiceError::Other(e) => AppError::Internal(e.to_string()),
        }
    }
}
