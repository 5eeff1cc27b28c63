use crate::error::AppError;

#[derive(Debug, thiserror::Error)]
pub enum SpeakerServiceError {
    #[error("dependency error: {0}")]
    Dependency(String),
    #[error("speaker not found")]
    NotFound,
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl From<AppError> for SpeakerServiceError {
    fn from(err: AppError) -> Self {
        match err {
            AppError::NotFound(_) => SpeakerServiceError::NotFound,
            _ => SpeakerServiceError::Dependency(err.to_string()),
        }
    }
}

impl From<SpeakerServiceError> for AppError {
    fn from(err: SpeakerServiceError) -> Self {
        match err {
            SpeakerServiceError::NotFound => AppError::NotFound("Speaker not found".to_string()),
            SpeakerServiceError::Dependency(msg) => AppError::Internal(msg),
            SpeakerServiceError::Other(e) => AppError::Internal(e.to_string()),
        }
    }
}
