use crate::error::AppError;

#[derive(Debug, thiserror::Error)]
pub enum PhraseServiceError {
    #[error("phrase generator error: {0}")]
    Generator(String),
    #[error("phrase generator returned an empty phrase")]
    Empty,
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl From<PhraseServiceError> for AppError {
    fn from(err: PhraseServiceError) -> Self {
        match err {
            PhraseServiceError::Generator(msg) => AppError::ExternalService(msg),
            PhraseServiceError::Empty => AppError::ExternalService(err.to_string()),
            PhraseServiceError::Other(e) => AppError::Internal(e.to_string()),
        }
    }
}
