use crate::error::AppError;
use crate::infrastructure::identity::IdentityError;

#[derive(Debug, thiserror::Error)]
pub enum AuthServiceError {
    #[error("dependency error: {0}")]
    Dependency(String),
    #[error("invalid email or password")]
    InvalidCredentials,
    #[error("identity provider unavailable: {0}")]
    ProviderUnavailable(String),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl From<AppError> for AuthServiceError {
    fn from(err: AppError) -> Self {
        match err {
            AppError::Unauthorized(_) => AuthServiceError::InvalidCredentials,
            _ => AuthServiceError::Dependency(err.to_string()),
        }
    }
}

impl From<IdentityError> for AuthServiceError {
    fn from(err: IdentityError) -> Self {
        match err {
            IdentityError::InvalidCredentials => AuthServiceError::InvalidCredentials,
            IdentityError::Unavailable(msg) => AuthServiceError::ProviderUnavailable(msg),
            other => AuthServiceError::Dependency(other.to_string()),
        }
    }
}

impl From<AuthServiceError> for AppError {
    fn from(err: AuthServiceError) -> Self {
        match err {
            AuthServiceError::InvalidCredentials => {
                AppError::Unauthorized("Invalid email or password".to_string())
            }
            AuthServiceError::ProviderUnavailable(msg) => AppError::ExternalService(msg),
            AuthServiceError::Dependency(msg) => AppError::Internal(msg),
            AuthServiceError::Other(e) => AppError::Internal(e.to_string()),
        }
    }
}
