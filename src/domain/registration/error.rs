use crate::domain::speaker_id::AllocationError;
use crate::error::AppError;
use crate::infrastructure::identity::IdentityError;

/// Message shown for any failure while drawing a speaker id
pub const ALLOCATION_FAILED_MESSAGE: &str = "Registration failed, please try again";

#[derive(Debug, thiserror::Error)]
pub enum RegistrationServiceError {
    #[error("invalid registration: {0}")]
    Invalid(String),
    #[error("email address is already registered")]
    EmailTaken,
    #[error(transparent)]
    Allocation(#[from] AllocationError),
    #[error("identity provider unavailable: {0}")]
    ProviderUnavailable(String),
    #[error("dependency error: {0}")]
    Dependency(String),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl From<IdentityError> for RegistrationServiceError {
    fn from(err: IdentityError) -> Self {
        match err {
            IdentityError::EmailAlreadyInUse => RegistrationServiceError::EmailTaken,
            IdentityError::Rejected(msg) => RegistrationServiceError::Invalid(msg),
            IdentityError::Unavailable(msg) => RegistrationServiceError::ProviderUnavailable(msg),
            IdentityError::InvalidCredentials => {
                RegistrationServiceError::Dependency(err.to_string())
            }
        }
    }
}

impl From<AppError> for RegistrationServiceError {
    fn from(err: AppError) -> Self {
        RegistrationServiceError::Dependency(err.to_string())
    }
}

impl From<RegistrationServiceError> for AppError {
    fn from(err: RegistrationServiceError) -> Self {
        match err {
            RegistrationServiceError::Invalid(msg) => AppError::BadRequest(msg),
            RegistrationServiceError::EmailTaken => {
                AppError::Conflict("Email address is already registered".to_string())
            }
            RegistrationServiceError::Allocation(e) => {
                tracing::warn!(error = %e, "Speaker id allocation failed during registration");
                AppError::ServiceUnavailable(ALLOCATION_FAILED_MESSAGE.to_string())
            }
            RegistrationServiceError::ProviderUnavailable(msg) => AppError::ExternalService(msg),
            RegistrationServiceError::Dependency(msg) => AppError::Internal(msg),
            RegistrationServiceError::Other(e) => AppError::Internal(e.to_string()),
        }
    }
}
