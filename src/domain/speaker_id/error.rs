use crate::error::AppError;

#[derive(Debug, thiserror::Error)]
pub enum AllocationError {
    #[error("speaker id store unavailable: {0}")]
    StoreUnavailable(String),
    #[error("speaker id allocation gave up after {attempts} conflicting attempts")]
    RetriesExhausted { attempts: u32 },
    #[error("speaker id counter is corrupt: {0}")]
    CorruptCounterState(String),
}

impl From<AppError> for AllocationError {
    fn from(err: AppError) -> Self {
        AllocationError::StoreUnavailable(err.to_string())
    }
}

impl From<AllocationError> for AppError {
    fn from(err: AllocationError) -> Self {
        match err {
            AllocationError::StoreUnavailable(_) | AllocationError::RetriesExhausted { .. } => {
                AppError::ServiceUnavailable(err.to_string())
            }
            AllocationError::CorruptCounterState(msg) => AppError::Internal(msg),
        }
    }
}
