pub mod dto;
pub mod error;
pub mod service;
pub mod validation;

pub use dto::{RegisterRequest, RegisterResponse};
pub use error::RegistrationServiceError;
pub use service::RegistrationService;
pub use validation::{validate_registration, ValidatedRegistration};
