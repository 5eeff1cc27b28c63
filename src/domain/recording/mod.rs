pub mod dto;
pub mod error;
pub mod model;
pub mod service;

pub use dto::{RecordingListQuery, RecordingResponse, UpdateRecordingStatusRequest};
pub use error::RecordingServiceError;
pub use model::{recording_file_name, Recording, RecordingStatus};
pub use service::{RecordingService, RecordingUpload};
