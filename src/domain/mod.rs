pub mod auth;
pub mod phrase;
pub mod recording;
pub mod registration;
pub mod speaker;
pub mod speaker_id;
