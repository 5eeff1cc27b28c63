pub mod admin;
pub mod auth;
pub mod health;
pub mod phrase;
pub mod recording;
pub mod speaker;
