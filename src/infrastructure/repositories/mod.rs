pub mod audio_storage;
pub mod counter_repository;
pub mod in_memory;
pub mod openai_phrase_repository;
pub mod phrase_repository;
pub mod postgres_counter_repository;
pub mod postgres_profile_repository;
pub mod postgres_recording_repository;
pub mod profile_repository;
pub mod recording_repository;
pub mod s3_audio_storage;

pub use audio_storage::AudioStorage;
pub use counter_repository::{CasOutcome, CounterRepository, CounterSnapshot};
pub use in_memory::{InMemoryCounterRepository, InMemoryProfileRepository, InMemoryRecordingRepository};
pub use openai_phrase_repository::OpenAiPhraseRepository;
pub use phrase_repository::PhraseRepository;
pub use postgres_counter_repository::PostgresCounterRepository;
pub use postgres_profile_repository::PostgresProfileRepository;
pub use postgres_recording_repository::PostgresRecordingRepository;
pub use profile_repository::ProfileRepository;
pub use recording_repository::RecordingRepository;
pub use s3_audio_storage::S3AudioStorage;
