pub mod allocator;
pub mod error;
pub mod model;

pub use allocator::{AllocatorSettings, CorruptCounterPolicy, SpeakerIdAllocator};
pub use error::AllocationError;
pub use model::{InvalidSpeakerId, SpeakerId, SPEAKER_ID_COUNTER};
