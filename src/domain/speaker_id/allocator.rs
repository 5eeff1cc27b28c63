use super::error::AllocationError;
use super::model::{counter_document, decode_last_issued, SpeakerId, SPEAKER_ID_COUNTER};
use crate::infrastructure::repositories::{CasOutcome, CounterRepository, CounterSnapshot};
use rand::Rng;
use serde::Deserialize;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// What to do when the stored counter is unreadable or below the floor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CorruptCounterPolicy {
    /// Continue from the floor as if the record were fresh
    Clamp,
    /// Refuse to allocate until an operator repairs the record
    Fail,
}

#[derive(Debug, Clone)]
pub struct AllocatorSettings {
    /// First number ever handed out
    pub starting_value: i64,
    /// Upper bound on read-compute-write attempts per allocation
    pub max_attempts: u32,
    pub backoff_base: Duration,
    pub backoff_max: Duration,
    pub corrupt_policy: CorruptCounterPolicy,
}

impl Default for AllocatorSettings {
    fn default() -> Self {
        Self {
            starting_value: 90000,
            max_attempts: 8,
            backoff_base: Duration::from_millis(10),
            backoff_max: Duration::from_millis(500),
            corrupt_policy: CorruptCounterPolicy::Clamp,
        }
    }
}

impl AllocatorSettings {
    /// Effective last value of a counter that was never written
    fn floor(&self) -> i64 {
        self.starting_value - 1
    }
}

/// Issues unique, increasing speaker identifiers from a shared counter record.
///
/// Each call runs an optimistic read-increment-conditional-write loop against
/// the counter store; the store is the only synchronization point, so any
/// number of allocators across processes may run concurrently. Nothing about
/// the counter is remembered between calls.
pub struct SpeakerIdAllocator {
    counters: Arc<dyn CounterRepository>,
    settings: AllocatorSettings,
    corrupt_state_reported: AtomicBool,
}

impl SpeakerIdAllocator {
    pub fn new(counters: Arc<dyn CounterRepository>, settings: AllocatorSettings) -> Self {
        Self {
            counters,
            settings,
            corrupt_state_reported: AtomicBool::new(false),
        }
    }

    /// Allocate the next speaker identifier.
    ///
    /// Identifiers consumed by callers that later fail are never handed out
    /// again; the sequence may have gaps but never duplicates.
    pub async fn allocate_next_id(&self) -> Result<SpeakerId, AllocationError> {
        let max_attempts = self.settings.max_attempts;

        for attempt in 1..=max_attempts {
            let snapshot = self.counters.read(SPEAKER_ID_COUNTER).await?;
            let last = self.effective_last_value(snapshot.as_ref())?;
            let next = last.checked_add(1).ok_or_else(|| {
                AllocationError::CorruptCounterState(format!("counter overflow at {}", last))
            })?;

            let expected_version = snapshot.as_ref().map(|s| s.version);
            let outcome = self
                .counters
                .compare_and_set(SPEAKER_ID_COUNTER, expected_version, counter_document(next))
                .await?;

            match outcome {
                CasOutcome::Committed => {
                    let speaker_id = SpeakerId::new(next);
                    tracing::info!(
                        speaker_id = %speaker_id,
                        attempt = attempt,
                        "Speaker ID allocated"
                    );
                    return Ok(speaker_id);
                }
                CasOutcome::Conflict => {
                    tracing::debug!(
                        attempt = attempt,
                        max_attempts = max_attempts,
                        observed_version = ?expected_version,
                        "Speaker ID counter changed concurrently, retrying"
                    );
                    if attempt < max_attempts {
                        tokio::time::sleep(self.backoff_delay(attempt)).await;
                    }
                }
            }
        }

        tracing::warn!(
            attempts = max_attempts,
            "Speaker ID allocation retries exhausted under contention"
        );
        Err(AllocationError::RetriesExhausted {
            attempts: max_attempts,
        })
    }

    /// Most recently issued identifier, for display and auditing only.
    ///
    /// The answer may already be stale when it returns and must never be
    /// used to derive the next identifier.
    pub async fn last_issued(&self) -> Result<Option<SpeakerId>, AllocationError> {
        let snapshot = self.counters.read(SPEAKER_ID_COUNTER).await?;
        Ok(snapshot
            .and_then(|s| decode_last_issued(&s.value).ok())
            .filter(|n| *n >= self.settings.starting_value)
            .map(SpeakerId::new))
    }

    fn effective_last_value(
        &self,
        snapshot: Option<&CounterSnapshot>,
    ) -> Result<i64, AllocationError> {
        let floor = self.settings.floor();
        let Some(snapshot) = snapshot else {
            return Ok(floor);
        };

        let problem = match decode_last_issued(&snapshot.value) {
            Ok(value) if value >= floor => return Ok(value),
            Ok(value) => format!("value {} is below the floor {}", value, floor),
            Err(reason) => reason,
        };

        match self.settings.corrupt_policy {
            CorruptCounterPolicy::Clamp => {
                if !self.corrupt_state_reported.swap(true, Ordering::Relaxed) {
                    tracing::warn!(
                        problem = %problem,
                        floor = floor,
                        "Speaker ID counter is corrupt, continuing from the floor"
                    );
                } else {
                    tracing::debug!(problem = %problem, "Speaker ID counter still corrupt");
                }
                Ok(floor)
            }
            CorruptCounterPolicy::Fail => Err(AllocationError::CorruptCounterState(problem)),
        }
    }

    /// Capped exponential backoff with jitter so racing callers spread out
    fn backoff_delay(&self, attempt: u32) -> Duration {
        let exponent = attempt.saturating_sub(1).min(16);
        let capped = self
            .settings
            .backoff_base
            .saturating_mul(1u32 << exponent)
            .min(self.settings.backoff_max);
        jitter(capped)
    }
}

fn jitter(delay: Duration) -> Duration {
    let millis = delay.as_millis() as u64;
    if millis == 0 {
        return delay;
    }
    let half = millis / 2;
    Duration::from_millis(half + rand::thread_rng().gen_range(0..=millis - half))
}
