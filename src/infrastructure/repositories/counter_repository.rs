use crate::error::AppResult;
use async_trait::async_trait;
use serde_json::Value as JsonValue;

/// A counter record as read from the store, with the version the next
/// conditional write must match
#[derive(Debug, Clone, PartialEq)]
pub struct CounterSnapshot {
    pub value: JsonValue,
    pub version: i64,
}

/// Result of a conditional write
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CasOutcome {
    Committed,
    /// Another writer got there first; re-read and try again
    Conflict,
}

/// Repository for named counter records supporting optimistic concurrency.
///
/// Implementations must make `compare_and_set` atomic with respect to other
/// writers of the same record. Any `Err` means the store could not be
/// reached and nothing was written.
#[async_trait]
pub trait CounterRepository: Send + Sync {
    /// Read the current record, `None` if it was never written
    async fn read(&self, name: &str) -> AppResult<Option<CounterSnapshot>>;

    /// Write `value` only if the record is still at `expected_version`.
    ///
    /// `expected_version = None` creates the record and conflicts if it
    /// already exists.
    async fn compare_and_set(
        &self,
        name: &str,
        expected_version: Option<i64>,
        value: JsonValue,
    ) -> AppResult<CasOutcome>;
}
