use super::counter_repository::{CasOutcome, CounterRepository, CounterSnapshot};
use crate::error::AppResult;
use crate::infrastructure::db::DbPool;
use async_trait::async_trait;
use serde_json::Value as JsonValue;
use std::sync::Arc;

/// Counter records in the `counters` table, guarded by a version column
pub struct PostgresCounterRepository {
    pool: Arc<DbPool>,
}

impl PostgresCounterRepository {
    pub fn new(pool: Arc<DbPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CounterRepository for PostgresCounterRepository {
    async fn read(&self, name: &str) -> AppResult<Option<CounterSnapshot>> {
        let pool = self.pool.as_ref();
        let row = sqlx::query_as::<_, (JsonValue, i64)>(
            "SELECT value, version FROM counters WHERE name = $1",
        )
        .bind(name)
        .fetch_optional(pool)
        .await?;

        Ok(row.map(|(value, version)| CounterSnapshot { value, version }))
    }

    async fn compare_and_set(
        &self,
        name: &str,
        expected_version: Option<i64>,
        value: JsonValue,
    ) -> AppResult<CasOutcome> {
        let pool = self.pool.as_ref();

        // A concurrent writer either blocks us until it commits (after which
        // the version predicate no longer matches) or wins the insert race.
        let result = match expected_version {
            None => {
                sqlx::query(
                    r#"
                    INSERT INTO counters (name, value, version, updated_at)
                    VALUES ($1, $2, 1, NOW())
                    ON CONFLICT (name) DO NOTHING
                    "#,
                )
                .bind(name)
                .bind(&value)
                .execute(pool)
                .await?
            }
            Some(version) => {
                sqlx::query(
                    r#"
                    UPDATE counters
                    SET value = $2, version = version + 1, updated_at = NOW()
                    WHERE name = $1 AND version = $3
                    "#,
                )
                .bind(name)
                .bind(&value)
                .bind(version)
                .execute(pool)
                .await?
            }
        };

        if result.rows_affected() == 1 {
            Ok(CasOutcome::Committed)
        } else {
            Ok(CasOutcome::Conflict)
        }
    }
}
