// PostgreSQL-backed tests for the store implementations.
//
// A single testcontainers PostgreSQL instance is shared by the suite; each
// test gets its own freshly migrated database, so tests run in parallel
// without seeing each other's rows. They need Docker and are ignored by
// default: run them with `cargo test --test e2e -- --ignored`.

mod helpers;
mod test_counters;
mod test_recordings;
