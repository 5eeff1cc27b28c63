use crate::helpers::TestContext;

use futures::future::join_all;
use pretty_assertions::assert_eq;
use serde_json::json;
use std::collections::BTreeSet;
use std::sync::Arc;
use std::time::Duration;
use test_context::test_context;
use voiceid_backend::domain::speaker_id::{AllocatorSettings, SpeakerIdAllocator, SPEAKER_ID_COUNTER};
use voiceid_backend::infrastructure::repositories::{
    CasOutcome, CounterRepository, PostgresCounterRepository,
};

fn settings() -> AllocatorSettings {
    AllocatorSettings {
        max_attempts: 200,
        backoff_base: Duration::from_millis(1),
        backoff_max: Duration::from_millis(10),
        ..AllocatorSettings::default()
    }
}

#[test_context(TestContext)]
#[tokio::test]
#[ignore = "requires docker"]
async fn it_should_compare_and_set_against_the_stored_version(ctx: &TestContext) {
    let repo = PostgresCounterRepository::new(ctx.pool.clone());

    assert!(repo.read("c").await.unwrap().is_none());
    assert_eq!(
        repo.compare_and_set("c", None, json!({"lastIssuedValue": 1})).await.unwrap(),
        CasOutcome::Committed
    );
    assert_eq!(
        repo.compare_and_set("c", None, json!({"lastIssuedValue": 2})).await.unwrap(),
        CasOutcome::Conflict
    );

    let snapshot = repo.read("c").await.unwrap().unwrap();
    assert_eq!(
        repo.compare_and_set("c", Some(snapshot.version + 1), json!({"lastIssuedValue": 2}))
            .await
            .unwrap(),
        CasOutcome::Conflict
    );
    assert_eq!(
        repo.compare_and_set("c", Some(snapshot.version), json!({"lastIssuedValue": 2}))
            .await
            .unwrap(),
        CasOutcome::Committed
    );

    let updated = repo.read("c").await.unwrap().unwrap();
    assert_eq!(updated.value, json!({"lastIssuedValue": 2}));
    assert!(updated.version > snapshot.version);
}

#[test_context(TestContext)]
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
#[ignore = "requires docker"]
async fn it_should_allocate_unique_ids_under_concurrency(ctx: &TestContext) {
    let repo: Arc<dyn CounterRepository> = Arc::new(PostgresCounterRepository::new(ctx.pool.clone()));
    let allocator = Arc::new(SpeakerIdAllocator::new(repo.clone(), settings()));

    let handles = (0..50).map(|_| {
        let allocator = allocator.clone();
        tokio::spawn(async move { allocator.allocate_next_id().await })
    });

    let ids: BTreeSet<String> = join_all(handles)
        .await
        .into_iter()
        .map(|joined| joined.unwrap().unwrap().to_string())
        .collect();

    let expected: BTreeSet<String> = (90000..90050).map(|n| format!("id{}", n)).collect();
    assert_eq!(ids, expected);

    let snapshot = repo.read(SPEAKER_ID_COUNTER).await.unwrap().unwrap();
    assert_eq!(snapshot.value, json!({"lastIssuedValue": 90049}));
}

#[test_context(TestContext)]
#[tokio::test]
#[ignore = "requires docker"]
async fn it_should_recover_from_a_corrupt_counter(ctx: &TestContext) {
    let repo: Arc<dyn CounterRepository> = Arc::new(PostgresCounterRepository::new(ctx.pool.clone()));
    repo.compare_and_set(SPEAKER_ID_COUNTER, None, json!({"lastIssuedValue": "garbage"}))
        .await
        .unwrap();

    let allocator = SpeakerIdAllocator::new(repo, settings());

    assert_eq!(allocator.allocate_next_id().await.unwrap().to_string(), "id90000");
    assert_eq!(allocator.allocate_next_id().await.unwrap().to_string(), "id90001");
}
