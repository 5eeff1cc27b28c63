use crate::helpers::TestContext;

use chrono::{Duration, Utc};
use pretty_assertions::assert_eq;
use test_context::test_context;
use uuid::Uuid;
use voiceid_backend::domain::recording::{Recording, RecordingStatus};
use voiceid_backend::domain::speaker::Language;
use voiceid_backend::domain::speaker_id::SpeakerId;
use voiceid_backend::infrastructure::repositories::{
    PostgresRecordingRepository, RecordingRepository,
};

fn recording(speaker: i64, minutes_ago: i64) -> Recording {
    Recording {
        id: Uuid::new_v4(),
        speaker_id: SpeakerId::new(speaker),
        speaker_name: "Kamal Perera".to_string(),
        native_language: Language::Sinhala,
        recorded_language: Language::English,
        phrase_index: 1,
        phrase_text: "The sky is blue.".to_string(),
        file_name: format!("id{}_english_phrase1.webm", speaker),
        blob_key: format!("recordings/id{}_english_phrase1.webm", speaker),
        mime_type: "audio/webm".to_string(),
        size_bytes: 42,
        status: RecordingStatus::Pending,
        created_at: Utc::now() - Duration::minutes(minutes_ago),
    }
}

#[test_context(TestContext)]
#[tokio::test]
#[ignore = "requires docker"]
async fn it_should_list_recordings_newest_first(ctx: &TestContext) {
    let repo = PostgresRecordingRepository::new(ctx.pool.clone());
    let older = recording(90000, 10);
    let newer = recording(90000, 1);
    let other = recording(90001, 5);
    for r in [&older, &newer, &other] {
        repo.create(r).await.unwrap();
    }

    let mine: Vec<Uuid> = repo
        .list(Some(SpeakerId::new(90000)))
        .await
        .unwrap()
        .iter()
        .map(|r| r.id)
        .collect();
    assert_eq!(mine, vec![newer.id, older.id]);

    assert_eq!(repo.list(None).await.unwrap().len(), 3);
}

#[test_context(TestContext)]
#[tokio::test]
#[ignore = "requires docker"]
async fn it_should_update_review_status(ctx: &TestContext) {
    let repo = PostgresRecordingRepository::new(ctx.pool.clone());
    let r = recording(90000, 0);
    repo.create(&r).await.unwrap();

    let updated = repo
        .update_status(r.id, RecordingStatus::Rejected)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(updated.status, RecordingStatus::Rejected);

    let stored = repo.find_by_id(r.id).await.unwrap().unwrap();
    assert_eq!(stored.status, RecordingStatus::Rejected);

    assert!(repo
        .update_status(Uuid::new_v4(), RecordingStatus::Verified)
        .await
        .unwrap()
        .is_none());
}
