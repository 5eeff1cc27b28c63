use crate::helpers::{multipart_body, TestContext, TestSpeaker};

use hyper::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::json;
use test_context::test_context;

async fn upload(ctx: &TestContext, speaker: &TestSpeaker, phrase_index: &str) -> String {
    let (content_type, body) = multipart_body(
        &[
            ("language", "English"),
            ("phrase_index", phrase_index),
            ("phrase_text", "The sky is blue."),
        ],
        Some(("take.ogg", "audio/ogg", b"OggS-audio")),
    );

    let response = ctx
        .client
        .post_raw_with_auth("/api/recordings", &content_type, body, &speaker.token)
        .await
        .unwrap();
    response.assert_status(StatusCode::CREATED);

    response.body.as_ref().unwrap()["id"]
        .as_str()
        .unwrap()
        .to_string()
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_forbid_non_admin_speakers(ctx: &TestContext) {
    let speaker = ctx.register("kamal@example.com", "Sinhala").await;

    for path in ["/admin/speakers", "/admin/recordings", "/admin/speaker-ids/last"] {
        let response = ctx.client.get_with_auth(path, &speaker.token).await.unwrap();
        response
            .assert_status(StatusCode::FORBIDDEN)
            .assert_error_message("Admin access required");
    }

    let anonymous = ctx.client.get("/admin/speakers").await.unwrap();
    anonymous.assert_status(StatusCode::UNAUTHORIZED);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_list_speakers_in_id_order(ctx: &TestContext) {
    let admin = ctx.register_admin().await;
    ctx.register("kamal@example.com", "Sinhala").await;
    ctx.register("sita@example.com", "Tamil").await;

    let response = ctx
        .client
        .get_with_auth("/admin/speakers", &admin.token)
        .await
        .unwrap();
    response.assert_status(StatusCode::OK);

    let ids: Vec<&str> = response
        .body
        .as_ref()
        .unwrap()
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["speaker_id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, vec!["id90000", "id90001", "id90002"]);

    let last = ctx
        .client
        .get_with_auth("/admin/speaker-ids/last", &admin.token)
        .await
        .unwrap();
    last.assert_status(StatusCode::OK);
    assert_eq!(last.body.as_ref().unwrap()["last_issued"], "id90002");
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_look_up_a_single_speaker(ctx: &TestContext) {
    let admin = ctx.register_admin().await;
    let speaker = ctx.register("sita@example.com", "Tamil").await;

    let response = ctx
        .client
        .get_with_auth(&format!("/admin/speakers/{}", speaker.speaker_id), &admin.token)
        .await
        .unwrap();
    response.assert_status(StatusCode::OK);
    assert_eq!(response.body.as_ref().unwrap()["email"], "sita@example.com");

    let zero_padded = speaker.speaker_id.replacen("id", "id0", 1);
    for missing in ["id99999", "sita", zero_padded.as_str()] {
        let response = ctx
            .client
            .get_with_auth(&format!("/admin/speakers/{}", missing), &admin.token)
            .await
            .unwrap();
        response.assert_status(StatusCode::NOT_FOUND);
    }
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_review_uploaded_recordings(ctx: &TestContext) {
    let admin = ctx.register_admin().await;
    let kamal = ctx.register("kamal@example.com", "Sinhala").await;
    let sita = ctx.register("sita@example.com", "Tamil").await;

    let kamal_recording = upload(ctx, &kamal, "0").await;
    upload(ctx, &sita, "0").await;

    // Filtered by speaker
    let response = ctx
        .client
        .get_with_auth(
            &format!("/admin/recordings?speaker_id={}", kamal.speaker_id),
            &admin.token,
        )
        .await
        .unwrap();
    response.assert_status(StatusCode::OK);
    let recordings = response.body.as_ref().unwrap().as_array().unwrap().clone();
    assert_eq!(recordings.len(), 1);
    assert_eq!(recordings[0]["id"], kamal_recording.as_str());
    assert_eq!(recordings[0]["native_language"], "Sinhala");
    assert_eq!(recordings[0]["recorded_language"], "English");

    // Unfiltered
    let all = ctx
        .client
        .get_with_auth("/admin/recordings", &admin.token)
        .await
        .unwrap();
    assert_eq!(all.body.as_ref().unwrap().as_array().unwrap().len(), 2);

    // Audio download
    let audio = ctx
        .client
        .get_with_auth(
            &format!("/admin/recordings/{}/audio", kamal_recording),
            &admin.token,
        )
        .await
        .unwrap();
    audio
        .assert_status(StatusCode::OK)
        .assert_header("content-type", "audio/ogg");
    assert_eq!(audio.body_bytes, b"OggS-audio".to_vec());
    let disposition = audio.header("content-disposition").unwrap();
    assert!(disposition.contains("id90001_english_phrase1_"), "{disposition}");
    assert!(disposition.ends_with(".ogg\""), "{disposition}");

    // Status update
    let updated = ctx
        .client
        .patch_with_auth(
            &format!("/admin/recordings/{}", kamal_recording),
            &json!({ "status": "verified" }),
            &admin.token,
        )
        .await
        .unwrap();
    updated.assert_status(StatusCode::OK);
    assert_eq!(updated.body.as_ref().unwrap()["status"], "verified");

    let invalid = ctx
        .client
        .patch_with_auth(
            &format!("/admin/recordings/{}", kamal_recording),
            &json!({ "status": "approved" }),
            &admin.token,
        )
        .await
        .unwrap();
    invalid.assert_status(StatusCode::BAD_REQUEST);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_report_unknown_recordings(ctx: &TestContext) {
    let admin = ctx.register_admin().await;
    let unknown = "00000000-0000-4000-8000-000000000000";

    let audio = ctx
        .client
        .get_with_auth(&format!("/admin/recordings/{}/audio", unknown), &admin.token)
        .await
        .unwrap();
    audio.assert_status(StatusCode::NOT_FOUND);

    let update = ctx
        .client
        .patch_with_auth(
            &format!("/admin/recordings/{}", unknown),
            &json!({ "status": "rejected" }),
            &admin.token,
        )
        .await
        .unwrap();
    update.assert_status(StatusCode::NOT_FOUND);
}
