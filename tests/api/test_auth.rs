use crate::helpers::{registration_body, TestContext, PASSWORD};

use futures::future::join_all;
use hyper::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::json;
use std::collections::BTreeSet;
use test_context::test_context;

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_register_with_the_first_speaker_id(ctx: &TestContext) {
    let response = ctx
        .client
        .post("/auth/register", &registration_body("kamal@example.com", "Sinhala"))
        .await
        .unwrap();

    response.assert_status(StatusCode::CREATED);

    let body = response.body.as_ref().unwrap();
    assert_eq!(body["speaker_id"], "id90000");
    assert_eq!(body["speaker"]["speaker_id"], "id90000");
    assert_eq!(body["speaker"]["language"], "Sinhala");
    assert_eq!(body["speaker"]["whatsapp_number"], "0771234567");
    assert!(!body["token"].as_str().unwrap().is_empty());
    assert!(body["expires_in"].as_i64().unwrap() > 0);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_register_login_and_fetch_the_profile(ctx: &TestContext) {
    ctx.register("first@example.com", "Tamil").await;
    let speaker = ctx.register("second@example.com", "Sinhala").await;
    assert_eq!(speaker.speaker_id, "id90001");

    let login = ctx
        .client
        .post(
            "/auth/login",
            &json!({ "email": "second@example.com", "password": PASSWORD }),
        )
        .await
        .unwrap();
    login.assert_status(StatusCode::OK);

    let body = login.body.as_ref().unwrap();
    assert_eq!(body["speaker_id"], "id90001");
    let token = body["token"].as_str().unwrap();

    let me = ctx.client.get_with_auth("/api/me", token).await.unwrap();
    me.assert_status(StatusCode::OK);

    let profile = me.body.as_ref().unwrap();
    assert_eq!(profile["speaker_id"], "id90001");
    assert_eq!(profile["email"], "second@example.com");
    assert_eq!(profile["full_name"], "Test Speaker");
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_hand_out_unique_ids_to_concurrent_registrations(ctx: &TestContext) {
    let emails: Vec<String> = (0..20).map(|i| format!("speaker{}@example.com", i)).collect();

    let responses = join_all(emails.iter().map(|email| {
        let body = registration_body(email, "Sinhala");
        let client = ctx.client.clone();
        async move { client.post("/auth/register", &body).await.unwrap() }
    }))
    .await;

    let ids: BTreeSet<String> = responses
        .iter()
        .map(|r| {
            r.assert_status(StatusCode::CREATED);
            r.body.as_ref().unwrap()["speaker_id"].as_str().unwrap().to_string()
        })
        .collect();

    let expected: BTreeSet<String> = (90000..90020).map(|n| format!("id{}", n)).collect();
    assert_eq!(ids, expected);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_reject_invalid_registrations(ctx: &TestContext) {
    let mut body = registration_body("kamal@example.com", "English");
    let response = ctx.client.post("/auth/register", &body).await.unwrap();
    response
        .assert_status(StatusCode::BAD_REQUEST)
        .assert_error_message("Sinhala or Tamil");

    body["language"] = json!("Sinhala");
    body["whatsapp_number"] = json!("12345");
    let response = ctx.client.post("/auth/register", &body).await.unwrap();
    response
        .assert_status(StatusCode::BAD_REQUEST)
        .assert_error_message("WhatsApp");

    // Nothing was consumed by the rejected attempts
    let speaker = ctx.register("kamal@example.com", "Sinhala").await;
    assert_eq!(speaker.speaker_id, "id90000");
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_reject_an_email_that_is_already_registered(ctx: &TestContext) {
    ctx.register("kamal@example.com", "Sinhala").await;

    let response = ctx
        .client
        .post("/auth/register", &registration_body("kamal@example.com", "Tamil"))
        .await
        .unwrap();

    response
        .assert_status(StatusCode::CONFLICT)
        .assert_error_message("already registered");
    assert_eq!(ctx.identity.account_count(), 1);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_reject_bad_credentials(ctx: &TestContext) {
    ctx.register("kamal@example.com", "Sinhala").await;

    let response = ctx
        .client
        .post(
            "/auth/login",
            &json!({ "email": "kamal@example.com", "password": "wrong-password" }),
        )
        .await
        .unwrap();

    response.assert_status(StatusCode::UNAUTHORIZED);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_require_a_valid_token_for_protected_routes(ctx: &TestContext) {
    let missing = ctx.client.get("/api/me").await.unwrap();
    missing
        .assert_status(StatusCode::UNAUTHORIZED)
        .assert_error_message("Missing authorization header");

    let garbage = ctx.client.get_with_auth("/api/me", "not-a-jwt").await.unwrap();
    garbage.assert_status(StatusCode::UNAUTHORIZED);
}
