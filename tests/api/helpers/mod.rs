use serde_json::json;
use std::sync::Arc;
use test_context::AsyncTestContext;
use tokio::net::TcpListener;
use voiceid_backend::controllers::{
    admin::AdminController, auth::AuthController, phrase::PhraseController,
    recording::RecordingController, speaker::SpeakerController,
};
use voiceid_backend::domain::auth::{AuthService, JwtManager};
use voiceid_backend::domain::phrase::PhraseService;
use voiceid_backend::domain::recording::RecordingService;
use voiceid_backend::domain::registration::RegistrationService;
use voiceid_backend::domain::speaker::SpeakerService;
use voiceid_backend::domain::speaker_id::{CorruptCounterPolicy, SpeakerIdAllocator};
use voiceid_backend::infrastructure::config::{
    Config, Environment, IdentityBackend, LogFormat, StorageBackend,
};
use voiceid_backend::infrastructure::identity::InMemoryIdentityProvider;
use voiceid_backend::infrastructure::http::{build_router, HttpState};
use voiceid_backend::infrastructure::repositories::{
    InMemoryCounterRepository, InMemoryProfileRepository, InMemoryRecordingRepository,
    ProfileRepository,
};

pub mod fakes;

use api_client::TestClient;
use fakes::{CannedPhraseRepository, MemoryAudioStorage};

pub const ADMIN_EMAIL: &str = "admin@example.com";
pub const PASSWORD: &str = "secret-password";
pub const MAX_UPLOAD_BYTES: usize = 1024;

pub struct TestContext {
    pub client: TestClient,
    #[allow(dead_code)]
    pub config: Arc<Config>,
    #[allow(dead_code)]
    pub audio_storage: Arc<MemoryAudioStorage>,
    #[allow(dead_code)]
    pub identity: Arc<InMemoryIdentityProvider>,
}

/// A speaker registered through the API
#[allow(dead_code)]
pub struct TestSpeaker {
    pub email: String,
    pub speaker_id: String,
    pub token: String,
}

pub fn test_config() -> Config {
    Config {
        storage_backend: StorageBackend::Memory,
        database_url: None,
        host: "127.0.0.1".to_string(),
        port: 0, // Will be assigned by the OS
        jwt_secret: "test-jwt-secret-key-for-testing-only".to_string(),
        jwt_expiration_hours: 1,
        environment: Environment::Development,
        log_format: LogFormat::Pretty,
        identity_backend: IdentityBackend::Memory,
        firebase_api_key: "test-firebase-key".to_string(),
        identity_base_url: "http://127.0.0.1:9".to_string(),
        aws_region: "ap-south-1".to_string(),
        recordings_bucket: "test-recordings".to_string(),
        recordings_prefix: "recordings/".to_string(),
        max_upload_bytes: MAX_UPLOAD_BYTES,
        openai_api_key: "test-openai-key".to_string(),
        phrase_model: "gpt-4o-mini".to_string(),
        admin_emails: vec![ADMIN_EMAIL.to_string()],
        speaker_id_starting_value: 90000,
        speaker_id_max_attempts: 50,
        speaker_id_backoff_base_ms: 1,
        speaker_id_backoff_max_ms: 5,
        speaker_id_corrupt_policy: CorruptCounterPolicy::Clamp,
    }
}

impl AsyncTestContext for TestContext {
    fn setup() -> impl std::future::Future<Output = Self> + Send {
        async {
            let config = Arc::new(test_config());

            let profile_repo: Arc<dyn ProfileRepository> = Arc::new(InMemoryProfileRepository::new());
            let identity = Arc::new(InMemoryIdentityProvider::new());
            let audio_storage = Arc::new(MemoryAudioStorage::default());

            let allocator = Arc::new(SpeakerIdAllocator::new(
                Arc::new(InMemoryCounterRepository::new()),
                config.allocator_settings(),
            ));
            let jwt = Arc::new(JwtManager::new(
                config.jwt_secret.clone(),
                config.jwt_expiration_hours,
            ));

            let registration_service = Arc::new(RegistrationService::new(
                identity.clone(),
                allocator.clone(),
                profile_repo.clone(),
            ));
            let auth_service = Arc::new(AuthService::new(identity.clone(), profile_repo.clone(), jwt));
            let speaker_service = Arc::new(SpeakerService::new(profile_repo.clone()));
            let phrase_service = Arc::new(PhraseService::new(Arc::new(CannedPhraseRepository)));
            let recording_service = Arc::new(RecordingService::new(
                Arc::new(InMemoryRecordingRepository::new()),
                audio_storage.clone(),
                config.recordings_prefix.clone(),
                config.max_upload_bytes,
            ));

            let app = build_router(HttpState {
                config: config.clone(),
                profile_repo,
                auth_controller: Arc::new(AuthController::new(registration_service, auth_service)),
                speaker_controller: Arc::new(SpeakerController::new(speaker_service.clone())),
                phrase_controller: Arc::new(PhraseController::new(
                    phrase_service,
                    speaker_service.clone(),
                )),
                recording_controller: Arc::new(RecordingController::new(
                    recording_service.clone(),
                    speaker_service.clone(),
                )),
                admin_controller: Arc::new(AdminController::new(
                    speaker_service,
                    recording_service,
                    allocator,
                )),
            });

            let listener = TcpListener::bind("127.0.0.1:0")
                .await
                .expect("Failed to bind listener");
            let addr = listener.local_addr().expect("Failed to get local addr");
            let base_url = format!("http://{}", addr);

            tokio::spawn(async move {
                axum::serve(listener, app).await.unwrap();
            });

            Self {
                client: TestClient::new(&base_url),
                config,
                audio_storage,
                identity,
            }
        }
    }

    fn teardown(self) -> impl std::future::Future<Output = ()> + Send {
        async {}
    }
}

impl TestContext {
    /// Register a speaker through the API and return its session
    pub async fn register(&self, email: &str, language: &str) -> TestSpeaker {
        let response = self
            .client
            .post("/auth/register", &registration_body(email, language))
            .await
            .unwrap();
        response.assert_status(hyper::StatusCode::CREATED);

        let body = response.body.as_ref().unwrap();
        TestSpeaker {
            email: email.to_string(),
            speaker_id: body["speaker_id"].as_str().unwrap().to_string(),
            token: body["token"].as_str().unwrap().to_string(),
        }
    }

    pub async fn register_admin(&self) -> TestSpeaker {
        self.register(ADMIN_EMAIL, "Tamil").await
    }
}

pub fn registration_body(email: &str, language: &str) -> serde_json::Value {
    json!({
        "full_name": "Test Speaker",
        "email": email,
        "password": PASSWORD,
        "whatsapp_number": "0771234567",
        "language": language
    })
}

/// Encode a multipart/form-data body, returning its content type and bytes
pub fn multipart_body(fields: &[(&str, &str)], audio: Option<(&str, &str, &[u8])>) -> (String, Vec<u8>) {
    let boundary = "voiceid-test-boundary";
    let mut body = Vec::new();

    for (name, value) in fields {
        body.extend_from_slice(format!("--{}\r\n", boundary).as_bytes());
        body.extend_from_slice(
            format!("Content-Disposition: form-data; name=\"{}\"\r\n\r\n", name).as_bytes(),
        );
        body.extend_from_slice(value.as_bytes());
        body.extend_from_slice(b"\r\n");
    }

    if let Some((file_name, mime_type, data)) = audio {
        body.extend_from_slice(format!("--{}\r\n", boundary).as_bytes());
        body.extend_from_slice(
            format!(
                "Content-Disposition: form-data; name=\"audio\"; filename=\"{}\"\r\n",
                file_name
            )
            .as_bytes(),
        );
        body.extend_from_slice(format!("Content-Type: {}\r\n\r\n", mime_type).as_bytes());
        body.extend_from_slice(data);
        body.extend_from_slice(b"\r\n");
    }

    body.extend_from_slice(format!("--{}--\r\n", boundary).as_bytes());

    (format!("multipart/form-data; boundary={}", boundary), body)
}
