use async_openai::{config::OpenAIConfig, Client as OpenAiClient};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use voiceid_backend::controllers::{
    admin::AdminController, auth::AuthController, phrase::PhraseController,
    recording::RecordingController, speaker::SpeakerController,
};
use voiceid_backend::domain::auth::{AuthService, JwtManager};
use voiceid_backend::domain::phrase::PhraseService;
use voiceid_backend::domain::recording::RecordingService;
use voiceid_backend::domain::registration::RegistrationService;
use voiceid_backend::domain::speaker::SpeakerService;
use voiceid_backend::domain::speaker_id::SpeakerIdAllocator;
use voiceid_backend::infrastructure::config::{Config, IdentityBackend, LogFormat, StorageBackend};
use voiceid_backend::infrastructure::db::{check_connection, create_pool, run_migrations};
use voiceid_backend::infrastructure::http::{start_http_server, HttpState};
use voiceid_backend::infrastructure::identity::{
    FirebaseIdentityClient, IdentityProvider, InMemoryIdentityProvider,
};
use voiceid_backend::infrastructure::repositories::{
    AudioStorage, CounterRepository, InMemoryCounterRepository, InMemoryProfileRepository,
    InMemoryRecordingRepository, OpenAiPhraseRepository, PhraseRepository,
    PostgresCounterRepository, PostgresProfileRepository, PostgresRecordingRepository,
    ProfileRepository, RecordingRepository, S3AudioStorage,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = Config::from_env()?;

    // Initialize logging
    init_logging(&config);

    tracing::info!(
        development = config.is_development(),
        storage = ?config.storage_backend,
        "Starting VoiceID Backend on {}:{}",
        config.host,
        config.port
    );

    // 1. Stores
    let (counter_repo, profile_repo, recording_repo): (
        Arc<dyn CounterRepository>,
        Arc<dyn ProfileRepository>,
        Arc<dyn RecordingRepository>,
    ) = match config.storage_backend {
        StorageBackend::Postgres => {
            let database_url = config
                .database_url
                .as_deref()
                .ok_or("DATABASE_URL is required when STORAGE_BACKEND=postgres")?;

            let pool = create_pool(database_url).await?;
            tracing::info!("Database connection pool created");

            check_connection(&pool).await?;
            tracing::info!("Database connection verified");

            run_migrations(&pool).await?;
            tracing::info!("Database migrations applied");

            let pool = Arc::new(pool);
            (
                Arc::new(PostgresCounterRepository::new(pool.clone())),
                Arc::new(PostgresProfileRepository::new(pool.clone())),
                Arc::new(PostgresRecordingRepository::new(pool)),
            )
        }
        StorageBackend::Memory => {
            tracing::warn!("Using in-memory storage; nothing survives a restart");
            (
                Arc::new(InMemoryCounterRepository::new()),
                Arc::new(InMemoryProfileRepository::new()),
                Arc::new(InMemoryRecordingRepository::new()),
            )
        }
    };

    // 2. External clients
    tracing::info!("Initializing AWS S3 client with region: {}", config.aws_region);
    let aws_config = aws_config::defaults(aws_config::BehaviorVersion::latest())
        .region(aws_config::Region::new(config.aws_region.clone()))
        .load()
        .await;
    tracing::info!(region = ?aws_config.region(), "AWS configuration loaded");

    let s3_client = Arc::new(aws_sdk_s3::Client::new(&aws_config));
    let audio_storage: Arc<dyn AudioStorage> = Arc::new(S3AudioStorage::new(
        s3_client,
        config.recordings_bucket.clone(),
    ));

    let openai_client = Arc::new(OpenAiClient::with_config(
        OpenAIConfig::new().with_api_key(config.openai_api_key.clone()),
    ));
    let phrase_repo: Arc<dyn PhraseRepository> = Arc::new(OpenAiPhraseRepository::new(
        openai_client,
        config.phrase_model.clone(),
    ));

    let identity: Arc<dyn IdentityProvider> = match config.identity_backend {
        IdentityBackend::Firebase => Arc::new(FirebaseIdentityClient::new(
            config.firebase_api_key.clone(),
            config.identity_base_url.clone(),
        )),
        IdentityBackend::Memory => {
            tracing::warn!("Using in-memory identity provider; accounts vanish on restart");
            Arc::new(InMemoryIdentityProvider::new())
        }
    };

    let config = Arc::new(config);

    // 3. Services
    tracing::info!("Instantiating services...");
    let settings = config.allocator_settings();
    tracing::info!(
        starting_value = settings.starting_value,
        max_attempts = settings.max_attempts,
        "Speaker id allocator configured"
    );
    let allocator = Arc::new(SpeakerIdAllocator::new(counter_repo, settings));
    let jwt = Arc::new(JwtManager::new(
        config.jwt_secret.clone(),
        config.jwt_expiration_hours,
    ));

    let registration_service = Arc::new(RegistrationService::new(
        identity.clone(),
        allocator.clone(),
        profile_repo.clone(),
    ));
    let auth_service = Arc::new(AuthService::new(identity, profile_repo.clone(), jwt));
    let speaker_service = Arc::new(SpeakerService::new(profile_repo.clone()));
    let phrase_service = Arc::new(PhraseService::new(phrase_repo));
    let recording_service = Arc::new(RecordingService::new(
        recording_repo,
        audio_storage,
        config.recordings_prefix.clone(),
        config.max_upload_bytes,
    ));

    // 4. Controllers
    tracing::info!("Instantiating controllers...");
    let state = HttpState {
        config: config.clone(),
        profile_repo,
        auth_controller: Arc::new(AuthController::new(registration_service, auth_service)),
        speaker_controller: Arc::new(SpeakerController::new(speaker_service.clone())),
        phrase_controller: Arc::new(PhraseController::new(phrase_service, speaker_service.clone())),
        recording_controller: Arc::new(RecordingController::new(
            recording_service.clone(),
            speaker_service.clone(),
        )),
        admin_controller: Arc::new(AdminController::new(
            speaker_service,
            recording_service,
            allocator,
        )),
    };

    // Start HTTP server with all routes
    start_http_server(state).await?;

    Ok(())
}

fn init_logging(config: &Config) {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "voiceid_backend=debug,tower_http=debug".into());

    if config.log_format == LogFormat::Json {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().pretty())
            .init();
    }
}
