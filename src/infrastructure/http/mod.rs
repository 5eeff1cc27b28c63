use axum::{
    extract::DefaultBodyLimit,
    middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::controllers::{
    admin::AdminController, auth::AuthController, health, phrase::PhraseController,
    recording::RecordingController, speaker::SpeakerController,
};
use crate::infrastructure::auth::{admin_middleware, auth_middleware, request_id_middleware};
use crate::infrastructure::config::Config;
use crate::infrastructure::repositories::ProfileRepository;

/// Room for the non-audio multipart fields on top of the audio limit
const MULTIPART_OVERHEAD_BYTES: usize = 64 * 1024;

/// Everything the router needs, wired up by `main` or by tests
#[derive(Clone)]
pub struct HttpState {
    pub config: Arc<Config>,
    pub profile_repo: Arc<dyn ProfileRepository>,
    pub auth_controller: Arc<AuthController>,
    pub speaker_controller: Arc<SpeakerController>,
    pub phrase_controller: Arc<PhraseController>,
    pub recording_controller: Arc<RecordingController>,
    pub admin_controller: Arc<AdminController>,
}

/// Build the application router with all routes configured
pub fn build_router(state: HttpState) -> Router {
    let auth_layer = middleware::from_fn_with_state(
        (state.profile_repo.clone(), state.config.clone()),
        auth_middleware,
    );

    // Auth routes (public - no auth required)
    let auth_routes = Router::new()
        .route("/auth/register", post(AuthController::register))
        .route("/auth/login", post(AuthController::login))
        .with_state(state.auth_controller.clone());

    let speaker_routes = Router::new()
        .route("/api/me", get(SpeakerController::get_me))
        .with_state(state.speaker_controller.clone())
        .layer(auth_layer.clone());

    let phrase_routes = Router::new()
        .route("/api/phrases", get(PhraseController::get_phrase))
        .with_state(state.phrase_controller.clone())
        .layer(auth_layer.clone());

    let recording_routes = Router::new()
        .route("/api/recordings", post(RecordingController::upload))
        .with_state(state.recording_controller.clone())
        .layer(DefaultBodyLimit::max(
            state.config.max_upload_bytes + MULTIPART_OVERHEAD_BYTES,
        ))
        .layer(auth_layer.clone());

    // Admin routes: layers run bottom-up, so authentication happens before the admin check
    let admin_routes = Router::new()
        .route("/admin/speakers", get(AdminController::list_speakers))
        .route("/admin/speakers/:speaker_id", get(AdminController::get_speaker))
        .route("/admin/speaker-ids/last", get(AdminController::last_speaker_id))
        .route("/admin/recordings", get(AdminController::list_recordings))
        .route(
            "/admin/recordings/:id",
            axum::routing::patch(AdminController::update_recording_status),
        )
        .route("/admin/recordings/:id/audio", get(AdminController::download_audio))
        .with_state(state.admin_controller.clone())
        .layer(middleware::from_fn_with_state(
            state.config.clone(),
            admin_middleware,
        ))
        .layer(auth_layer);

    Router::new()
        .route("/health", get(health::health))
        .route("/health/ready", get(health::health_ready))
        .with_state(state.profile_repo.clone())
        .merge(auth_routes)
        .merge(speaker_routes)
        .merge(phrase_routes)
        .merge(recording_routes)
        .merge(admin_routes)
        .layer(middleware::from_fn(request_id_middleware))
        .layer(TraceLayer::new_for_http())
}

/// Start the HTTP server and serve until shutdown
pub async fn start_http_server(state: HttpState) -> Result<(), Box<dyn std::error::Error>> {
    let config = state.config.clone();
    let app = build_router(state);

    let listener =
        tokio::net::TcpListener::bind(format!("{}:{}", config.host, config.port)).await?;

    tracing::info!("Server listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;

    Ok(())
}
