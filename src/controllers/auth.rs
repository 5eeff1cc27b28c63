use axum::{extract::State, http::StatusCode, Json};
use std::sync::Arc;

use crate::domain::auth::{AuthService, LoginRequest, TokenResponse};
use crate::domain::registration::{RegisterRequest, RegisterResponse, RegistrationService};
use crate::error::AppResult;

pub struct AuthController {
    registration_service: Arc<RegistrationService>,
    auth_service: Arc<AuthService>,
}

impl AuthController {
    pub fn new(registration_service: Arc<RegistrationService>, auth_service: Arc<AuthService>) -> Self {
        Self {
            registration_service,
            auth_service,
        }
    }

    /// POST /auth/register - Create an account and assign a speaker id
    pub async fn register(
        State(controller): State<Arc<AuthController>>,
        Json(request): Json<RegisterRequest>,
    ) -> AppResult<(StatusCode, Json<RegisterResponse>)> {
        let profile = controller.registration_service.register(&request).await?;
        let token = controller.auth_service.issue_token(&profile)?;

        Ok((
            StatusCode::CREATED,
            Json(RegisterResponse {
                token: token.token,
                expires_in: token.expires_in,
                speaker_id: profile.speaker_id,
                speaker: profile.into(),
            }),
        ))
    }

    /// POST /auth/login - Exchange credentials for a session token
    pub async fn login(
        State(controller): State<Arc<AuthController>>,
        Json(request): Json<LoginRequest>,
    ) -> AppResult<Json<TokenResponse>> {
        let response = controller.auth_service.login(&request).await?;
        Ok(Json(response))
    }
}
