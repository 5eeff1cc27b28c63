use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use std::sync::Arc;

use crate::domain::speaker_id::SpeakerId;
use crate::infrastructure::config::Config;
use crate::{
    domain::auth::JwtManager, error::AppError, infrastructure::repositories::ProfileRepository,
};

/// Speaker context injected into request extensions after authentication
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub uid: String,
    pub email: String,
    pub speaker_id: SpeakerId,
}

/// Authentication middleware
pub async fn auth_middleware(
    State((profile_repo, config)): State<(Arc<dyn ProfileRepository>, Arc<Config>)>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let auth_header = request
        .headers()
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| AppError::Unauthorized("Missing authorization header".to_string()))?;

    let token = auth_header
        .strip_prefix("Bearer ")
        .ok_or_else(|| AppError::Unauthorized("Invalid authorization format".to_string()))?;

    let jwt_manager = JwtManager::new(config.jwt_secret.clone(), config.jwt_expiration_hours);
    let claims = jwt_manager.validate_token(token)?;

    // Tokens outlive profiles that were removed by hand
    let profile = profile_repo
        .find_by_uid(&claims.sub)
        .await?
        .ok_or_else(|| AppError::Unauthorized("Speaker not found".to_string()))?;

    request.extensions_mut().insert(AuthUser {
        uid: profile.uid,
        email: profile.email,
        speaker_id: profile.speaker_id,
    });

    Ok(next.run(request).await)
}

/// Restricts a route to the configured admin emails; runs after `auth_middleware`
pub async fn admin_middleware(
    State(config): State<Arc<Config>>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let auth_user = request
        .extensions()
        .get::<AuthUser>()
        .ok_or_else(|| AppError::Unauthorized("Not authenticated".to_string()))?;

    if !config.is_admin(&auth_user.email) {
        tracing::warn!(speaker_id = %auth_user.speaker_id, "Admin route denied");
        return Err(AppError::Forbidden("Admin access required".to_string()));
    }

    Ok(next.run(request).await)
}
