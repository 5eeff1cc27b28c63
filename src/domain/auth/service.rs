use super::error::AuthServiceError;
use super::{JwtManager, LoginRequest, TokenResponse};
use crate::domain::speaker::SpeakerProfile;
use crate::infrastructure::identity::IdentityProvider;
use crate::infrastructure::repositories::ProfileRepository;
use std::sync::Arc;

pub struct AuthService {
    identity: Arc<dyn IdentityProvider>,
    profile_repo: Arc<dyn ProfileRepository>,
    jwt: Arc<JwtManager>,
}

impl AuthService {
    pub fn new(
        identity: Arc<dyn IdentityProvider>,
        profile_repo: Arc<dyn ProfileRepository>,
        jwt: Arc<JwtManager>,
    ) -> Self {
        Self {
            identity,
            profile_repo,
            jwt,
        }
    }

    /// Sign in with the identity provider and issue a session token
    pub async fn login(&self, request: &LoginRequest) -> Result<TokenResponse, AuthServiceError> {
        let email = request.email.trim();
        let identity = self.identity.sign_in(email, &request.password).await?;

        // Identities whose registration never completed have no profile
        let profile = self
            .profile_repo
            .find_by_uid(&identity.uid)
            .await
            .map_err(|e| AuthServiceError::Dependency(e.to_string()))?
            .ok_or_else(|| {
                tracing::warn!(uid = %identity.uid, "Login for identity without speaker profile");
                AuthServiceError::InvalidCredentials
            })?;

        tracing::info!(speaker_id = %profile.speaker_id, "Speaker logged in");
        self.issue_token(&profile)
    }

    pub fn issue_token(&self, profile: &SpeakerProfile) -> Result<TokenResponse, AuthServiceError> {
        let token = self
            .jwt
            .generate_token(&profile.uid, &profile.email, profile.speaker_id)
            .map_err(|e| AuthServiceError::Dependency(e.to_string()))?;

        Ok(TokenResponse {
            token,
            expires_in: self.jwt.expires_in(),
            speaker_id: profile.speaker_id,
        })
    }
}
