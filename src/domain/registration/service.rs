use super::error::RegistrationServiceError;
use super::{validate_registration, RegisterRequest};
use crate::domain::speaker::SpeakerProfile;
use crate::domain::speaker_id::SpeakerIdAllocator;
use crate::infrastructure::identity::{IdentityProvider, ProviderIdentity};
use crate::infrastructure::repositories::ProfileRepository;
use chrono::Utc;
use std::sync::Arc;

/// Creates an identity, a speaker id and a profile, or none of them
pub struct RegistrationService {
    identity: Arc<dyn IdentityProvider>,
    allocator: Arc<SpeakerIdAllocator>,
    profile_repo: Arc<dyn ProfileRepository>,
}

impl RegistrationService {
    pub fn new(
        identity: Arc<dyn IdentityProvider>,
        allocator: Arc<SpeakerIdAllocator>,
        profile_repo: Arc<dyn ProfileRepository>,
    ) -> Self {
        Self {
            identity,
            allocator,
            profile_repo,
        }
    }

    pub async fn register(
        &self,
        request: &RegisterRequest,
    ) -> Result<SpeakerProfile, RegistrationServiceError> {
        let input = validate_registration(request).map_err(RegistrationServiceError::Invalid)?;

        let account = self.identity.sign_up(&input.email, &input.password).await?;
        tracing::debug!(uid = %account.uid, "Identity created");

        let speaker_id = match self.allocator.allocate_next_id().await {
            Ok(id) => id,
            Err(e) => {
                tracing::error!(uid = %account.uid, error = %e, "Speaker id allocation failed");
                self.discard_identity(&account).await;
                return Err(e.into());
            }
        };

        let profile = SpeakerProfile {
            uid: account.uid.clone(),
            speaker_id,
            full_name: input.full_name,
            language: input.language,
            email: account.email.clone(),
            whatsapp_number: input.whatsapp_number,
            created_at: Utc::now(),
        };

        // The consumed speaker id is not handed back on failure
        if let Err(e) = self.profile_repo.create(&profile).await {
            tracing::error!(
                uid = %account.uid,
                speaker_id = %speaker_id,
                error = %e,
                "Failed to store speaker profile"
            );
            self.discard_identity(&account).await;
            return Err(e.into());
        }

        tracing::info!(
            uid = %profile.uid,
            speaker_id = %profile.speaker_id,
            language = %profile.language,
            "Speaker registered"
        );
        Ok(profile)
    }

    async fn discard_identity(&self, account: &ProviderIdentity) {
        if let Err(e) = self.identity.delete(account).await {
            tracing::error!(uid = %account.uid, error = %e, "Failed to delete identity after aborted registration");
        }
    }
}
