use axum::{extract::State, Extension, Json};
use std::sync::Arc;

use crate::domain::speaker::{SpeakerResponse, SpeakerService};
use crate::error::AppResult;
use crate::infrastructure::auth::AuthUser;

pub struct SpeakerController {
    speaker_service: Arc<SpeakerService>,
}

impl SpeakerController {
    pub fn new(speaker_service: Arc<SpeakerService>) -> Self {
        Self { speaker_service }
    }

    /// GET /api/me - Profile of the calling speaker
    pub async fn get_me(
        State(controller): State<Arc<SpeakerController>>,
        Extension(auth_user): Extension<AuthUser>,
    ) -> AppResult<Json<SpeakerResponse>> {
        let profile = controller.speaker_service.get_by_uid(&auth_user.uid).await?;
        Ok(Json(profile.into()))
    }
}
