use axum::{
    extract::{Query, State},
    Extension, Json,
};
use std::sync::Arc;

use crate::domain::phrase::{PhraseQuery, PhraseResponse, PhraseService};
use crate::domain::speaker::{Language, SpeakerService};
use crate::error::{AppError, AppResult};
use crate::infrastructure::auth::AuthUser;

pub struct PhraseController {
    phrase_service: Arc<PhraseService>,
    speaker_service: Arc<SpeakerService>,
}

impl PhraseController {
    pub fn new(phrase_service: Arc<PhraseService>, speaker_service: Arc<SpeakerService>) -> Self {
        Self {
            phrase_service,
            speaker_service,
        }
    }

    /// GET /api/phrases?language= - A sentence to read aloud
    pub async fn get_phrase(
        State(controller): State<Arc<PhraseController>>,
        Extension(auth_user): Extension<AuthUser>,
        Query(query): Query<PhraseQuery>,
    ) -> AppResult<Json<PhraseResponse>> {
        let language = match query.language.as_deref().map(str::trim).filter(|l| !l.is_empty()) {
            Some(raw) => raw.parse::<Language>().map_err(AppError::BadRequest)?,
            None => {
                controller
                    .speaker_service
                    .get_by_uid(&auth_user.uid)
                    .await?
                    .language
            }
        };

        let phrase = controller.phrase_service.generate(language).await?;
        Ok(Json(PhraseResponse { language, phrase }))
    }
}
