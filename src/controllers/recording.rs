use axum::{
    extract::{multipart::MultipartError, Multipart, State},
    http::StatusCode,
    Extension, Json,
};
use std::sync::Arc;

use crate::domain::recording::{RecordingResponse, RecordingService, RecordingUpload};
use crate::domain::speaker::SpeakerService;
use crate::error::{AppError, AppResult};
use crate::infrastructure::auth::AuthUser;

pub struct RecordingController {
    recording_service: Arc<RecordingService>,
    speaker_service: Arc<SpeakerService>,
}

impl RecordingController {
    pub fn new(recording_service: Arc<RecordingService>, speaker_service: Arc<SpeakerService>) -> Self {
        Self {
            recording_service,
            speaker_service,
        }
    }

    /// POST /api/recordings - Upload one recorded phrase (multipart)
    pub async fn upload(
        State(controller): State<Arc<RecordingController>>,
        Extension(auth_user): Extension<AuthUser>,
        mut multipart: Multipart,
    ) -> AppResult<(StatusCode, Json<RecordingResponse>)> {
        let mut upload = RecordingUpload::default();

        while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
            let name = field.name().unwrap_or_default().to_string();
            match name.as_str() {
                "audio" => {
                    upload.original_name = field.file_name().map(str::to_string);
                    upload.mime_type = field.content_type().map(str::to_string);
                    upload.audio = Some(field.bytes().await.map_err(multipart_error)?.to_vec());
                }
                "language" => upload.language = Some(field.text().await.map_err(multipart_error)?),
                "phrase_index" => {
                    upload.phrase_index = Some(field.text().await.map_err(multipart_error)?)
                }
                "phrase_text" => upload.phrase_text = Some(field.text().await.map_err(multipart_error)?),
                other => tracing::debug!(field = other, "Ignoring unknown multipart field"),
            }
        }

        let speaker = controller.speaker_service.get_by_uid(&auth_user.uid).await?;
        let recording = controller.recording_service.submit(&speaker, upload).await?;

        Ok((StatusCode::CREATED, Json(recording.into())))
    }
}

fn multipart_error(err: MultipartError) -> AppError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge(err.body_text())
    } else {
        AppError::BadRequest(format!("Malformed upload: {}", err.body_text()))
    }
}
