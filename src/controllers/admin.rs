use axum::{
    extract::{Path, Query, State},
    http::header,
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::recording::{RecordingListQuery, RecordingResponse, RecordingService, UpdateRecordingStatusRequest};
use crate::domain::speaker::{SpeakerResponse, SpeakerService};
use crate::domain::speaker_id::{SpeakerId, SpeakerIdAllocator};
use crate::error::AppResult;

#[derive(Debug, Serialize, Deserialize)]
pub struct LastIssuedResponse {
    pub last_issued: Option<SpeakerId>,
}

/// Review endpoints, mounted behind the admin guard
pub struct AdminController {
    speaker_service: Arc<SpeakerService>,
    recording_service: Arc<RecordingService>,
    allocator: Arc<SpeakerIdAllocator>,
}

impl AdminController {
    pub fn new(
        speaker_service: Arc<SpeakerService>,
        recording_service: Arc<RecordingService>,
        allocator: Arc<SpeakerIdAllocator>,
    ) -> Self {
        Self {
            speaker_service,
            recording_service,
            allocator,
        }
    }

    /// GET /admin/speakers
    pub async fn list_speakers(
        State(controller): State<Arc<AdminController>>,
    ) -> AppResult<Json<Vec<SpeakerResponse>>> {
        let profiles = controller.speaker_service.list().await?;
        Ok(Json(profiles.into_iter().map(Into::into).collect()))
    }

    /// GET /admin/speakers/:speaker_id
    pub async fn get_speaker(
        State(controller): State<Arc<AdminController>>,
        Path(speaker_id): Path<String>,
    ) -> AppResult<Json<SpeakerResponse>> {
        let profile = controller.speaker_service.get_by_speaker_id(&speaker_id).await?;
        Ok(Json(profile.into()))
    }

    /// GET /admin/speaker-ids/last
    pub async fn last_speaker_id(
        State(controller): State<Arc<AdminController>>,
    ) -> AppResult<Json<LastIssuedResponse>> {
        let last_issued = controller.allocator.last_issued().await?;
        Ok(Json(LastIssuedResponse { last_issued }))
    }

    /// GET /admin/recordings?speaker_id=
    pub async fn list_recordings(
        State(controller): State<Arc<AdminController>>,
        Query(query): Query<RecordingListQuery>,
    ) -> AppResult<Json<Vec<RecordingResponse>>> {
        let recordings = controller
            .recording_service
            .list(query.speaker_id.as_deref().filter(|s| !s.is_empty()))
            .await?;
        Ok(Json(recordings.into_iter().map(Into::into).collect()))
    }

    /// GET /admin/recordings/:id/audio
    pub async fn download_audio(
        State(controller): State<Arc<AdminController>>,
        Path(id): Path<Uuid>,
    ) -> AppResult<impl IntoResponse> {
        let (recording, audio) = controller.recording_service.fetch_audio(id).await?;

        Ok((
            [
                (header::CONTENT_TYPE, recording.mime_type),
                (
                    header::CONTENT_DISPOSITION,
                    format!("attachment; filename=\"{}\"", recording.file_name),
                ),
            ],
            audio,
        ))
    }

    /// PATCH /admin/recordings/:id
    pub async fn update_recording_status(
        State(controller): State<Arc<AdminController>>,
        Path(id): Path<Uuid>,
        Json(request): Json<UpdateRecordingStatusRequest>,
    ) -> AppResult<Json<RecordingResponse>> {
        let recording = controller
            .recording_service
            .update_status(id, &request.status)
            .await?;
        Ok(Json(recording.into()))
    }
}
