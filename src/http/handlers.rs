use super::state::AppState;
use crate::error::Error;
use crate::recording::{format_duration, ContentKind, Language, Recording};
use crate::share::share_text;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{error, info};

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Debug, Serialize)]
pub struct RecordingSummary {
    pub id: i64,
    pub title: Option<String>,
    pub recorded_at: DateTime<Utc>,
    pub duration: String,
    pub has_transcription: bool,
    pub has_summary: bool,
    pub has_minutes: bool,
    pub has_analysis: bool,
    pub has_translation: bool,
}

impl From<&Recording> for RecordingSummary {
    fn from(rec: &Recording) -> Self {
        Self {
            id: rec.id,
            title: rec.title.clone(),
            recorded_at: rec.recorded_at(),
            duration: format_duration(rec.duration_millis),
            has_transcription: rec.transcript().is_some(),
            has_summary: rec.summary.is_some(),
            has_minutes: rec.minutes.is_some(),
            has_analysis: rec.analysis.is_some(),
            has_translation: rec.translation.is_some(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct GenerateRequest {
    pub kind: ContentKind,
}

#[derive(Debug, Deserialize)]
pub struct TranslateRequest {
    pub language: Language,
}

#[derive(Debug, Deserialize)]
pub struct SetTitleRequest {
    pub title: String,
}

#[derive(Debug, Serialize)]
pub struct ShareResponse {
    pub text: String,
}

#[derive(Debug, Serialize)]
pub struct CaptureStatusResponse {
    pub state: String,
    pub elapsed_secs: u64,
    pub elapsed: String,
}

#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub status: String,
}

#[derive(Debug, Serialize)]
pub struct ApiKeyStatusResponse {
    pub configured: bool,
}

#[derive(Debug, Deserialize)]
pub struct SetApiKeyRequest {
    pub api_key: String,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Map the error taxonomy onto HTTP statuses.
fn error_response(err: Error) -> Response {
    let status = match &err {
        Error::RecordingNotFound(_) => StatusCode::NOT_FOUND,
        Error::CredentialMissing | Error::TranscriptMissing => StatusCode::PRECONDITION_FAILED,
        Error::OperationInFlight(_) | Error::InvalidCaptureState { .. } => StatusCode::CONFLICT,
        Error::PermissionDenied => StatusCode::FORBIDDEN,
        Error::RemoteAuth(_)
        | Error::RemoteRequest(_)
        | Error::RemoteResponseMalformed(_)
        | Error::ContentGeneration(_)
        | Error::Translation(_) => StatusCode::BAD_GATEWAY,
        Error::Persistence(_) | Error::Capture(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };

    error!("Request failed: {}", err);

    (
        status,
        Json(ErrorResponse {
            error: err.to_string(),
        }),
    )
        .into_response()
}

// ============================================================================
// Recordings
// ============================================================================

/// GET /recordings
/// List all recordings, newest first.
pub async fn list_recordings(State(state): State<AppState>) -> Response {
    match state.store.list_all().await {
        Ok(recordings) => {
            let summaries: Vec<RecordingSummary> =
                recordings.iter().map(RecordingSummary::from).collect();
            (StatusCode::OK, Json(summaries)).into_response()
        }
        Err(e) => error_response(e),
    }
}

/// GET /recordings/:id
pub async fn get_recording(State(state): State<AppState>, Path(id): Path<i64>) -> Response {
    match state.store.load(id).await {
        Ok(Some(recording)) => (StatusCode::OK, Json(recording)).into_response(),
        Ok(None) => error_response(Error::RecordingNotFound(id)),
        Err(e) => error_response(e),
    }
}

/// DELETE /recordings/:id
/// Idempotent: deleting an absent id succeeds.
pub async fn delete_recording(State(state): State<AppState>, Path(id): Path<i64>) -> Response {
    match state.store.delete(id).await {
        Ok(()) => (
            StatusCode::OK,
            Json(StatusResponse {
                status: "deleted".to_string(),
            }),
        )
            .into_response(),
        Err(e) => error_response(e),
    }
}

/// POST /recordings/:id/title
pub async fn set_title(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(req): Json<SetTitleRequest>,
) -> Response {
    match state.store.set_title(id, req.title).await {
        Ok(recording) => (StatusCode::OK, Json(recording)).into_response(),
        Err(e) => error_response(e),
    }
}

/// GET /recordings/:id/share
/// Plain-text digest of the populated fields.
pub async fn share_recording(State(state): State<AppState>, Path(id): Path<i64>) -> Response {
    match state.store.load(id).await {
        Ok(Some(recording)) => (
            StatusCode::OK,
            Json(ShareResponse {
                text: share_text(&recording),
            }),
        )
            .into_response(),
        Ok(None) => error_response(Error::RecordingNotFound(id)),
        Err(e) => error_response(e),
    }
}

// ============================================================================
// Enrichment
// ============================================================================

/// POST /recordings/:id/generate
pub async fn generate_content(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(req): Json<GenerateRequest>,
) -> Response {
    info!("Generating {} for recording {}", req.kind, id);

    match state.enricher.generate(id, req.kind).await {
        Ok(recording) => (StatusCode::OK, Json(recording)).into_response(),
        Err(e) => error_response(e),
    }
}

/// POST /recordings/:id/translate
pub async fn translate_recording(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(req): Json<TranslateRequest>,
) -> Response {
    info!("Translating recording {} into {}", id, req.language);

    match state.enricher.translate(id, req.language).await {
        Ok(recording) => (StatusCode::OK, Json(recording)).into_response(),
        Err(e) => error_response(e),
    }
}

// ============================================================================
// Capture
// ============================================================================

/// GET /capture
/// Current capture state and the cosmetic elapsed counter.
pub async fn capture_status(State(state): State<AppState>) -> Response {
    let capture = state.capture.lock().await;
    let elapsed_secs = capture.elapsed_secs();

    (
        StatusCode::OK,
        Json(CaptureStatusResponse {
            state: capture.state().as_str().to_string(),
            elapsed_secs,
            elapsed: format_duration(elapsed_secs * 1000),
        }),
    )
        .into_response()
}

/// POST /capture/start
pub async fn start_capture(State(state): State<AppState>) -> Response {
    let mut capture = state.capture.lock().await;

    match capture.start().await {
        Ok(()) => (
            StatusCode::OK,
            Json(StatusResponse {
                status: "recording".to_string(),
            }),
        )
            .into_response(),
        Err(e) => error_response(e),
    }
}

/// POST /capture/stop
pub async fn stop_capture(State(state): State<AppState>) -> Response {
    let mut capture = state.capture.lock().await;

    match capture.stop().await {
        Ok(()) => (
            StatusCode::OK,
            Json(StatusResponse {
                status: "stopped".to_string(),
            }),
        )
            .into_response(),
        Err(e) => error_response(e),
    }
}

/// POST /capture/save
/// Transcribe the pending capture and persist it as a new recording. The
/// session is locked for the whole call, so duplicate saves are rejected
/// rather than raced.
pub async fn save_capture(State(state): State<AppState>) -> Response {
    let mut capture = state.capture.lock().await;

    match capture.save(&state.store, state.api.as_ref()).await {
        Ok(recording) => (StatusCode::OK, Json(recording)).into_response(),
        Err(e) => error_response(e),
    }
}

/// POST /capture/discard
pub async fn discard_capture(State(state): State<AppState>) -> Response {
    let mut capture = state.capture.lock().await;

    match capture.discard().await {
        Ok(()) => (
            StatusCode::OK,
            Json(StatusResponse {
                status: "discarded".to_string(),
            }),
        )
            .into_response(),
        Err(e) => error_response(e),
    }
}

// ============================================================================
// Settings
// ============================================================================

/// GET /settings/api-key
/// Reports only whether a credential is configured, never the key itself.
pub async fn get_api_key(State(state): State<AppState>) -> Response {
    match state.store.api_key().await {
        Ok(key) => (
            StatusCode::OK,
            Json(ApiKeyStatusResponse {
                configured: key.is_some(),
            }),
        )
            .into_response(),
        Err(e) => error_response(e),
    }
}

/// PUT /settings/api-key
pub async fn set_api_key(
    State(state): State<AppState>,
    Json(req): Json<SetApiKeyRequest>,
) -> Response {
    if req.api_key.trim().is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: "API key must not be blank".to_string(),
            }),
        )
            .into_response();
    }

    match state.store.set_api_key(&req.api_key).await {
        Ok(()) => {
            info!("API key updated");
            (
                StatusCode::OK,
                Json(StatusResponse {
                    status: "saved".to_string(),
                }),
            )
                .into_response()
        }
        Err(e) => error_response(e),
    }
}

/// GET /health
/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}
