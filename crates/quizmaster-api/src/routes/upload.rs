//! Document upload.
//!
//! The uploaded file goes to the ingestion collaborator; a `Ready` outcome
//! starts a fresh session with the returned bank.

use axum::extract::{DefaultBodyLimit, Multipart, State};
use axum::{Json, Router, routing::post};
use quizmaster_core::clock::Clock;
use quizmaster_core::error::DomainError;
use quizmaster_ingest::domain::document::{ADVISORY_MAX_BYTES, UploadedDocument};
use quizmaster_ingest::domain::outcome::IngestionOutcome;
use quizmaster_quiz::application::query_handlers::SessionView;
use serde::Serialize;
use tracing::{info, instrument, warn};

use crate::error::ApiError;
use crate::shell::{TaskStatus, UploadTask, with_shell};
use crate::state::AppState;

/// Multipart field that carries the document.
pub const FILE_FIELD: &str = "file";

/// Hard request body cap; the document size limit itself is advisory.
const BODY_LIMIT_BYTES: usize = ADVISORY_MAX_BYTES * 4;

/// Response body for POST /api/v1/upload.
#[derive(Debug, Serialize)]
pub struct UploadResponse {
    /// Always `true`.
    pub success: bool,
    /// Human-readable result.
    pub message: String,
    /// The session started from the uploaded document.
    pub session: SessionView,
}

async fn read_document(mut multipart: Multipart) -> Result<Option<UploadedDocument>, DomainError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| DomainError::InvalidInput(format!("malformed multipart body: {e}")))?
    {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }
        let file_name = field.file_name().unwrap_or("upload").to_owned();
        let content_type = field.content_type().map(str::to_owned);
        let bytes = field
            .bytes()
            .await
            .map_err(|e| DomainError::InvalidInput(format!("failed to read upload: {e}")))?;
        return Ok(Some(UploadedDocument::new(
            file_name,
            content_type,
            bytes.to_vec(),
        )));
    }
    Ok(None)
}

fn record_upload(state: &AppState, file_name: &str, status: TaskStatus) {
    let updated_at = state.clock.now();
    with_shell(&state.shell, |shell| {
        shell.upload = Some(UploadTask {
            file_name: file_name.to_owned(),
            status,
            updated_at,
        });
    });
}

/// POST /api/v1/upload
#[instrument(skip(state, multipart))]
async fn upload_document(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<UploadResponse>, ApiError> {
    let document = read_document(multipart)
        .await?
        .ok_or_else(|| DomainError::InvalidInput("No file uploaded".to_owned()))?;
    let file_name = document.file_name.clone();

    info!(%file_name, size = document.len(), "handling document upload");
    record_upload(&state, &file_name, TaskStatus::Pending);

    let bank = match state.ingestion.ingest(document).await {
        IngestionOutcome::Ready(bank) => bank,
        IngestionOutcome::Failed(reason) => {
            warn!(%file_name, %reason, "document ingestion failed");
            record_upload(&state, &file_name, TaskStatus::Failed(reason.clone()));
            return Err(DomainError::Collaborator(reason).into());
        }
    };

    let session = match state.runtime.start(bank, state.default_duration_seconds) {
        Ok(session) => session,
        Err(err) => {
            record_upload(&state, &file_name, TaskStatus::Failed(err.to_string()));
            return Err(err.into());
        }
    };
    record_upload(&state, &file_name, TaskStatus::Done);
    with_shell(&state.shell, |shell| shell.celebration = None);

    Ok(Json(UploadResponse {
        success: true,
        message: "File uploaded successfully".to_owned(),
        session,
    }))
}

/// Returns the router for document uploads.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/v1/upload", post(upload_document))
        .layer(DefaultBodyLimit::max(BODY_LIMIT_BYTES))
}
