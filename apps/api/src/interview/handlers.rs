//! Axum route handlers for the interview API.

use axum::{
    extract::{Multipart, Path, State},
    Json,
};
use serde::Serialize;
use uuid::Uuid;

use crate::auth::AuthUser;
use crate::errors::AppError;
use crate::interview::pipeline::{admit, UploadedFile};
use crate::interview::retrieval::{fetch, RetrievalError};
use crate::models::artifact::QaEntry;
use crate::state::AppState;

const UPLOAD_FIELD: &str = "file";
const UPLOAD_SUCCESS_MESSAGE: &str = "Questions generated and stored successfully.";

#[derive(Debug, Serialize)]
pub struct UploadResumeResponse {
    pub message: String,
    pub question_count: usize,
    pub artifact_id: String,
}

#[derive(Debug, Serialize)]
pub struct InterviewQuestionsResponse {
    pub artifact_id: String,
    pub questions: Vec<QaEntry>,
}

/// POST /api/v1/interview/upload-resume
///
/// Runs the full pipeline on the `file` field. The declared type is checked before the
/// field body is read.
pub async fn handle_upload_resume(
    State(state): State<AppState>,
    user: AuthUser,
    mut multipart: Multipart,
) -> Result<Json<UploadResumeResponse>, AppError> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(UPLOAD_FIELD) {
            continue;
        }

        let filename = field.file_name().map(str::to_string);
        let content_type = field.content_type().map(str::to_string);
        admit(filename.as_deref(), content_type.as_deref())?;

        let bytes = field.bytes().await?;

        let summary = state
            .pipeline
            .process(
                UploadedFile {
                    filename,
                    content_type,
                    bytes,
                },
                &user.user_id,
            )
            .await?;

        return Ok(Json(UploadResumeResponse {
            message: UPLOAD_SUCCESS_MESSAGE.to_string(),
            question_count: summary.question_count,
            artifact_id: summary.artifact_id.to_string(),
        }));
    }

    Err(AppError::Validation(format!(
        "Multipart field '{UPLOAD_FIELD}' is required"
    )))
}

/// GET /api/v1/interview/questions/:artifact_id
///
/// Owner-only. An id that is not a UUID cannot exist and is reported as not found.
pub async fn handle_get_questions(
    State(state): State<AppState>,
    user: AuthUser,
    Path(artifact_id): Path<String>,
) -> Result<Json<InterviewQuestionsResponse>, AppError> {
    let id = Uuid::parse_str(&artifact_id).map_err(|_| RetrievalError::NotFound)?;
    let artifact = fetch(state.store.as_ref(), id, &user.user_id).await?;

    Ok(Json(InterviewQuestionsResponse {
        artifact_id: artifact.id.to_string(),
        questions: artifact.entries,
    }))
}
