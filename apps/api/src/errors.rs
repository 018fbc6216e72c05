use axum::{
    extract::multipart::MultipartError,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::interview::pipeline::PipelineError;
use crate::interview::retrieval::RetrievalError;
use crate::llm_client::InferenceError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Forbidden")]
    Forbidden,

    #[error("Unsupported media type: {0}")]
    UnsupportedMedia(String),

    #[error("Bad document: {0}")]
    BadDocument(String),

    /// Upstream non-success or unreachable. The message carries the upstream body verbatim.
    #[error("Upstream failure: {0}")]
    UpstreamFailure(String),

    #[error("Malformed upstream response: {0}")]
    MalformedResponse(String),

    #[error("No questions produced")]
    NoQuestionsProduced,

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Payload too large: {0}")]
    PayloadTooLarge(String),
}

impl From<PipelineError> for AppError {
    fn from(err: PipelineError) -> Self {
        match err {
            PipelineError::UnsupportedMedia(declared) => AppError::UnsupportedMedia(declared),
            PipelineError::BadDocument(e) => AppError::BadDocument(e.to_string()),
            PipelineError::UpstreamFailure(InferenceError::MalformedResponse(msg)) => {
                AppError::MalformedResponse(msg)
            }
            PipelineError::UpstreamFailure(e) => AppError::UpstreamFailure(e.to_string()),
            PipelineError::NoQuestionsProduced => AppError::NoQuestionsProduced,
            PipelineError::StorageFailure(e) => AppError::Storage(e.to_string()),
        }
    }
}

impl From<MultipartError> for AppError {
    fn from(err: MultipartError) -> Self {
        if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
            AppError::PayloadTooLarge(format!("Upload exceeds the size limit: {err}"))
        } else {
            AppError::Validation(format!("Invalid multipart payload: {err}"))
        }
    }
}

impl From<RetrievalError> for AppError {
    fn from(err: RetrievalError) -> Self {
        match err {
            RetrievalError::NotFound => {
                AppError::NotFound("Interview record not found".to_string())
            }
            RetrievalError::Forbidden => AppError::Forbidden,
            RetrievalError::StorageFailure(e) => AppError::Storage(e.to_string()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                "UNAUTHORIZED",
                "Invalid authentication credentials".to_string(),
            ),
            AppError::Forbidden => (
                StatusCode::FORBIDDEN,
                "FORBIDDEN",
                "Not authorized to view this interview".to_string(),
            ),
            AppError::UnsupportedMedia(declared) => (
                StatusCode::UNSUPPORTED_MEDIA_TYPE,
                "UNSUPPORTED_MEDIA",
                format!("Only PDF files are supported (got {declared})"),
            ),
            AppError::BadDocument(msg) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "BAD_DOCUMENT",
                msg.clone(),
            ),
            AppError::UpstreamFailure(msg) => {
                tracing::error!("Upstream failure: {msg}");
                (StatusCode::BAD_GATEWAY, "UPSTREAM_FAILURE", msg.clone())
            }
            AppError::MalformedResponse(msg) => {
                tracing::error!("Malformed upstream response: {msg}");
                (StatusCode::BAD_GATEWAY, "MALFORMED_RESPONSE", msg.clone())
            }
            AppError::NoQuestionsProduced => (
                StatusCode::BAD_GATEWAY,
                "NO_QUESTIONS_PRODUCED",
                "No questions parsed from model output".to_string(),
            ),
            AppError::Storage(msg) => {
                tracing::error!("Storage error: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "STORAGE_FAILURE",
                    "A storage error occurred".to_string(),
                )
            }
            AppError::PayloadTooLarge(msg) => (
                StatusCode::PAYLOAD_TOO_LARGE,
                "PAYLOAD_TOO_LARGE",
                msg.clone(),
            ),
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}
