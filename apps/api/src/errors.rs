use axum::{
    extract::multipart::MultipartError,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::extraction::ExtractionError;

const INTERNAL_SERVER_ERROR: &str = "Internal Server Error";

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
/// Every variant renders as `{"detail": "..."}`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Unsupported file type")]
    UnsupportedFileType,

    #[error("Could not extract text from file")]
    NoTextExtracted,

    #[error("No file provided")]
    MissingFile,

    #[error("Malformed multipart body: {0}")]
    Multipart(#[from] MultipartError),

    #[error("Extraction error: {0}")]
    Extraction(#[from] ExtractionError),

    /// Resume parsing failed. The message is returned to the caller as-is.
    #[error("{0}")]
    Parser(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, detail) = match &self {
            AppError::UnsupportedFileType | AppError::NoTextExtracted => {
                (StatusCode::BAD_REQUEST, self.to_string())
            }
            AppError::MissingFile => (StatusCode::UNPROCESSABLE_ENTITY, self.to_string()),
            AppError::Multipart(e) => (e.status(), self.to_string()),
            AppError::Extraction(e) => {
                tracing::error!("Extraction error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    INTERNAL_SERVER_ERROR.to_string(),
                )
            }
            AppError::Parser(msg) => {
                tracing::error!("Resume parsing error: {msg}");
                (StatusCode::INTERNAL_SERVER_ERROR, msg.clone())
            }
        };

        (status, Json(json!({ "detail": detail }))).into_response()
    }
}
