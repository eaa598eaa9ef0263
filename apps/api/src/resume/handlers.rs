//! Axum route handler for resume uploads.

use axum::{
    extract::{Multipart, State},
    Json,
};
use bytes::Bytes;
use serde::Serialize;
use tracing::info;

use crate::errors::AppError;
use crate::extraction::FileKind;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct UploadResumeResponse {
    /// Model output, passed through untouched.
    pub resume_data: String,
}

/// Multipart field that carries the resume.
const UPLOAD_FIELD: &str = "file";

/// An accepted upload: the filename has already been classified.
struct UploadedFile {
    filename: String,
    kind: FileKind,
    data: Bytes,
}

/// POST /upload_resume/
///
/// Validates the extension, extracts text, and hands it to the resume parser.
/// The two client errors (unsupported type, no text) exit before the parser
/// is reached; any parser failure becomes a 500 carrying its message.
pub async fn handle_upload_resume(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<UploadResumeResponse>, AppError> {
    let upload = read_upload(&mut multipart).await?;
    info!(
        "Received resume upload '{}' ({:?}, {} bytes)",
        upload.filename,
        upload.kind,
        upload.data.len()
    );

    let text = state.extractor.extract(upload.kind, upload.data).await?;
    if text.trim().is_empty() {
        return Err(AppError::NoTextExtracted);
    }

    let resume_data = state
        .parser
        .parse(&text)
        .await
        .map_err(|e| AppError::Parser(e.to_string()))?;

    Ok(Json(UploadResumeResponse { resume_data }))
}

/// Takes the form field named `file`; other fields are skipped. The extension
/// is checked before the field body is read.
async fn read_upload(multipart: &mut Multipart) -> Result<UploadedFile, AppError> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(UPLOAD_FIELD) {
            continue;
        }
        let filename = field
            .file_name()
            .map(str::to_owned)
            .ok_or(AppError::MissingFile)?;

        let kind = FileKind::from_filename(&filename).ok_or(AppError::UnsupportedFileType)?;
        let data = field.bytes().await?;

        return Ok(UploadedFile {
            filename,
            kind,
            data,
        });
    }

    Err(AppError::MissingFile)
}
