//! Artifact download.
//!
//! Serves converted artifacts by exact filename. The sweeper may delete
//! an artifact at any moment, so existence is checked per request and a
//! vanished file is a plain 404, never an error.

use axum::{
    body::Body,
    extract::{Path, State},
    http::{header, StatusCode},
    response::Response,
};
use std::sync::Arc;
use tokio_util::io::ReaderStream;

use morph_core::AppError;

use crate::error::{ErrorResponse, HttpAppError};
use crate::state::AppState;

#[utoipa::path(
    get,
    path = "/api/download/{filename}",
    tag = "download",
    params(
        ("filename" = String, Path, description = "Artifact filename from a conversion response")
    ),
    responses(
        (status = 200, description = "Artifact file", content_type = "application/octet-stream"),
        (status = 404, description = "File not found", body = ErrorResponse)
    )
)]
pub async fn download_file(
    State(state): State<Arc<AppState>>,
    Path(filename): Path<String>,
) -> Result<Response, HttpAppError> {
    // Artifact names are flat tokens; anything path-like is not ours.
    if filename.contains('/') || filename.contains('\\') || filename.contains("..") {
        return Err(AppError::NotFound.into());
    }

    let path = state.config.converted_dir.join(&filename);

    let metadata = match tokio::fs::metadata(&path).await {
        Ok(m) if m.is_file() => m,
        _ => return Err(AppError::NotFound.into()),
    };

    let file = match tokio::fs::File::open(&path).await {
        Ok(f) => f,
        // Lost the race with the sweeper between stat and open.
        Err(_) => return Err(AppError::NotFound.into()),
    };

    tracing::debug!(artifact = %filename, size = metadata.len(), "Serving artifact");

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, "application/octet-stream")
        .header(header::CONTENT_LENGTH, metadata.len())
        .header(
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", filename),
        )
        .body(Body::from_stream(ReaderStream::new(file)))
        .map_err(|e| HttpAppError(AppError::Internal(e.to_string())))
}
