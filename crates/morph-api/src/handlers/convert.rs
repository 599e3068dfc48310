//! Conversion orchestration.
//!
//! Cheap checks (category, extension, target) run before any bytes hit
//! disk, the MIME sniff runs on the staged content, and the staged input
//! is deleted on every terminal path, success or failure. Artifacts are
//! keyed by a random token so concurrent requests cannot collide.

use axum::{
    extract::{Multipart, State},
    Json,
};
use bytes::Bytes;
use serde::Serialize;
use std::path::Path;
use std::sync::Arc;
use utoipa::ToSchema;
use uuid::Uuid;

use morph_core::{AppError, MediaCategory};
use morph_processing::convert::Converter;
use morph_processing::sniff::sniff_mime;
use morph_processing::validator::{sanitize_filename, ConversionValidator};

use crate::error::{conversion_app_error, ErrorResponse, HttpAppError};
use crate::state::AppState;

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ConvertResponse {
    pub success: bool,
    pub download_url: String,
    pub filename: String,
}

/// Raw multipart fields before validation.
#[derive(Default)]
struct ConversionRequest {
    data: Option<Bytes>,
    filename: Option<String>,
    target_format: Option<String>,
    category: Option<String>,
}

#[utoipa::path(
    post,
    path = "/api/convert",
    tag = "convert",
    request_body(content = inline(Object), content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Conversion succeeded", body = ConvertResponse),
        (status = 400, description = "Invalid input", body = ErrorResponse),
        (status = 500, description = "Conversion failed", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state, multipart), fields(operation = "convert"))]
pub async fn convert_file(
    State(state): State<Arc<AppState>>,
    multipart: Multipart,
) -> Result<Json<ConvertResponse>, HttpAppError> {
    let request = read_multipart(multipart).await?;

    let data = request.data.ok_or(AppError::NoFileProvided)?;
    let filename = request
        .filename
        .filter(|f| !f.is_empty())
        .ok_or(AppError::NoFileProvided)?;

    let category: MediaCategory = request
        .category
        .unwrap_or_default()
        .parse()
        .map_err(AppError::from)?;
    let target = request
        .target_format
        .unwrap_or_default()
        .trim()
        .to_lowercase();

    let validator = ConversionValidator::new(category);
    validator.validate_extension(&filename)?;
    validator.validate_target(&target)?;

    // Stage under a random token; the sanitized original name is kept
    // only as a human-readable suffix.
    let token = Uuid::new_v4();
    let input_name = format!("{}_{}", token, sanitize_filename(&filename));
    let input_path = state.config.upload_dir.join(&input_name);
    tokio::fs::write(&input_path, &data)
        .await
        .map_err(|e| AppError::Internal(format!("failed to stage upload: {e}")))?;

    // Content check runs against the staged bytes: the extension gate
    // above is advisory, this one is not.
    if let Err(e) = validator.validate_sniffed_mime(&sniff_mime(&data)) {
        remove_staged(&input_path).await;
        return Err(e.into());
    }

    let output_name = format!("{}_converted.{}", token, target);
    let output_path = state.config.converted_dir.join(&output_name);

    let converter = Converter::for_category(category, &state.tools);
    let result = converter.convert(&input_path, &output_path, &target).await;

    // The staged input never survives the attempt, success or failure.
    remove_staged(&input_path).await;

    result.map_err(|e| HttpAppError(conversion_app_error(e, category)))?;

    tracing::info!(
        category = %category,
        target = %target,
        artifact = %output_name,
        "Conversion succeeded"
    );

    Ok(Json(ConvertResponse {
        success: true,
        download_url: format!("/api/download/{}", output_name),
        filename: output_name,
    }))
}

async fn read_multipart(mut multipart: Multipart) -> Result<ConversionRequest, HttpAppError> {
    let mut request = ConversionRequest::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Internal(format!("multipart read failed: {e}")))?
    {
        match field.name() {
            Some("file") => {
                request.filename = field.file_name().map(|s| s.to_string());
                request.data = Some(
                    field
                        .bytes()
                        .await
                        .map_err(|e| AppError::Internal(format!("upload read failed: {e}")))?,
                );
            }
            Some("targetFormat") => {
                request.target_format = Some(field.text().await.unwrap_or_default());
            }
            Some("category") => {
                request.category = Some(field.text().await.unwrap_or_default());
            }
            _ => {}
        }
    }

    Ok(request)
}

async fn remove_staged(path: &Path) {
    if let Err(e) = tokio::fs::remove_file(path).await {
        if e.kind() != std::io::ErrorKind::NotFound {
            tracing::warn!(error = %e, "Failed to delete staged input");
        }
    }
}
