//! HTTP error response conversion
//!
//! Wraps the core `AppError` so it can implement `IntoResponse` (orphan
//! rules), maps the processing-layer domain errors into it, and renders
//! every failure as the `{"error": "..."}` JSON body clients see.
//! Diagnostics reaching this layer are already truncated; filesystem
//! paths never appear in a rendered message.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use morph_core::{AppError, LogLevel, MediaCategory};
use morph_processing::{ConversionError, ValidationError};
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

/// Wrapper type for AppError to implement IntoResponse.
#[derive(Debug)]
pub struct HttpAppError(pub AppError);

impl From<AppError> for HttpAppError {
    fn from(err: AppError) -> Self {
        HttpAppError(err)
    }
}

impl From<ValidationError> for HttpAppError {
    fn from(err: ValidationError) -> Self {
        let app = match err {
            ValidationError::MissingExtension(filename) => {
                AppError::UnsupportedInputExtension(filename)
            }
            ValidationError::UnsupportedExtension { extension, .. } => {
                AppError::UnsupportedInputExtension(extension)
            }
            ValidationError::UnsupportedTarget { target, .. } => {
                AppError::UnsupportedTargetFormat(target)
            }
            ValidationError::MimeMismatch { mime, category } => AppError::MimeMismatch {
                mime,
                category: category.to_string(),
            },
        };
        HttpAppError(app)
    }
}

/// Map a converter failure to the application taxonomy. The category is
/// threaded in because tool-unavailable messages name the media class
/// whose conversions are out of service.
pub fn conversion_app_error(err: ConversionError, category: MediaCategory) -> AppError {
    match err {
        ConversionError::UnsupportedFormat { target } => AppError::UnsupportedTargetFormat(target),
        ConversionError::ToolUnavailable { tool } => AppError::ToolUnavailable {
            tool,
            category: category.to_string(),
        },
        ConversionError::ToolFailed { tool, detail } => {
            AppError::ToolInvocationFailed { tool, detail }
        }
        ConversionError::Timeout { seconds, .. } => AppError::ConversionTimeout(seconds),
        ConversionError::OutputMissing => AppError::OutputNotProduced,
        ConversionError::ImageProcessing(detail) => AppError::ToolInvocationFailed {
            tool: "image".to_string(),
            detail,
        },
        ConversionError::Io(e) => AppError::Internal(e.to_string()),
    }
}

fn log_error(error: &AppError) {
    match error.log_level() {
        LogLevel::Debug => tracing::debug!(error = %error, "Request failed"),
        LogLevel::Warn => tracing::warn!(error = %error, "Request failed"),
        LogLevel::Error => tracing::error!(error = %error, "Request failed"),
    }
}

impl IntoResponse for HttpAppError {
    fn into_response(self) -> Response {
        let app_error = &self.0;

        let status = StatusCode::from_u16(app_error.http_status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        log_error(app_error);

        let body = Json(ErrorResponse {
            error: app_error.to_string(),
        });

        (status, body).into_response()
    }
}
