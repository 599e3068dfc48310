//! Error types module
//!
//! Unified application error taxonomy. Every failure a request can hit
//! is one of these variants; the API layer maps them to an HTTP status
//! and a JSON body. Diagnostic payloads carried here are already
//! truncated by the producer, so rendering them to a client is safe.

/// Log level for error reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Expected errors such as validation failures.
    Debug,
    /// Recoverable operational issues.
    Warn,
    /// Unexpected failures.
    Error,
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("No file provided")]
    NoFileProvided,

    #[error("Invalid category: {0}")]
    UnknownCategory(String),

    #[error("Invalid file type for this category: {0}")]
    UnsupportedInputExtension(String),

    #[error("Unsupported target format: {0}")]
    UnsupportedTargetFormat(String),

    #[error("File MIME type {mime} does not match category {category}")]
    MimeMismatch { mime: String, category: String },

    #[error("{tool} is not installed. {category} conversion is not available.")]
    ToolUnavailable { tool: String, category: String },

    #[error("{tool} error: {detail}")]
    ToolInvocationFailed { tool: String, detail: String },

    #[error("Conversion timeout (max {0} seconds)")]
    ConversionTimeout(u64),

    #[error("Output file was not created")]
    OutputNotProduced,

    #[error("File not found")]
    NotFound,

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// HTTP status code this error renders as.
    pub fn http_status_code(&self) -> u16 {
        match self {
            AppError::NoFileProvided
            | AppError::UnknownCategory(_)
            | AppError::UnsupportedInputExtension(_)
            | AppError::UnsupportedTargetFormat(_)
            | AppError::MimeMismatch { .. } => 400,
            AppError::NotFound => 404,
            AppError::ToolUnavailable { .. }
            | AppError::ToolInvocationFailed { .. }
            | AppError::ConversionTimeout(_)
            | AppError::OutputNotProduced
            | AppError::Internal(_) => 500,
        }
    }

    /// Log level for this error.
    pub fn log_level(&self) -> LogLevel {
        match self {
            AppError::NoFileProvided
            | AppError::UnknownCategory(_)
            | AppError::UnsupportedInputExtension(_)
            | AppError::UnsupportedTargetFormat(_)
            | AppError::MimeMismatch { .. }
            | AppError::NotFound => LogLevel::Debug,
            AppError::ToolUnavailable { .. } | AppError::ConversionTimeout(_) => LogLevel::Warn,
            AppError::ToolInvocationFailed { .. }
            | AppError::OutputNotProduced
            | AppError::Internal(_) => LogLevel::Error,
        }
    }
}

impl From<crate::category::UnknownCategory> for AppError {
    fn from(err: crate::category::UnknownCategory) -> Self {
        AppError::UnknownCategory(err.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_errors_are_400() {
        assert_eq!(AppError::NoFileProvided.http_status_code(), 400);
        assert_eq!(
            AppError::UnknownCategory("archive".into()).http_status_code(),
            400
        );
        assert_eq!(
            AppError::MimeMismatch {
                mime: "text/plain".into(),
                category: "image".into(),
            }
            .http_status_code(),
            400
        );
    }

    #[test]
    fn test_conversion_errors_are_500() {
        assert_eq!(AppError::ConversionTimeout(300).http_status_code(), 500);
        assert_eq!(AppError::OutputNotProduced.http_status_code(), 500);
        assert_eq!(
            AppError::ToolUnavailable {
                tool: "ffmpeg".into(),
                category: "Audio".into(),
            }
            .http_status_code(),
            500
        );
    }

    #[test]
    fn test_not_found_is_404() {
        assert_eq!(AppError::NotFound.http_status_code(), 404);
    }

    #[test]
    fn test_log_levels() {
        assert_eq!(AppError::NoFileProvided.log_level(), LogLevel::Debug);
        assert_eq!(AppError::ConversionTimeout(600).log_level(), LogLevel::Warn);
        assert_eq!(
            AppError::Internal("boom".into()).log_level(),
            LogLevel::Error
        );
    }
}
