//! Upload validation.
//!
//! Filename sanitization plus the per-request checks that run around
//! staging: extension and target format before any bytes touch disk,
//! sniffed MIME type after.

use morph_core::MediaCategory;
use std::path::Path;

use crate::registry;

/// Validation failures, each surfaced distinctly to the caller.
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("Missing file extension (filename: {0})")]
    MissingExtension(String),

    #[error("Invalid extension '{extension}' for category {category}")]
    UnsupportedExtension {
        extension: String,
        category: MediaCategory,
    },

    #[error("Unsupported target format '{target}' for category {category}")]
    UnsupportedTarget {
        target: String,
        category: MediaCategory,
    },

    #[error("File MIME type {mime} does not match category {category}")]
    MimeMismatch {
        mime: String,
        category: MediaCategory,
    },
}

/// Strip a filename down to something safe to join onto a directory.
///
/// Directory components are dropped, traversal sequences are rejected
/// outright, and anything outside `[A-Za-z0-9._-]` is replaced.
/// Degenerate results fall back to a fixed stub.
pub fn sanitize_filename(filename: &str) -> String {
    const MAX: usize = 255;
    let base = Path::new(filename)
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or(filename);
    if base.contains("..") {
        return "file".to_string();
    }
    let s: String = base
        .chars()
        .take(MAX)
        .map(|c| {
            if c.is_alphanumeric() || c == '.' || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();
    if s.trim_matches(['_', '.']).is_empty() {
        "file".to_string()
    } else {
        s
    }
}

/// Lowercased extension of a filename, if it has one.
pub fn file_extension(filename: &str) -> Option<String> {
    Path::new(filename)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
}

/// Per-category request validator, backed by the static registry.
#[derive(Debug, Clone, Copy)]
pub struct ConversionValidator {
    category: MediaCategory,
}

impl ConversionValidator {
    pub fn new(category: MediaCategory) -> Self {
        Self { category }
    }

    /// Check the declared filename's extension against the category
    /// whitelist. Runs before staging.
    pub fn validate_extension(&self, filename: &str) -> Result<(), ValidationError> {
        let extension = file_extension(filename)
            .ok_or_else(|| ValidationError::MissingExtension(filename.to_string()))?;

        if !registry::allowed_extensions(self.category).contains(&extension.as_str()) {
            return Err(ValidationError::UnsupportedExtension {
                extension,
                category: self.category,
            });
        }

        Ok(())
    }

    /// Check the requested target format against the category whitelist.
    /// Runs before staging.
    pub fn validate_target(&self, target: &str) -> Result<(), ValidationError> {
        let normalized = target.trim().to_lowercase();
        if normalized.is_empty()
            || !registry::supported_targets(self.category).contains(&normalized.as_str())
        {
            return Err(ValidationError::UnsupportedTarget {
                target: target.to_string(),
                category: self.category,
            });
        }
        Ok(())
    }

    /// Check the content-sniffed MIME type against the category's
    /// acceptable prefixes. Runs only after staging, since sniffing
    /// requires the actual bytes; defends against extension spoofing.
    pub fn validate_sniffed_mime(&self, mime: &str) -> Result<(), ValidationError> {
        let acceptable = registry::acceptable_mime_prefixes(self.category);
        if !acceptable.iter().any(|prefix| mime.starts_with(prefix)) {
            return Err(ValidationError::MimeMismatch {
                mime: mime.to_string(),
                category: self.category,
            });
        }
        Ok(())
    }
}
