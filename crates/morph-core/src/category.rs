//! Media category model.
//!
//! Categories are a closed set: every request is dispatched through this
//! enum, so an unhandled category is a compile error rather than a missed
//! branch in a string lookup.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Top-level media class. Determines which converter and which
/// extension/MIME whitelist apply to a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaCategory {
    Image,
    Audio,
    Video,
    Document,
}

impl MediaCategory {
    pub const ALL: [MediaCategory; 4] = [
        MediaCategory::Image,
        MediaCategory::Audio,
        MediaCategory::Video,
        MediaCategory::Document,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MediaCategory::Image => "image",
            MediaCategory::Audio => "audio",
            MediaCategory::Video => "video",
            MediaCategory::Document => "document",
        }
    }
}

impl fmt::Display for MediaCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error for an unrecognized category token.
#[derive(Debug, Clone, thiserror::Error)]
#[error("unknown category: {0}")]
pub struct UnknownCategory(pub String);

impl FromStr for MediaCategory {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "image" => Ok(MediaCategory::Image),
            "audio" => Ok(MediaCategory::Audio),
            "video" => Ok(MediaCategory::Video),
            "document" => Ok(MediaCategory::Document),
            other => Err(UnknownCategory(other.to_string())),
        }
    }
}
