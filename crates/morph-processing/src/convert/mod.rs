//! Format converters.
//!
//! One converter per media category, dispatched through a closed enum so
//! category handling is exhaustive at compile time. Each converter owns
//! its fixed flag tables and its view of tool availability; the common
//! wrapper enforces the output-exists contract and removes untrusted
//! partial output on failure.

mod audio;
mod document;
mod exec;
mod image;
mod video;

pub use audio::AudioConverter;
pub use document::DocumentConverter;
pub use image::ImageConverter;
pub use video::VideoConverter;

use morph_core::MediaCategory;
use std::path::Path;

use crate::tools::ToolCapabilities;

/// Failures a conversion attempt can produce.
#[derive(Debug, thiserror::Error)]
pub enum ConversionError {
    #[error("Unsupported format: {target}")]
    UnsupportedFormat { target: String },

    #[error("{tool} is not installed")]
    ToolUnavailable { tool: String },

    /// Tool ran and failed; `detail` is a bounded stderr excerpt.
    #[error("{tool} error: {detail}")]
    ToolFailed { tool: String, detail: String },

    #[error("Conversion timeout after {seconds} seconds")]
    Timeout { tool: String, seconds: u64 },

    #[error("Output file was not created")]
    OutputMissing,

    #[error("Image processing error: {0}")]
    ImageProcessing(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Category-dispatched converter.
pub enum Converter {
    Image(ImageConverter),
    Audio(AudioConverter),
    Video(VideoConverter),
    Document(DocumentConverter),
}

impl Converter {
    /// Build the converter for a category from the startup capability
    /// descriptor. Tool availability is baked in here, not re-probed.
    pub fn for_category(category: MediaCategory, tools: &ToolCapabilities) -> Self {
        match category {
            MediaCategory::Image => Converter::Image(ImageConverter::new()),
            MediaCategory::Audio => Converter::Audio(AudioConverter::new(tools.ffmpeg.clone())),
            MediaCategory::Video => Converter::Video(VideoConverter::new(tools.ffmpeg.clone())),
            MediaCategory::Document => {
                Converter::Document(DocumentConverter::new(tools.pandoc.clone()))
            }
        }
    }

    /// Target formats this converter can produce.
    pub fn supported_targets(&self) -> &'static [&'static str] {
        match self {
            Converter::Image(_) => image::TARGETS,
            Converter::Audio(_) => audio::TARGETS,
            Converter::Video(_) => video::TARGETS,
            Converter::Document(_) => document::TARGETS,
        }
    }

    /// Convert `input` into `output` in the requested target format.
    ///
    /// On any failure the output path is removed: partial output from a
    /// killed or failed tool is untrusted and must never be served.
    pub async fn convert(
        &self,
        input: &Path,
        output: &Path,
        target: &str,
    ) -> Result<(), ConversionError> {
        let target = target.trim().to_lowercase();

        let result = match self {
            Converter::Image(c) => c.convert(input, output, &target).await,
            Converter::Audio(c) => c.convert(input, output, &target).await,
            Converter::Video(c) => c.convert(input, output, &target).await,
            Converter::Document(c) => c.convert(input, output, &target).await,
        };

        match result {
            Ok(()) => {
                if tokio::fs::try_exists(output).await.unwrap_or(false) {
                    Ok(())
                } else {
                    Err(ConversionError::OutputMissing)
                }
            }
            Err(e) => {
                if let Err(cleanup_err) = tokio::fs::remove_file(output).await {
                    if cleanup_err.kind() != std::io::ErrorKind::NotFound {
                        tracing::warn!(
                            error = %cleanup_err,
                            "Failed to remove partial conversion output"
                        );
                    }
                }
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry;
    use crate::tools::ToolInfo;

    fn absent_tools() -> ToolCapabilities {
        ToolCapabilities {
            ffmpeg: ToolInfo::unavailable("ffmpeg"),
            pandoc: ToolInfo::unavailable("pandoc"),
        }
    }

    #[test]
    fn test_converter_targets_match_registry() {
        for cat in MediaCategory::ALL {
            let converter = Converter::for_category(cat, &absent_tools());
            assert_eq!(
                converter.supported_targets(),
                registry::supported_targets(cat),
                "converter/registry target mismatch for {cat}"
            );
        }
    }

    #[tokio::test]
    async fn test_audio_without_ffmpeg_is_tool_unavailable() {
        let converter = Converter::for_category(MediaCategory::Audio, &absent_tools());
        let err = converter
            .convert(Path::new("in.wav"), Path::new("out.mp3"), "mp3")
            .await
            .unwrap_err();
        assert!(matches!(err, ConversionError::ToolUnavailable { .. }));
    }

    #[tokio::test]
    async fn test_unsupported_target_fails_before_tool_check() {
        // An unknown target must fail fast even when the tool is absent.
        let converter = Converter::for_category(MediaCategory::Video, &absent_tools());
        let err = converter
            .convert(Path::new("in.mp4"), Path::new("out.xyz"), "xyz")
            .await
            .unwrap_err();
        assert!(matches!(err, ConversionError::UnsupportedFormat { .. }));
    }

    #[tokio::test]
    async fn test_target_is_case_insensitive() {
        let converter = Converter::for_category(MediaCategory::Audio, &absent_tools());
        let err = converter
            .convert(Path::new("in.wav"), Path::new("out.mp3"), "MP3")
            .await
            .unwrap_err();
        // Past the format gate, failing on availability instead.
        assert!(matches!(err, ConversionError::ToolUnavailable { .. }));
    }
}
