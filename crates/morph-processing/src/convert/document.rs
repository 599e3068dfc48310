//! Document conversion via pandoc, with a plain-text fallback tier.
//!
//! Plain-text targets degrade gracefully: when pandoc is absent or its
//! invocation fails, the bytes are re-read as (lossy) UTF-8 and written
//! through. A same-format text request never touches a tool at all.

use std::path::Path;
use std::time::Duration;

use super::exec::run_tool;
use super::ConversionError;
use crate::tools::ToolInfo;
use crate::validator::file_extension;

/// Hard wall-clock limit for one document conversion.
const TIMEOUT: Duration = Duration::from_secs(120);

pub(crate) const TARGETS: &[&str] = &["pdf", "docx", "txt", "rtf", "odt", "html", "md"];

pub struct DocumentConverter {
    pandoc: ToolInfo,
}

impl DocumentConverter {
    pub fn new(pandoc: ToolInfo) -> Self {
        Self { pandoc }
    }

    pub async fn convert(
        &self,
        input: &Path,
        output: &Path,
        target: &str,
    ) -> Result<(), ConversionError> {
        if !TARGETS.contains(&target) {
            return Err(ConversionError::UnsupportedFormat {
                target: target.to_string(),
            });
        }

        let input_ext = input
            .file_name()
            .and_then(|n| n.to_str())
            .and_then(file_extension)
            .unwrap_or_default();

        // Same-format text request: byte-for-byte copy, no tool.
        if input_ext == "txt" && target == "txt" {
            tokio::fs::copy(input, output).await?;
            return Ok(());
        }

        let Some(pandoc_path) = self.pandoc.path.as_deref().filter(|_| self.pandoc.available)
        else {
            if target == "txt" {
                return extract_text(input, output).await;
            }
            return Err(ConversionError::ToolUnavailable {
                tool: self.pandoc.name.clone(),
            });
        };

        let mut args = vec![
            input.to_string_lossy().to_string(),
            "-o".to_string(),
            output.to_string_lossy().to_string(),
        ];
        if target == "pdf" {
            args.push("--pdf-engine=pdflatex".to_string());
        }

        match run_tool("pandoc", pandoc_path, &args, TIMEOUT).await {
            Ok(()) => {
                if tokio::fs::try_exists(output).await.unwrap_or(false) {
                    Ok(())
                } else if target == "txt" {
                    extract_text(input, output).await
                } else {
                    Err(ConversionError::OutputMissing)
                }
            }
            // A timed-out tool is reported as such; the fallback is for
            // outright failures only.
            Err(e @ ConversionError::Timeout { .. }) => Err(e),
            Err(e) => {
                if target == "txt" {
                    tracing::debug!(error = %e, "pandoc failed, falling back to text extraction");
                    extract_text(input, output).await
                } else {
                    Err(e)
                }
            }
        }
    }
}

/// Best-effort text extraction: read as UTF-8 with undecodable sequences
/// replaced, write through unchanged.
async fn extract_text(input: &Path, output: &Path) -> Result<(), ConversionError> {
    let bytes = tokio::fs::read(input).await?;
    let text = String::from_utf8_lossy(&bytes);
    tokio::fs::write(output, text.as_bytes()).await?;
    Ok(())
}
