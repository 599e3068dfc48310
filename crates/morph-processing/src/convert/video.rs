//! Video conversion via ffmpeg.

use std::path::Path;
use std::time::Duration;

use super::exec::run_tool;
use super::ConversionError;
use crate::tools::ToolInfo;

/// Hard wall-clock limit for one video conversion.
const TIMEOUT: Duration = Duration::from_secs(600);

pub(crate) const TARGETS: &[&str] = &["mp4", "avi", "mov", "wmv", "flv", "mkv"];

/// Codec flags per target container. libx264 + AAC where the container
/// allows it; the legacy containers keep their native codec pairs.
fn codec_args(target: &str) -> &'static [&'static str] {
    match target {
        "mp4" => &[
            "-codec:v", "libx264", "-preset", "medium", "-crf", "23", "-codec:a", "aac", "-b:a",
            "192k",
        ],
        "avi" => &["-codec:v", "libx264", "-codec:a", "libmp3lame", "-b:a", "192k"],
        "mov" => &["-codec:v", "libx264", "-codec:a", "aac", "-b:a", "192k"],
        "wmv" => &["-codec:v", "wmv2", "-codec:a", "wmav2", "-b:a", "192k"],
        "flv" => &["-codec:v", "libx264", "-codec:a", "aac", "-b:a", "128k"],
        "mkv" => &["-codec:v", "libx264", "-codec:a", "aac", "-b:a", "192k"],
        _ => &[],
    }
}

pub struct VideoConverter {
    ffmpeg: ToolInfo,
}

impl VideoConverter {
    pub fn new(ffmpeg: ToolInfo) -> Self {
        Self { ffmpeg }
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

        let Some(ffmpeg_path) = self.ffmpeg.path.as_deref().filter(|_| self.ffmpeg.available)
        else {
            return Err(ConversionError::ToolUnavailable {
                tool: self.ffmpeg.name.clone(),
            });
        };

        let mut args = vec![
            "-i".to_string(),
            input.to_string_lossy().to_string(),
            "-y".to_string(),
        ];
        args.extend(codec_args(target).iter().map(|s| s.to_string()));
        args.push(output.to_string_lossy().to_string());

        run_tool("ffmpeg", ffmpeg_path, &args, TIMEOUT).await
    }
}
