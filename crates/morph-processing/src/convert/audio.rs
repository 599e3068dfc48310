//! Audio conversion via ffmpeg.

use std::path::Path;
use std::time::Duration;

use super::exec::run_tool;
use super::ConversionError;
use crate::tools::ToolInfo;

/// Hard wall-clock limit for one audio conversion.
const TIMEOUT: Duration = Duration::from_secs(300);

pub(crate) const TARGETS: &[&str] = &["mp3", "wav", "flac", "aac", "ogg", "m4a"];

/// Codec flags per target format. Domain defaults chosen for acceptable
/// quality/compatibility trade-offs; not tunable per request.
fn codec_args(target: &str) -> &'static [&'static str] {
    match target {
        "mp3" => &["-codec:a", "libmp3lame", "-qscale:a", "2"],
        "wav" => &["-codec:a", "pcm_s16le"],
        "flac" => &["-codec:a", "flac"],
        "aac" => &["-codec:a", "aac", "-b:a", "192k"],
        "ogg" => &["-codec:a", "libvorbis", "-qscale:a", "5"],
        "m4a" => &["-codec:a", "aac", "-b:a", "192k"],
        _ => &[],
    }
}

pub struct AudioConverter {
    ffmpeg: ToolInfo,
}

impl AudioConverter {
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codec_args_per_target() {
        assert_eq!(
            codec_args("mp3"),
            &["-codec:a", "libmp3lame", "-qscale:a", "2"]
        );
        assert_eq!(codec_args("wav"), &["-codec:a", "pcm_s16le"]);
        assert_eq!(codec_args("aac"), &["-codec:a", "aac", "-b:a", "192k"]);
        assert_eq!(
            codec_args("ogg"),
            &["-codec:a", "libvorbis", "-qscale:a", "5"]
        );
    }

    #[test]
    fn test_every_target_has_codec_args() {
        for target in TARGETS {
            assert!(!codec_args(target).is_empty(), "no flags for {target}");
        }
    }

    #[tokio::test]
    async fn test_unsupported_target() {
        let converter = AudioConverter::new(ToolInfo::unavailable("ffmpeg"));
        let err = converter
            .convert(Path::new("a.wav"), Path::new("b.mid"), "mid")
            .await
            .unwrap_err();
        assert!(matches!(err, ConversionError::UnsupportedFormat { .. }));
    }
}
