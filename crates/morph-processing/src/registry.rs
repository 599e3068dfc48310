//! Static format registry.
//!
//! Per-category whitelists: which input extensions are accepted, which
//! target formats can be produced, and which sniffed MIME prefixes the
//! uploaded bytes must match. Loaded into the binary at compile time and
//! never mutated.

use morph_core::MediaCategory;

const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "bmp", "webp", "tiff"];
const AUDIO_EXTENSIONS: &[&str] = &["mp3", "wav", "flac", "aac", "ogg", "m4a"];
const VIDEO_EXTENSIONS: &[&str] = &["mp4", "avi", "mov", "wmv", "flv", "mkv", "webm"];
const DOCUMENT_EXTENSIONS: &[&str] = &["pdf", "doc", "docx", "txt", "rtf", "odt", "html", "md"];

const IMAGE_TARGETS: &[&str] = &["jpg", "jpeg", "png", "webp", "gif", "bmp", "tiff"];
const AUDIO_TARGETS: &[&str] = &["mp3", "wav", "flac", "aac", "ogg", "m4a"];
const VIDEO_TARGETS: &[&str] = &["mp4", "avi", "mov", "wmv", "flv", "mkv"];
const DOCUMENT_TARGETS: &[&str] = &["pdf", "docx", "txt", "rtf", "odt", "html", "md"];

const IMAGE_MIME_PREFIXES: &[&str] = &["image/"];
const AUDIO_MIME_PREFIXES: &[&str] = &["audio/"];
const VIDEO_MIME_PREFIXES: &[&str] = &["video/"];
// Office formats sniff as application/vnd.* or application/msword; plain
// text, markdown, HTML and RTF all ride the text/ prefix.
const DOCUMENT_MIME_PREFIXES: &[&str] = &[
    "application/pdf",
    "application/msword",
    "application/vnd",
    "application/rtf",
    "text/",
];

/// Input extensions accepted for a category.
pub fn allowed_extensions(category: MediaCategory) -> &'static [&'static str] {
    match category {
        MediaCategory::Image => IMAGE_EXTENSIONS,
        MediaCategory::Audio => AUDIO_EXTENSIONS,
        MediaCategory::Video => VIDEO_EXTENSIONS,
        MediaCategory::Document => DOCUMENT_EXTENSIONS,
    }
}

/// Target formats a category can be converted to.
pub fn supported_targets(category: MediaCategory) -> &'static [&'static str] {
    match category {
        MediaCategory::Image => IMAGE_TARGETS,
        MediaCategory::Audio => AUDIO_TARGETS,
        MediaCategory::Video => VIDEO_TARGETS,
        MediaCategory::Document => DOCUMENT_TARGETS,
    }
}

/// Sniffed-MIME prefixes the uploaded bytes must match for a category.
pub fn acceptable_mime_prefixes(category: MediaCategory) -> &'static [&'static str] {
    match category {
        MediaCategory::Image => IMAGE_MIME_PREFIXES,
        MediaCategory::Audio => AUDIO_MIME_PREFIXES,
        MediaCategory::Video => VIDEO_MIME_PREFIXES,
        MediaCategory::Document => DOCUMENT_MIME_PREFIXES,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allowed_extensions_per_category() {
        assert!(allowed_extensions(MediaCategory::Image).contains(&"png"));
        assert!(allowed_extensions(MediaCategory::Audio).contains(&"flac"));
        assert!(allowed_extensions(MediaCategory::Video).contains(&"webm"));
        assert!(allowed_extensions(MediaCategory::Document).contains(&"md"));
        assert!(!allowed_extensions(MediaCategory::Image).contains(&"mp3"));
    }

    #[test]
    fn test_supported_targets_per_category() {
        assert!(supported_targets(MediaCategory::Image).contains(&"webp"));
        assert!(supported_targets(MediaCategory::Audio).contains(&"ogg"));
        assert!(supported_targets(MediaCategory::Video).contains(&"mkv"));
        assert!(supported_targets(MediaCategory::Document).contains(&"pdf"));
        // webm is accepted as input but not produced as output
        assert!(!supported_targets(MediaCategory::Video).contains(&"webm"));
        // legacy .doc is read-only
        assert!(!supported_targets(MediaCategory::Document).contains(&"doc"));
    }

    #[test]
    fn test_mime_prefixes() {
        assert_eq!(acceptable_mime_prefixes(MediaCategory::Image), &["image/"]);
        assert!(acceptable_mime_prefixes(MediaCategory::Document)
            .contains(&"application/pdf"));
        assert!(acceptable_mime_prefixes(MediaCategory::Document).contains(&"text/"));
    }

    #[test]
    fn test_every_target_has_a_table_entry() {
        for cat in MediaCategory::ALL {
            assert!(!supported_targets(cat).is_empty());
            assert!(!allowed_extensions(cat).is_empty());
            assert!(!acceptable_mime_prefixes(cat).is_empty());
        }
    }
}
