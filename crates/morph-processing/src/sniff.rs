//! Content-based MIME detection.
//!
//! The declared filename and Content-Type header are attacker-controlled;
//! the magic bytes are not. Detection is signature-based via `infer`,
//! with a text fallback for formats that carry no magic number (plain
//! text, markdown, HTML, RTF all classify as `text/plain`).

/// Sniff the MIME type of a file from its leading bytes.
///
/// Never fails: bytes with no known signature come back as `text/plain`
/// when they decode as UTF-8, `application/octet-stream` otherwise.
pub fn sniff_mime(bytes: &[u8]) -> String {
    if let Some(kind) = infer::get(bytes) {
        return kind.mime_type().to_string();
    }

    // No magic-number match. Signature databases cannot fingerprint
    // plain text, so classify by decodability the way libmagic does.
    if std::str::from_utf8(bytes).is_ok() {
        "text/plain".to_string()
    } else {
        "application/octet-stream".to_string()
    }
}
