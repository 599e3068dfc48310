//! External tool discovery.
//!
//! Availability of the command-line collaborators (ffmpeg, pandoc) is
//! resolved once at startup into a capability descriptor; converters are
//! constructed from it and never re-probe per call.

use morph_core::Config;
use std::path::{Path, PathBuf};

/// Resolved information about one external tool.
#[derive(Debug, Clone)]
pub struct ToolInfo {
    /// Program name, e.g. `ffmpeg`.
    pub name: String,
    /// Whether the tool was found at startup.
    pub available: bool,
    /// Resolved path to invoke, when available.
    pub path: Option<PathBuf>,
}

impl ToolInfo {
    /// Probe a tool: a configured path wins if it exists, otherwise the
    /// executable search path is consulted.
    pub fn detect(name: &str, configured: &str) -> Self {
        let path = resolve(name, configured);
        Self {
            name: name.to_string(),
            available: path.is_some(),
            path,
        }
    }

    /// A descriptor for a tool known to be absent. Used in tests.
    pub fn unavailable(name: &str) -> Self {
        Self {
            name: name.to_string(),
            available: false,
            path: None,
        }
    }
}

fn resolve(name: &str, configured: &str) -> Option<PathBuf> {
    let configured_path = Path::new(configured);
    // An explicit path (anything beyond a bare program name) must exist.
    if configured_path.components().count() > 1 {
        return configured_path.exists().then(|| configured_path.to_path_buf());
    }
    which::which(if configured.is_empty() { name } else { configured }).ok()
}

/// Tool availability for the whole process, probed once at startup.
#[derive(Debug, Clone)]
pub struct ToolCapabilities {
    pub ffmpeg: ToolInfo,
    pub pandoc: ToolInfo,
}

impl ToolCapabilities {
    pub fn detect(config: &Config) -> Self {
        let caps = Self {
            ffmpeg: ToolInfo::detect("ffmpeg", &config.ffmpeg_path),
            pandoc: ToolInfo::detect("pandoc", &config.pandoc_path),
        };
        tracing::info!(
            ffmpeg = caps.ffmpeg.available,
            pandoc = caps.pandoc.available,
            "External tool availability resolved"
        );
        caps
    }
}
