//! Configuration module
//!
//! Environment-driven configuration for the conversion service. Every
//! field has a default so the server starts with no environment at all;
//! a `.env` file is honored when present.

use std::env;
use std::path::PathBuf;

const SERVER_PORT: u16 = 8000;
const MAX_UPLOAD_SIZE_MB: usize = 100;
const RETENTION_MAX_AGE_SECS: u64 = 3600;
const SWEEP_INTERVAL_SECS: u64 = 300;

#[derive(Clone, Debug)]
pub struct Config {
    pub server_port: u16,
    pub cors_origins: Vec<String>,
    /// Transient staging area for uploaded inputs.
    pub upload_dir: PathBuf,
    /// Output area for converted artifacts, served by the download route.
    pub converted_dir: PathBuf,
    pub max_upload_size_bytes: usize,
    /// Maximum age a staged or converted file may reach before the
    /// sweeper deletes it.
    pub retention_max_age_secs: u64,
    pub sweep_interval_secs: u64,
    pub ffmpeg_path: String,
    pub pandoc_path: String,
}

impl Config {
    /// Load configuration from the environment (and `.env` if present).
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();

        Ok(Self {
            server_port: env::var("SERVER_PORT")
                .unwrap_or_else(|_| SERVER_PORT.to_string())
                .parse()
                .unwrap_or(SERVER_PORT),
            cors_origins: env::var("CORS_ORIGINS")
                .unwrap_or_else(|_| "*".to_string())
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect(),
            upload_dir: PathBuf::from(
                env::var("UPLOAD_DIR").unwrap_or_else(|_| "data/uploads".to_string()),
            ),
            converted_dir: PathBuf::from(
                env::var("CONVERTED_DIR").unwrap_or_else(|_| "data/converted".to_string()),
            ),
            max_upload_size_bytes: env::var("MAX_UPLOAD_SIZE_MB")
                .unwrap_or_else(|_| MAX_UPLOAD_SIZE_MB.to_string())
                .parse::<usize>()
                .unwrap_or(MAX_UPLOAD_SIZE_MB)
                * 1024
                * 1024,
            retention_max_age_secs: env::var("RETENTION_MAX_AGE_SECS")
                .unwrap_or_else(|_| RETENTION_MAX_AGE_SECS.to_string())
                .parse()
                .unwrap_or(RETENTION_MAX_AGE_SECS),
            sweep_interval_secs: env::var("SWEEP_INTERVAL_SECS")
                .unwrap_or_else(|_| SWEEP_INTERVAL_SECS.to_string())
                .parse()
                .unwrap_or(SWEEP_INTERVAL_SECS),
            ffmpeg_path: env::var("FFMPEG_PATH").unwrap_or_else(|_| "ffmpeg".to_string()),
            pandoc_path: env::var("PANDOC_PATH").unwrap_or_else(|_| "pandoc".to_string()),
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_port: SERVER_PORT,
            cors_origins: vec!["*".to_string()],
            upload_dir: PathBuf::from("data/uploads"),
            converted_dir: PathBuf::from("data/converted"),
            max_upload_size_bytes: MAX_UPLOAD_SIZE_MB * 1024 * 1024,
            retention_max_age_secs: RETENTION_MAX_AGE_SECS,
            sweep_interval_secs: SWEEP_INTERVAL_SECS,
            ffmpeg_path: "ffmpeg".to_string(),
            pandoc_path: "pandoc".to_string(),
        }
    }
}
