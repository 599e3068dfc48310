pub mod fixtures;

use axum_test::TestServer;
use std::sync::Arc;
use tempfile::TempDir;

use morph_api::state::AppState;
use morph_core::Config;
use morph_processing::{ToolCapabilities, ToolInfo};

/// Test application with isolated transient directories.
pub struct TestApp {
    pub server: TestServer,
    pub upload_dir: TempDir,
    pub converted_dir: TempDir,
}

impl TestApp {
    pub fn client(&self) -> &TestServer {
        &self.server
    }

    /// Number of files currently staged in the upload directory.
    pub fn staged_count(&self) -> usize {
        std::fs::read_dir(self.upload_dir.path()).unwrap().count()
    }
}

/// Setup a test application. External tools are treated as absent so
/// tests are deterministic on machines without ffmpeg/pandoc; the image
/// and plain-text paths run fully in-process.
pub fn setup_test_app() -> TestApp {
    let tools = ToolCapabilities {
        ffmpeg: ToolInfo::unavailable("ffmpeg"),
        pandoc: ToolInfo::unavailable("pandoc"),
    };
    let upload_dir = TempDir::new().expect("create upload dir");
    let converted_dir = TempDir::new().expect("create converted dir");

    let config = Config {
        upload_dir: upload_dir.path().to_path_buf(),
        converted_dir: converted_dir.path().to_path_buf(),
        ..Config::default()
    };

    let state = Arc::new(AppState {
        config: config.clone(),
        tools,
    });
    let router = morph_api::setup::routes::setup_routes(&config, state).expect("build router");

    TestApp {
        server: TestServer::new(router).expect("start test server"),
        upload_dir,
        converted_dir,
    }
}
