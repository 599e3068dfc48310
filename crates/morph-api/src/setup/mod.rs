//! Application initialization: directories, tool probing, routing.

pub mod routes;
pub mod server;

use anyhow::Result;
use axum::Router;
use std::sync::Arc;

use morph_core::Config;
use morph_processing::ToolCapabilities;

use crate::state::AppState;

/// Initialize the application: create the transient directories, probe
/// external tools, and build the router.
pub async fn initialize_app(config: Config) -> Result<(Arc<AppState>, Router)> {
    tokio::fs::create_dir_all(&config.upload_dir).await?;
    tokio::fs::create_dir_all(&config.converted_dir).await?;

    let tools = ToolCapabilities::detect(&config);
    let state = Arc::new(AppState {
        config: config.clone(),
        tools,
    });

    let router = routes::setup_routes(&config, state.clone())?;
    Ok((state, router))
}
