use std::time::Duration;

use morph_core::Config;
use morph_processing::RetentionSweeper;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    morph_api::telemetry::init_tracing();

    // Load configuration
    let config = Config::from_env()?;

    // Initialize the application (directories, tool probing, routes)
    let (_state, router) = morph_api::setup::initialize_app(config.clone()).await?;

    // Background retention sweep over both transient directories
    let sweeper = RetentionSweeper::new(
        vec![config.upload_dir.clone(), config.converted_dir.clone()],
        Duration::from_secs(config.retention_max_age_secs),
        Duration::from_secs(config.sweep_interval_secs),
    );
    let _sweeper_handle = sweeper.start();

    // Start the server
    morph_api::setup::server::start_server(&config, router).await?;

    Ok(())
}
