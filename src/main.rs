use std::sync::Arc;

use anyhow::{Context, Result};

use robots::app::App;
use robots::config::{self, Config};
use robots::logging::{self, LogWindowSource, Logger};

#[tokio::main]
async fn main() -> Result<()> {
    // Ensure config directory exists
    config::ensure_directories()?;
    let config = Config::load()?;

    // Shared log that the log window displays
    let source = LogWindowSource::with_policy(config.log_capacity, config.listener_fault_policy)
        .context("Invalid log configuration")?;
    let logger = Logger::install_global(Logger::new(Arc::new(source)))?.clone();

    // Route tracing BEFORE any tracing calls
    logging::init_tracing(Arc::clone(logger.default_source()), &config.log_filter)?;

    tracing::info!("Config loaded from {}", config::config_file_path().display());

    // Run the application
    let mut app = App::new(config, logger)?;
    app.run().await
}
