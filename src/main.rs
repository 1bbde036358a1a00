//! # Files Manager
//!
//! A file-storage server with token sessions, a folder hierarchy and
//! public/private visibility.
//!
//! This is the application entry point that initializes:
//! - Configuration loading
//! - Tracing/logging subsystem
//! - Database connection pool and migrations
//! - Redis client
//! - HTTP server

use anyhow::Result;
use tracing::info;

use files_manager::config::Settings;
use files_manager::startup::Application;

#[tokio::main]
async fn main() -> Result<()> {
    // Configuration first: it decides the log format
    let settings = Settings::load()?;

    // Initialize tracing subscriber for structured logging
    files_manager::telemetry::init_tracing(settings.log.json);

    info!("Starting Files Manager...");
    info!(
        host = %settings.server.host,
        port = %settings.server.port,
        environment = %settings.environment,
        folder_path = %settings.storage.folder_path,
        "Configuration loaded"
    );

    // Build and run the application
    let application = Application::build(settings).await?;

    info!("Server ready to accept connections");
    application.run_until_stopped().await?;

    Ok(())
}
