//! Student Registry - HTTP service entry point

use student_registry::{api, core, db};

use anyhow::Result;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration (handles CLI args, env vars, and config file)
    let config = match core::config::Config::load() {
        Ok(cfg) => cfg,
        Err(e) => {
            // Logging isn't initialized yet
            eprintln!("Failed to load configuration: {}", e);
            return Err(e.into());
        }
    };

    let _logger = match core::Logger::init(&config.logging) {
        Ok(logger) => logger,
        Err(e) => {
            eprintln!("Failed to initialize logging: {}", e);
            return Err(e);
        }
    };

    info!("Starting Student Registry v{}", student_registry::VERSION);
    info!(
        host = %config.server.host,
        port = config.server.port,
        "Server configuration"
    );
    info!(
        path = ?config.database.path,
        pool_size = config.database.connection_pool_size,
        "Database configuration"
    );
    info!(
        token_ttl = config.security.token_ttl,
        bcrypt_cost = config.security.bcrypt_cost,
        "Security configuration"
    );

    info!("Initializing database...");
    let db = Arc::new(db::DatabaseManager::new(
        &config.database.path,
        config.database.connection_pool_size,
        Duration::from_millis(config.database.busy_timeout),
    )?);
    info!("Database initialized successfully");

    let server = api::ApiServer::new(config, db)?;
    server.serve().await?;

    Ok(())
}
