pub mod api;
pub mod config;
pub mod core_state;
pub mod db;
pub mod intake;
pub mod models;

use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use crate::config::{ConfigError, IntakeConfig};
use crate::core_state::{CoreError, CoreState};

/// Fatal startup failures.
#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Core(#[from] CoreError),
    #[error("Cannot start server: {0}")]
    Server(#[from] std::io::Error),
}

/// Resolve configuration, migrate the database and serve until Ctrl-C.
pub async fn run() -> Result<(), StartupError> {
    let config = IntakeConfig::from_env()?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&config.log_filter))
        .init();

    tracing::info!("{} starting v{}", config::APP_NAME, config::APP_VERSION);

    let bind_addr = config.bind_addr;
    let core = Arc::new(CoreState::initialize(config)?);
    let mut server = api::start_server(core, bind_addr).await?;
    tracing::info!(addr = %server.session.server_addr, "Accepting webhooks on /process");

    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Cannot listen for shutdown signal: {e}");
    }
    server.shutdown();
    server.stopped().await;
    Ok(())
}
