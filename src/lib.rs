pub mod advice;
pub mod api;
pub mod config;
pub mod core_state;
pub mod db;
pub mod model;
pub mod pipeline;
pub mod report;

use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use crate::config::AppConfig;
use crate::core_state::{CoreState, StartupError};

/// Start the service and block until Ctrl-C.
pub async fn run() -> Result<(), StartupError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .init();

    tracing::info!("{} starting v{}", config::APP_NAME, config::APP_VERSION);

    let config = AppConfig::from_env()?;
    tracing::info!(
        addr = %config.addr,
        model_dir = %config.model_dir.display(),
        fuzzy_threshold = config.extractor.fuzzy_threshold,
        top_k = config.top_k,
        "Configuration loaded"
    );

    let addr = config.addr;
    let core = Arc::new(CoreState::load(config)?);
    let mut server = api::start_server(core, addr).await?;
    tracing::info!("Listening on http://{}", server.addr);

    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Cannot listen for Ctrl-C: {e}");
    }

    server.shutdown();
    server.stopped().await;
    Ok(())
}
