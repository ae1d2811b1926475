//! Quiesce - Demo Daemon
//! Starts heartbeat workers, waits for Ctrl+C, then shuts them all down

mod heartbeat;
mod settings;

use anyhow::Result;
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use heartbeat::HeartbeatWorker;
use quiesce_core::application::registry::constants::ANONYMOUS_WORKER_PREFIX;
use quiesce_core::port::SequentialIdProvider;
use quiesce_core::{AppError, Registry};
use settings::{DaemonConfig, LogFormat};

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Load configuration
    let config = DaemonConfig::load()?;

    // 2. Initialize logging
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("quiesce=info"));

    match config.log_format {
        LogFormat::Json => {
            // Production: JSON structured logging
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer().json())
                .init();
        }
        LogFormat::Pretty => {
            // Development: Pretty formatting with colors
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer().pretty())
                .init();
        }
    }

    info!(
        "Quiesce daemon v{} (core v{}) starting...",
        env!("CARGO_PKG_VERSION"),
        quiesce_core::VERSION
    );
    info!(
        workers = config.workers,
        heartbeat_ms = config.heartbeat_ms,
        close_timeout_ms = config.close_timeout_ms,
        "Configuration loaded"
    );

    // 3. Register workers
    let mut registry =
        Registry::with_id_provider(Arc::new(SequentialIdProvider::new(ANONYMOUS_WORKER_PREFIX)));
    for _ in 0..config.workers {
        registry.register(HeartbeatWorker::new(config.heartbeat_interval()));
    }
    info!(workers = registry.len(), "Workers running");
    info!("Press Ctrl+C to shutdown");

    // 4. Wait for shutdown signal
    tokio::signal::ctrl_c().await?;
    info!("Shutdown signal received. Stopping workers...");

    // 5. Graceful shutdown
    match registry.close_all_within(config.close_timeout()).await {
        Ok(()) => info!("Shutdown complete."),
        Err(AppError::Unreachable(names)) => {
            error!(?names, "Some workers had already exited");
        }
        Err(e) => {
            error!(error = %e, "Shutdown incomplete");
            return Err(e.into());
        }
    }

    Ok(())
}
