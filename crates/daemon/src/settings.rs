//! Daemon settings
//!
//! Defaults first, then `QUIESCE_*` environment variables:
//!
//! - `QUIESCE_WORKERS`: heartbeat workers to start (default 4)
//! - `QUIESCE_HEARTBEAT_MS`: interval between heartbeats (default 1000)
//! - `QUIESCE_CLOSE_TIMEOUT_MS`: shutdown bound (default 5000)
//! - `QUIESCE_LOG_FORMAT`: `pretty` or `json` (default pretty)

use anyhow::{Context, Result};
use config::{Config, Environment};
use quiesce_core::application::registry::constants::DEFAULT_CLOSE_TIMEOUT;
use serde::Deserialize;
use std::time::Duration;

const ENV_PREFIX: &str = "QUIESCE";
const DEFAULT_WORKERS: u64 = 4;
const DEFAULT_HEARTBEAT_MS: u64 = 1000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Pretty,
    Json,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DaemonConfig {
    pub workers: usize,
    pub heartbeat_ms: u64,
    pub close_timeout_ms: u64,
    pub log_format: LogFormat,
}

impl DaemonConfig {
    /// Load from defaults and the process environment
    pub fn load() -> Result<Self> {
        Self::from_env(Environment::with_prefix(ENV_PREFIX).try_parsing(true))
    }

    fn from_env(env: Environment) -> Result<Self> {
        let settings = Config::builder()
            .set_default("workers", DEFAULT_WORKERS)?
            .set_default("heartbeat_ms", DEFAULT_HEARTBEAT_MS)?
            .set_default("close_timeout_ms", DEFAULT_CLOSE_TIMEOUT.as_millis() as u64)?
            .set_default("log_format", "pretty")?
            .add_source(env)
            .build()
            .context("Failed to build configuration")?;

        let config: Self = settings
            .try_deserialize()
            .context("Invalid configuration")?;

        // tokio's interval panics on a zero period
        anyhow::ensure!(config.heartbeat_ms > 0, "heartbeat_ms must be non-zero");
        Ok(config)
    }

    pub fn heartbeat_interval(&self) -> Duration {
        Duration::from_millis(self.heartbeat_ms)
    }

    pub fn close_timeout(&self) -> Duration {
        Duration::from_millis(self.close_timeout_ms)
    }
}
