//! Tracing initialization

use tracing_subscriber::EnvFilter;

use crate::{config::Config, error::Result};

/// Initialize JSON tracing with an env-filter from the configured log level
pub fn init_tracing(config: &Config) -> Result<()> {
    let log_level = config.service.log_level.clone();

    let initialized = tracing_subscriber::fmt()
        .json()
        .with_env_filter(EnvFilter::try_new(&log_level).unwrap_or_else(|_| EnvFilter::new("info")))
        .try_init()
        .is_ok();

    if initialized {
        tracing::info!("Tracing initialized for service: {}", config.service.name);
    }

    Ok(())
}
