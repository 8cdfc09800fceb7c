use tracing::debug;
use tracing_subscriber::EnvFilter;

use crate::config::AppConfig;

pub fn init_logging(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    debug!(log_filter = %config.log_filter, "logging initialized");
}
