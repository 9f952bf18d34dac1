//! Logging Adapter - `Logger` Port over `tracing`
//!
//! Also owns subscriber initialisation for the binary.

use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use crate::config::LoggingConfig;
use crate::ports::logger::Logger;

/// Production logger: forwards to `tracing`, exits on `fatal`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLogger;

impl Logger for TracingLogger {
    fn info(&self, message: &str) {
        info!("{message}");
    }

    fn error(&self, message: &str) {
        error!("{message}");
    }

    fn fatal(&self, message: &str) {
        error!(fatal = true, "{message}");
        std::process::exit(1);
    }
}

/// Install the global subscriber.
///
/// `RUST_LOG` takes precedence over the configured level. Panics if a
/// global subscriber is already set, so call it once from `main`.
pub fn init_tracing(config: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.level));

    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    if config.json {
        builder.json().init();
    } else {
        builder.init();
    }
}
