//! Configuration Module - TOML-based Adapter Configuration
//!
//! Loads and validates configuration from `config.toml`. Every field
//! has a default, so an empty file (or a missing section) is valid.

pub mod loader;

use std::time::Duration;

use serde::Deserialize;

/// Top-level configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
  /// HTTP server parameters.
  #[serde(default)]
  pub server: ServerConfig,
  /// Log output.
  #[serde(default)]
  pub logging: LoggingConfig,
}

/// HTTP server parameters consumed by the adapter.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
  /// Listening port on all interfaces. `0` picks an ephemeral port.
  #[serde(default = "default_port")]
  pub port: u16,
  /// Version string reported on `/version`.
  #[serde(default = "default_version")]
  pub version: String,
  /// Per-request timeout for the wrapped handler (seconds).
  #[serde(default = "default_request_timeout")]
  pub request_timeout_secs: u64,
  /// Upper bound for graceful shutdown (seconds). Unbounded if absent.
  #[serde(default)]
  pub shutdown_timeout_secs: Option<u64>,
}

impl ServerConfig {
  /// Request timeout as a `Duration`.
  pub const fn request_timeout(&self) -> Duration {
    Duration::from_secs(self.request_timeout_secs)
  }

  /// Shutdown bound as a `Duration`, if configured.
  pub fn shutdown_timeout(&self) -> Option<Duration> {
    self.shutdown_timeout_secs.map(Duration::from_secs)
  }
}

impl Default for ServerConfig {
  fn default() -> Self {
    Self {
      port: default_port(),
      version: default_version(),
      request_timeout_secs: default_request_timeout(),
      shutdown_timeout_secs: None,
    }
  }
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
  /// Log level (trace, debug, info, warn, error). `RUST_LOG` wins.
  #[serde(default = "default_log_level")]
  pub level: String,
  /// Emit JSON lines instead of human-readable output.
  #[serde(default = "default_true")]
  pub json: bool,
}

impl Default for LoggingConfig {
  fn default() -> Self {
    Self {
      level: default_log_level(),
      json: default_true(),
    }
  }
}

// Default value functions for serde

const fn default_port() -> u16 {
  8080
}

fn default_version() -> String {
  env!("CARGO_PKG_VERSION").to_string()
}

const fn default_request_timeout() -> u64 {
  10
}

fn default_log_level() -> String {
  "info".to_string()
}

const fn default_true() -> bool {
  true
}
