//! Configuration Loader - File Loading and Validation
//!
//! Handles loading `config.toml`, validating all parameters,
//! and providing clear error messages for misconfiguration.

use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;

use super::AppConfig;

/// Load and validate configuration from a TOML file.
///
/// # Arguments
/// * `path` - Path to the config.toml file
///
/// # Errors
/// Returns detailed error if:
/// - File doesn't exist or can't be read
/// - TOML parsing fails
/// - Validation rules are violated
pub fn load_config(path: &str) -> Result<AppConfig> {
  let path = Path::new(path);

  let content = std::fs::read_to_string(path)
    .with_context(|| format!("Failed to read config file: {}", path.display()))?;

  let config = parse_config(&content)?;

  info!(
    port = config.server.port,
    version = %config.server.version,
    "Configuration loaded successfully"
  );

  Ok(config)
}

/// Parse and validate configuration from TOML text.
pub fn parse_config(content: &str) -> Result<AppConfig> {
  let config: AppConfig = toml::from_str(content)
    .with_context(|| "Failed to parse config.toml")?;

  validate_config(&config)?;

  Ok(config)
}

/// Validate all configuration parameters.
///
/// Checks for:
/// - Non-empty version string
/// - Positive timeouts
/// - Non-empty log level
fn validate_config(config: &AppConfig) -> Result<()> {
  anyhow::ensure!(
    !config.server.version.trim().is_empty(),
    "server.version must not be empty"
  );
  anyhow::ensure!(
    config.server.request_timeout_secs > 0,
    "server.request_timeout_secs must be positive"
  );
  if let Some(secs) = config.server.shutdown_timeout_secs {
    anyhow::ensure!(
      secs > 0,
      "server.shutdown_timeout_secs must be positive when set, got {}",
      secs
    );
  }
  anyhow::ensure!(
    !config.logging.level.trim().is_empty(),
    "logging.level must not be empty"
  );

  Ok(())
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_load_nonexistent_file() {
    let result = load_config("nonexistent.toml");
    assert!(result.is_err());
  }

  #[test]
  fn test_empty_file_uses_defaults() {
    let config = parse_config("").unwrap();
    assert_eq!(config.server.port, 8080);
    assert_eq!(config.server.version, env!("CARGO_PKG_VERSION"));
    assert_eq!(config.server.request_timeout_secs, 10);
    assert!(config.server.shutdown_timeout().is_none());
    assert_eq!(config.logging.level, "info");
    assert!(config.logging.json);
  }

  #[test]
  fn test_full_file() {
    let config = parse_config(
      r#"
        [server]
        port = 9000
        version = "1.2.3-rc1"
        request_timeout_secs = 5
        shutdown_timeout_secs = 30

        [logging]
        level = "debug"
        json = false
      "#,
    )
    .unwrap();

    assert_eq!(config.server.port, 9000);
    assert_eq!(config.server.version, "1.2.3-rc1");
    assert_eq!(
      config.server.shutdown_timeout(),
      Some(std::time::Duration::from_secs(30))
    );
    assert!(!config.logging.json);
  }

  #[test]
  fn test_rejects_empty_version() {
    let err = parse_config("[server]\nversion = \"  \"\n").unwrap_err();
    assert!(err.to_string().contains("version"));
  }

  #[test]
  fn test_rejects_zero_timeouts() {
    assert!(parse_config("[server]\nrequest_timeout_secs = 0\n").is_err());
    assert!(parse_config("[server]\nshutdown_timeout_secs = 0\n").is_err());
  }

  #[test]
  fn test_rejects_unparsable_port() {
    assert!(parse_config("[server]\nport = 70000\n").is_err());
  }
}
