//! Adapter Port - Server Lifecycle and Failure Notification
//!
//! The contract a process supervisor drives: open the adapter, close
//! it on shutdown, hand it a stop channel, and report failures found
//! by external health detectors.

use async_trait::async_trait;
use tokio::sync::broadcast;

/// Lifecycle of a long-running I/O adapter.
#[async_trait]
pub trait Adapter: Send + Sync + 'static {
  /// Start serving. Runs until `close` is called.
  ///
  /// Failures to bind or serve are fatal: they are reported through
  /// the logger's `fatal` severity, which terminates the process.
  async fn open(&self);

  /// Gracefully stop serving and wait for in-flight work.
  ///
  /// Never fails from the caller's point of view; problems are
  /// logged at error severity.
  async fn close(&self);

  /// Register the supervisor's stop channel. The adapter signals it
  /// once its serve loop has ended.
  fn notify_stop(&self, stop_tx: broadcast::Sender<()>);

  /// Report a failure detected outside the adapter.
  ///
  /// `None` is ignored. `Some(err)` marks the adapter unhealthy and
  /// retains `err` for the health endpoint.
  fn on_failure(&self, err: Option<anyhow::Error>);
}
