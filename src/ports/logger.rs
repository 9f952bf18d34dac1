//! Logger Port - Severity-levelled Logging Capability
//!
//! The adapter reports lifecycle events through this trait instead of
//! a concrete backend so supervisors can plug in their own sink.

/// Minimal logging capability used by adapters.
pub trait Logger: Send + Sync + 'static {
  /// Informational lifecycle event.
  fn info(&self, message: &str);

  /// Recoverable failure. The caller keeps running.
  fn error(&self, message: &str);

  /// Unrecoverable failure. Production implementations terminate the
  /// process after logging.
  fn fatal(&self, message: &str);
}
