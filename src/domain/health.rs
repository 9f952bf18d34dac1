//! Health State - Readiness Flag and Last Observed Error
//!
//! The flag and the retained error live in one value behind one lock,
//! so a reader can never see "unhealthy" without the error that
//! caused it.
//!
//! State machine: `Healthy` (initial) -> `Unhealthy` (terminal). There
//! is no reset: a process that reported a failure stays
//! unready until it is restarted.

use std::fmt;
use std::sync::{Arc, PoisonError, RwLock};

/// Snapshot of the health state machine.
#[derive(Debug, Clone, Default)]
pub enum Health {
    /// No failure has been reported.
    #[default]
    Healthy,
    /// A failure was reported; holds the most recent one.
    Unhealthy(Arc<anyhow::Error>),
}

impl Health {
    /// Whether the service should receive traffic.
    pub const fn is_healthy(&self) -> bool {
        matches!(self, Self::Healthy)
    }

    /// Retained error, present exactly when unhealthy.
    pub fn last_error(&self) -> Option<&anyhow::Error> {
        match self {
            Self::Healthy => None,
            Self::Unhealthy(err) => Some(&**err),
        }
    }
}

impl fmt::Display for Health {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Healthy => f.write_str("healthy"),
            Self::Unhealthy(err) => write!(f, "unhealthy: {err}"),
        }
    }
}

/// Shared, concurrently writable health state.
///
/// Owned by the adapter and handed by `Arc` to both the failure
/// reporter and the `/health` endpoint.
#[derive(Debug, Default)]
pub struct HealthState {
    current: RwLock<Health>,
}

impl HealthState {
    /// New state, initially healthy.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state. Cheap: clones an `Arc` at most.
    pub fn snapshot(&self) -> Health {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Whether no failure has been recorded yet.
    pub fn is_healthy(&self) -> bool {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_healthy()
    }

    /// Message of the retained error, if any.
    pub fn last_error(&self) -> Option<String> {
        self.snapshot().last_error().map(ToString::to_string)
    }

    /// Record a failure notification.
    ///
    /// `None` is a no-op. `Some(err)` moves the state to `Unhealthy`
    /// (or replaces the retained error if already there). Returns
    /// whether anything was recorded.
    pub fn record_failure(&self, err: Option<anyhow::Error>) -> bool {
        let Some(err) = err else {
            return false;
        };

        let mut current = self
            .current
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        *current = Health::Unhealthy(Arc::new(err));
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_healthy() {
        let state = HealthState::new();
        assert!(state.is_healthy());
        assert!(state.last_error().is_none());
        assert_eq!(state.snapshot().to_string(), "healthy");
    }

    #[test]
    fn test_none_is_noop() {
        let state = HealthState::new();
        assert!(!state.record_failure(None));
        assert!(state.is_healthy());
    }

    #[test]
    fn test_failure_is_retained() {
        let state = HealthState::new();
        assert!(state.record_failure(Some(anyhow::anyhow!("db down"))));
        assert!(!state.is_healthy());
        assert_eq!(state.last_error().as_deref(), Some("db down"));
    }

    #[test]
    fn test_none_after_failure_keeps_error() {
        let state = HealthState::new();
        state.record_failure(Some(anyhow::anyhow!("db down")));
        state.record_failure(None);
        assert!(!state.is_healthy());
        assert_eq!(state.last_error().as_deref(), Some("db down"));
    }

    #[test]
    fn test_latest_failure_replaces_previous() {
        let state = HealthState::new();
        state.record_failure(Some(anyhow::anyhow!("first")));
        state.record_failure(Some(anyhow::anyhow!("second")));
        assert_eq!(state.last_error().as_deref(), Some("second"));
    }

    #[test]
    fn test_concurrent_writers_keep_flag_and_error_paired() {
        let state = Arc::new(HealthState::new());

        let writers: Vec<_> = (0..8)
            .map(|i| {
                let state = Arc::clone(&state);
                std::thread::spawn(move || {
                    for j in 0..100 {
                        state.record_failure(Some(anyhow::anyhow!("w{i}-{j}")));
                        let snap = state.snapshot();
                        assert!(!snap.is_healthy());
                        assert!(snap.last_error().is_some());
                    }
                })
            })
            .collect();

        for writer in writers {
            writer.join().unwrap();
        }

        let msg = state.last_error().unwrap();
        assert!(msg.starts_with('w') && msg.ends_with("-99"));
    }
}
