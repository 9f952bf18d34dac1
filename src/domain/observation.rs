//! Response Observation - Per-request Status and Timing Record
//!
//! Captures the status code a handler wrote and when the request
//! started. The response itself is never touched: the observation
//! only reads what passes through it.

use std::time::{Duration, Instant};

/// Status reported when a handler never writes one explicitly.
pub const IMPLICIT_STATUS: u16 = 200;

/// Ephemeral record created at request entry and consumed once the
/// wrapped handler returns.
#[derive(Debug, Clone, Copy)]
pub struct ResponseObservation {
    /// When the request entered the instrumentation layer.
    started_at: Instant,
    /// First status code written by the handler, if any.
    status: Option<u16>,
}

impl ResponseObservation {
    /// Start observing a request now.
    pub fn start() -> Self {
        Self::started_at(Instant::now())
    }

    /// Start observing from an explicit instant.
    pub const fn started_at(started_at: Instant) -> Self {
        Self {
            started_at,
            status: None,
        }
    }

    /// Record a header write. Only the first write counts, later ones
    /// cannot change what went out on the wire.
    pub fn write_status(&mut self, code: u16) {
        if self.status.is_none() {
            self.status = Some(code);
        }
    }

    /// Whether the handler wrote a status explicitly.
    pub const fn status_written(&self) -> bool {
        self.status.is_some()
    }

    /// Observed status code, or [`IMPLICIT_STATUS`] if none was written.
    pub fn status_code(&self) -> u16 {
        self.status.unwrap_or(IMPLICIT_STATUS)
    }

    /// Wall-clock time since the request entered.
    pub fn elapsed(&self) -> Duration {
        self.started_at.elapsed()
    }
}

impl Default for ResponseObservation {
    fn default() -> Self {
        Self::start()
    }
}
