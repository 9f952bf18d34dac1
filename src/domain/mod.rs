//! Domain layer - Request observation, metric labels and health.
//!
//! Pure logic with no HTTP or metrics-backend dependencies
//! (hexagonal architecture inner ring). Everything here is testable
//! in isolation.

pub mod health;
pub mod labels;
pub mod observation;

// Re-export core types for convenience
pub use health::{Health, HealthState};
pub use labels::{LABEL_NAMES, MetricLabels};
pub use observation::{IMPLICIT_STATUS, ResponseObservation};
