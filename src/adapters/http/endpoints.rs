//! Auxiliary Endpoints - Health, Version and Metrics
//!
//! - `/health`  - 204 while healthy, 503 + retained error once a
//!   failure has been reported
//! - `/version` - 200 + the configured version string, always
//! - `/metrics` - Prometheus text exposition of the registry

use std::sync::Arc;

use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use tracing::error;

use crate::adapters::metrics::HttpMetrics;
use crate::domain::health::{Health, HealthState};

/// State for the auxiliary endpoints.
#[derive(Clone)]
pub struct EndpointState {
    /// Readiness flag and retained error.
    pub health: Arc<HealthState>,
    /// Reported version string.
    pub version: Arc<str>,
    /// Collectors rendered on `/metrics`.
    pub metrics: HttpMetrics,
}

impl IntoResponse for Health {
    /// Healthy maps to an empty 204, unhealthy to a 503 whose body is
    /// the retained error message.
    fn into_response(self) -> Response {
        match self {
            Self::Healthy => StatusCode::NO_CONTENT.into_response(),
            Self::Unhealthy(err) => {
                (StatusCode::SERVICE_UNAVAILABLE, err.to_string()).into_response()
            }
        }
    }
}

/// Health probe: reads the current state on every call.
pub async fn health(State(state): State<EndpointState>) -> Health {
    state.health.snapshot()
}

/// Version report: the literal configured string.
pub async fn version(State(state): State<EndpointState>) -> impl IntoResponse {
    (StatusCode::OK, state.version.to_string())
}

/// Prometheus scrape endpoint.
pub async fn metrics(State(state): State<EndpointState>) -> Response {
    match state.metrics.render() {
        Ok(body) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, prometheus::TEXT_FORMAT)],
            body,
        )
            .into_response(),
        Err(e) => {
            error!(error = %e, "Failed to encode metrics");
            (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response()
        }
    }
}
