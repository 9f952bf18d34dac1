//! Metrics Instrumentation Layer
//!
//! Middleware that observes every request to the wrapped handler and
//! records one counter increment and one latency observation per call
//! under a single label set. The response passes through unchanged.

use std::sync::Arc;
use std::time::Duration;

use axum::extract::{Request, State};
use axum::middleware::{self, Next};
use axum::response::Response;
use axum::Router;
use tower_http::timeout::TimeoutLayer;

use crate::adapters::metrics::HttpMetrics;
use crate::domain::labels::MetricLabels;
use crate::domain::observation::ResponseObservation;
use crate::ports::route::RouteResolver;

/// State shared by every instrumented request.
#[derive(Clone)]
pub struct Instrumentation {
    metrics: HttpMetrics,
    resolver: Arc<dyn RouteResolver>,
}

impl Instrumentation {
    /// Instrument with `metrics`, resolving templates with `resolver`.
    pub fn new(metrics: HttpMetrics, resolver: Arc<dyn RouteResolver>) -> Self {
        Self { metrics, resolver }
    }

    /// Collectors this instrumentation records into.
    pub const fn metrics(&self) -> &HttpMetrics {
        &self.metrics
    }
}

/// Wrap `handler` so each of its requests is measured.
///
/// The layer is applied per route, so axum's matched route template is
/// visible to the resolver. `request_timeout` sits inside the
/// measurement: a timed-out request is still counted, as a 408.
pub fn instrument(
    handler: Router,
    instrumentation: Instrumentation,
    request_timeout: Duration,
) -> Router {
    handler
        .layer(TimeoutLayer::new(request_timeout))
        .layer(middleware::from_fn_with_state(
            instrumentation,
            track_metrics,
        ))
}

/// Middleware recording request count and latency.
pub async fn track_metrics(
    State(instrumentation): State<Instrumentation>,
    request: Request,
    next: Next,
) -> Response {
    let mut observation = ResponseObservation::start();

    // The request is consumed by the handler, so capture the label
    // inputs first.
    let template = instrumentation.resolver.resolve(&request);
    let method = request.method().as_str().to_owned();
    let path = request.uri().path().to_owned();

    let response = next.run(request).await;

    observation.write_status(response.status().as_u16());
    let labels = MetricLabels::derive(
        &method,
        template.as_deref(),
        &path,
        &observation,
    );
    instrumentation.metrics.record(&labels, observation.elapsed());

    response
}
