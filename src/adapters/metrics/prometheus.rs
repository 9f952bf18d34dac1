//! Prometheus Collectors - Request Count and Latency
//!
//! Registers `app_requests_total` and `app_response_duration_seconds`,
//! both labelled by `code`, `method` and `handler`, and renders the
//! registry in the Prometheus text exposition format for `/metrics`.

use std::time::Duration;

use prometheus::{
    Encoder, HistogramOpts, HistogramVec, IntCounterVec, Opts, Registry,
    TextEncoder,
};

use crate::domain::labels::{LABEL_NAMES, MetricLabels};

/// Counter series name.
pub const REQUESTS_TOTAL: &str = "app_requests_total";
/// Histogram series name.
pub const RESPONSE_DURATION_SECONDS: &str = "app_response_duration_seconds";

/// Request metrics for the wrapped handler.
///
/// Both collectors are internally synchronised, so one instance is
/// shared by every request task.
#[derive(Clone)]
pub struct HttpMetrics {
    /// Registry the collectors live in; also the `/metrics` source.
    registry: Registry,
    /// Requests served, per label set.
    requests_total: IntCounterVec,
    /// Request latency in seconds, per label set.
    response_duration: HistogramVec,
}

impl HttpMetrics {
    /// Create both collectors and register them with `registry`.
    ///
    /// Fails if the registry already holds collectors with these names,
    /// e.g. when two adapters share the process-wide default registry.
    pub fn new(registry: Registry) -> prometheus::Result<Self> {
        let requests_total = IntCounterVec::new(
            Opts::new(
                REQUESTS_TOTAL,
                "A counter for requests to the wrapped handler.",
            ),
            &LABEL_NAMES,
        )?;

        let response_duration = HistogramVec::new(
            HistogramOpts::new(
                RESPONSE_DURATION_SECONDS,
                "A histogram of request latencies.",
            )
            .buckets(prometheus::DEFAULT_BUCKETS.to_vec()),
            &LABEL_NAMES,
        )?;

        registry.register(Box::new(requests_total.clone()))?;
        registry.register(Box::new(response_duration.clone()))?;

        Ok(Self {
            registry,
            requests_total,
            response_duration,
        })
    }

    /// Record one finished request: one increment and one observation,
    /// both under the same label values.
    pub fn record(&self, labels: &MetricLabels, elapsed: Duration) {
        let values = labels.values();
        self.requests_total.with_label_values(&values).inc();
        self.response_duration
            .with_label_values(&values)
            .observe(elapsed.as_secs_f64());
    }

    /// Requests counted for `labels` so far.
    pub fn request_count(&self, labels: &MetricLabels) -> u64 {
        self.requests_total.with_label_values(&labels.values()).get()
    }

    /// Latency observations recorded for `labels` so far.
    pub fn duration_count(&self, labels: &MetricLabels) -> u64 {
        self.response_duration
            .with_label_values(&labels.values())
            .get_sample_count()
    }

    /// Underlying registry.
    pub const fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Encode every collector in the registry as Prometheus text.
    pub fn render(&self) -> prometheus::Result<String> {
        let encoder = TextEncoder::new();
        let metric_families = self.registry.gather();
        let mut buffer = Vec::new();
        encoder.encode(&metric_families, &mut buffer)?;
        String::from_utf8(buffer)
            .map_err(|e| prometheus::Error::Msg(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_updates_both_collectors() {
        let metrics = HttpMetrics::new(Registry::new()).unwrap();
        let labels = MetricLabels::new("GET", "/users/:id", 200);

        metrics.record(&labels, Duration::from_millis(12));
        metrics.record(&labels, Duration::from_millis(30));

        assert_eq!(metrics.request_count(&labels), 2);
        assert_eq!(metrics.duration_count(&labels), 2);
    }

    #[test]
    fn test_label_sets_are_independent() {
        let metrics = HttpMetrics::new(Registry::new()).unwrap();
        let ok = MetricLabels::new("GET", "/a", 200);
        let missing = MetricLabels::new("GET", "/a", 404);

        metrics.record(&ok, Duration::ZERO);

        assert_eq!(metrics.request_count(&ok), 1);
        assert_eq!(metrics.request_count(&missing), 0);
    }

    #[test]
    fn test_double_registration_fails() {
        let registry = Registry::new();
        let _first = HttpMetrics::new(registry.clone()).unwrap();
        assert!(HttpMetrics::new(registry).is_err());
    }

    #[test]
    fn test_render_contains_series() {
        let metrics = HttpMetrics::new(Registry::new()).unwrap();
        metrics.record(&MetricLabels::new("POST", "/items", 201), Duration::ZERO);

        let text = metrics.render().unwrap();
        assert!(text.contains(
            r#"app_requests_total{code="201",handler="/items",method="POST"} 1"#
        ));
        assert!(text.contains("app_response_duration_seconds_bucket"));
        assert!(text.contains(r#"le="0.005""#));
    }
}
