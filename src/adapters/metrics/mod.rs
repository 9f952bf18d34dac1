//! Metrics Adapters
//!
//! Prometheus collectors for the wrapped handler's requests, exposed
//! on `/metrics` by the HTTP adapter.

pub mod prometheus;

pub use prometheus::HttpMetrics;
