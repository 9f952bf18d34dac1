//! HTTP Adapter - Library Root
//!
//! Wraps any axum router with server lifecycle management, a
//! health/readiness probe, a version report and per-request Prometheus
//! metrics. Re-exports all modules for integration tests and benchmarks.

pub mod adapters;
pub mod config;
pub mod domain;
pub mod ports;

pub use adapters::http::{AdapterError, HttpAdapter};
pub use adapters::logging::TracingLogger;
pub use ports::{Adapter, Logger, RouteResolver};
