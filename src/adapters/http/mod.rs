//! HTTP Adapter
//!
//! Serves a wrapped axum router with request metrics, a health probe,
//! a version report and a Prometheus scrape endpoint.

pub mod endpoints;
pub mod instrument;
pub mod route;
pub mod server;

pub use instrument::{instrument, track_metrics, Instrumentation};
pub use route::MatchedPathResolver;
pub use server::{AdapterError, HttpAdapter};
