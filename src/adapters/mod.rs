//! Adapters Layer - Hexagonal Architecture Outer Ring
//!
//! Implements the port traits defined in `crate::ports` with concrete
//! infrastructure (axum, Prometheus, tracing). Each sub-module groups
//! adapters by concern.
//!
//! Adapter categories:
//! - `http`: Server lifecycle, instrumentation middleware and the
//!   auxiliary `/health`, `/version`, `/metrics` endpoints
//! - `logging`: `tracing`-backed `Logger`
//! - `metrics`: Prometheus request collectors

pub mod http;
pub mod logging;
pub mod metrics;
