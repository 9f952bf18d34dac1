//! Ports Layer - Hexagonal Architecture Boundaries
//!
//! Defines the interfaces (traits) between the adapter core and the
//! outside world. Adapters implement these traits; supervisors and
//! tests depend only on them.
//!
//! Port categories:
//! - `Adapter`: Server lifecycle and failure notification
//! - `Logger`: Severity-levelled logging capability
//! - `RouteResolver`: Route template lookup for metric labels

pub mod adapter;
pub mod logger;
pub mod route;

pub use adapter::Adapter;
pub use logger::Logger;
pub use route::RouteResolver;
