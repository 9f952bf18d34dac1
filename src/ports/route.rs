//! Route Resolver Port - Route Template Lookup
//!
//! Resolving the parameterised route a request matched belongs to the
//! wrapped router, so the instrumentation only sees it through this
//! lookup.

use axum::extract::Request;

/// Looks up the route template a request was dispatched to.
pub trait RouteResolver: Send + Sync + 'static {
  /// Template such as `/users/:id`, or `None` when no route matched.
  fn resolve(&self, request: &Request) -> Option<String>;
}
