//! Route Template Resolution via axum's `MatchedPath`

use axum::extract::{MatchedPath, Request};

use crate::ports::route::RouteResolver;

/// Reads the template axum's router recorded for the matched route.
///
/// Only sees a template when the instrumentation runs inside the
/// router that matched, i.e. when it is applied with `Router::layer`.
/// Requests that fall through to a fallback have none.
#[derive(Debug, Clone, Copy, Default)]
pub struct MatchedPathResolver;

impl RouteResolver for MatchedPathResolver {
    fn resolve(&self, request: &Request) -> Option<String> {
        request
            .extensions()
            .get::<MatchedPath>()
            .map(|path| path.as_str().to_owned())
    }
}
