//! Metric Label Set - Dimensions for Request Metrics
//!
//! Every instrumented request produces one `MetricLabels` value that
//! feeds both the request counter and the latency histogram, so the
//! two collectors can never disagree on labels for the same call.

use super::observation::ResponseObservation;

/// Label names in collector registration order.
pub const LABEL_NAMES: [&str; 3] = ["code", "method", "handler"];

/// Label values for a single request/response pair.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MetricLabels {
    /// Status code as a decimal string.
    pub code: String,
    /// Request method (`GET`, `POST`, ...).
    pub method: String,
    /// Matched route template, or the raw path when none matched.
    pub handler: String,
}

impl MetricLabels {
    /// Build a label set from its raw parts.
    pub fn new(
        method: impl Into<String>,
        handler: impl Into<String>,
        code: u16,
    ) -> Self {
        Self {
            code: code.to_string(),
            method: method.into(),
            handler: handler.into(),
        }
    }

    /// Derive labels for a finished request.
    ///
    /// `template` wins over `path`; no other normalisation is applied
    /// to the path.
    pub fn derive(
        method: &str,
        template: Option<&str>,
        path: &str,
        observation: &ResponseObservation,
    ) -> Self {
        Self::new(
            method,
            template.unwrap_or(path),
            observation.status_code(),
        )
    }

    /// Values ordered like [`LABEL_NAMES`].
    pub fn values(&self) -> [&str; 3] {
        [&self.code, &self.method, &self.handler]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_template_preferred_over_path() {
        let obs = ResponseObservation::start();
        let labels =
            MetricLabels::derive("GET", Some("/users/:id"), "/users/42", &obs);
        assert_eq!(labels.handler, "/users/:id");
    }

    #[test]
    fn test_path_used_without_template() {
        let mut obs = ResponseObservation::start();
        obs.write_status(404);
        let labels = MetricLabels::derive("POST", None, "/nope/abc", &obs);
        assert_eq!(labels.handler, "/nope/abc");
        assert_eq!(labels.method, "POST");
        assert_eq!(labels.code, "404");
    }

    #[test]
    fn test_values_follow_label_names() {
        let labels = MetricLabels::new("PUT", "/items", 201);
        assert_eq!(labels.values(), ["201", "PUT", "/items"]);
        assert_eq!(LABEL_NAMES, ["code", "method", "handler"]);
    }
}
