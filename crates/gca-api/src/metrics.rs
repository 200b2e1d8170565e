//! Prometheus metrics for the API server.

use axum::body::Body;
use axum::extract::MatchedPath;
use axum::http::{Request, Response};
use axum::middleware::Next;
use metrics::{counter, gauge, histogram};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder, PrometheusHandle};
use std::time::Instant;

/// Initialize the Prometheus metrics recorder.
/// Returns a handle that can be used to render metrics.
pub fn init_metrics() -> Result<PrometheusHandle, BuildError> {
    PrometheusBuilder::new().install_recorder()
}

/// Metric names as constants for consistency.
pub mod names {
    pub const HTTP_REQUESTS_TOTAL: &str = "gca_http_requests_total";
    pub const HTTP_REQUEST_DURATION_SECONDS: &str = "gca_http_request_duration_seconds";
    pub const HTTP_REQUESTS_IN_FLIGHT: &str = "gca_http_requests_in_flight";
}

/// Label used for requests that matched no route.
const UNMATCHED_PATH: &str = "unmatched";

/// Record an HTTP request.
pub fn record_http_request(method: &str, path: &str, status: u16, duration_secs: f64) {
    let labels = [
        ("method", method.to_string()),
        ("path", path.to_string()),
        ("status", status.to_string()),
    ];

    counter!(names::HTTP_REQUESTS_TOTAL, &labels).increment(1);
    histogram!(names::HTTP_REQUEST_DURATION_SECONDS, &labels).record(duration_secs);
}

/// Route template for the path label, so raw paths never become labels.
fn path_label(request: &Request<Body>) -> String {
    request
        .extensions()
        .get::<MatchedPath>()
        .map(|path| path.as_str().to_string())
        .unwrap_or_else(|| UNMATCHED_PATH.to_string())
}

/// Metrics middleware for HTTP requests.
pub async fn metrics_middleware(request: Request<Body>, next: Next) -> Response<Body> {
    let method = request.method().to_string();
    let path = path_label(&request);
    let start = Instant::now();

    gauge!(names::HTTP_REQUESTS_IN_FLIGHT).increment(1.0);

    let response = next.run(request).await;

    gauge!(names::HTTP_REQUESTS_IN_FLIGHT).decrement(1.0);

    let status = response.status().as_u16();
    let duration = start.elapsed().as_secs_f64();

    record_http_request(&method, &path, status, duration);

    response
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_label_without_route_is_unmatched() {
        let request = Request::builder()
            .uri("/jobs/123?debug=1")
            .body(Body::empty())
            .unwrap();
        assert_eq!(path_label(&request), UNMATCHED_PATH);
    }

    #[test]
    fn test_record_http_request_is_rendered() {
        let recorder = PrometheusBuilder::new().build_recorder();
        let handle = recorder.handle();

        ::metrics::with_local_recorder(&recorder, || {
            record_http_request("GET", "/healthz", 200, 0.001);
            record_http_request("GET", "/healthz", 200, 0.002);
        });

        let rendered = handle.render();
        assert!(rendered.contains(names::HTTP_REQUESTS_TOTAL));
        assert!(rendered.contains(r#"path="/healthz""#));
        assert!(rendered.contains(names::HTTP_REQUEST_DURATION_SECONDS));
        let total = rendered
            .lines()
            .find(|line| line.starts_with(names::HTTP_REQUESTS_TOTAL))
            .unwrap();
        assert!(total.ends_with(" 2"), "{total}");
    }
}
