//! Health check handlers.

use axum::Json;
use serde::Serialize;

/// Probe response.
#[derive(Debug, Clone, Serialize)]
pub struct ProbeResponse {
    pub status: &'static str,
}

/// Health check endpoint (liveness probe).
pub async fn healthz() -> Json<ProbeResponse> {
    Json(ProbeResponse { status: "ok" })
}

/// Readiness check endpoint (readiness probe).
pub async fn readyz() -> Json<ProbeResponse> {
    Json(ProbeResponse { status: "ready" })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_probe_payloads() {
        assert_eq!(healthz().await.0.status, "ok");
        assert_eq!(readyz().await.0.status, "ready");
    }
}
