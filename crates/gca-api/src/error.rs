//! API error types.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use gca_models::{FieldIssue, ValidationError};
use serde::Serialize;
use thiserror::Error;

pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

impl ApiError {
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self::BadRequest(msg.into())
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
        }
    }
}

#[derive(Serialize)]
struct ErrorResponse {
    detail: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    code: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    errors: Vec<FieldIssue>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        let body = match self {
            ApiError::Validation(err) => ErrorResponse {
                detail: err.to_string(),
                code: Some("validation_error".to_string()),
                errors: err.into_issues(),
            },
            other => ErrorResponse {
                detail: other.to_string(),
                code: None,
                errors: Vec::new(),
            },
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;
    use gca_models::{IssueKind, JobPosting, Record};
    use serde_json::{json, Value};

    async fn body_json(response: Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_validation_error_maps_to_422_with_issues() {
        let err = JobPosting::from_value(json!({"id": "job-1"})).unwrap_err();
        let response = ApiError::from(err).into_response();

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let body = body_json(response).await;
        assert_eq!(body["code"], "validation_error");
        assert_eq!(body["errors"][0]["path"], "title");
        assert_eq!(body["errors"][0]["kind"], IssueKind::Missing.as_str());
        assert_eq!(body["errors"][0]["message"], "field required");
    }

    #[tokio::test]
    async fn test_bad_request_has_detail_only() {
        let response = ApiError::bad_request("body is not JSON").into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = body_json(response).await;
        assert_eq!(body, json!({"detail": "Bad request: body is not JSON"}));
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(ApiError::not_found("x").status_code(), StatusCode::NOT_FOUND);
        assert_eq!(ApiError::bad_request("x").status_code(), StatusCode::BAD_REQUEST);
    }
}
