use axum::http::Uri;

use crate::error::ApiError;

/// Unknown route.
pub async fn not_found(uri: Uri) -> ApiError {
    ApiError::not_found(uri.path().to_string())
}
