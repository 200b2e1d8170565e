//! Request extractors for validated JSON bodies.

use axum::async_trait;
use axum::extract::{FromRequest, Request};
use axum::Json;
use gca_models::Record;
use serde_json::Value;

use crate::error::ApiError;

/// A JSON body decoded and validated as record `T`.
///
/// Bodies that are not JSON are rejected with 400; bodies that are JSON but
/// fail record construction are rejected with 422 and a per-field issue list.
#[derive(Debug, Clone)]
pub struct ValidatedJson<T>(pub T);

impl<T> ValidatedJson<T> {
    pub fn into_inner(self) -> T {
        self.0
    }
}

#[async_trait]
impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    T: Record + Send,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<Value>::from_request(req, state)
            .await
            .map_err(|rejection| ApiError::bad_request(rejection.body_text()))?;

        let record = T::from_value(value)?;
        Ok(Self(record))
    }
}
