//! Axum HTTP API server.
//!
//! This crate provides:
//! - Liveness and readiness probes
//! - A validated JSON extractor for the record types in `gca-models`
//! - Request ID, logging, and security header middleware
//! - Prometheus metrics

pub mod config;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod metrics;
pub mod middleware;
pub mod routes;
pub mod state;

pub use config::ApiConfig;
pub use error::{ApiError, ApiResult};
pub use extractors::ValidatedJson;
pub use routes::create_router;
pub use state::AppState;
