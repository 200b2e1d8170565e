//! Application state.

use std::sync::Arc;

use crate::config::ApiConfig;

/// Shared application state. Immutable once the router is built.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ApiConfig>,
}

impl AppState {
    /// Create new application state.
    pub fn new(config: ApiConfig) -> Self {
        Self {
            config: Arc::new(config),
        }
    }
}
