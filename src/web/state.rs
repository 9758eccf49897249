// src/web/state.rs
// Web server state management

use std::sync::Arc;

use crate::config::Settings;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Runtime settings (limits, page sizes)
    pub settings: Arc<Settings>,

    /// Shared outbound HTTP client, reused across all tenants
    pub http: reqwest::Client,
}

impl AppState {
    /// Create new application state
    pub fn new(settings: Arc<Settings>, http: reqwest::Client) -> Self {
        Self { settings, http }
    }
}
