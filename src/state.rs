//! Shared application state injected into every handler.

use std::sync::Arc;

use crate::application::services::ShortenerService;

/// State shared across all HTTP handlers.
#[derive(Clone)]
pub struct AppState {
    pub shortener: Arc<ShortenerService>,
    /// Public base used when rendering full short URLs.
    pub base_url: String,
}

impl AppState {
    pub fn new(shortener: Arc<ShortenerService>, base_url: String) -> Self {
        Self {
            shortener,
            base_url,
        }
    }
}
