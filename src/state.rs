//! Shared application state handed to every handler.

use std::sync::Arc;

use crate::application::services::ShortUrlService;

#[derive(Clone)]
pub struct AppState {
    pub short_urls: Arc<ShortUrlService>,
}

impl AppState {
    pub fn new(short_urls: Arc<ShortUrlService>) -> Self {
        Self { short_urls }
    }
}
