#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::Arc;

use urlcut::application::services::{ShortUrlService, ShortUrlSettings};
use urlcut::domain::repositories::ShortUrlRepository;
use urlcut::state::AppState;
use uuid::Uuid;

pub const BASE_URL: &str = "http://localhost:8080";

pub fn test_settings() -> ShortUrlSettings {
    ShortUrlSettings {
        alias_length: 5,
        max_generation_attempts: 5,
        base_url: BASE_URL.to_string(),
    }
}

pub fn create_service(repository: Arc<dyn ShortUrlRepository>) -> ShortUrlService {
    ShortUrlService::new(repository, test_settings())
}

pub fn create_test_state(repository: Arc<dyn ShortUrlRepository>) -> AppState {
    AppState::new(Arc::new(create_service(repository)))
}

/// A unique throwaway path for file-storage tests.
pub fn temp_log_path() -> PathBuf {
    std::env::temp_dir().join(format!("urlcut-test-{}.jsonl", Uuid::new_v4()))
}

/// Extracts the alias from a composed short URL.
pub fn alias_of(short_url: &str) -> &str {
    short_url
        .rsplit('/')
        .next()
        .expect("short URL has an alias segment")
}
