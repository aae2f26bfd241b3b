//! Request/response DTOs for the JSON API.

use serde::{Deserialize, Serialize};

/// Request to shorten a single URL.
#[derive(Debug, Deserialize)]
pub struct ShortenRequest {
    /// The original URL to shorten (must be valid HTTP/HTTPS).
    pub url: String,
}

/// Response carrying the composed short URL.
#[derive(Debug, Serialize)]
pub struct ShortenResponse {
    pub result: String,
}

/// One item of a batch shorten request.
#[derive(Debug, Deserialize)]
pub struct BatchShortenItem {
    /// Caller-supplied id echoed back with the result.
    pub correlation_id: String,
    pub original_url: String,
}

/// One successfully shortened item of a batch.
#[derive(Debug, Serialize)]
pub struct BatchShortenResult {
    pub correlation_id: String,
    pub short_url: String,
}

/// Health probe response.
#[derive(Debug, Serialize)]
pub struct PingResponse {
    pub status: &'static str,
    pub version: &'static str,
}
