//! Handlers for single and batch URL shortening.

use axum::{
    Json,
    extract::State,
    http::{HeaderMap, StatusCode},
};

use crate::api::dto::{BatchShortenItem, BatchShortenResult, ShortenRequest, ShortenResponse};
use crate::api::owner_id_from_headers;
use crate::application::services::BatchSaveRequest;
use crate::error::AppError;
use crate::state::AppState;

/// Creates a short URL for a single long URL.
///
/// # Endpoint
///
/// `POST /api/shorten`
///
/// The optional `X-Owner-Id` header associates the record with an owner.
///
/// # Responses
///
/// - **201 Created** with `{"result": "<short url>"}`
/// - **409 Conflict** with the existing short URL when this source URL was
///   already shortened
/// - **422 Unprocessable Entity** when the URL is malformed
pub async fn shorten_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<ShortenRequest>,
) -> Result<(StatusCode, Json<ShortenResponse>), AppError> {
    let owner_id = owner_id_from_headers(&headers);

    match state.short_urls.save(owner_id, &payload.url).await {
        Ok(record) => Ok((
            StatusCode::CREATED,
            Json(ShortenResponse {
                result: state.short_urls.short_url(&record.alias),
            }),
        )),
        Err(AppError::AlreadyExists { existing }) => Ok((
            StatusCode::CONFLICT,
            Json(ShortenResponse {
                result: state.short_urls.short_url(&existing.alias),
            }),
        )),
        Err(e) => Err(e),
    }
}

/// Creates short URLs for a batch of long URLs, best-effort.
///
/// # Endpoint
///
/// `POST /api/shorten/batch`
///
/// Items that fail are dropped from the response; each surviving entry is
/// tagged with its caller-supplied `correlation_id`.
pub async fn batch_shorten_handler(
    State(state): State<AppState>,
    Json(payload): Json<Vec<BatchShortenItem>>,
) -> Json<Vec<BatchShortenResult>> {
    let requests = payload
        .into_iter()
        .map(|item| BatchSaveRequest {
            correlation_id: item.correlation_id,
            source_url: item.original_url,
        })
        .collect();

    let results = state
        .short_urls
        .batch_save(requests)
        .await
        .into_iter()
        .map(|result| BatchShortenResult {
            correlation_id: result.correlation_id,
            short_url: result.short_url,
        })
        .collect();

    Json(results)
}
