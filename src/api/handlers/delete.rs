//! Handler for batch soft deletion of owned short URLs.

use axum::{
    Json,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
};

use crate::api::owner_id_from_headers;
use crate::state::AppState;

/// Soft-deletes the given aliases for the requesting owner.
///
/// # Endpoint
///
/// `DELETE /api/user/urls` with a JSON array of aliases and the
/// `X-Owner-Id` header.
///
/// Aliases not owned by the caller are silently skipped; the operation is
/// idempotent. Responds **202 Accepted** regardless of how many records
/// actually transitioned, and **401 Unauthorized** when no owner id is
/// supplied.
pub async fn delete_urls_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(aliases): Json<Vec<String>>,
) -> Response {
    let Some(owner_id) = owner_id_from_headers(&headers) else {
        return StatusCode::UNAUTHORIZED.into_response();
    };

    match state.short_urls.mark_deleted(owner_id, &aliases).await {
        Ok(_) => StatusCode::ACCEPTED.into_response(),
        Err(e) => e.into_response(),
    }
}
