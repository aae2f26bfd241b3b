//! Handler for the short URL redirect endpoint.

use axum::{
    extract::{Path, State},
    response::Redirect,
};
use tracing::debug;

use crate::error::AppError;
use crate::state::AppState;

/// Redirects an alias to its original URL.
///
/// # Endpoint
///
/// `GET /{alias}`
///
/// # Responses
///
/// - **307 Temporary Redirect** to the original URL
/// - **404 Not Found** when the alias has no record
/// - **410 Gone** when the record was soft-deleted
pub async fn redirect_handler(
    Path(alias): Path<String>,
    State(state): State<AppState>,
) -> Result<Redirect, AppError> {
    let record = state.short_urls.find_by_alias(&alias).await?;

    debug!(alias = %record.alias, "redirecting");

    Ok(Redirect::temporary(&record.source_url))
}
