//! Handler for the liveness probe.

use axum::{Json, extract::State, http::StatusCode};
use tracing::error;

use crate::api::dto::PingResponse;
use crate::state::AppState;

/// Probes storage liveness.
///
/// # Endpoint
///
/// `GET /ping`
///
/// # Responses
///
/// - **200 OK** when the storage backend is reachable
/// - **503 Service Unavailable** otherwise
pub async fn ping_handler(
    State(state): State<AppState>,
) -> Result<Json<PingResponse>, (StatusCode, Json<PingResponse>)> {
    match state.short_urls.ping().await {
        Ok(()) => Ok(Json(PingResponse {
            status: "ok",
            version: env!("CARGO_PKG_VERSION"),
        })),
        Err(e) => {
            error!(error = %e, "storage ping failed");
            Err((
                StatusCode::SERVICE_UNAVAILABLE,
                Json(PingResponse {
                    status: "unavailable",
                    version: env!("CARGO_PKG_VERSION"),
                }),
            ))
        }
    }
}
