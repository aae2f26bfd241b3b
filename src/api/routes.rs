//! Router assembly.

use axum::{
    Router,
    routing::{delete, get, post},
};
use tower_http::trace::TraceLayer;

use crate::api::handlers::{
    batch_shorten_handler, delete_urls_handler, ping_handler, redirect_handler, shorten_handler,
};
use crate::state::AppState;

/// All application routes.
///
/// # Endpoints
///
/// - `POST   /api/shorten`       - Create a short URL
/// - `POST   /api/shorten/batch` - Create short URLs in bulk (best-effort)
/// - `DELETE /api/user/urls`     - Soft-delete owned aliases
/// - `GET    /ping`              - Storage liveness probe
/// - `GET    /{alias}`           - Redirect to the original URL
pub fn app_router(state: AppState) -> Router {
    Router::new()
        .route("/api/shorten", post(shorten_handler))
        .route("/api/shorten/batch", post(batch_shorten_handler))
        .route("/api/user/urls", delete(delete_urls_handler))
        .route("/ping", get(ping_handler))
        .route("/{alias}", get(redirect_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
