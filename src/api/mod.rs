//! HTTP API layer: DTOs, handlers, and routes.

pub mod dto;
pub mod handlers;
pub mod routes;

use axum::http::HeaderMap;
use uuid::Uuid;

/// Header carrying the authenticated owner id, supplied by the
/// authentication collaborator in front of this service.
pub const OWNER_ID_HEADER: &str = "x-owner-id";

/// Extracts the owner id from request headers, if present and well-formed.
///
/// The id is treated as an opaque foreign key; a missing or malformed
/// header simply yields an anonymous request.
pub fn owner_id_from_headers(headers: &HeaderMap) -> Option<Uuid> {
    headers
        .get(OWNER_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| Uuid::parse_str(value).ok())
}
