//! Error taxonomy for the service and its storage backends.
//!
//! [`StorageError`] is what backends speak; [`AppError`] is what the
//! application service and transport layers speak. The service inspects
//! storage errors exactly once (to translate a uniqueness violation into
//! [`AppError::AlreadyExists`]); everything else passes through unchanged.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

use crate::domain::entities::ShortUrlRecord;

/// Errors raised by storage backends.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// A record with the same source URL already exists. `existing` holds
    /// the pre-existing (winning) record when the backend can produce it.
    #[error("a record for this source URL already exists")]
    UniqueViolation {
        existing: Option<Box<ShortUrlRecord>>,
    },

    /// The file backend failed to replay its durability log at startup.
    /// Fatal: the process must not serve with a possibly-incomplete dataset.
    #[error("failed to restore storage log: {reason}; offending line: {line:?}")]
    RestoreFailed { reason: String, line: String },

    /// Any other backend failure on a request path.
    #[error("storage query failed: {0}")]
    QueryFailed(String),

    /// Health-probe failure; not raised from normal request paths.
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

/// Application-level errors surfaced to transport layers.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("source URL must be a valid http(s) URL: {0}")]
    InvalidSourceUrl(String),

    #[error("base URL must be a valid http(s) URL: {0}")]
    InvalidBaseUrl(String),

    #[error("alias must not be empty")]
    EmptyAlias,

    /// A short URL for this source already exists; `existing` is the
    /// winning record so callers can render its short link.
    #[error("a short URL for this source already exists")]
    AlreadyExists { existing: Box<ShortUrlRecord> },

    #[error("could not generate a free alias within {attempts} attempts")]
    ExhaustedRetries { attempts: u32 },

    #[error("short URL not found")]
    NotFound,

    #[error("short URL has been deleted")]
    Deleted,

    #[error(transparent)]
    Storage(#[from] StorageError),
}

#[derive(Serialize)]
struct ErrorBody {
    error: ErrorInfo,
}

#[derive(Serialize)]
struct ErrorInfo {
    code: &'static str,
    message: String,
}

impl AppError {
    fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            Self::InvalidConfiguration(_) => (StatusCode::UNPROCESSABLE_ENTITY, "invalid_config"),
            Self::InvalidSourceUrl(_) => (StatusCode::UNPROCESSABLE_ENTITY, "invalid_source_url"),
            Self::InvalidBaseUrl(_) => (StatusCode::UNPROCESSABLE_ENTITY, "invalid_base_url"),
            Self::EmptyAlias => (StatusCode::UNPROCESSABLE_ENTITY, "empty_alias"),
            Self::AlreadyExists { .. } => (StatusCode::CONFLICT, "already_exists"),
            Self::ExhaustedRetries { .. } => (StatusCode::INTERNAL_SERVER_ERROR, "exhausted_retries"),
            Self::NotFound => (StatusCode::NOT_FOUND, "not_found"),
            Self::Deleted => (StatusCode::GONE, "deleted"),
            Self::Storage(StorageError::Unavailable(_)) => {
                (StatusCode::SERVICE_UNAVAILABLE, "storage_unavailable")
            }
            Self::Storage(_) => (StatusCode::INTERNAL_SERVER_ERROR, "storage_error"),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();

        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }

        let body = ErrorBody {
            error: ErrorInfo {
                code,
                message: self.to_string(),
            },
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn record() -> Box<ShortUrlRecord> {
        Box::new(ShortUrlRecord::new(
            Uuid::new_v4(),
            "abcde".to_string(),
            "https://example.com".to_string(),
            None,
        ))
    }

    #[test]
    fn test_status_mapping() {
        let cases = [
            (AppError::InvalidSourceUrl("x".into()), StatusCode::UNPROCESSABLE_ENTITY),
            (AppError::EmptyAlias, StatusCode::UNPROCESSABLE_ENTITY),
            (AppError::AlreadyExists { existing: record() }, StatusCode::CONFLICT),
            (AppError::NotFound, StatusCode::NOT_FOUND),
            (AppError::Deleted, StatusCode::GONE),
            (AppError::ExhaustedRetries { attempts: 5 }, StatusCode::INTERNAL_SERVER_ERROR),
            (
                AppError::Storage(StorageError::Unavailable("down".into())),
                StatusCode::SERVICE_UNAVAILABLE,
            ),
            (
                AppError::Storage(StorageError::QueryFailed("boom".into())),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (err, expected) in cases {
            assert_eq!(err.status_and_code().0, expected, "{err}");
        }
    }

    #[test]
    fn test_storage_error_converts() {
        let err: AppError = StorageError::QueryFailed("boom".into()).into();
        assert!(matches!(err, AppError::Storage(_)));
    }
}
