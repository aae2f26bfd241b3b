//! Repository trait for short URL data access.

use crate::domain::entities::ShortUrlRecord;
use crate::error::StorageError;
use async_trait::async_trait;
use uuid::Uuid;

/// Storage interface for short URL records.
///
/// Uniqueness is keyed on `source_url`: a second `save` for the same source
/// URL fails with [`StorageError::UniqueViolation`] carrying the pre-existing
/// record. Alias uniqueness follows from generation (the service probes
/// `find_by_alias` before inserting).
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::MemoryShortUrlRepository`] - in-memory map
/// - [`crate::infrastructure::persistence::FileShortUrlRepository`] - append-only JSON log
/// - [`crate::infrastructure::persistence::PostgresShortUrlRepository`] - PostgreSQL
/// - [`crate::infrastructure::persistence::NullShortUrlRepository`] - no-op stub
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ShortUrlRepository: Send + Sync {
    /// Finds a record by its alias, deleted or not.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::QueryFailed`] on backend errors.
    async fn find_by_alias(&self, alias: &str) -> Result<Option<ShortUrlRecord>, StorageError>;

    /// Finds a record by its original source URL.
    ///
    /// Used to resolve the winning record after a uniqueness conflict.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::QueryFailed`] on backend errors.
    async fn find_by_source_url(
        &self,
        source_url: &str,
    ) -> Result<Option<ShortUrlRecord>, StorageError>;

    /// Persists a new record.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::UniqueViolation`] if a record with the same
    /// `source_url` already exists; `existing` holds that record when the
    /// backend can produce it. Returns [`StorageError::QueryFailed`] on any
    /// other backend error.
    async fn save(&self, record: ShortUrlRecord) -> Result<ShortUrlRecord, StorageError>;

    /// Soft-deletes the given aliases, restricted to records owned by
    /// `owner_id`.
    ///
    /// Aliases that do not exist, are already deleted, or belong to another
    /// owner are silently skipped. Returns the number of records that
    /// actually transitioned to deleted.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::QueryFailed`] on backend errors.
    async fn mark_deleted(&self, owner_id: Uuid, aliases: &[String]) -> Result<u64, StorageError>;

    /// Liveness probe.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Unavailable`] when the backend cannot be
    /// reached.
    async fn ping(&self) -> Result<(), StorageError>;

    /// Removes every record. Test/reset tooling only, not part of the
    /// production contract.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::QueryFailed`] on backend errors.
    async fn truncate(&self) -> Result<(), StorageError>;
}
