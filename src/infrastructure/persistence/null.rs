//! No-op storage backend.

use async_trait::async_trait;
use tracing::debug;
use uuid::Uuid;

use crate::domain::entities::ShortUrlRecord;
use crate::domain::repositories::ShortUrlRepository;
use crate::error::StorageError;

/// A storage implementation that stores nothing.
///
/// Every operation succeeds immediately: lookups miss, saves echo the
/// record back, deletions touch zero rows. Useful as a default when no
/// backend is configured and as a stub in tests.
#[derive(Debug, Default)]
pub struct NullShortUrlRepository;

impl NullShortUrlRepository {
    /// Creates a new null storage.
    pub fn new() -> Self {
        debug!("using null storage (nothing will be persisted)");
        Self
    }
}

#[async_trait]
impl ShortUrlRepository for NullShortUrlRepository {
    async fn find_by_alias(&self, _alias: &str) -> Result<Option<ShortUrlRecord>, StorageError> {
        Ok(None)
    }

    async fn find_by_source_url(
        &self,
        _source_url: &str,
    ) -> Result<Option<ShortUrlRecord>, StorageError> {
        Ok(None)
    }

    async fn save(&self, record: ShortUrlRecord) -> Result<ShortUrlRecord, StorageError> {
        Ok(record)
    }

    async fn mark_deleted(
        &self,
        _owner_id: Uuid,
        _aliases: &[String],
    ) -> Result<u64, StorageError> {
        Ok(0)
    }

    async fn ping(&self) -> Result<(), StorageError> {
        Ok(())
    }

    async fn truncate(&self) -> Result<(), StorageError> {
        Ok(())
    }
}
