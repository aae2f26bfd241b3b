//! In-memory storage backend.
//!
//! Will be destroyed on process shutdown; intended for tests and local
//! development.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::ShortUrlRecord;
use crate::domain::repositories::ShortUrlRepository;
use crate::error::StorageError;

/// A map from alias to record behind a read-write lock.
///
/// Readers take the read lock; `save` holds the write lock across both the
/// source-URL uniqueness scan and the insert, so two concurrent saves of the
/// same source URL cannot both pass the scan.
#[derive(Debug, Default)]
pub struct MemoryShortUrlRepository {
    records: RwLock<HashMap<String, ShortUrlRecord>>,
}

impl MemoryShortUrlRepository {
    /// Creates a new empty in-memory storage.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ShortUrlRepository for MemoryShortUrlRepository {
    async fn find_by_alias(&self, alias: &str) -> Result<Option<ShortUrlRecord>, StorageError> {
        Ok(self.records.read().await.get(alias).cloned())
    }

    async fn find_by_source_url(
        &self,
        source_url: &str,
    ) -> Result<Option<ShortUrlRecord>, StorageError> {
        Ok(self
            .records
            .read()
            .await
            .values()
            .find(|record| record.source_url == source_url)
            .cloned())
    }

    async fn save(&self, record: ShortUrlRecord) -> Result<ShortUrlRecord, StorageError> {
        let mut records = self.records.write().await;

        if let Some(existing) = records
            .values()
            .find(|candidate| candidate.source_url == record.source_url)
        {
            return Err(StorageError::UniqueViolation {
                existing: Some(Box::new(existing.clone())),
            });
        }

        if records.contains_key(&record.alias) {
            // Alias slots are probed before saving; a hit here means two
            // saves raced onto the same alias.
            return Err(StorageError::QueryFailed(format!(
                "alias {:?} is already taken",
                record.alias
            )));
        }

        records.insert(record.alias.clone(), record.clone());

        Ok(record)
    }

    async fn mark_deleted(&self, owner_id: Uuid, aliases: &[String]) -> Result<u64, StorageError> {
        let mut records = self.records.write().await;
        let mut deleted = 0;

        for alias in aliases {
            if let Some(record) = records.get_mut(alias)
                && record.is_owned_by(owner_id)
                && !record.is_deleted
            {
                record.is_deleted = true;
                deleted += 1;
            }
        }

        Ok(deleted)
    }

    async fn ping(&self) -> Result<(), StorageError> {
        Ok(())
    }

    async fn truncate(&self) -> Result<(), StorageError> {
        self.records.write().await.clear();
        Ok(())
    }
}
