//! Short URL creation, resolution, batch creation, and soft deletion.

use std::sync::Arc;

use tracing::{debug, warn};
use uuid::Uuid;

use crate::domain::entities::ShortUrlRecord;
use crate::domain::repositories::ShortUrlRepository;
use crate::error::{AppError, StorageError};
use crate::utils::alias_generator::{generate_alias, generate_id};
use crate::utils::url_validator::validate_source_url;

/// Tunables for the short URL service, constructed once at startup from
/// [`crate::config::Config`].
#[derive(Debug, Clone)]
pub struct ShortUrlSettings {
    /// Length of generated aliases.
    pub alias_length: usize,
    /// Upper bound on alias-generation attempts before giving up.
    pub max_generation_attempts: u32,
    /// Base URL a short link is composed from (`base_url` + `/` + alias).
    pub base_url: String,
}

/// One item of a batch-save request, tagged with a caller-supplied
/// correlation id.
#[derive(Debug, Clone)]
pub struct BatchSaveRequest {
    pub correlation_id: String,
    pub source_url: String,
}

/// One successfully shortened item of a batch, under its correlation id.
#[derive(Debug, Clone)]
pub struct BatchSaveResult {
    pub correlation_id: String,
    pub short_url: String,
}

/// Service for creating and resolving short URLs.
///
/// Stateless and safe for concurrent use; all mutable shared state lives in
/// the storage backend.
pub struct ShortUrlService {
    repository: Arc<dyn ShortUrlRepository>,
    settings: ShortUrlSettings,
}

impl ShortUrlService {
    /// Creates a new service over the given storage backend.
    pub fn new(repository: Arc<dyn ShortUrlRepository>, settings: ShortUrlSettings) -> Self {
        Self {
            repository,
            settings,
        }
    }

    /// Creates a short URL record for `source_url`.
    ///
    /// Validates the URL, generates a free alias (bounded retry, see
    /// [`Self::generate_free_alias`]), and persists the record.
    ///
    /// # Errors
    ///
    /// - [`AppError::InvalidSourceUrl`] when `source_url` is not an http(s) URL
    /// - [`AppError::AlreadyExists`] when a record for this source URL already
    ///   exists; the error carries the existing record so callers can treat
    ///   the conflict as a soft success
    /// - [`AppError::ExhaustedRetries`] when no free alias was found within
    ///   the configured attempt bound
    pub async fn save(
        &self,
        owner_id: Option<Uuid>,
        source_url: &str,
    ) -> Result<ShortUrlRecord, AppError> {
        validate_source_url(source_url)?;

        let alias = self.generate_free_alias().await?;
        let record = ShortUrlRecord::new(generate_id(), alias, source_url.to_string(), owner_id);

        match self.repository.save(record).await {
            Ok(saved) => Ok(saved),
            Err(StorageError::UniqueViolation { existing }) => {
                let existing = match existing {
                    Some(existing) => existing,
                    // Backend could not report the winner; look it up.
                    None => self
                        .repository
                        .find_by_source_url(source_url)
                        .await?
                        .map(Box::new)
                        .ok_or_else(|| {
                            StorageError::QueryFailed(
                                "conflicting record disappeared during save".to_string(),
                            )
                        })?,
                };

                Err(AppError::AlreadyExists { existing })
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Resolves an alias to its record.
    ///
    /// Tolerates callers passing a raw URL path by stripping leading `/`.
    ///
    /// # Errors
    ///
    /// - [`AppError::EmptyAlias`] when the alias is empty after stripping
    /// - [`AppError::NotFound`] when no record exists
    /// - [`AppError::Deleted`] when the record was soft-deleted
    pub async fn find_by_alias(&self, alias: &str) -> Result<ShortUrlRecord, AppError> {
        let alias = alias.trim_start_matches('/');

        if alias.is_empty() {
            return Err(AppError::EmptyAlias);
        }

        let record = self
            .repository
            .find_by_alias(alias)
            .await?
            .ok_or(AppError::NotFound)?;

        if record.is_deleted {
            return Err(AppError::Deleted);
        }

        Ok(record)
    }

    /// Shortens a batch of URLs anonymously, best-effort.
    ///
    /// Items that fail are skipped rather than aborting the batch; output
    /// preserves input order for the survivors. A uniqueness conflict counts
    /// as success and yields the existing record's short link.
    pub async fn batch_save(&self, items: Vec<BatchSaveRequest>) -> Vec<BatchSaveResult> {
        let mut results = Vec::with_capacity(items.len());

        for item in items {
            let alias = match self.save(None, &item.source_url).await {
                Ok(record) => record.alias,
                Err(AppError::AlreadyExists { existing }) => existing.alias,
                Err(err) => {
                    warn!(
                        correlation_id = %item.correlation_id,
                        error = %err,
                        "skipping batch item"
                    );
                    continue;
                }
            };

            results.push(BatchSaveResult {
                correlation_id: item.correlation_id,
                short_url: self.short_url(&alias),
            });
        }

        results
    }

    /// Soft-deletes the given aliases for `owner_id`.
    ///
    /// Aliases not owned by `owner_id` are silently skipped; ownership
    /// mismatch is deliberately indistinguishable from "not found" so
    /// existence does not leak across users. Idempotent.
    ///
    /// # Errors
    ///
    /// Propagates storage errors unchanged.
    pub async fn mark_deleted(&self, owner_id: Uuid, aliases: &[String]) -> Result<u64, AppError> {
        let deleted = self.repository.mark_deleted(owner_id, aliases).await?;
        debug!(%owner_id, requested = aliases.len(), deleted, "soft-deleted aliases");
        Ok(deleted)
    }

    /// Composes the public short URL for an alias.
    pub fn short_url(&self, alias: &str) -> String {
        format!("{}/{}", self.settings.base_url.trim_end_matches('/'), alias)
    }

    /// Storage liveness probe.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Storage`] wrapping
    /// [`StorageError::Unavailable`] when the backend is unreachable.
    pub async fn ping(&self) -> Result<(), AppError> {
        Ok(self.repository.ping().await?)
    }

    /// Generates an alias not currently present in storage.
    ///
    /// Explicit attempt counter, bounded by `max_generation_attempts`; each
    /// attempt generates a fresh alias and probes `find_by_alias`.
    async fn generate_free_alias(&self) -> Result<String, AppError> {
        let max_attempts = self.settings.max_generation_attempts;

        for attempt in 1..=max_attempts {
            let alias = generate_alias(self.settings.alias_length)?;

            if self.repository.find_by_alias(&alias).await?.is_none() {
                return Ok(alias);
            }

            debug!(attempt, max_attempts, "generated alias already taken");
        }

        Err(AppError::ExhaustedRetries {
            attempts: max_attempts,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::MockShortUrlRepository;
    use mockall::Sequence;

    fn settings() -> ShortUrlSettings {
        ShortUrlSettings {
            alias_length: 5,
            max_generation_attempts: 3,
            base_url: "http://localhost:8080".to_string(),
        }
    }

    fn taken_record(alias: &str, url: &str) -> ShortUrlRecord {
        ShortUrlRecord::new(Uuid::new_v4(), alias.to_string(), url.to_string(), None)
    }

    #[tokio::test]
    async fn test_save_success() {
        let mut mock_repo = MockShortUrlRepository::new();

        mock_repo
            .expect_find_by_alias()
            .times(1)
            .returning(|_| Ok(None));

        mock_repo
            .expect_save()
            .withf(|record| record.source_url == "https://example.com" && !record.is_deleted)
            .times(1)
            .returning(Ok);

        let service = ShortUrlService::new(Arc::new(mock_repo), settings());

        let record = service.save(None, "https://example.com").await.unwrap();
        assert_eq!(record.source_url, "https://example.com");
        assert_eq!(record.alias.len(), 5);
    }

    #[tokio::test]
    async fn test_save_invalid_url_skips_storage() {
        let mock_repo = MockShortUrlRepository::new();
        let service = ShortUrlService::new(Arc::new(mock_repo), settings());

        let result = service.save(None, "not-a-url").await;
        assert!(matches!(result, Err(AppError::InvalidSourceUrl(_))));
    }

    #[tokio::test]
    async fn test_save_retries_alias_generation_on_collision() {
        let mut mock_repo = MockShortUrlRepository::new();
        let mut seq = Sequence::new();

        // First two aliases are taken, third is free.
        for _ in 0..2 {
            mock_repo
                .expect_find_by_alias()
                .times(1)
                .in_sequence(&mut seq)
                .returning(|alias| Ok(Some(taken_record(alias, "https://other.com"))));
        }
        mock_repo
            .expect_find_by_alias()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(None));

        mock_repo.expect_save().times(1).returning(Ok);

        let service = ShortUrlService::new(Arc::new(mock_repo), settings());

        let result = service.save(None, "https://example.com").await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_save_exhausts_generation_attempts() {
        let mut mock_repo = MockShortUrlRepository::new();

        mock_repo
            .expect_find_by_alias()
            .times(3)
            .returning(|alias| Ok(Some(taken_record(alias, "https://other.com"))));

        mock_repo.expect_save().times(0);

        let service = ShortUrlService::new(Arc::new(mock_repo), settings());

        let result = service.save(None, "https://example.com").await;
        assert!(matches!(
            result,
            Err(AppError::ExhaustedRetries { attempts: 3 })
        ));
    }

    #[tokio::test]
    async fn test_save_conflict_returns_existing_record() {
        let mut mock_repo = MockShortUrlRepository::new();

        mock_repo
            .expect_find_by_alias()
            .times(1)
            .returning(|_| Ok(None));

        let existing = taken_record("winnr", "https://example.com");
        let returned = existing.clone();
        mock_repo.expect_save().times(1).returning(move |_| {
            Err(StorageError::UniqueViolation {
                existing: Some(Box::new(returned.clone())),
            })
        });

        let service = ShortUrlService::new(Arc::new(mock_repo), settings());

        let result = service.save(None, "https://example.com").await;
        match result {
            Err(AppError::AlreadyExists { existing: got }) => {
                assert_eq!(*got, existing);
            }
            other => panic!("expected AlreadyExists, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_save_conflict_without_record_falls_back_to_lookup() {
        let mut mock_repo = MockShortUrlRepository::new();

        mock_repo
            .expect_find_by_alias()
            .times(1)
            .returning(|_| Ok(None));

        mock_repo
            .expect_save()
            .times(1)
            .returning(|_| Err(StorageError::UniqueViolation { existing: None }));

        let existing = taken_record("winnr", "https://example.com");
        let returned = existing.clone();
        mock_repo
            .expect_find_by_source_url()
            .times(1)
            .returning(move |_| Ok(Some(returned.clone())));

        let service = ShortUrlService::new(Arc::new(mock_repo), settings());

        let result = service.save(None, "https://example.com").await;
        match result {
            Err(AppError::AlreadyExists { existing: got }) => assert_eq!(*got, existing),
            other => panic!("expected AlreadyExists, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_find_by_alias_strips_leading_slash() {
        let mut mock_repo = MockShortUrlRepository::new();

        mock_repo
            .expect_find_by_alias()
            .withf(|alias| alias == "abcde")
            .times(1)
            .returning(|alias| Ok(Some(taken_record(alias, "https://example.com"))));

        let service = ShortUrlService::new(Arc::new(mock_repo), settings());

        let record = service.find_by_alias("/abcde").await.unwrap();
        assert_eq!(record.alias, "abcde");
    }

    #[tokio::test]
    async fn test_find_by_alias_empty_after_stripping() {
        let mock_repo = MockShortUrlRepository::new();
        let service = ShortUrlService::new(Arc::new(mock_repo), settings());

        assert!(matches!(
            service.find_by_alias("/").await,
            Err(AppError::EmptyAlias)
        ));
        assert!(matches!(
            service.find_by_alias("").await,
            Err(AppError::EmptyAlias)
        ));
    }

    #[tokio::test]
    async fn test_find_by_alias_deleted_is_distinct_from_missing() {
        let mut mock_repo = MockShortUrlRepository::new();

        mock_repo
            .expect_find_by_alias()
            .withf(|alias| alias == "ghost")
            .returning(|_| Ok(None));

        mock_repo.expect_find_by_alias().returning(|alias| {
            let mut record = taken_record(alias, "https://example.com");
            record.is_deleted = true;
            Ok(Some(record))
        });

        let service = ShortUrlService::new(Arc::new(mock_repo), settings());

        assert!(matches!(
            service.find_by_alias("ghost").await,
            Err(AppError::NotFound)
        ));
        assert!(matches!(
            service.find_by_alias("gonez").await,
            Err(AppError::Deleted)
        ));
    }

    #[tokio::test]
    async fn test_batch_save_skips_failed_items() {
        let mut mock_repo = MockShortUrlRepository::new();

        // Two valid URLs reach storage; the malformed one never does.
        mock_repo.expect_find_by_alias().returning(|_| Ok(None));
        mock_repo.expect_save().times(2).returning(Ok);

        let service = ShortUrlService::new(Arc::new(mock_repo), settings());

        let results = service
            .batch_save(vec![
                BatchSaveRequest {
                    correlation_id: "1".to_string(),
                    source_url: "https://example.com/a".to_string(),
                },
                BatchSaveRequest {
                    correlation_id: "2".to_string(),
                    source_url: "garbage".to_string(),
                },
                BatchSaveRequest {
                    correlation_id: "3".to_string(),
                    source_url: "https://example.com/b".to_string(),
                },
            ])
            .await;

        assert_eq!(results.len(), 2);
        assert_eq!(results[0].correlation_id, "1");
        assert_eq!(results[1].correlation_id, "3");
    }

    #[tokio::test]
    async fn test_batch_save_conflict_is_soft_success() {
        let mut mock_repo = MockShortUrlRepository::new();

        mock_repo.expect_find_by_alias().returning(|_| Ok(None));
        mock_repo.expect_save().times(1).returning(|_| {
            Err(StorageError::UniqueViolation {
                existing: Some(Box::new(taken_record("winnr", "https://example.com"))),
            })
        });

        let service = ShortUrlService::new(Arc::new(mock_repo), settings());

        let results = service
            .batch_save(vec![BatchSaveRequest {
                correlation_id: "dup".to_string(),
                source_url: "https://example.com".to_string(),
            }])
            .await;

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].short_url, "http://localhost:8080/winnr");
    }

    #[tokio::test]
    async fn test_short_url_composition() {
        let service = ShortUrlService::new(
            Arc::new(MockShortUrlRepository::new()),
            ShortUrlSettings {
                alias_length: 5,
                max_generation_attempts: 5,
                base_url: "https://short.example.com/".to_string(),
            },
        );

        assert_eq!(service.short_url("abcde"), "https://short.example.com/abcde");
    }
}
