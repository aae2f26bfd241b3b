//! PostgreSQL storage backend.
//!
//! Uniqueness is enforced by the unique index on `source_url`; the insert
//! error is inspected once to translate that violation into
//! [`StorageError::UniqueViolation`] with the winning row attached.

use std::time::Duration;

use async_trait::async_trait;
use sqlx::PgPool;
use tokio_retry::Retry;
use tokio_retry::strategy::FixedInterval;
use tracing::info;
use uuid::Uuid;

use crate::domain::entities::ShortUrlRecord;
use crate::domain::repositories::ShortUrlRepository;
use crate::error::StorageError;

/// Name Postgres assigns to the `source_url` unique constraint in the
/// migration.
const SOURCE_URL_CONSTRAINT: &str = "short_urls_source_url_key";

#[derive(sqlx::FromRow)]
struct ShortUrlRow {
    id: Uuid,
    alias: String,
    source_url: String,
    owner_id: Option<Uuid>,
    is_deleted: bool,
}

impl From<ShortUrlRow> for ShortUrlRecord {
    fn from(row: ShortUrlRow) -> Self {
        Self {
            id: row.id,
            alias: row.alias,
            source_url: row.source_url,
            owner_id: row.owner_id,
            is_deleted: row.is_deleted,
        }
    }
}

/// PostgreSQL repository over a connection pool.
pub struct PostgresShortUrlRepository {
    pool: PgPool,
}

impl PostgresShortUrlRepository {
    /// Connects to the database with bounded retry and runs migrations.
    ///
    /// The database may not be ready when the service starts, so the
    /// initial connect is retried `connect_attempts` times with
    /// `connect_delay` between attempts.
    ///
    /// # Errors
    ///
    /// Returns an error when the database stays unreachable past the
    /// attempt bound or migrations fail.
    pub async fn connect(
        database_url: &str,
        connect_attempts: usize,
        connect_delay: Duration,
    ) -> anyhow::Result<Self> {
        let strategy = FixedInterval::new(connect_delay).take(connect_attempts.saturating_sub(1));

        let pool = Retry::spawn(strategy, || PgPool::connect(database_url)).await?;
        info!("connected to database");

        sqlx::migrate!("./migrations").run(&pool).await?;

        Ok(Self { pool })
    }

    /// Wraps an existing pool; used by tests that manage their own pool.
    pub fn with_pool(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn is_source_url_violation(e: &sqlx::Error) -> bool {
    let Some(db_err) = e.as_database_error() else {
        return false;
    };

    db_err.is_unique_violation() && db_err.constraint() == Some(SOURCE_URL_CONSTRAINT)
}

fn query_failed(e: sqlx::Error) -> StorageError {
    StorageError::QueryFailed(e.to_string())
}

#[async_trait]
impl ShortUrlRepository for PostgresShortUrlRepository {
    async fn find_by_alias(&self, alias: &str) -> Result<Option<ShortUrlRecord>, StorageError> {
        sqlx::query_as::<_, ShortUrlRow>(
            "SELECT id, alias, source_url, owner_id, is_deleted FROM short_urls WHERE alias = $1",
        )
        .bind(alias)
        .fetch_optional(&self.pool)
        .await
        .map(|row| row.map(Into::into))
        .map_err(query_failed)
    }

    async fn find_by_source_url(
        &self,
        source_url: &str,
    ) -> Result<Option<ShortUrlRecord>, StorageError> {
        sqlx::query_as::<_, ShortUrlRow>(
            "SELECT id, alias, source_url, owner_id, is_deleted FROM short_urls \
             WHERE source_url = $1",
        )
        .bind(source_url)
        .fetch_optional(&self.pool)
        .await
        .map(|row| row.map(Into::into))
        .map_err(query_failed)
    }

    async fn save(&self, record: ShortUrlRecord) -> Result<ShortUrlRecord, StorageError> {
        let result = sqlx::query_as::<_, ShortUrlRow>(
            "INSERT INTO short_urls (id, alias, source_url, owner_id, is_deleted) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING id, alias, source_url, owner_id, is_deleted",
        )
        .bind(record.id)
        .bind(&record.alias)
        .bind(&record.source_url)
        .bind(record.owner_id)
        .bind(record.is_deleted)
        .fetch_one(&self.pool)
        .await;

        match result {
            Ok(row) => Ok(row.into()),
            Err(e) if is_source_url_violation(&e) => {
                let existing = self.find_by_source_url(&record.source_url).await?;
                Err(StorageError::UniqueViolation {
                    existing: existing.map(Box::new),
                })
            }
            Err(e) => Err(query_failed(e)),
        }
    }

    async fn mark_deleted(&self, owner_id: Uuid, aliases: &[String]) -> Result<u64, StorageError> {
        let result = sqlx::query(
            "UPDATE short_urls SET is_deleted = TRUE \
             WHERE owner_id = $1 AND is_deleted = FALSE AND alias = ANY($2)",
        )
        .bind(owner_id)
        .bind(aliases)
        .execute(&self.pool)
        .await
        .map_err(query_failed)?;

        Ok(result.rows_affected())
    }

    async fn ping(&self) -> Result<(), StorageError> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map(|_| ())
            .map_err(|e| StorageError::Unavailable(e.to_string()))
    }

    async fn truncate(&self) -> Result<(), StorageError> {
        sqlx::query("TRUNCATE short_urls")
            .execute(&self.pool)
            .await
            .map(|_| ())
            .map_err(query_failed)
    }
}
