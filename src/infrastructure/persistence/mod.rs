//! Storage backends and the startup factory selecting between them.

pub mod file;
pub mod memory;
pub mod null;
pub mod postgres;

pub use file::FileShortUrlRepository;
pub use memory::MemoryShortUrlRepository;
pub use null::NullShortUrlRepository;
pub use postgres::PostgresShortUrlRepository;

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use tracing::info;

use crate::config::{Config, StorageKind};
use crate::domain::repositories::ShortUrlRepository;

/// Builds the storage backend selected by the configuration.
///
/// # Errors
///
/// Returns an error when the selected backend cannot be initialized: a
/// missing connection parameter, an unreachable database, or a corrupt
/// file-storage log.
pub async fn build_repository(config: &Config) -> Result<Arc<dyn ShortUrlRepository>> {
    let repository: Arc<dyn ShortUrlRepository> = match config.storage {
        StorageKind::Memory => {
            info!("storage: memory");
            Arc::new(MemoryShortUrlRepository::new())
        }
        StorageKind::File => {
            let path = config
                .file_storage_path
                .as_ref()
                .context("FILE_STORAGE_PATH must be set when STORAGE=file")?;
            info!(path = %path.display(), "storage: file");
            Arc::new(FileShortUrlRepository::new(path)?)
        }
        StorageKind::Postgres => {
            let database_url = config
                .database_url
                .as_ref()
                .context("DATABASE_URL must be set when STORAGE=postgres")?;
            info!("storage: postgres");
            Arc::new(
                PostgresShortUrlRepository::connect(
                    database_url,
                    config.db_connect_attempts,
                    Duration::from_millis(config.db_connect_delay_ms),
                )
                .await?,
            )
        }
        StorageKind::Null => {
            info!("storage: null");
            Arc::new(NullShortUrlRepository::new())
        }
    };

    Ok(repository)
}
