//! File-backed storage: an in-memory index mirroring an append-only
//! line-delimited JSON log.
//!
//! Every mutation appends one JSON line; the full log is replayed on
//! startup, last line per alias wins. The linear source-URL scan in `save`
//! is O(n) and targets small/dev datasets.

use std::collections::HashMap;
use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::Path;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tracing::info;
use uuid::Uuid;

use crate::domain::entities::ShortUrlRecord;
use crate::domain::repositories::ShortUrlRepository;
use crate::error::StorageError;

/// On-disk line format. Field names are a stable, de facto durable format;
/// `is_deleted` is only written for soft-delete entries so older readers
/// still see the original four-field shape.
#[derive(Debug, Serialize, Deserialize)]
struct LogLine {
    user_id: Option<Uuid>,
    uuid: Uuid,
    short_url: String,
    original_url: String,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    is_deleted: bool,
}

impl From<&ShortUrlRecord> for LogLine {
    fn from(record: &ShortUrlRecord) -> Self {
        Self {
            user_id: record.owner_id,
            uuid: record.id,
            short_url: record.alias.clone(),
            original_url: record.source_url.clone(),
            is_deleted: record.is_deleted,
        }
    }
}

impl From<LogLine> for ShortUrlRecord {
    fn from(line: LogLine) -> Self {
        Self {
            id: line.uuid,
            alias: line.short_url,
            source_url: line.original_url,
            owner_id: line.user_id,
            is_deleted: line.is_deleted,
        }
    }
}

struct FileInner {
    index: HashMap<String, ShortUrlRecord>,
    log: File,
}

impl FileInner {
    /// Appends one record to the log. Called before the index is mutated so
    /// a failed write leaves memory untouched.
    fn append(&mut self, record: &ShortUrlRecord) -> Result<(), StorageError> {
        let line = serde_json::to_string(&LogLine::from(record))
            .map_err(|e| StorageError::QueryFailed(format!("failed to encode log line: {e}")))?;

        writeln!(self.log, "{line}")
            .and_then(|()| self.log.flush())
            .map_err(|e| StorageError::QueryFailed(format!("failed to append log line: {e}")))
    }
}

/// Append-only JSON log storage with an in-memory index.
pub struct FileShortUrlRepository {
    inner: Mutex<FileInner>,
}

impl FileShortUrlRepository {
    /// Opens (or creates) the log at `path` and replays it into the index.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::RestoreFailed`] when the log cannot be read
    /// or contains a malformed line; callers must treat this as fatal.
    pub fn new(path: impl AsRef<Path>) -> Result<Self, StorageError> {
        let path = path.as_ref().to_path_buf();
        let index = replay_log(&path)?;

        let log = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|e| StorageError::RestoreFailed {
                reason: format!("failed to open {}: {e}", path.display()),
                line: String::new(),
            })?;

        info!(path = %path.display(), records = index.len(), "restored file storage");

        Ok(Self {
            inner: Mutex::new(FileInner { index, log }),
        })
    }
}

/// Replays the log line by line; last line per alias wins.
fn replay_log(path: &Path) -> Result<HashMap<String, ShortUrlRecord>, StorageError> {
    let mut index = HashMap::new();

    let file = match File::open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(index),
        Err(e) => {
            return Err(StorageError::RestoreFailed {
                reason: format!("failed to open {}: {e}", path.display()),
                line: String::new(),
            });
        }
    };

    for line in BufReader::new(file).lines() {
        let line = line.map_err(|e| StorageError::RestoreFailed {
            reason: format!("failed to read log line: {e}"),
            line: String::new(),
        })?;

        if line.trim().is_empty() {
            continue;
        }

        let parsed: LogLine =
            serde_json::from_str(&line).map_err(|e| StorageError::RestoreFailed {
                reason: e.to_string(),
                line: line.clone(),
            })?;

        let record = ShortUrlRecord::from(parsed);
        index.insert(record.alias.clone(), record);
    }

    Ok(index)
}

#[async_trait]
impl ShortUrlRepository for FileShortUrlRepository {
    async fn find_by_alias(&self, alias: &str) -> Result<Option<ShortUrlRecord>, StorageError> {
        Ok(self.inner.lock().await.index.get(alias).cloned())
    }

    async fn find_by_source_url(
        &self,
        source_url: &str,
    ) -> Result<Option<ShortUrlRecord>, StorageError> {
        Ok(self
            .inner
            .lock()
            .await
            .index
            .values()
            .find(|record| record.source_url == source_url)
            .cloned())
    }

    async fn save(&self, record: ShortUrlRecord) -> Result<ShortUrlRecord, StorageError> {
        let mut inner = self.inner.lock().await;

        if let Some(existing) = inner
            .index
            .values()
            .find(|candidate| candidate.source_url == record.source_url)
        {
            return Err(StorageError::UniqueViolation {
                existing: Some(Box::new(existing.clone())),
            });
        }

        if inner.index.contains_key(&record.alias) {
            return Err(StorageError::QueryFailed(format!(
                "alias {:?} is already taken",
                record.alias
            )));
        }

        inner.append(&record)?;
        inner.index.insert(record.alias.clone(), record.clone());

        Ok(record)
    }

    async fn mark_deleted(&self, owner_id: Uuid, aliases: &[String]) -> Result<u64, StorageError> {
        let mut inner = self.inner.lock().await;
        let mut deleted = 0;

        for alias in aliases {
            let Some(record) = inner.index.get(alias).cloned() else {
                continue;
            };

            if !record.is_owned_by(owner_id) || record.is_deleted {
                continue;
            }

            let mut updated = record;
            updated.is_deleted = true;

            inner.append(&updated)?;
            inner.index.insert(alias.clone(), updated);
            deleted += 1;
        }

        Ok(deleted)
    }

    async fn ping(&self) -> Result<(), StorageError> {
        self.inner
            .lock()
            .await
            .log
            .metadata()
            .map(|_| ())
            .map_err(|e| StorageError::Unavailable(format!("log file inaccessible: {e}")))
    }

    async fn truncate(&self) -> Result<(), StorageError> {
        let mut inner = self.inner.lock().await;

        inner
            .log
            .set_len(0)
            .map_err(|e| StorageError::QueryFailed(format!("failed to truncate log: {e}")))?;
        inner.index.clear();

        Ok(())
    }
}
