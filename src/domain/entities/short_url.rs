//! Short URL entity: the mapping between a generated alias and a source URL.

use uuid::Uuid;

/// A stored short URL record.
///
/// `alias` is the lookup key and is unique among non-deleted records;
/// `source_url` is unique across all records (one canonical short URL per
/// long URL). Records are never physically removed outside of test tooling;
/// deletion flips `is_deleted` instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShortUrlRecord {
    pub id: Uuid,
    pub alias: String,
    pub source_url: String,
    pub owner_id: Option<Uuid>,
    pub is_deleted: bool,
}

impl ShortUrlRecord {
    /// Creates a new active (non-deleted) record.
    pub fn new(id: Uuid, alias: String, source_url: String, owner_id: Option<Uuid>) -> Self {
        Self {
            id,
            alias,
            source_url,
            owner_id,
            is_deleted: false,
        }
    }

    /// Returns true if the record belongs to the given owner.
    ///
    /// Anonymous records (no owner) belong to nobody.
    pub fn is_owned_by(&self, owner_id: Uuid) -> bool {
        self.owner_id == Some(owner_id)
    }
}
