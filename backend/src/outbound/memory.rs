//! In-memory `UserLookupRepository` implementation.
//!
//! Records are kept exactly as inserted, including non-canonical handles;
//! handle comparisons canonicalise the stored value on every query.

use std::collections::HashSet;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::ports::{UserLookupError, UserLookupRepository};
use crate::domain::{
    ActiveStatus, CanonicalHandle, LookupPath, UserId, UserIdentifier, UserRecord,
};

/// Process-local user directory.
#[derive(Debug, Default)]
pub struct InMemoryUserLookupRepository {
    records: RwLock<Vec<UserRecord>>,
}

impl InMemoryUserLookupRepository {
    /// Build a repository pre-populated with `records`.
    pub fn with_records(records: impl IntoIterator<Item = UserRecord>) -> Self {
        Self {
            records: RwLock::new(records.into_iter().collect()),
        }
    }

    /// Store a record as-is, replacing any existing record with the same id.
    pub async fn insert(&self, record: UserRecord) {
        let mut records = self.records.write().await;
        match records.iter_mut().find(|existing| existing.id == record.id) {
            Some(existing) => *existing = record,
            None => records.push(record),
        }
    }

    /// Number of stored records.
    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    /// Whether the directory is empty.
    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }

    fn find_id(records: &[UserRecord], id: &UserId) -> Option<UserRecord> {
        records.iter().find(|record| &record.id == id).cloned()
    }

    fn find_handle(records: &[UserRecord], handle: &CanonicalHandle) -> Option<UserRecord> {
        records
            .iter()
            .find(|record| &record.canonical_handle() == handle)
            .cloned()
    }
}

#[async_trait]
impl UserLookupRepository for InMemoryUserLookupRepository {
    async fn find_by_id(&self, id: &UserId) -> Result<Option<UserRecord>, UserLookupError> {
        let records = self.records.read().await;
        Ok(Self::find_id(&records, id))
    }

    async fn find_many_by_ids(&self, ids: &[UserId]) -> Result<Vec<UserRecord>, UserLookupError> {
        let wanted: HashSet<&UserId> = ids.iter().collect();
        let records = self.records.read().await;
        Ok(records
            .iter()
            .filter(|record| wanted.contains(&record.id))
            .cloned()
            .collect())
    }

    async fn find_many_by_normalized_handle(
        &self,
        handles: &[CanonicalHandle],
    ) -> Result<Vec<UserRecord>, UserLookupError> {
        let wanted: HashSet<&CanonicalHandle> = handles.iter().collect();
        let records = self.records.read().await;
        Ok(records
            .iter()
            .filter(|record| wanted.contains(&record.canonical_handle()))
            .cloned()
            .collect())
    }

    async fn find_by_id_or_normalized_handle(
        &self,
        identifier: &UserIdentifier,
    ) -> Result<Option<UserRecord>, UserLookupError> {
        let records = self.records.read().await;
        let found = identifier.lookup_order().into_iter().find_map(|path| match path {
            LookupPath::Id => identifier.id().and_then(|id| Self::find_id(&records, id)),
            LookupPath::Handle => Self::find_handle(&records, identifier.handle()),
        });
        Ok(found)
    }

    async fn list_all(&self) -> Result<Vec<UserRecord>, UserLookupError> {
        Ok(self.records.read().await.clone())
    }

    async fn find_active_statuses(
        &self,
        ids: &[UserId],
    ) -> Result<Vec<ActiveStatus>, UserLookupError> {
        let wanted: HashSet<&UserId> = ids.iter().collect();
        let records = self.records.read().await;
        Ok(records
            .iter()
            .filter(|record| wanted.contains(&record.id))
            .map(UserRecord::active_status)
            .collect())
    }
}
