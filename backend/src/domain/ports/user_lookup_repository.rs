//! Driven port for reading user records from the directory store.
//!
//! Adapters own the handle comparison rule: stored handles are compared in
//! canonical form (see [`crate::domain::normalize_handle`]) against already
//! canonical query handles, so records stored with legacy casing, padding or
//! overlong handles still match.

use async_trait::async_trait;

use crate::domain::{ActiveStatus, CanonicalHandle, UserId, UserIdentifier, UserRecord};

use super::define_port_error;

define_port_error! {
    /// Errors raised by user lookup adapters.
    pub enum UserLookupError {
        /// Repository connection could not be established.
        Connection { message: String } => "user repository connection failed: {message}",
        /// Query failed during execution.
        Query { message: String } => "user repository query failed: {message}",
        /// Query did not complete within the configured deadline.
        Timeout { message: String } => "user repository query timed out: {message}",
    }
}

/// Read-only access to stored user records.
///
/// Batch methods return matches in no particular order and never fail
/// because an input matched nothing. Callers must not pass empty slices;
/// the resolver short-circuits those before reaching the adapter.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserLookupRepository: Send + Sync {
    /// Fetch one record by id.
    async fn find_by_id(&self, id: &UserId) -> Result<Option<UserRecord>, UserLookupError>;

    /// Fetch every record whose id is in `ids`.
    async fn find_many_by_ids(&self, ids: &[UserId]) -> Result<Vec<UserRecord>, UserLookupError>;

    /// Fetch every record whose canonical stored handle is in `handles`.
    async fn find_many_by_normalized_handle(
        &self,
        handles: &[CanonicalHandle],
    ) -> Result<Vec<UserRecord>, UserLookupError>;

    /// Fetch the first record matching `identifier`, trying its lookup paths
    /// in [`UserIdentifier::lookup_order`].
    async fn find_by_id_or_normalized_handle(
        &self,
        identifier: &UserIdentifier,
    ) -> Result<Option<UserRecord>, UserLookupError>;

    /// Fetch every stored record.
    async fn list_all(&self) -> Result<Vec<UserRecord>, UserLookupError>;

    /// Fetch `{id, active}` pairs for every record whose id is in `ids`.
    async fn find_active_statuses(
        &self,
        ids: &[UserId],
    ) -> Result<Vec<ActiveStatus>, UserLookupError>;
}
