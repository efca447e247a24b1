//! Driving port for the directory read operations.
//!
//! Inbound adapters (the operator CLI, tests) call these operations with the
//! caller context and the raw parameters they received. `None` stands for a
//! parameter the caller did not supply at all; presence checks happen inside
//! the implementation so every adapter reports missing input the same way.

use async_trait::async_trait;

use crate::domain::{ActiveStatus, CallerContext, Error, UserRecord};

/// The six fixed directory queries.
///
/// # Examples
///
/// ```rust,no_run
/// # async fn example() -> Result<(), user_directory::domain::Error> {
/// use std::sync::Arc;
/// use user_directory::domain::{CallerContext, UserResolverService};
/// use user_directory::domain::ports::UserDirectoryQuery;
/// use user_directory::outbound::memory::InMemoryUserLookupRepository;
///
/// let service = UserResolverService::new(Arc::new(InMemoryUserLookupRepository::default()));
/// let statuses = service
///     .get_active_statuses(&CallerContext::anonymous(), Some(Vec::new()))
///     .await?;
/// assert!(statuses.is_empty());
/// # Ok(())
/// # }
/// ```
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserDirectoryQuery: Send + Sync {
    /// Fetch exactly one record by id.
    async fn get_user_by_id(
        &self,
        ctx: &CallerContext,
        id: Option<String>,
    ) -> Result<UserRecord, Error>;

    /// Fetch the records matching `ids`; misses are omitted.
    async fn get_users_by_ids(
        &self,
        ctx: &CallerContext,
        ids: Option<Vec<String>>,
    ) -> Result<Vec<UserRecord>, Error>;

    /// Fetch the records whose canonical handle matches a canonicalised input.
    async fn get_users_by_handles(
        &self,
        ctx: &CallerContext,
        handles: Option<Vec<String>>,
    ) -> Result<Vec<UserRecord>, Error>;

    /// Fetch exactly one record by id or handle.
    async fn get_user(
        &self,
        ctx: &CallerContext,
        identifier: Option<String>,
    ) -> Result<UserRecord, Error>;

    /// Resolve each identifier like [`UserDirectoryQuery::get_user`] and
    /// merge the matches, one per record. `None` lists every record.
    async fn find_users(
        &self,
        ctx: &CallerContext,
        identifiers: Option<Vec<String>>,
    ) -> Result<Vec<UserRecord>, Error>;

    /// Public `{id, active}` projection for the matching ids.
    async fn get_active_statuses(
        &self,
        ctx: &CallerContext,
        ids: Option<Vec<String>>,
    ) -> Result<Vec<ActiveStatus>, Error>;
}
