//! Directory query service.
//!
//! Implements [`UserDirectoryQuery`] over any [`UserLookupRepository`]. Each
//! operation checks parameter presence first, then the authorization gate,
//! and only then touches the repository. Empty batches short-circuit before
//! the repository is reached.

use std::collections::HashSet;
use std::num::NonZeroUsize;
use std::sync::Arc;

use async_trait::async_trait;
use futures_util::{StreamExt, TryStreamExt, stream};
use tracing::debug;

use crate::domain::ports::{UserDirectoryQuery, UserLookupRepository};
use crate::domain::{
    ActiveStatus, CallerContext, CanonicalHandle, Error, Operation, UserId, UserIdentifier,
    UserRecord, authorize,
};

/// Default number of identifiers `find_users` resolves at once.
pub const DEFAULT_LOOKUP_CONCURRENCY: NonZeroUsize = match NonZeroUsize::new(8) {
    Some(value) => value,
    None => NonZeroUsize::MIN,
};

/// Resolver service implementing the directory driving port.
#[derive(Clone)]
pub struct UserResolverService<R> {
    repository: Arc<R>,
    lookup_concurrency: NonZeroUsize,
}

impl<R> UserResolverService<R> {
    /// Create a service backed by `repository`.
    pub fn new(repository: Arc<R>) -> Self {
        Self {
            repository,
            lookup_concurrency: DEFAULT_LOOKUP_CONCURRENCY,
        }
    }

    /// Bound the number of concurrent identifier resolutions in
    /// [`UserDirectoryQuery::find_users`].
    pub fn with_lookup_concurrency(mut self, lookup_concurrency: NonZeroUsize) -> Self {
        self.lookup_concurrency = lookup_concurrency;
        self
    }

    /// Configured resolution concurrency.
    pub fn lookup_concurrency(&self) -> NonZeroUsize {
        self.lookup_concurrency
    }
}

/// Reject an absent or empty scalar parameter.
fn require_scalar(value: Option<String>, parameter: &'static str) -> Result<String, Error> {
    match value {
        Some(value) if !value.is_empty() => Ok(value),
        _ => Err(Error::missing_parameter(parameter)),
    }
}

fn require_list(values: Option<Vec<String>>, parameter: &'static str) -> Result<Vec<String>, Error> {
    values.ok_or_else(|| Error::missing_parameter(parameter))
}

/// Parse ids, dropping tokens that can never match and repeated entries.
fn distinct_ids(raw: &[String]) -> Vec<UserId> {
    let mut seen = HashSet::with_capacity(raw.len());
    raw.iter()
        .filter_map(|token| UserId::new(token).ok())
        .filter(|id| seen.insert(*id))
        .collect()
}

fn distinct_handles(raw: &[String]) -> Vec<CanonicalHandle> {
    let mut seen = HashSet::with_capacity(raw.len());
    raw.iter()
        .map(|token| CanonicalHandle::from_raw(token))
        .filter(|handle| seen.insert(handle.clone()))
        .collect()
}

/// Keep the first record seen for each id, in input order.
fn merge_first_wins(resolved: impl IntoIterator<Item = Option<UserRecord>>) -> Vec<UserRecord> {
    let mut seen = HashSet::new();
    resolved
        .into_iter()
        .flatten()
        .filter(|record| seen.insert(record.id))
        .collect()
}

#[async_trait]
impl<R> UserDirectoryQuery for UserResolverService<R>
where
    R: UserLookupRepository,
{
    async fn get_user_by_id(
        &self,
        ctx: &CallerContext,
        id: Option<String>,
    ) -> Result<UserRecord, Error> {
        let raw = require_scalar(id, "id")?;
        authorize(ctx, Operation::GetUserById)?;

        let Ok(id) = UserId::new(&raw) else {
            debug!(operation = Operation::GetUserById.name(), "id is not a valid uuid");
            return Err(Error::not_found(raw));
        };
        self.repository
            .find_by_id(&id)
            .await?
            .ok_or_else(|| Error::not_found(raw))
    }

    async fn get_users_by_ids(
        &self,
        ctx: &CallerContext,
        ids: Option<Vec<String>>,
    ) -> Result<Vec<UserRecord>, Error> {
        let raw = require_list(ids, "ids")?;
        authorize(ctx, Operation::GetUsersByIds)?;

        let ids = distinct_ids(&raw);
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let records = self.repository.find_many_by_ids(&ids).await?;
        debug!(
            operation = Operation::GetUsersByIds.name(),
            requested = ids.len(),
            matched = records.len(),
            "resolved ids"
        );
        Ok(records)
    }

    async fn get_users_by_handles(
        &self,
        ctx: &CallerContext,
        handles: Option<Vec<String>>,
    ) -> Result<Vec<UserRecord>, Error> {
        let raw = require_list(handles, "handles")?;
        authorize(ctx, Operation::GetUsersByHandles)?;

        let handles = distinct_handles(&raw);
        if handles.is_empty() {
            return Ok(Vec::new());
        }
        let records = self
            .repository
            .find_many_by_normalized_handle(&handles)
            .await?;
        debug!(
            operation = Operation::GetUsersByHandles.name(),
            requested = handles.len(),
            matched = records.len(),
            "resolved handles"
        );
        Ok(records)
    }

    async fn get_user(
        &self,
        ctx: &CallerContext,
        identifier: Option<String>,
    ) -> Result<UserRecord, Error> {
        let raw = require_scalar(identifier, "identifier")?;
        authorize(ctx, Operation::GetUser)?;

        let identifier = UserIdentifier::parse(raw);
        self.repository
            .find_by_id_or_normalized_handle(&identifier)
            .await?
            .ok_or_else(|| Error::not_found(identifier.raw()))
    }

    async fn find_users(
        &self,
        ctx: &CallerContext,
        identifiers: Option<Vec<String>>,
    ) -> Result<Vec<UserRecord>, Error> {
        authorize(ctx, Operation::FindUsers)?;

        let Some(identifiers) = identifiers else {
            let records = self.repository.list_all().await?;
            debug!(
                operation = Operation::FindUsers.name(),
                matched = records.len(),
                "listed every record"
            );
            return Ok(records);
        };
        if identifiers.is_empty() {
            return Ok(Vec::new());
        }

        let requested = identifiers.len();
        let repository = self.repository.as_ref();
        let resolved: Vec<Option<UserRecord>> = stream::iter(identifiers)
            .map(|raw| async move {
                let identifier = UserIdentifier::parse(raw);
                repository.find_by_id_or_normalized_handle(&identifier).await
            })
            .buffered(self.lookup_concurrency.get())
            .try_collect()
            .await?;

        let records = merge_first_wins(resolved);
        debug!(
            operation = Operation::FindUsers.name(),
            requested,
            matched = records.len(),
            "resolved identifiers"
        );
        Ok(records)
    }

    async fn get_active_statuses(
        &self,
        ctx: &CallerContext,
        ids: Option<Vec<String>>,
    ) -> Result<Vec<ActiveStatus>, Error> {
        let raw = require_list(ids, "ids")?;
        authorize(ctx, Operation::GetActiveStatuses)?;

        let ids = distinct_ids(&raw);
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        Ok(self.repository.find_active_statuses(&ids).await?)
    }
}

#[cfg(test)]
#[path = "user_resolver_tests.rs"]
mod tests;
