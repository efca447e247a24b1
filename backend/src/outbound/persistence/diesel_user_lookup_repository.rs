//! PostgreSQL-backed `UserLookupRepository` implementation using Diesel ORM.
//!
//! Stored handles are canonicalised inside SQL with the same rule the domain
//! applies to query input, so rows written with legacy casing or padding
//! still match. Every call runs under the configured query deadline.

use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;
use diesel::dsl::sql;
use diesel::pg::Pg;
use diesel::prelude::*;
use diesel::sql_types::{Array, Bool, Text};
use diesel_async::{AsyncPgConnection, RunQueryDsl};
use tracing::debug;
use uuid::Uuid;

use crate::domain::ports::{UserLookupError, UserLookupRepository};
use crate::domain::{
    ActiveStatus, CanonicalHandle, HANDLE_MAX_CHARS, LookupPath, UserId, UserIdentifier,
    UserRecord,
};

use super::models::UserRow;
use super::pool::{DbPool, PoolError};
use super::schema::users;

/// Default per-call deadline.
pub const DEFAULT_QUERY_TIMEOUT: Duration = Duration::from_secs(5);

/// SQL fragment opening `canonical(handle) = ANY(<bind>)`.
///
/// Mirrors [`crate::domain::normalize_handle`]: lower-case ASCII letters,
/// trim [`crate::domain::HANDLE_TRIM_CHARS`], then keep the first 21
/// characters. The `C` collation pins `lower` to ASCII whatever the
/// database locale.
const CANONICAL_HANDLE_ANY: &str =
    "left(btrim(lower(handle COLLATE \"C\"), E' \\t\\n\\r\\f\\x0B'), 21) = ANY(";

/// Diesel-backed implementation of the `UserLookupRepository` port.
#[derive(Clone)]
pub struct DieselUserLookupRepository {
    pool: DbPool,
    query_timeout: Duration,
}

impl DieselUserLookupRepository {
    /// Create a repository with the default query deadline.
    pub fn new(pool: DbPool) -> Self {
        Self {
            pool,
            query_timeout: DEFAULT_QUERY_TIMEOUT,
        }
    }

    /// Override the per-call deadline.
    pub fn with_query_timeout(mut self, query_timeout: Duration) -> Self {
        self.query_timeout = query_timeout;
        self
    }

    async fn within_deadline<T, F>(
        &self,
        operation: &'static str,
        work: F,
    ) -> Result<T, UserLookupError>
    where
        F: Future<Output = Result<T, UserLookupError>> + Send,
    {
        run_with_deadline(self.query_timeout, operation, work).await
    }
}

/// Await `work`, failing with [`UserLookupError::Timeout`] once `deadline`
/// elapses. The abandoned future is dropped.
async fn run_with_deadline<T, F>(
    deadline: Duration,
    operation: &'static str,
    work: F,
) -> Result<T, UserLookupError>
where
    F: Future<Output = Result<T, UserLookupError>>,
{
    match tokio::time::timeout(deadline, work).await {
        Ok(result) => result,
        Err(_) => {
            let timeout_ms = deadline.as_millis();
            debug!(operation, timeout_ms, "query deadline elapsed");
            Err(UserLookupError::timeout(format!(
                "{operation} exceeded {timeout_ms}ms"
            )))
        }
    }
}

/// Map pool errors to lookup connection errors.
fn map_pool_error(error: PoolError) -> UserLookupError {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => {
            UserLookupError::connection(message)
        }
    }
}

/// Map Diesel errors to lookup errors.
fn map_diesel_error(error: diesel::result::Error) -> UserLookupError {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        _ => debug!(
            error_type = %std::any::type_name_of_val(&error),
            "diesel operation failed"
        ),
    }

    match error {
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            UserLookupError::connection("database connection error")
        }
        DieselError::QueryBuilderError(_) => UserLookupError::query("database query error"),
        DieselError::DeserializationError(_) => {
            UserLookupError::query("unreadable user row")
        }
        _ => UserLookupError::query("database error"),
    }
}

fn uuids(ids: &[UserId]) -> Vec<Uuid> {
    ids.iter().map(|id| *id.as_uuid()).collect()
}

fn handle_values(handles: &[CanonicalHandle]) -> Vec<String> {
    handles
        .iter()
        .map(|handle| handle.as_str().to_owned())
        .collect()
}

async fn load_by_id(
    conn: &mut AsyncPgConnection,
    id: &UserId,
) -> Result<Option<UserRow>, UserLookupError> {
    users::table
        .filter(users::id.eq(id.as_uuid()))
        .select(UserRow::as_select())
        .first(conn)
        .await
        .optional()
        .map_err(map_diesel_error)
}

/// Rows whose canonical handle is one of `handles`.
fn by_canonical_handle(handles: Vec<String>) -> users::BoxedQuery<'static, Pg> {
    users::table
        .filter(
            sql::<Bool>(CANONICAL_HANDLE_ANY)
                .bind::<Array<Text>, _>(handles)
                .sql(")"),
        )
        .into_boxed()
}

/// The active row wins a canonical-handle tie, then the oldest.
fn preferred_by_canonical_handle(handle: String) -> users::BoxedQuery<'static, Pg> {
    by_canonical_handle(vec![handle]).order((users::active.desc(), users::created_at.asc()))
}

async fn load_by_handles(
    conn: &mut AsyncPgConnection,
    handles: Vec<String>,
) -> Result<Vec<UserRow>, UserLookupError> {
    by_canonical_handle(handles)
        .select(UserRow::as_select())
        .load(conn)
        .await
        .map_err(map_diesel_error)
}

async fn load_first_by_handle(
    conn: &mut AsyncPgConnection,
    handle: String,
) -> Result<Option<UserRow>, UserLookupError> {
    preferred_by_canonical_handle(handle)
        .select(UserRow::as_select())
        .first(conn)
        .await
        .optional()
        .map_err(map_diesel_error)
}

#[async_trait]
impl UserLookupRepository for DieselUserLookupRepository {
    async fn find_by_id(&self, id: &UserId) -> Result<Option<UserRecord>, UserLookupError> {
        self.within_deadline("find_by_id", async {
            let mut conn = self.pool.get().await.map_err(map_pool_error)?;
            let row = load_by_id(&mut conn, id).await?;
            row.map(UserRecord::try_from).transpose()
        })
        .await
    }

    async fn find_many_by_ids(&self, ids: &[UserId]) -> Result<Vec<UserRecord>, UserLookupError> {
        let ids = uuids(ids);
        self.within_deadline("find_many_by_ids", async {
            let mut conn = self.pool.get().await.map_err(map_pool_error)?;
            let rows: Vec<UserRow> = users::table
                .filter(users::id.eq_any(ids))
                .select(UserRow::as_select())
                .load(&mut conn)
                .await
                .map_err(map_diesel_error)?;
            rows.into_iter().map(UserRecord::try_from).collect()
        })
        .await
    }

    async fn find_many_by_normalized_handle(
        &self,
        handles: &[CanonicalHandle],
    ) -> Result<Vec<UserRecord>, UserLookupError> {
        let handles = handle_values(handles);
        self.within_deadline("find_many_by_normalized_handle", async {
            let mut conn = self.pool.get().await.map_err(map_pool_error)?;
            let rows = load_by_handles(&mut conn, handles).await?;
            rows.into_iter().map(UserRecord::try_from).collect()
        })
        .await
    }

    async fn find_by_id_or_normalized_handle(
        &self,
        identifier: &UserIdentifier,
    ) -> Result<Option<UserRecord>, UserLookupError> {
        self.within_deadline("find_by_id_or_normalized_handle", async {
            let mut conn = self.pool.get().await.map_err(map_pool_error)?;
            for path in identifier.lookup_order() {
                let row = match path {
                    LookupPath::Id => match identifier.id() {
                        Some(id) => load_by_id(&mut conn, id).await?,
                        None => None,
                    },
                    LookupPath::Handle => {
                        let handle = identifier.handle().as_str().to_owned();
                        load_first_by_handle(&mut conn, handle).await?
                    }
                };
                if let Some(row) = row {
                    return UserRecord::try_from(row).map(Some);
                }
            }
            Ok(None)
        })
        .await
    }

    async fn list_all(&self) -> Result<Vec<UserRecord>, UserLookupError> {
        self.within_deadline("list_all", async {
            let mut conn = self.pool.get().await.map_err(map_pool_error)?;
            let rows: Vec<UserRow> = users::table
                .order(users::created_at.asc())
                .select(UserRow::as_select())
                .load(&mut conn)
                .await
                .map_err(map_diesel_error)?;
            rows.into_iter().map(UserRecord::try_from).collect()
        })
        .await
    }

    async fn find_active_statuses(
        &self,
        ids: &[UserId],
    ) -> Result<Vec<ActiveStatus>, UserLookupError> {
        let ids = uuids(ids);
        self.within_deadline("find_active_statuses", async {
            let mut conn = self.pool.get().await.map_err(map_pool_error)?;
            let pairs: Vec<(Uuid, bool)> = users::table
                .filter(users::id.eq_any(ids))
                .select((users::id, users::active))
                .load(&mut conn)
                .await
                .map_err(map_diesel_error)?;
            Ok(pairs
                .into_iter()
                .map(|(id, active)| ActiveStatus {
                    id: UserId::from_uuid(id),
                    active,
                })
                .collect())
        })
        .await
    }
}

const _: () = assert!(HANDLE_MAX_CHARS == 21, "CANONICAL_HANDLE_ANY hard-codes the cap");
