//! Domain primitives, ports, and the directory resolver.
//!
//! Purpose: define the strongly typed user directory model and the rules for
//! turning free-form identifiers into lookups. Nothing here knows about
//! PostgreSQL or any transport; adapters plug in through [`ports`].
//!
//! Public surface:
//! - `UserRecord`, `UserId`, `ActiveStatus`: stored accounts and projections.
//! - `normalize_handle`, `CanonicalHandle`: canonical handle form.
//! - `classify_identifier`, `UserIdentifier`: id/handle routing.
//! - `CallerContext`, `Operation`, `authorize`: per-operation auth gate.
//! - `Error`, `ErrorCode`: operation failures.
//! - `UserResolverService`: the six directory queries.

pub mod auth;
pub mod caller;
pub mod error;
pub mod handle;
pub mod identifier;
pub mod invite_code;
pub mod ports;
pub mod user;
pub mod user_resolver;

pub use self::auth::{AuthPolicy, Operation, authorize};
pub use self::caller::CallerContext;
pub use self::error::{Error, ErrorCode};
pub use self::handle::{CanonicalHandle, HANDLE_MAX_CHARS, HANDLE_TRIM_CHARS, normalize_handle};
pub use self::identifier::{IdentifierKind, LookupPath, UserIdentifier, classify_identifier};
pub use self::invite_code::{InviteCode, InviteCodeValidationError};
pub use self::user::{
    ActiveStatus, AuthProviders, ProviderLink, UserId, UserRecord, UserValidationError,
};
pub use self::user_resolver::{DEFAULT_LOOKUP_CONCURRENCY, UserResolverService};

/// Result alias for directory operations.
pub type DirectoryResult<T> = Result<T, Error>;
