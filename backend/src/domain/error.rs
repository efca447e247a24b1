//! Domain-level error types.
//!
//! These errors are transport agnostic. Whatever surrounds the resolver maps
//! them to responses; the message of each validation kind contains a fixed
//! marker (`not provided`, `not found`, `not authorized`) so callers can
//! pattern-match on category without depending on this enum.

use serde::{Deserialize, Serialize};

use super::ports::UserLookupError;

/// Stable machine-readable error code describing the failure category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[non_exhaustive]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    /// A required parameter was absent or empty.
    MissingParameter,
    /// A single-result lookup matched nothing.
    NotFound,
    /// The operation requires an authenticated principal.
    NotAuthorized,
    /// The underlying repository failed.
    Repository,
}

/// Failure of a directory query operation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// A required parameter was absent, null, or an empty string.
    #[error("{parameter} not provided")]
    MissingParameter { parameter: &'static str },
    /// Nothing in the directory matched the identifier.
    #[error("user {identifier} not found")]
    NotFound { identifier: String },
    /// The caller context carries no authenticated principal.
    #[error("caller not authorized to call {operation}")]
    NotAuthorized { operation: &'static str },
    /// Repository failure, propagated unchanged.
    #[error(transparent)]
    Repository(#[from] UserLookupError),
}

impl Error {
    /// Convenience constructor for [`Error::MissingParameter`].
    pub fn missing_parameter(parameter: &'static str) -> Self {
        Self::MissingParameter { parameter }
    }

    /// Convenience constructor for [`Error::NotFound`].
    pub fn not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            identifier: identifier.into(),
        }
    }

    /// Convenience constructor for [`Error::NotAuthorized`].
    pub fn not_authorized(operation: &'static str) -> Self {
        Self::NotAuthorized { operation }
    }

    /// Stable machine-readable error code.
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::MissingParameter { .. } => ErrorCode::MissingParameter,
            Self::NotFound { .. } => ErrorCode::NotFound,
            Self::NotAuthorized { .. } => ErrorCode::NotAuthorized,
            Self::Repository(_) => ErrorCode::Repository,
        }
    }
}
