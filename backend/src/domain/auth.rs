//! Per-operation authorization policy and the shared gate that enforces it.
//!
//! Every directory query names its [`Operation`]; the operation carries its
//! own [`AuthPolicy`], and [`authorize`] is the single place the policy is
//! checked against the caller context.

use tracing::debug;

use super::caller::CallerContext;
use super::error::Error;
use super::user::UserId;

/// Whether an operation needs an authenticated principal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthPolicy {
    /// The caller context must carry a current user.
    Authenticated,
    /// Callable without a principal.
    Public,
}

/// The fixed set of directory query operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    GetUserById,
    GetUsersByIds,
    GetUsersByHandles,
    GetUser,
    FindUsers,
    GetActiveStatuses,
}

impl Operation {
    /// Every operation, in declaration order.
    pub const ALL: [Self; 6] = [
        Self::GetUserById,
        Self::GetUsersByIds,
        Self::GetUsersByHandles,
        Self::GetUser,
        Self::FindUsers,
        Self::GetActiveStatuses,
    ];

    /// Name used in messages and logs.
    pub const fn name(self) -> &'static str {
        match self {
            Self::GetUserById => "getUserById",
            Self::GetUsersByIds => "getUsersByIds",
            Self::GetUsersByHandles => "getUsersByHandles",
            Self::GetUser => "getUser",
            Self::FindUsers => "findUsers",
            Self::GetActiveStatuses => "getActiveStatuses",
        }
    }

    /// Authorization requirement for the operation.
    ///
    /// Active statuses leak nothing beyond an id/flag pair and back
    /// unauthenticated status checks, so they are public.
    pub const fn auth_policy(self) -> AuthPolicy {
        match self {
            Self::GetActiveStatuses => AuthPolicy::Public,
            Self::GetUserById
            | Self::GetUsersByIds
            | Self::GetUsersByHandles
            | Self::GetUser
            | Self::FindUsers => AuthPolicy::Authenticated,
        }
    }
}

/// Check the caller context against the operation's policy.
///
/// Returns the authenticated principal when one is present, which public
/// operations may ignore.
///
/// # Examples
/// ```
/// use user_directory::domain::{CallerContext, Operation, authorize};
///
/// let ctx = CallerContext::anonymous();
/// assert!(authorize(&ctx, Operation::GetActiveStatuses).is_ok());
/// assert!(authorize(&ctx, Operation::GetUser).is_err());
/// ```
pub fn authorize(ctx: &CallerContext, operation: Operation) -> Result<Option<&UserId>, Error> {
    match (operation.auth_policy(), ctx.current_user()) {
        (AuthPolicy::Authenticated, None) => {
            debug!(operation = operation.name(), "rejected unauthenticated caller");
            Err(Error::not_authorized(operation.name()))
        }
        (_, principal) => Ok(principal),
    }
}
