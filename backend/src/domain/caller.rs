//! Per-request caller context.

use super::user::UserId;

/// Immutable request-scoped context passed explicitly to every operation.
///
/// # Examples
/// ```
/// use user_directory::domain::{CallerContext, UserId};
///
/// let anonymous = CallerContext::anonymous();
/// assert!(anonymous.current_user().is_none());
///
/// let user = UserId::random();
/// let ctx = CallerContext::authenticated(user);
/// assert_eq!(ctx.current_user(), Some(&user));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CallerContext {
    current_user: Option<UserId>,
}

impl CallerContext {
    /// Context for a request without an authenticated principal.
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// Context for a request made on behalf of `user`.
    pub fn authenticated(user: UserId) -> Self {
        Self {
            current_user: Some(user),
        }
    }

    /// Authenticated principal, if any.
    pub fn current_user(&self) -> Option<&UserId> {
        self.current_user.as_ref()
    }
}

impl From<Option<UserId>> for CallerContext {
    fn from(current_user: Option<UserId>) -> Self {
        Self { current_user }
    }
}
