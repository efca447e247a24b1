//! Generated user seed type.
//!
//! Independent of the directory's domain types; the directory converts these
//! records when seeding.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A generated example user record.
///
/// Field names follow the directory's JSON shape so the CLI output can be
/// loaded as-is.
///
/// # Example
///
/// ```
/// use example_data::ExampleUserSeed;
/// use uuid::Uuid;
///
/// let user = ExampleUserSeed {
///     id: Uuid::new_v4(),
///     active: true,
///     handle: "AdaLovelace".to_owned(),
///     name: "Ada Lovelace".to_owned(),
///     email: "adalovelace@example.com".to_owned(),
///     emails: Vec::new(),
///     phone: None,
///     timezone: Some("Europe/London".to_owned()),
///     roles: vec!["admin".to_owned()],
///     invite_code: Some("FOUNDERS".to_owned()),
/// };
///
/// assert_eq!(user.handle, "AdaLovelace");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExampleUserSeed {
    /// Unique identifier for the user.
    pub id: Uuid,
    /// Whether the account is active.
    pub active: bool,
    /// Handle as written; may contain upper-case letters.
    pub handle: String,
    /// Full name.
    pub name: String,
    /// Primary email address.
    pub email: String,
    /// Additional addresses in order.
    pub emails: Vec<String>,
    /// Optional phone number.
    pub phone: Option<String>,
    /// Optional IANA timezone name.
    pub timezone: Option<String>,
    /// Role tags, granted by the invite code when there is one.
    pub roles: Vec<String>,
    /// Invite code used at sign-up.
    pub invite_code: Option<String>,
}
