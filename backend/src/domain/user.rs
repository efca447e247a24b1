//! User directory records.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::handle::CanonicalHandle;

/// Validation errors returned by [`UserId::new`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserValidationError {
    EmptyId,
    InvalidId,
}

impl fmt::Display for UserValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyId => write!(f, "user id must not be empty"),
            Self::InvalidId => write!(f, "user id must be a valid UUID"),
        }
    }
}

impl std::error::Error for UserValidationError {}

/// Stable user identifier stored as a UUID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UserId(Uuid);

impl UserId {
    /// Validate and construct a [`UserId`] from borrowed input.
    ///
    /// Surrounding whitespace is rejected rather than trimmed so that a
    /// padded token is never silently treated as an id.
    pub fn new(id: impl AsRef<str>) -> Result<Self, UserValidationError> {
        let raw = id.as_ref();
        if raw.is_empty() {
            return Err(UserValidationError::EmptyId);
        }
        if raw.trim() != raw {
            return Err(UserValidationError::InvalidId);
        }
        Uuid::parse_str(raw)
            .map(Self)
            .map_err(|_| UserValidationError::InvalidId)
    }

    /// Wrap an already-parsed UUID.
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Generate a new random [`UserId`].
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Access the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.hyphenated())
    }
}

impl From<UserId> for String {
    fn from(value: UserId) -> Self {
        value.to_string()
    }
}

impl TryFrom<String> for UserId {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Link between a directory user and an external identity provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderLink {
    /// Subject identifier issued by the provider.
    pub subject: String,
    /// Address the provider reported for the account, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// When the link was established.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linked_at: Option<DateTime<Utc>>,
}

/// External identity-provider links keyed by provider name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AuthProviders(BTreeMap<String, ProviderLink>);

impl AuthProviders {
    /// Attach a provider link, replacing any previous link for that provider.
    pub fn with_link(mut self, provider: impl Into<String>, link: ProviderLink) -> Self {
        self.0.insert(provider.into(), link);
        self
    }

    /// Look up the link for a provider.
    pub fn link(&self, provider: &str) -> Option<&ProviderLink> {
        self.0.get(provider)
    }

    /// Whether no provider is linked.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// A user account as stored in the directory.
///
/// ## Invariants
/// - `handle` is unique across active records once canonicalised. The
///   directory enforces this upstream; resolution relies on it.
/// - `handle` may be stored in a non-canonical form; compare it only through
///   [`UserRecord::canonical_handle`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    pub id: UserId,
    pub active: bool,
    pub email: String,
    #[serde(default)]
    pub emails: Vec<String>,
    pub handle: String,
    #[serde(default)]
    pub profile_url: Option<String>,
    #[serde(default)]
    pub avatar_url: Option<String>,
    pub name: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub date_of_birth: Option<NaiveDate>,
    #[serde(default)]
    pub timezone: Option<String>,
    #[serde(default)]
    pub roles: Vec<String>,
    #[serde(default)]
    pub invite_code: Option<String>,
    #[serde(default)]
    pub auth_providers: AuthProviders,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl UserRecord {
    /// Build an active record with the required attributes and empty optional
    /// ones. Both timestamps are set to the current time.
    pub fn new(
        id: UserId,
        handle: impl Into<String>,
        name: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id,
            active: true,
            email: email.into(),
            emails: Vec::new(),
            handle: handle.into(),
            profile_url: None,
            avatar_url: None,
            name: name.into(),
            phone: None,
            date_of_birth: None,
            timezone: None,
            roles: Vec::new(),
            invite_code: None,
            auth_providers: AuthProviders::default(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Canonical form of the stored handle.
    pub fn canonical_handle(&self) -> CanonicalHandle {
        CanonicalHandle::from_raw(&self.handle)
    }

    /// Whether the record carries the given role tag.
    pub fn has_role(&self, role: &str) -> bool {
        self.roles.iter().any(|candidate| candidate == role)
    }

    /// Project the record onto its public activity status.
    pub fn active_status(&self) -> ActiveStatus {
        ActiveStatus {
            id: self.id,
            active: self.active,
        }
    }
}

/// Public projection exposing only identity and activity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ActiveStatus {
    pub id: UserId,
    pub active: bool,
}
