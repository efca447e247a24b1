//! Classification of free-form identifiers.
//!
//! Callers may pass either a record id or a handle through the same
//! parameter. The classifier picks which lookup to try first; the other is
//! always tried as a fallback, so the classification is only a routing hint.

use std::sync::OnceLock;

use regex::Regex;

use super::handle::CanonicalHandle;
use super::user::UserId;

static UUID_SHAPE_RE: OnceLock<Regex> = OnceLock::new();

fn uuid_shape_regex() -> &'static Regex {
    UUID_SHAPE_RE.get_or_init(|| {
        let pattern = "^[0-9A-Fa-f]{8}-[0-9A-Fa-f]{4}-[0-9A-Fa-f]{4}-[0-9A-Fa-f]{4}-[0-9A-Fa-f]{12}$";
        Regex::new(pattern)
            .unwrap_or_else(|error| panic!("uuid shape regex failed to compile: {error}"))
    })
}

/// Preferred interpretation of an identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdentifierKind {
    /// Token has the hyphenated UUID shape used for record ids.
    AsId,
    /// Anything else.
    AsHandle,
}

/// Classify an identifier by shape alone.
///
/// # Examples
/// ```
/// use user_directory::domain::{IdentifierKind, classify_identifier};
///
/// assert_eq!(
///     classify_identifier("3fa85f64-5717-4562-b3fc-2c963f66afa6"),
///     IdentifierKind::AsId
/// );
/// assert_eq!(classify_identifier("ada"), IdentifierKind::AsHandle);
/// ```
pub fn classify_identifier(identifier: &str) -> IdentifierKind {
    if uuid_shape_regex().is_match(identifier) {
        IdentifierKind::AsId
    } else {
        IdentifierKind::AsHandle
    }
}

/// One of the two ways an identifier can be matched against the directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupPath {
    Id,
    Handle,
}

/// A caller identifier prepared for lookup.
///
/// Holds the parsed id (when the token parses as one, regardless of its
/// classification) and the canonical handle form of the token, so adapters
/// can try both paths in the preferred order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserIdentifier {
    raw: String,
    kind: IdentifierKind,
    id: Option<UserId>,
    handle: CanonicalHandle,
}

impl UserIdentifier {
    /// Classify and prepare a raw identifier.
    pub fn parse(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        let kind = classify_identifier(&raw);
        let id = UserId::new(&raw).ok();
        let handle = CanonicalHandle::from_raw(&raw);
        Self {
            raw,
            kind,
            id,
            handle,
        }
    }

    /// Identifier exactly as the caller supplied it.
    pub fn raw(&self) -> &str {
        self.raw.as_str()
    }

    /// Preferred interpretation.
    pub fn kind(&self) -> IdentifierKind {
        self.kind
    }

    /// Parsed id, if the token is a valid UUID in any accepted format.
    pub fn id(&self) -> Option<&UserId> {
        self.id.as_ref()
    }

    /// Canonical handle form of the token.
    pub fn handle(&self) -> &CanonicalHandle {
        &self.handle
    }

    /// Lookup paths in the order they should be attempted.
    ///
    /// Both paths are always present. The id path is a no-op for adapters
    /// when [`UserIdentifier::id`] is `None`.
    pub fn lookup_order(&self) -> [LookupPath; 2] {
        match self.kind {
            IdentifierKind::AsId => [LookupPath::Id, LookupPath::Handle],
            IdentifierKind::AsHandle => [LookupPath::Handle, LookupPath::Id],
        }
    }
}
