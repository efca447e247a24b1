//! Handle canonicalisation.
//!
//! Handles are only ever compared in canonical form: ASCII letters
//! lower-cased, [`HANDLE_TRIM_CHARS`] trimmed from both ends, and capped to
//! [`HANDLE_MAX_CHARS`] characters. The same rule runs here on query input
//! and in SQL on stored values, so a record written with a non-canonical
//! handle is still found by its canonical form. Non-ASCII letters and
//! whitespace outside the trim set are kept as written; the database's
//! locale never changes the result.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Maximum number of characters retained in a canonical handle.
pub const HANDLE_MAX_CHARS: usize = 21;

/// Characters stripped from both ends of a handle.
///
/// Matches the `btrim` set used by the PostgreSQL adapter and its indexes.
pub const HANDLE_TRIM_CHARS: [char; 6] = [' ', '\t', '\n', '\r', '\x0C', '\x0B'];

/// Map a raw handle onto its canonical comparable form.
///
/// The steps run in a fixed order: lower-case, trim, truncate. Only ASCII
/// letters change case. Truncation counts characters, never bytes, so
/// multi-byte input is not split.
///
/// # Examples
/// ```
/// use user_directory::domain::normalize_handle;
///
/// assert_eq!(normalize_handle("  HasUppercase "), "hasuppercase");
/// assert_eq!(normalize_handle(""), "");
/// ```
pub fn normalize_handle(raw: &str) -> String {
    let lowered = raw.to_ascii_lowercase();
    lowered
        .trim_matches(HANDLE_TRIM_CHARS.as_slice())
        .chars()
        .take(HANDLE_MAX_CHARS)
        .collect()
}

/// A handle that has already been canonicalised.
///
/// ## Invariants
/// - The wrapped value equals `normalize_handle` of itself.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct CanonicalHandle(String);

impl CanonicalHandle {
    /// Canonicalise a raw handle.
    pub fn from_raw(raw: &str) -> Self {
        Self(normalize_handle(raw))
    }

    /// Borrow the canonical text.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Whether canonicalisation left nothing behind.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl AsRef<str> for CanonicalHandle {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for CanonicalHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for CanonicalHandle {
    fn from(value: String) -> Self {
        Self::from_raw(&value)
    }
}

impl From<CanonicalHandle> for String {
    fn from(value: CanonicalHandle) -> Self {
        value.0
    }
}
