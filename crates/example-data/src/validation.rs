//! Handle and invite-code rules shared with the directory.
//!
//! The directory compares handles only in canonical form: ASCII letters
//! lower-cased, ASCII whitespace trimmed, and capped to
//! [`HANDLE_CANONICAL_MAX`] characters. Generated
//! handles keep their mixed case but must stay distinct after that
//! canonicalisation, so the generator checks uniqueness with
//! [`canonical_handle`].
//!
//! # Handle rules
//!
//! - At least [`HANDLE_MIN`] characters
//! - ASCII letters, digits and underscores only
//! - No surrounding whitespace

/// Minimum length of a generated handle.
pub const HANDLE_MIN: usize = 3;

/// Characters kept by canonicalisation.
pub const HANDLE_CANONICAL_MAX: usize = 21;

/// Characters trimmed by canonicalisation.
pub const HANDLE_TRIM_CHARS: [char; 6] = [' ', '\t', '\n', '\r', '\x0C', '\x0B'];

/// Canonical comparable form of a handle.
///
/// # Examples
///
/// ```
/// use example_data::canonical_handle;
///
/// assert_eq!(canonical_handle("  HasUppercase "), "hasuppercase");
/// assert_eq!(
///     canonical_handle("ThisHandleIsThirtyTwoCharsLong!!"),
///     "thishandleisthirtytwo"
/// );
/// ```
#[must_use]
pub fn canonical_handle(raw: &str) -> String {
    raw.to_ascii_lowercase()
        .trim_matches(HANDLE_TRIM_CHARS.as_slice())
        .chars()
        .take(HANDLE_CANONICAL_MAX)
        .collect()
}

/// Validates a generated handle.
///
/// Length is not capped: overlong handles are legal and simply collapse to
/// their first [`HANDLE_CANONICAL_MAX`] characters when compared.
///
/// # Examples
///
/// ```
/// use example_data::is_valid_handle;
///
/// assert!(is_valid_handle("AdaLovelace"));
/// assert!(is_valid_handle("grace_hopper_1906"));
/// assert!(!is_valid_handle("ab"));
/// assert!(!is_valid_handle("o'brien"));
/// ```
#[must_use]
pub fn is_valid_handle(handle: &str) -> bool {
    handle.chars().count() >= HANDLE_MIN && handle.chars().all(is_handle_char)
}

/// Validates an invite code: non-empty with no whitespace.
///
/// # Examples
///
/// ```
/// use example_data::is_valid_invite_code;
///
/// assert!(is_valid_invite_code("FOUNDERS-2024"));
/// assert!(!is_valid_invite_code("two words"));
/// assert!(!is_valid_invite_code(""));
/// ```
#[must_use]
pub fn is_valid_invite_code(code: &str) -> bool {
    !code.is_empty() && !code.chars().any(char::is_whitespace)
}

const fn is_handle_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Strips everything a handle may not contain.
#[must_use]
pub(crate) fn sanitize_handle(raw: &str) -> String {
    raw.chars().filter(|c| is_handle_char(*c)).collect()
}
