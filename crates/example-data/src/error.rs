//! Error types for the example-data crate.
//!
//! Registry parsing and user generation fail through separate `thiserror`
//! enums so callers can tell bad input files from exhausted generation.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur when parsing or querying a seed registry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// The registry file could not be read.
    #[error("failed to read registry file at '{path}': {message}")]
    IoError {
        /// Path to the registry file.
        path: PathBuf,
        /// Description of the I/O error.
        message: String,
    },

    /// The registry JSON is malformed or missing required fields.
    #[error("invalid registry JSON: {message}")]
    ParseError {
        /// Description of the parse error.
        message: String,
    },

    /// The registry version is not supported.
    #[error("unsupported registry version: expected {expected}, found {actual}")]
    UnsupportedVersion {
        /// Expected version number.
        expected: u32,
        /// Actual version found in the registry.
        actual: u32,
    },

    /// An invite code is empty or contains whitespace.
    #[error("invalid invite code at index {index}: '{value}'")]
    InvalidInviteCode {
        /// Index of the invite code in the array.
        index: usize,
        /// The rejected code.
        value: String,
    },

    /// The same invite code appears more than once.
    #[error("duplicate invite code: {code}")]
    DuplicateInviteCode {
        /// The repeated code.
        code: String,
    },

    /// A timezone entry is blank.
    #[error("blank timezone at index {index}")]
    BlankTimezone {
        /// Index of the blank entry.
        index: usize,
    },

    /// The registry contains no seed definitions.
    #[error("registry contains no seed definitions")]
    EmptySeeds,

    /// The requested seed name was not found in the registry.
    #[error("seed '{name}' not found in registry")]
    SeedNotFound {
        /// The seed name that was not found.
        name: String,
    },
}

/// Errors that can occur during user generation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerationError {
    /// No usable name was produced within the retry budget.
    #[error("failed to generate a valid name after {max_attempts} attempts")]
    NameGenerationFailed {
        /// Number of attempts made before giving up.
        max_attempts: usize,
    },

    /// Every candidate handle collided with an earlier user.
    #[error("failed to generate a unique handle after {max_attempts} attempts")]
    HandleGenerationFailed {
        /// Number of attempts made before giving up.
        max_attempts: usize,
    },
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(
        RegistryError::IoError {
            path: PathBuf::from("/tmp/seeds.json"),
            message: "file not found".to_owned(),
        },
        "failed to read registry file at '/tmp/seeds.json': file not found"
    )]
    #[case(
        RegistryError::UnsupportedVersion { expected: 1, actual: 2 },
        "unsupported registry version: expected 1, found 2"
    )]
    #[case(
        RegistryError::InvalidInviteCode { index: 1, value: "TWO WORDS".to_owned() },
        "invalid invite code at index 1: 'TWO WORDS'"
    )]
    #[case(
        RegistryError::DuplicateInviteCode { code: "FOUNDERS".to_owned() },
        "duplicate invite code: FOUNDERS"
    )]
    #[case(RegistryError::BlankTimezone { index: 0 }, "blank timezone at index 0")]
    #[case(
        RegistryError::SeedNotFound { name: "mossy-owl".to_owned() },
        "seed 'mossy-owl' not found in registry"
    )]
    fn registry_errors_format_correctly(#[case] error: RegistryError, #[case] expected: &str) {
        assert_eq!(error.to_string(), expected);
    }

    #[rstest]
    #[case(
        GenerationError::NameGenerationFailed { max_attempts: 100 },
        "failed to generate a valid name after 100 attempts"
    )]
    #[case(
        GenerationError::HandleGenerationFailed { max_attempts: 50 },
        "failed to generate a unique handle after 50 attempts"
    )]
    fn generation_errors_format_correctly(#[case] error: GenerationError, #[case] expected: &str) {
        assert_eq!(error.to_string(), expected);
    }
}
