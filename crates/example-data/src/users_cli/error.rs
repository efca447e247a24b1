//! Error types for the users CLI.

use thiserror::Error;

use crate::error::{GenerationError, RegistryError};

/// Errors surfaced by the CLI parsing and generation flow.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CliError {
    /// Registry path was not supplied.
    #[error("missing required flag: --registry")]
    MissingRegistryPath,
    /// A flag expected a value but none was provided.
    #[error("missing value for {flag}")]
    MissingValue {
        /// Flag that was missing its value.
        flag: &'static str,
    },
    /// An unsupported argument was supplied.
    #[error("unknown argument: {value}")]
    UnknownArgument {
        /// Argument value that was not recognized.
        value: String,
    },
    /// A numeric value failed to parse.
    #[error("invalid number for {flag}: '{value}' ({message})")]
    InvalidNumber {
        /// Flag associated with the invalid number.
        flag: &'static str,
        /// Raw value supplied for the flag.
        value: String,
        /// Parser error message.
        message: String,
    },
    /// The registry could not be read, parsed or queried.
    #[error("registry error: {source}")]
    Registry {
        /// Underlying registry error.
        #[from]
        #[source]
        source: RegistryError,
    },
    /// Users could not be generated from the seed.
    #[error("generation error: {source}")]
    Generation {
        /// Underlying generation error.
        #[from]
        #[source]
        source: GenerationError,
    },
    /// Generated users could not be rendered as JSON.
    #[error("failed to render users: {message}")]
    Render {
        /// Serializer error message.
        message: String,
    },
}
