//! User directory: identifier resolution and read queries over user accounts.
//!
//! The [`domain`] module holds the model, the authorization gate and the
//! resolver. Storage adapters live under [`outbound`].

pub mod config;
pub mod domain;
#[cfg(feature = "example-data")]
pub mod example_data;
pub mod outbound;
