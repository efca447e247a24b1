//! Deterministic example user records for seeding a user directory.
//!
//! The crate turns a named seed from a JSON registry into a reproducible set
//! of user records. It does not depend on the directory's domain types; the
//! directory converts [`ExampleUserSeed`] values at the point of use.
//!
//! # Overview
//!
//! - Loading seed registries (invite codes, timezones, named seeds)
//! - Deterministic generation with handles that stay unique in canonical form
//! - Handle rules matching the directory's canonicalisation
//! - The `example-data-users` command that prints generated users as JSON
//!
//! # Example
//!
//! ```
//! use example_data::{SeedRegistry, canonical_handle, generate_example_users};
//!
//! let json = r#"{
//!     "version": 1,
//!     "inviteCodes": [{"code": "FOUNDERS", "roles": ["admin"]}],
//!     "timezones": ["Europe/London"],
//!     "seeds": [{"name": "test-seed", "seed": 42, "userCount": 3}]
//! }"#;
//!
//! let registry = SeedRegistry::from_json(json).expect("valid registry");
//! let seed_def = registry.find_seed("test-seed").expect("seed exists");
//! let users = generate_example_users(&registry, seed_def).expect("generation succeeds");
//!
//! assert_eq!(users.len(), 3);
//! assert!(users.iter().all(|user| canonical_handle(&user.handle).len() <= 21));
//! ```

mod error;
mod generator;
mod registry;
mod seed;
pub mod users_cli;
mod validation;

pub use error::{GenerationError, RegistryError};
pub use generator::{generate_example_users, generate_example_users_with_count};
pub use registry::{InviteCodeDefinition, SeedDefinition, SeedRegistry};
pub use seed::ExampleUserSeed;
pub use validation::{
    HANDLE_CANONICAL_MAX, HANDLE_MIN, HANDLE_TRIM_CHARS, canonical_handle, is_valid_handle,
    is_valid_invite_code,
};
