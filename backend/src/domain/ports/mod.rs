//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod user_directory_query;
mod user_lookup_repository;

#[cfg(test)]
pub use user_directory_query::MockUserDirectoryQuery;
pub use user_directory_query::UserDirectoryQuery;
#[cfg(test)]
pub use user_lookup_repository::MockUserLookupRepository;
pub use user_lookup_repository::{UserLookupError, UserLookupRepository};

#[cfg(test)]
mod tests;
