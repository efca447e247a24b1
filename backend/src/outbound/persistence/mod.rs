//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Backed by `diesel-async` with `bb8` connection pooling. Row structs and
//! schema definitions stay private to this module; only domain records cross
//! the boundary.
//!
//! # Example
//!
//! ```ignore
//! use user_directory::outbound::persistence::{DbPool, DieselUserLookupRepository, PoolConfig};
//!
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/directory")).await?;
//! let repository = DieselUserLookupRepository::new(pool);
//! ```

mod diesel_user_lookup_repository;
mod models;
mod pool;
mod schema;

pub use diesel_user_lookup_repository::{DEFAULT_QUERY_TIMEOUT, DieselUserLookupRepository};
pub use pool::{DbPool, PoolConfig, PoolError};
