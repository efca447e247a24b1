//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **memory**: process-local directory used by tests, seeding and the CLI
//!   when no database is configured.
//! - **persistence**: PostgreSQL-backed lookups using Diesel ORM.
//!
//! Adapters translate between storage representations and domain types and
//! apply the stored-side handle canonicalisation. They contain no
//! authorization or presence rules.

pub mod memory;
pub mod persistence;
