//! Directory settings loaded via OrthoConfig.

use std::num::NonZeroUsize;
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;

const DEFAULT_POOL_MAX_SIZE: u32 = 10;
const DEFAULT_LOOKUP_CONCURRENCY: usize = 8;
const DEFAULT_QUERY_TIMEOUT_MS: u64 = 5_000;

/// Runtime settings for the directory adapters and resolver.
///
/// Values come from `DIRECTORY_*` environment variables, configuration files
/// and command-line arguments, in OrthoConfig's usual precedence.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "DIRECTORY")]
pub struct DirectorySettings {
    /// PostgreSQL connection string. Without one the in-memory directory is
    /// used.
    pub database_url: Option<String>,
    /// Maximum pooled connections.
    #[ortho_config(default = 10)]
    pub pool_max_size: u32,
    /// Identifiers resolved concurrently by `findUsers`.
    #[ortho_config(default = 8)]
    pub lookup_concurrency: usize,
    /// Deadline for each repository call, in milliseconds.
    #[ortho_config(default = 5000)]
    pub query_timeout_ms: u64,
}

impl Default for DirectorySettings {
    fn default() -> Self {
        Self {
            database_url: None,
            pool_max_size: DEFAULT_POOL_MAX_SIZE,
            lookup_concurrency: DEFAULT_LOOKUP_CONCURRENCY,
            query_timeout_ms: DEFAULT_QUERY_TIMEOUT_MS,
        }
    }
}

impl DirectorySettings {
    /// Configured connection string, ignoring blank values.
    pub fn database_url(&self) -> Option<&str> {
        self.database_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }

    /// Resolution concurrency, never below one.
    pub fn lookup_concurrency(&self) -> NonZeroUsize {
        NonZeroUsize::new(self.lookup_concurrency).unwrap_or(NonZeroUsize::MIN)
    }

    /// Per-call repository deadline.
    pub fn query_timeout(&self) -> Duration {
        Duration::from_millis(self.query_timeout_ms)
    }
}
