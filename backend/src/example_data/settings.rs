//! Settings for seeding the in-memory directory from the example-data
//! registry.
//!
//! Seeding happens only when a seed is named. `DIRECTORY_SEED_NAME` picks the
//! registry entry, `DIRECTORY_SEED_USER_COUNT` overrides how many users it
//! yields, and `DIRECTORY_SEED_REGISTRY` points at a registry other than the
//! one bundled with the crate.

use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use ortho_config::OrthoConfig;
use serde::Deserialize;

fn bundled_registry() -> &'static Path {
    static BUNDLED: OnceLock<PathBuf> = OnceLock::new();
    BUNDLED.get_or_init(|| {
        Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures/example-data/seeds.json")
    })
}

/// How the in-memory directory is populated.
#[derive(Debug, Clone, Default, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "DIRECTORY_SEED")]
pub struct DirectorySeedSettings {
    /// Registry seed to generate users from. Unset leaves the directory empty.
    pub name: Option<String>,
    /// Generate this many users instead of the seed's own count.
    pub user_count: Option<usize>,
    /// Registry file; defaults to the bundled fixture.
    pub registry: Option<PathBuf>,
}

impl DirectorySeedSettings {
    /// Seed from `name` in the bundled registry.
    pub fn for_seed(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    /// Cap the generated population.
    pub fn with_user_count(mut self, user_count: usize) -> Self {
        self.user_count = Some(user_count);
        self
    }

    /// The seed to use, if any. Blank names count as unset.
    pub fn seed_name(&self) -> Option<&str> {
        self.name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
    }

    pub fn registry_path(&self) -> &Path {
        self.registry.as_deref().unwrap_or_else(|| bundled_registry())
    }
}
