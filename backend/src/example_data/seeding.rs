//! Turning a registry seed into directory records.

use std::path::{Path, PathBuf};

use cap_std::{ambient_authority, fs::Dir};
use example_data::{
    ExampleUserSeed, GenerationError, RegistryError, SeedRegistry,
    generate_example_users_with_count,
};
use thiserror::Error;
use tracing::info;

use crate::domain::{InviteCode, InviteCodeValidationError, UserId, UserRecord};
use crate::example_data::settings::DirectorySeedSettings;
use crate::outbound::memory::InMemoryUserLookupRepository;

/// Errors returned while seeding the directory.
#[derive(Debug, Error)]
pub enum SeedingError {
    /// Registry file could not be read.
    #[error("failed to read registry at {path}: {source}")]
    RegistryRead {
        /// Path to the registry file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// Registry parsing or seed lookup failed.
    #[error("registry error: {0}")]
    Registry(#[from] RegistryError),
    /// Users could not be generated.
    #[error("example data generation error: {0}")]
    Generation(#[from] GenerationError),
    /// Seed name must not be empty.
    #[error("seed name must not be empty")]
    EmptySeedName,
    /// A registry invite code is not a valid directory invite code.
    #[error("invalid invite code {code:?}: {source}")]
    InviteCode {
        /// Offending code string.
        code: String,
        /// Validation failure.
        #[source]
        source: InviteCodeValidationError,
    },
}

impl From<ExampleUserSeed> for UserRecord {
    fn from(seed: ExampleUserSeed) -> Self {
        let mut record = Self::new(UserId::from_uuid(seed.id), seed.handle, seed.name, seed.email);
        record.active = seed.active;
        record.emails = seed.emails;
        record.phone = seed.phone;
        record.timezone = seed.timezone;
        record.roles = seed.roles;
        record.invite_code = seed.invite_code;
        record
    }
}

/// Generate directory records for a named seed.
pub fn users_from_seed(
    registry: &SeedRegistry,
    seed_name: &str,
    count: Option<usize>,
) -> Result<Vec<UserRecord>, SeedingError> {
    let trimmed = seed_name.trim();
    if trimmed.is_empty() {
        return Err(SeedingError::EmptySeedName);
    }

    let seed_def = registry.find_seed(trimmed)?;
    let user_count = count.unwrap_or_else(|| seed_def.user_count());
    let users = generate_example_users_with_count(registry, seed_def, user_count)?;

    Ok(users.into_iter().map(UserRecord::from).collect())
}

/// The registry's invite codes as directory invite codes.
pub fn invite_codes_from_registry(
    registry: &SeedRegistry,
) -> Result<Vec<InviteCode>, SeedingError> {
    registry
        .invite_codes()
        .iter()
        .map(|definition| {
            InviteCode::new(definition.code(), definition.roles().to_vec()).map_err(|source| {
                SeedingError::InviteCode {
                    code: definition.code().to_owned(),
                    source,
                }
            })
        })
        .collect()
}

/// Build an in-memory directory from the configured seed.
///
/// Returns `Ok(None)` when no seed is named.
///
/// # Examples
///
/// ```
/// use user_directory::example_data::{DirectorySeedSettings, seed_in_memory_directory};
///
/// let settings = DirectorySeedSettings::for_seed("mossy-owl");
/// let directory = seed_in_memory_directory(&settings)
///     .expect("bundled registry seeds")
///     .expect("a seed is named");
/// # let _ = directory;
/// ```
pub fn seed_in_memory_directory(
    settings: &DirectorySeedSettings,
) -> Result<Option<InMemoryUserLookupRepository>, SeedingError> {
    let Some(seed_name) = settings.seed_name() else {
        info!(reason = "no seed named", "directory seeding skipped");
        return Ok(None);
    };

    let registry = load_registry(settings.registry_path())?;
    let invite_codes = invite_codes_from_registry(&registry)?;
    let records = users_from_seed(&registry, seed_name, settings.user_count)?;
    let invited = records
        .iter()
        .filter(|record| invite_codes.iter().any(|code| code.was_used_by(record)))
        .count();
    info!(
        seed_key = seed_name,
        user_count = records.len(),
        invited,
        "seeded in-memory directory with example data"
    );

    Ok(Some(InMemoryUserLookupRepository::with_records(records)))
}

/// Read and parse a registry file through a capability-scoped directory
/// handle.
pub fn load_registry(path: &Path) -> Result<SeedRegistry, SeedingError> {
    let read_error = |source| SeedingError::RegistryRead {
        path: path.to_path_buf(),
        source,
    };

    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let file_name = path.file_name().ok_or_else(|| {
        read_error(std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            "registry path must be a file",
        ))
    })?;
    let dir = Dir::open_ambient_dir(parent, ambient_authority()).map_err(read_error)?;
    let contents = dir.read_to_string(Path::new(file_name)).map_err(read_error)?;

    Ok(SeedRegistry::from_json(&contents)?)
}
