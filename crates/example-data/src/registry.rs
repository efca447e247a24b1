//! Seed registry types and JSON parsing.
//!
//! A registry lists the invite codes and timezones generated users may
//! reference, plus named seeds that fix the RNG state and user count.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::RegistryError;
use crate::validation::is_valid_invite_code;

/// Current supported registry version.
const SUPPORTED_VERSION: u32 = 1;

/// A seed registry containing named seeds and the reference data users draw
/// from.
///
/// # Example
///
/// ```
/// use example_data::SeedRegistry;
///
/// let json = r#"{
///     "version": 1,
///     "inviteCodes": [{"code": "BETA", "roles": ["tester"]}],
///     "timezones": [],
///     "seeds": [{"name": "test", "seed": 42, "userCount": 5}]
/// }"#;
///
/// let registry = SeedRegistry::from_json(json).expect("valid registry");
/// assert_eq!(registry.seeds().len(), 1);
/// assert_eq!(registry.invite_codes()[0].code(), "BETA");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedRegistry {
    version: u32,
    invite_codes: Vec<InviteCodeDefinition>,
    timezones: Vec<String>,
    seeds: Vec<SeedDefinition>,
}

impl SeedRegistry {
    /// Parses a seed registry from a JSON string.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError`] if:
    /// - The JSON is malformed or a required field is missing
    /// - The version is unsupported
    /// - An invite code is malformed or repeated
    /// - A timezone is blank
    /// - The seeds array is empty
    pub fn from_json(json: &str) -> Result<Self, RegistryError> {
        let raw: RawSeedRegistry =
            serde_json::from_str(json).map_err(|e| RegistryError::ParseError {
                message: e.to_string(),
            })?;

        Self::from_raw(raw)
    }

    /// Loads a seed registry from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError`] if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self, RegistryError> {
        let contents = fs::read_to_string(path).map_err(|e| RegistryError::IoError {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        Self::from_json(&contents)
    }

    fn from_raw(raw: RawSeedRegistry) -> Result<Self, RegistryError> {
        if raw.version != SUPPORTED_VERSION {
            return Err(RegistryError::UnsupportedVersion {
                expected: SUPPORTED_VERSION,
                actual: raw.version,
            });
        }

        let invite_codes = parse_invite_codes(raw.invite_codes)?;

        if let Some(index) = raw.timezones.iter().position(|tz| tz.trim().is_empty()) {
            return Err(RegistryError::BlankTimezone { index });
        }

        if raw.seeds.is_empty() {
            return Err(RegistryError::EmptySeeds);
        }

        let seeds = raw
            .seeds
            .into_iter()
            .map(|s| SeedDefinition {
                name: s.name,
                seed: s.seed,
                user_count: s.user_count,
            })
            .collect();

        Ok(Self {
            version: raw.version,
            invite_codes,
            timezones: raw.timezones,
            seeds,
        })
    }

    /// Returns the registry version.
    #[must_use]
    pub const fn version(&self) -> u32 {
        self.version
    }

    /// Returns the invite codes users may have signed up with.
    #[must_use]
    pub fn invite_codes(&self) -> &[InviteCodeDefinition] {
        &self.invite_codes
    }

    /// Returns the timezones users may be assigned.
    #[must_use]
    pub fn timezones(&self) -> &[String] {
        &self.timezones
    }

    /// Returns all seed definitions.
    #[must_use]
    pub fn seeds(&self) -> &[SeedDefinition] {
        &self.seeds
    }

    /// Finds a seed definition by name.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::SeedNotFound`] if no seed with the given name
    /// exists.
    pub fn find_seed(&self, name: &str) -> Result<&SeedDefinition, RegistryError> {
        self.seeds
            .iter()
            .find(|s| s.name == name)
            .ok_or_else(|| RegistryError::SeedNotFound {
                name: name.to_owned(),
            })
    }
}

fn parse_invite_codes(
    raw: Vec<RawInviteCode>,
) -> Result<Vec<InviteCodeDefinition>, RegistryError> {
    let mut seen = HashSet::with_capacity(raw.len());
    raw.into_iter()
        .enumerate()
        .map(|(index, entry)| {
            if !is_valid_invite_code(&entry.code) {
                return Err(RegistryError::InvalidInviteCode {
                    index,
                    value: entry.code,
                });
            }
            if !seen.insert(entry.code.clone()) {
                return Err(RegistryError::DuplicateInviteCode { code: entry.code });
            }
            Ok(InviteCodeDefinition {
                code: entry.code,
                roles: entry.roles,
            })
        })
        .collect()
}

/// An invite code and the roles it grants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InviteCodeDefinition {
    code: String,
    roles: Vec<String>,
}

impl InviteCodeDefinition {
    /// Returns the code token.
    #[must_use]
    pub fn code(&self) -> &str {
        &self.code
    }

    /// Returns the roles granted to users who sign up with the code.
    #[must_use]
    pub fn roles(&self) -> &[String] {
        &self.roles
    }
}

/// A named seed definition for deterministic user generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedDefinition {
    name: String,
    seed: u64,
    user_count: usize,
}

impl SeedDefinition {
    /// Returns the seed name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the RNG seed value.
    #[must_use]
    pub const fn seed(&self) -> u64 {
        self.seed
    }

    /// Returns the number of users to generate.
    #[must_use]
    pub const fn user_count(&self) -> usize {
        self.user_count
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawSeedRegistry {
    version: u32,
    #[serde(default)]
    invite_codes: Vec<RawInviteCode>,
    #[serde(default)]
    timezones: Vec<String>,
    seeds: Vec<RawSeedDefinition>,
}

#[derive(Debug, Deserialize)]
struct RawInviteCode {
    code: String,
    #[serde(default)]
    roles: Vec<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawSeedDefinition {
    name: String,
    seed: u64,
    user_count: usize,
}
