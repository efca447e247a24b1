//! CLI support for printing generated users.
//!
//! The binary delegates to these functions so parsing and generation can be
//! exercised in tests without spawning a subprocess.

mod error;

use std::fmt;
use std::path::{Path, PathBuf};

pub use error::CliError;

use crate::generator::generate_example_users_with_count;
use crate::registry::SeedRegistry;
use crate::seed::ExampleUserSeed;

/// Parsed options for the users CLI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Options {
    registry_path: PathBuf,
    seed_name: Option<String>,
    count: Option<usize>,
    active_only: bool,
}

impl Options {
    /// Returns the registry path to read.
    ///
    /// # Example
    ///
    /// ```
    /// use example_data::users_cli::{ParseOutcome, parse_args};
    ///
    /// let args = vec!["--registry".to_string(), "seeds.json".to_string()];
    /// let ParseOutcome::Options(options) = parse_args(args.into_iter()).expect("parse") else {
    ///     panic!("expected options");
    /// };
    ///
    /// assert!(options.registry_path().ends_with("seeds.json"));
    /// ```
    #[must_use]
    pub fn registry_path(&self) -> &Path {
        &self.registry_path
    }

    /// Returns the requested seed name, if any.
    #[must_use]
    pub fn seed_name(&self) -> Option<&str> {
        self.seed_name.as_deref()
    }

    /// Returns the user count override, if any.
    #[must_use]
    pub const fn count(&self) -> Option<usize> {
        self.count
    }

    /// Whether inactive users are dropped from the output.
    #[must_use]
    pub const fn active_only(&self) -> bool {
        self.active_only
    }
}

/// Outcome of parsing CLI arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseOutcome {
    /// Show help output and exit successfully.
    Help,
    /// Continue with the parsed options.
    Options(Options),
}

/// Parses CLI arguments.
///
/// # Errors
///
/// Returns [`CliError`] when required flags are missing or values cannot be
/// parsed.
///
/// # Example
///
/// ```
/// use example_data::users_cli::{ParseOutcome, parse_args};
///
/// let args = vec![
///     "--registry".to_string(),
///     "seeds.json".to_string(),
///     "--seed".to_string(),
///     "mossy-owl".to_string(),
///     "--count".to_string(),
///     "3".to_string(),
/// ];
///
/// let ParseOutcome::Options(options) = parse_args(args.into_iter()).expect("parse") else {
///     panic!("expected options");
/// };
/// assert_eq!(options.seed_name(), Some("mossy-owl"));
/// assert_eq!(options.count(), Some(3));
/// ```
pub fn parse_args<I>(mut args: I) -> Result<ParseOutcome, CliError>
where
    I: Iterator<Item = String>,
{
    let mut registry_path: Option<PathBuf> = None;
    let mut seed_name: Option<String> = None;
    let mut count: Option<usize> = None;
    let mut active_only = false;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-h" | "--help" => return Ok(ParseOutcome::Help),
            "--registry" => {
                let value = next_value(&mut args, "--registry")?;
                registry_path = Some(PathBuf::from(value));
            }
            "--seed" => {
                seed_name = Some(next_value(&mut args, "--seed")?);
            }
            "--count" => {
                let value = next_value(&mut args, "--count")?;
                count = Some(parse_number(&value, "--count")?);
            }
            "--active-only" => active_only = true,
            _ => return Err(CliError::UnknownArgument { value: arg }),
        }
    }

    let resolved_registry_path = registry_path.ok_or(CliError::MissingRegistryPath)?;
    Ok(ParseOutcome::Options(Options {
        registry_path: resolved_registry_path,
        seed_name,
        count,
        active_only,
    }))
}

/// Generates users for the parsed options from an already loaded registry.
///
/// Without `--seed` the registry's first seed is used.
///
/// # Errors
///
/// Returns [`CliError`] when the seed is unknown or generation fails.
pub fn generate_for(
    registry: &SeedRegistry,
    options: &Options,
) -> Result<Vec<ExampleUserSeed>, CliError> {
    let seed_def = match options.seed_name() {
        Some(name) => registry.find_seed(name)?,
        None => registry
            .seeds()
            .first()
            .ok_or(crate::error::RegistryError::EmptySeeds)?,
    };
    let count = options.count().unwrap_or_else(|| seed_def.user_count());
    let users = generate_example_users_with_count(registry, seed_def, count)?;

    Ok(if options.active_only() {
        users.into_iter().filter(|user| user.active).collect()
    } else {
        users
    })
}

/// Reads the registry named by the options and generates its users.
///
/// # Errors
///
/// Returns [`CliError`] when the registry cannot be loaded or generation
/// fails.
pub fn run(options: &Options) -> Result<Vec<ExampleUserSeed>, CliError> {
    let registry = SeedRegistry::from_file(options.registry_path())?;
    generate_for(&registry, options)
}

/// Renders users as pretty-printed JSON.
///
/// # Errors
///
/// Returns [`CliError::Render`] if serialisation fails.
pub fn render_users(users: &[ExampleUserSeed]) -> Result<String, CliError> {
    serde_json::to_string_pretty(users).map_err(|err| CliError::Render {
        message: err.to_string(),
    })
}

fn next_value<I>(args: &mut I, flag: &'static str) -> Result<String, CliError>
where
    I: Iterator<Item = String>,
{
    args.next().ok_or(CliError::MissingValue { flag })
}

fn parse_number<T>(value: &str, flag: &'static str) -> Result<T, CliError>
where
    T: std::str::FromStr,
    T::Err: fmt::Display,
{
    value.parse::<T>().map_err(|err| CliError::InvalidNumber {
        flag,
        value: value.to_owned(),
        message: err.to_string(),
    })
}
