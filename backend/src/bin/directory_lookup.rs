//! Run a single directory query and print the result as JSON.
//!
//! Uses PostgreSQL when a database URL is configured and otherwise an
//! in-memory directory, optionally seeded with generated example users.
#![cfg_attr(not(any(test, doctest)), deny(clippy::unwrap_used))]
#![cfg_attr(not(any(test, doctest)), deny(clippy::expect_used))]

use std::env;
use std::ffi::OsString;
use std::io::{self, Write};
use std::process::ExitCode;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use ortho_config::OrthoConfig;
use serde::Serialize;
use tokio::runtime::Builder;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use user_directory::config::DirectorySettings;
use user_directory::domain::ports::UserDirectoryQuery;
use user_directory::domain::{CallerContext, Error, ErrorCode, UserId, UserResolverService};
use user_directory::outbound::memory::InMemoryUserLookupRepository;
use user_directory::outbound::persistence::{DbPool, DieselUserLookupRepository, PoolConfig};

/// `directory-lookup` command arguments.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "directory-lookup",
    about = "Resolve user identifiers against the user directory",
    version
)]
struct CliArgs {
    /// Authenticated principal to act as. Omit to call anonymously.
    #[arg(long, value_name = "uuid", value_parser = parse_principal)]
    principal: Option<UserId>,
    /// Database connection URL. Falls back to `DIRECTORY_DATABASE_URL`, then
    /// `DATABASE_URL`.
    #[arg(long = "database-url", value_name = "url")]
    database_url: Option<String>,
    /// Seed the in-memory directory from the named example-data seed.
    #[arg(long = "example-seed", value_name = "name")]
    example_seed: Option<String>,
    #[command(subcommand)]
    query: Query,
}

#[derive(Debug, Clone, Subcommand)]
enum Query {
    /// Fetch one user by id.
    UserById { id: String },
    /// Fetch the users matching the given ids.
    UsersByIds { ids: Vec<String> },
    /// Fetch the users matching the given handles.
    UsersByHandles { handles: Vec<String> },
    /// Fetch one user by id or handle.
    User { identifier: String },
    /// Resolve a mix of ids and handles; lists every user when none are given.
    FindUsers { identifiers: Vec<String> },
    /// Report the activity status of the given ids.
    ActiveStatuses { ids: Vec<String> },
}

fn main() -> ExitCode {
    let args = CliArgs::parse();

    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let runtime = match Builder::new_current_thread().enable_all().build() {
        Ok(runtime) => runtime,
        Err(error) => return report(&format!("create Tokio runtime: {error}")),
    };

    match runtime.block_on(async_main(args)) {
        Ok(code) => code,
        Err(error) => report(&error.to_string()),
    }
}

async fn async_main(args: CliArgs) -> io::Result<ExitCode> {
    let settings = DirectorySettings::load_from_iter([OsString::from("directory-lookup")])
        .map_err(|error| io::Error::other(format!("load settings: {error}")))?;

    let directory = build_directory(&args, &settings).await?;
    let ctx = CallerContext::from(args.principal);

    match args.query {
        Query::UserById { id } => emit(directory.get_user_by_id(&ctx, Some(id)).await),
        Query::UsersByIds { ids } => emit(directory.get_users_by_ids(&ctx, Some(ids)).await),
        Query::UsersByHandles { handles } => {
            emit(directory.get_users_by_handles(&ctx, Some(handles)).await)
        }
        Query::User { identifier } => emit(directory.get_user(&ctx, Some(identifier)).await),
        Query::FindUsers { identifiers } => {
            let wanted = (!identifiers.is_empty()).then_some(identifiers);
            emit(directory.find_users(&ctx, wanted).await)
        }
        Query::ActiveStatuses { ids } => emit(directory.get_active_statuses(&ctx, Some(ids)).await),
    }
}

/// Print a successful result as JSON on stdout, or the error on stderr.
fn emit<T: Serialize>(result: Result<T, Error>) -> io::Result<ExitCode> {
    match result {
        Ok(value) => {
            let json = serde_json::to_string_pretty(&value)
                .map_err(|error| io::Error::other(format!("render result: {error}")))?;
            write_line(io::stdout().lock(), &json);
            Ok(ExitCode::SUCCESS)
        }
        Err(error) => {
            write_line(
                io::stderr().lock(),
                &format!("{}: {error}", code_label(error.code())),
            );
            Ok(exit_code_for(error.code()))
        }
    }
}

async fn build_directory(
    args: &CliArgs,
    settings: &DirectorySettings,
) -> io::Result<Box<dyn UserDirectoryQuery>> {
    let concurrency = settings.lookup_concurrency();

    if let Some(database_url) = resolve_database_url(args.database_url.clone(), settings) {
        let pool = DbPool::new(PoolConfig::from_settings(database_url, settings))
            .await
            .map_err(|error| io::Error::other(format!("create database pool: {error}")))?;
        let repository =
            DieselUserLookupRepository::new(pool).with_query_timeout(settings.query_timeout());
        info!(backend = "postgres", "directory ready");
        return Ok(Box::new(
            UserResolverService::new(Arc::new(repository)).with_lookup_concurrency(concurrency),
        ));
    }

    let repository = in_memory_directory(args.example_seed.as_deref())?;
    info!(backend = "memory", users = repository.len().await, "directory ready");
    Ok(Box::new(
        UserResolverService::new(Arc::new(repository)).with_lookup_concurrency(concurrency),
    ))
}

#[cfg(feature = "example-data")]
fn in_memory_directory(example_seed: Option<&str>) -> io::Result<InMemoryUserLookupRepository> {
    use user_directory::example_data::{DirectorySeedSettings, seed_in_memory_directory};

    let seed_settings = match example_seed {
        Some(seed_name) => DirectorySeedSettings::for_seed(seed_name),
        None => DirectorySeedSettings::load_from_iter([OsString::from("directory-lookup")])
            .map_err(|error| io::Error::other(format!("load seed settings: {error}")))?,
    };

    let seeded = seed_in_memory_directory(&seed_settings)
        .map_err(|error| io::Error::other(format!("seed example data: {error}")))?;
    Ok(seeded.unwrap_or_default())
}

#[cfg(not(feature = "example-data"))]
fn in_memory_directory(example_seed: Option<&str>) -> io::Result<InMemoryUserLookupRepository> {
    if example_seed.is_some() {
        warn!("--example-seed requires the example-data feature; starting empty");
    }
    Ok(InMemoryUserLookupRepository::default())
}

fn resolve_database_url(explicit: Option<String>, settings: &DirectorySettings) -> Option<String> {
    explicit
        .filter(|value| !value.trim().is_empty())
        .or_else(|| settings.database_url().map(str::to_owned))
        .or_else(|| {
            env::var("DATABASE_URL")
                .ok()
                .filter(|value| !value.trim().is_empty())
        })
}

fn parse_principal(raw: &str) -> Result<UserId, String> {
    UserId::new(raw).map_err(|error| error.to_string())
}

fn code_label(code: ErrorCode) -> &'static str {
    match code {
        ErrorCode::MissingParameter => "missing_parameter",
        ErrorCode::NotFound => "not_found",
        ErrorCode::NotAuthorized => "not_authorized",
        _ => "repository",
    }
}

fn exit_code_for(code: ErrorCode) -> ExitCode {
    match code {
        ErrorCode::NotFound => ExitCode::from(3),
        ErrorCode::NotAuthorized => ExitCode::from(4),
        ErrorCode::MissingParameter => ExitCode::from(2),
        _ => ExitCode::FAILURE,
    }
}

fn report(message: &str) -> ExitCode {
    write_line(io::stderr().lock(), message);
    ExitCode::FAILURE
}

fn write_line(mut out: impl Write, message: &str) {
    if let Err(err) = writeln!(out, "{message}") {
        drop(err);
    }
}
