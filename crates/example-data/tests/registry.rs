//! Integration tests for loading seed registries from disk.
//!
//! Parsing rules are covered by the unit tests; these exercise the public
//! surface the directory and the CLI rely on.

#![expect(
    clippy::expect_used,
    reason = "test code uses expect for clear failure messages"
)]

use std::fs;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use example_data::{RegistryError, SeedRegistry, generate_example_users};
use rstest::rstest;

const VALID_JSON: &str = r#"{
    "version": 1,
    "inviteCodes": [
        {"code": "FOUNDERS", "roles": ["admin", "staff"]},
        {"code": "BETA", "roles": ["tester"]}
    ],
    "timezones": ["Europe/London", "America/New_York", "Asia/Tokyo"],
    "seeds": [
        {"name": "mossy-owl", "seed": 2026, "userCount": 12},
        {"name": "snowy-penguin", "seed": 1234, "userCount": 5}
    ]
}"#;

#[test]
fn loads_registry_from_file() {
    let path = unique_temp_path("seeds.json");
    fs::write(&path, VALID_JSON).expect("write registry");

    let registry = SeedRegistry::from_file(&path).expect("load registry");

    assert_eq!(registry, SeedRegistry::from_json(VALID_JSON).expect("parse"));
    cleanup(&path);
}

#[test]
fn missing_file_reports_io_error_with_path() {
    let path = unique_temp_path("absent.json");

    let err = SeedRegistry::from_file(&path).expect_err("missing file");

    match err {
        RegistryError::IoError { path: reported, .. } => assert_eq!(reported, path),
        other => panic!("expected IoError, got {other:?}"),
    }
    cleanup(&path);
}

#[rstest]
#[case("mossy-owl", 12)]
#[case("snowy-penguin", 5)]
fn each_seed_generates_its_configured_count(#[case] name: &str, #[case] expected: usize) {
    let registry = SeedRegistry::from_json(VALID_JSON).expect("valid registry");
    let seed_def = registry.find_seed(name).expect("seed found");

    let users = generate_example_users(&registry, seed_def).expect("generated");

    assert_eq!(users.len(), expected);
}

#[test]
fn invite_codes_carry_their_roles() {
    let registry = SeedRegistry::from_json(VALID_JSON).expect("valid registry");
    let founders = registry
        .invite_codes()
        .iter()
        .find(|invite| invite.code() == "FOUNDERS")
        .expect("founders code");

    assert_eq!(founders.roles(), ["admin".to_owned(), "staff".to_owned()]);
}

fn unique_temp_path(file_name: &str) -> PathBuf {
    static TEMP_COUNTER: AtomicUsize = AtomicUsize::new(0);
    let counter = TEMP_COUNTER.fetch_add(1, Ordering::Relaxed);
    let suffix = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_nanos())
        .unwrap_or(0);
    let dir = std::env::temp_dir()
        .join("example-data-tests")
        .join(format!("seed-registry-{suffix}-{counter}"));
    fs::create_dir_all(&dir).expect("create temp dir");
    dir.join(file_name)
}

fn cleanup(path: &std::path::Path) {
    if let Some(parent) = path.parent() {
        #[expect(
            clippy::let_underscore_must_use,
            reason = "explicitly ignore cleanup failures in test teardown"
        )]
        let _ = fs::remove_dir_all(parent);
    }
}
