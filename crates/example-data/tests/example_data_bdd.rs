//! Behavioural tests for the example-data crate.
//!
//! These tests validate the crate's behaviour against Gherkin scenarios
//! covering registry parsing, deterministic generation, and handle rules.

#![expect(
    clippy::expect_used,
    reason = "test code uses expect for clear failure messages"
)]

use std::collections::HashSet;

use example_data::{
    ExampleUserSeed, RegistryError, SeedDefinition, SeedRegistry, canonical_handle,
    generate_example_users, is_valid_handle,
};
use rstest::fixture;
use rstest_bdd::Slot;
use rstest_bdd_macros::{ScenarioState, given, scenario, then, when};

// ============================================================================
// Test fixtures and constants
// ============================================================================

/// Base valid registry JSON used by multiple Given steps.
const VALID_REGISTRY_JSON: &str = r#"{
    "version": 1,
    "inviteCodes": [
        {"code": "FOUNDERS", "roles": ["admin"]},
        {"code": "BETA", "roles": ["tester", "early"]}
    ],
    "timezones": ["Europe/London", "Pacific/Auckland"],
    "seeds": [
        {"name": "test-seed", "seed": 42, "userCount": 30}
    ]
}"#;

/// Test world holding parsed registry and generated users.
#[derive(Default, ScenarioState)]
struct World {
    json_input: Slot<String>,
    registry_result: Slot<Result<SeedRegistry, RegistryError>>,
    seed_def: Slot<SeedDefinition>,
    generated_users: Slot<Vec<ExampleUserSeed>>,
    second_generation: Slot<Vec<ExampleUserSeed>>,
}

impl World {
    fn registry(&self) -> SeedRegistry {
        self.registry_result
            .get()
            .expect("registry should be set")
            .expect("registry should be valid")
    }

    fn seed_def(&self) -> SeedDefinition {
        self.seed_def.get().expect("seed definition should be set")
    }

    fn registry_result(&self) -> Result<SeedRegistry, RegistryError> {
        self.registry_result
            .get()
            .expect("registry result should be set")
    }

    fn users(&self) -> Vec<ExampleUserSeed> {
        self.generated_users
            .get()
            .expect("users should be generated")
    }
}

#[fixture]
fn world() -> World {
    World::default()
}

// ============================================================================
// Given steps
// ============================================================================

#[given("a valid seed registry JSON")]
fn a_valid_seed_registry_json(world: &World) {
    world.json_input.set(VALID_REGISTRY_JSON.to_owned());
}

#[given("a valid seed registry")]
fn a_valid_seed_registry(world: &World) {
    let registry = SeedRegistry::from_json(VALID_REGISTRY_JSON).expect("valid test registry");
    world.registry_result.set(Ok(registry));
}

#[given("a seed definition with seed {seed:u64}")]
fn a_seed_definition_with_seed(world: &World, seed: u64) {
    let registry = world.registry();
    let seed_def = registry.find_seed("test-seed").expect("seed exists");
    assert_eq!(seed_def.seed(), seed, "seed value mismatch");
    world.seed_def.set(seed_def.clone());
}

#[given("a seed definition")]
fn a_seed_definition(world: &World) {
    let registry = world.registry();
    let seed_def = registry.find_seed("test-seed").expect("seed exists");
    world.seed_def.set(seed_def.clone());
}

#[given("malformed JSON")]
fn malformed_json(world: &World) {
    world.json_input.set("not valid json".to_owned());
}

#[given("registry JSON with empty seeds array")]
fn registry_json_with_empty_seeds_array(world: &World) {
    world
        .json_input
        .set(r#"{"version": 1, "seeds": []}"#.to_owned());
}

#[given("registry JSON with a malformed invite code")]
fn registry_json_with_a_malformed_invite_code(world: &World) {
    let json = r#"{
        "version": 1,
        "inviteCodes": [{"code": "OK"}, {"code": "NOT OK"}],
        "seeds": [{"name": "test", "seed": 1, "userCount": 1}]
    }"#;
    world.json_input.set(json.to_owned());
}

// ============================================================================
// When steps
// ============================================================================

#[when("the registry is parsed")]
fn the_registry_is_parsed(world: &World) {
    let json = world.json_input.get().expect("JSON input should be set");
    world.registry_result.set(SeedRegistry::from_json(&json));
}

#[when("users are generated")]
fn users_are_generated(world: &World) {
    let registry = world.registry();
    let seed_def = world.seed_def();
    let users = generate_example_users(&registry, &seed_def).expect("generation succeeds");
    world.generated_users.set(users);
}

#[when("users are generated twice")]
fn users_are_generated_twice(world: &World) {
    let registry = world.registry();
    let seed_def = world.seed_def();

    let first = generate_example_users(&registry, &seed_def).expect("first generation");
    let second = generate_example_users(&registry, &seed_def).expect("second generation");

    world.generated_users.set(first);
    world.second_generation.set(second);
}

// ============================================================================
// Then steps
// ============================================================================

#[then("parsing succeeds")]
fn parsing_succeeds(world: &World) {
    let result = world.registry_result();
    assert!(result.is_ok(), "Expected parsing to succeed: {result:?}");
}

#[then("the registry contains the expected seed definitions")]
fn the_registry_contains_the_expected_seed_definitions(world: &World) {
    let registry = world.registry();
    assert_eq!(registry.seeds().len(), 1);
    let seed = registry.find_seed("test-seed").expect("seed should exist");
    assert_eq!(seed.seed(), 42);
    assert_eq!(seed.user_count(), 30);
}

#[then("both generations produce identical users")]
fn both_generations_produce_identical_users(world: &World) {
    let first = world.users();
    let second = world
        .second_generation
        .get()
        .expect("second generation should be set");

    assert_eq!(first, second, "Generations should be deterministic");
}

#[then("all handles are valid")]
fn all_handles_are_valid(world: &World) {
    for user in world.users() {
        assert!(is_valid_handle(&user.handle), "Invalid handle: {}", user.handle);
    }
}

#[then("no two handles share a canonical form")]
fn no_two_handles_share_a_canonical_form(world: &World) {
    let users = world.users();
    let canonical: HashSet<String> = users.iter().map(|u| canonical_handle(&u.handle)).collect();

    assert_eq!(canonical.len(), users.len());
}

#[then("every invite code exists in the registry")]
fn every_invite_code_exists_in_the_registry(world: &World) {
    let registry = world.registry();
    let known: HashSet<&str> = registry.invite_codes().iter().map(|i| i.code()).collect();

    for user in world.users() {
        if let Some(code) = user.invite_code.as_deref() {
            assert!(known.contains(code), "Invite code {code} not in registry");
        }
    }
}

#[then("each user's roles match their invite code")]
fn each_users_roles_match_their_invite_code(world: &World) {
    let registry = world.registry();

    for user in world.users() {
        let expected = user
            .invite_code
            .as_deref()
            .and_then(|code| registry.invite_codes().iter().find(|i| i.code() == code))
            .map(|invite| invite.roles().to_vec())
            .unwrap_or_default();
        assert_eq!(user.roles, expected, "roles mismatch for {}", user.handle);
    }
}

#[then("parsing fails with a parse error")]
fn parsing_fails_with_a_parse_error(world: &World) {
    match world.registry_result() {
        Err(RegistryError::ParseError { .. }) => {}
        other => panic!("Expected ParseError, got: {other:?}"),
    }
}

#[then("parsing fails with empty seeds error")]
fn parsing_fails_with_empty_seeds_error(world: &World) {
    match world.registry_result() {
        Err(RegistryError::EmptySeeds) => {}
        other => panic!("Expected EmptySeeds, got: {other:?}"),
    }
}

#[then("parsing fails with invalid invite code error")]
fn parsing_fails_with_invalid_invite_code_error(world: &World) {
    match world.registry_result() {
        Err(RegistryError::InvalidInviteCode { index: 1, .. }) => {}
        other => panic!("Expected InvalidInviteCode at index 1, got: {other:?}"),
    }
}

// ============================================================================
// Scenario bindings
// ============================================================================

#[scenario(
    path = "tests/features/example_data.feature",
    name = "Valid registry parses successfully"
)]
fn valid_registry_parses_successfully(world: World) {
    let _ = world;
}

#[scenario(
    path = "tests/features/example_data.feature",
    name = "Deterministic generation produces identical users"
)]
fn deterministic_generation_produces_identical_users(world: World) {
    let _ = world;
}

#[scenario(
    path = "tests/features/example_data.feature",
    name = "Generated handles stay unique once canonicalised"
)]
fn generated_handles_stay_unique_once_canonicalised(world: World) {
    let _ = world;
}

#[scenario(
    path = "tests/features/example_data.feature",
    name = "Invite codes grant their roles"
)]
fn invite_codes_grant_their_roles(world: World) {
    let _ = world;
}

#[scenario(
    path = "tests/features/example_data.feature",
    name = "Invalid JSON fails parsing"
)]
fn invalid_json_fails_parsing(world: World) {
    let _ = world;
}

#[scenario(
    path = "tests/features/example_data.feature",
    name = "Empty seeds array fails parsing"
)]
fn empty_seeds_array_fails_parsing(world: World) {
    let _ = world;
}

#[scenario(
    path = "tests/features/example_data.feature",
    name = "Malformed invite code fails parsing"
)]
fn malformed_invite_code_fails_parsing(world: World) {
    let _ = world;
}
