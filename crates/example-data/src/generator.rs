//! Deterministic user generation from seed definitions.
//!
//! The same seed always produces identical output. Handles are built from
//! the generated names, keep their mixed case, and are unique across the
//! generated set once canonicalised.

use std::collections::HashSet;

use fake::Fake;
use fake::faker::name::raw::{FirstName, LastName};
use fake::locales::EN;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use uuid::Uuid;

use crate::error::GenerationError;
use crate::registry::{SeedDefinition, SeedRegistry};
use crate::seed::ExampleUserSeed;
use crate::validation::{HANDLE_CANONICAL_MAX, canonical_handle, is_valid_handle, sanitize_handle};

/// Maximum number of attempts to generate a usable name.
const MAX_NAME_ATTEMPTS: usize = 100;

/// Maximum number of suffixed candidates tried for a colliding handle.
const MAX_HANDLE_ATTEMPTS: usize = 50;

/// Upper bound (exclusive) for numeric handle suffixes.
const HANDLE_SUFFIX_LIMIT: u32 = 10_000;

/// One in this many users signs up with an invite code.
const INVITE_ODDS: u32 = 3;

/// Generates the seed's configured number of users.
///
/// # Errors
///
/// Returns [`GenerationError`] if a name or a unique handle cannot be
/// produced within the retry budget.
///
/// # Example
///
/// ```
/// use example_data::{SeedRegistry, generate_example_users};
///
/// let json = r#"{"version": 1, "seeds": [{"name": "test", "seed": 42, "userCount": 3}]}"#;
///
/// let registry = SeedRegistry::from_json(json).expect("valid");
/// let seed_def = registry.find_seed("test").expect("found");
/// let users = generate_example_users(&registry, seed_def).expect("generated");
///
/// assert_eq!(users.len(), 3);
/// let again = generate_example_users(&registry, seed_def).expect("generated");
/// assert_eq!(users, again);
/// ```
pub fn generate_example_users(
    registry: &SeedRegistry,
    seed_def: &SeedDefinition,
) -> Result<Vec<ExampleUserSeed>, GenerationError> {
    generate_example_users_with_count(registry, seed_def, seed_def.user_count())
}

/// Generates `count` users from the seed, overriding its configured count.
///
/// A smaller count yields a prefix of the larger set.
///
/// # Errors
///
/// Returns [`GenerationError`] if a name or a unique handle cannot be
/// produced within the retry budget.
pub fn generate_example_users_with_count(
    registry: &SeedRegistry,
    seed_def: &SeedDefinition,
    count: usize,
) -> Result<Vec<ExampleUserSeed>, GenerationError> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed_def.seed());
    let mut taken = HashSet::with_capacity(count);

    (0..count)
        .map(|_| generate_single_user(&mut rng, registry, &mut taken))
        .collect()
}

fn generate_single_user(
    rng: &mut ChaCha8Rng,
    registry: &SeedRegistry,
    taken: &mut HashSet<String>,
) -> Result<ExampleUserSeed, GenerationError> {
    let id = Uuid::from_u128(rng.random());
    let (first, last) = generate_name(rng)?;
    let handle = unique_handle(rng, &first, &last, taken)?;
    let canonical = canonical_handle(&handle);

    let email = format!("{canonical}@example.com");
    let emails = if rng.random_ratio(1, 4) {
        vec![format!("{canonical}@work.example")]
    } else {
        Vec::new()
    };
    let phone = rng
        .random_ratio(1, 2)
        .then(|| format!("+1 555 01{:02}", rng.random_range(0..100_u32)));
    let timezone = registry.timezones().choose(rng).cloned();

    let invite = if rng.random_ratio(1, INVITE_ODDS) {
        registry.invite_codes().choose(rng)
    } else {
        None
    };
    let roles = invite.map(|code| code.roles().to_vec()).unwrap_or_default();
    let invite_code = invite.map(|code| code.code().to_owned());

    let active = rng.random_ratio(9, 10);

    Ok(ExampleUserSeed {
        id,
        active,
        handle,
        name: format!("{first} {last}"),
        email,
        emails,
        phone,
        timezone,
        roles,
        invite_code,
    })
}

/// Generates a first and last name whose sanitised join is a valid handle.
fn generate_name(rng: &mut ChaCha8Rng) -> Result<(String, String), GenerationError> {
    for _ in 0..MAX_NAME_ATTEMPTS {
        let first: String = FirstName(EN).fake_with_rng(rng);
        let last: String = LastName(EN).fake_with_rng(rng);

        let base = format!("{}{}", sanitize_handle(&first), sanitize_handle(&last));
        if is_valid_handle(&base) {
            return Ok((first, last));
        }
    }

    Err(GenerationError::NameGenerationFailed {
        max_attempts: MAX_NAME_ATTEMPTS,
    })
}

/// Picks a handle whose canonical form is not yet taken and records it.
///
/// The plain name is tried first and may exceed the canonical cap. Suffixed
/// candidates shorten the base so the suffix survives canonicalisation.
fn unique_handle(
    rng: &mut ChaCha8Rng,
    first: &str,
    last: &str,
    taken: &mut HashSet<String>,
) -> Result<String, GenerationError> {
    let separator = if rng.random_ratio(1, 2) { "" } else { "_" };
    let base = format!("{}{separator}{}", sanitize_handle(first), sanitize_handle(last));

    if taken.insert(canonical_handle(&base)) {
        return Ok(base);
    }

    for _ in 0..MAX_HANDLE_ATTEMPTS {
        let suffix = rng.random_range(1..HANDLE_SUFFIX_LIMIT).to_string();
        let room = HANDLE_CANONICAL_MAX.saturating_sub(suffix.len());
        let candidate: String = base.chars().take(room).chain(suffix.chars()).collect();
        if taken.insert(canonical_handle(&candidate)) {
            return Ok(candidate);
        }
    }

    Err(GenerationError::HandleGenerationFailed {
        max_attempts: MAX_HANDLE_ATTEMPTS,
    })
}

#[cfg(test)]
mod tests {
    use rstest::{fixture, rstest};

    use super::*;

    const TEST_REGISTRY_JSON: &str = r#"{
        "version": 1,
        "inviteCodes": [
            {"code": "FOUNDERS", "roles": ["admin"]},
            {"code": "BETA", "roles": ["tester"]}
        ],
        "timezones": ["Europe/London", "Asia/Tokyo"],
        "seeds": [
            {"name": "test-seed", "seed": 42, "userCount": 40},
            {"name": "small-seed", "seed": 123, "userCount": 2}
        ]
    }"#;

    #[fixture]
    fn test_registry() -> SeedRegistry {
        SeedRegistry::from_json(TEST_REGISTRY_JSON).expect("valid test registry")
    }

    fn users_for(registry: &SeedRegistry, seed_name: &str) -> Vec<ExampleUserSeed> {
        let seed_def = registry.find_seed(seed_name).expect("seed should be found");
        generate_example_users(registry, seed_def).expect("generation should succeed")
    }

    #[rstest]
    fn generates_correct_user_count(test_registry: SeedRegistry) {
        assert_eq!(users_for(&test_registry, "test-seed").len(), 40);
    }

    #[rstest]
    fn generation_is_deterministic(test_registry: SeedRegistry) {
        assert_eq!(
            users_for(&test_registry, "test-seed"),
            users_for(&test_registry, "test-seed")
        );
    }

    #[rstest]
    fn different_seeds_produce_different_users(test_registry: SeedRegistry) {
        let first = users_for(&test_registry, "test-seed");
        let second = users_for(&test_registry, "small-seed");

        assert_ne!(first.first().map(|u| u.id), second.first().map(|u| u.id));
    }

    #[rstest]
    fn count_override_yields_a_prefix(test_registry: SeedRegistry) {
        let seed_def = test_registry.find_seed("test-seed").expect("seed found");
        let full = generate_example_users(&test_registry, seed_def).expect("generated");
        let partial =
            generate_example_users_with_count(&test_registry, seed_def, 5).expect("generated");

        assert_eq!(partial.as_slice(), full.get(..5).expect("prefix"));
    }

    #[rstest]
    fn handles_are_valid_and_canonically_unique(test_registry: SeedRegistry) {
        let users = users_for(&test_registry, "test-seed");
        let canonical: HashSet<_> = users.iter().map(|u| canonical_handle(&u.handle)).collect();

        assert_eq!(canonical.len(), users.len());
        assert!(users.iter().all(|u| is_valid_handle(&u.handle)));
    }

    #[rstest]
    fn emails_derive_from_the_canonical_handle(test_registry: SeedRegistry) {
        for user in users_for(&test_registry, "test-seed") {
            assert_eq!(
                user.email,
                format!("{}@example.com", canonical_handle(&user.handle))
            );
        }
    }

    #[rstest]
    fn roles_come_from_the_invite_code(test_registry: SeedRegistry) {
        for user in users_for(&test_registry, "test-seed") {
            let expected: Vec<String> = match user.invite_code.as_deref() {
                Some("FOUNDERS") => vec!["admin".to_owned()],
                Some("BETA") => vec!["tester".to_owned()],
                Some(other) => panic!("unexpected invite code {other}"),
                None => Vec::new(),
            };
            assert_eq!(user.roles, expected);
        }
    }

    #[rstest]
    fn timezones_stay_within_registry(test_registry: SeedRegistry) {
        for user in users_for(&test_registry, "test-seed") {
            let timezone = user.timezone.expect("registry offers timezones");
            assert!(test_registry.timezones().contains(&timezone));
        }
    }

    #[test]
    fn empty_reference_data_leaves_optional_fields_empty() {
        let json = r#"{"version": 1, "seeds": [{"name": "bare", "seed": 7, "userCount": 10}]}"#;
        let registry = SeedRegistry::from_json(json).expect("valid registry");

        for user in users_for(&registry, "bare") {
            assert!(user.timezone.is_none());
            assert!(user.invite_code.is_none());
            assert!(user.roles.is_empty());
        }
    }

    #[test]
    fn colliding_handles_get_suffixes_that_survive_the_cap() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mut taken = HashSet::new();
        let long_first = "Maximiliana";
        let long_last = "Throckmorton";

        let handles: Vec<String> = (0..5)
            .map(|_| unique_handle(&mut rng, long_first, long_last, &mut taken).expect("handle"))
            .collect();

        let canonical: HashSet<_> = handles.iter().map(|h| canonical_handle(h)).collect();
        assert_eq!(canonical.len(), handles.len());
    }
}
