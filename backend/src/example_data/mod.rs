//! Seeding the directory with generated example users.

mod seeding;
mod settings;

pub use seeding::{
    SeedingError, invite_codes_from_registry, load_registry, seed_in_memory_directory,
    users_from_seed,
};
pub use settings::DirectorySeedSettings;
