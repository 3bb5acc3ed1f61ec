//! Core character logic for Quest Chronicles.
//! This crate is the single source of truth for character rules and saves.

pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::character::{
    character_from_record, create_character, standard_classes, validate_record, Character,
    CharacterClass, CharacterError, ClassTable, ClassTemplate, SaveDataError,
};
pub use repo::character_repo::{
    sanitize_name, save_file_name, CharacterRepository, JsonFileCharacterRepository, RepoError,
    RepoResult, DEFAULT_SAVE_DIR,
};
pub use service::character_service::{CharacterService, CharacterServiceError};
pub use service::progression::{
    add_gold, gain_experience, heal, is_dead, level_threshold, revive, ProgressionError,
};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
