//! Character use-case service.
//!
//! # Responsibility
//! - Provide stable create/save/load/list/delete entry points for callers.
//! - Combine the class table with repository persistence.
//!
//! # Invariants
//! - Creation never touches storage; `create_and_save` is the only
//!   combined path.
//! - Service layer remains storage-agnostic.

use crate::model::character::{create_character, Character, CharacterError, ClassTable};
use crate::repo::character_repo::{CharacterRepository, RepoError, RepoResult};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

/// Service error for combined create-and-persist flows.
#[derive(Debug)]
pub enum CharacterServiceError {
    /// Creation rejected the class key.
    Character(CharacterError),
    /// Persistence-layer failure.
    Repo(RepoError),
}

impl Display for CharacterServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Character(err) => write!(f, "{err}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for CharacterServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Character(err) => Some(err),
            Self::Repo(err) => Some(err),
        }
    }
}

impl From<CharacterError> for CharacterServiceError {
    fn from(value: CharacterError) -> Self {
        Self::Character(value)
    }
}

impl From<RepoError> for CharacterServiceError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

/// Use-case service wrapper for character records.
pub struct CharacterService<'classes, R: CharacterRepository> {
    classes: &'classes ClassTable,
    repo: R,
}

impl<'classes, R: CharacterRepository> CharacterService<'classes, R> {
    /// Creates a service over `repo` using `classes` for creation.
    pub fn new(classes: &'classes ClassTable, repo: R) -> Self {
        Self { classes, repo }
    }

    /// Builds a new in-memory character; nothing is persisted.
    pub fn create_character(
        &self,
        name: impl Into<String>,
        class_name: &str,
    ) -> Result<Character, CharacterError> {
        create_character(self.classes, name, class_name)
    }

    /// Builds a new character and writes its first save.
    pub fn create_and_save(
        &self,
        name: impl Into<String>,
        class_name: &str,
    ) -> Result<Character, CharacterServiceError> {
        let character = self.create_character(name, class_name)?;
        self.repo.save(&character)?;
        Ok(character)
    }

    /// Writes the full record through the repository.
    pub fn save(&self, character: &Character) -> RepoResult<PathBuf> {
        self.repo.save(character)
    }

    /// Loads a validated record by name.
    pub fn load(&self, name: &str) -> RepoResult<Character> {
        self.repo.load(name)
    }

    /// Lists sanitized names of stored characters.
    pub fn list(&self) -> RepoResult<Vec<String>> {
        self.repo.list()
    }

    /// Removes the stored record for `name`.
    pub fn delete(&self, name: &str) -> RepoResult<()> {
        self.repo.delete(name)
    }

    /// Class keys accepted by [`Self::create_character`].
    pub fn class_names(&self) -> Vec<&'static str> {
        self.classes.class_names()
    }
}
