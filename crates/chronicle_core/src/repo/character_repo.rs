//! Character repository contracts and JSON-file implementation.
//!
//! # Responsibility
//! - Map character records to and from one save file per character.
//! - Enumerate and remove save files in the save directory.
//!
//! # Invariants
//! - Save file path is `<save_dir>/<sanitized name>_save.json`.
//! - Writes always replace the whole file with the full record.
//! - Read paths reject corrupt or malformed files instead of masking them.
//! - Names that sanitize to the same string share one save file.

use crate::model::character::{character_from_record, Character, SaveDataError};
use log::{error, info, warn};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use serde_json::Value;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Save directory used when the caller does not provide one.
pub const DEFAULT_SAVE_DIR: &str = "data/save_games";
/// Suffix appended to every sanitized name.
pub const SAVE_FILE_SUFFIX: &str = "_save.json";

static SAVE_FILE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)^(.*)_save\.json$").expect("valid save file regex"));

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for character persistence.
#[derive(Debug)]
pub enum RepoError {
    /// No save file exists for the sanitized name.
    NotFound(String),
    /// Save file exists but is not valid JSON.
    Corrupted {
        name: String,
        source: serde_json::Error,
    },
    /// Record failed structural validation.
    InvalidData(SaveDataError),
    /// Filesystem failure; the original `io::Error` and its kind are kept.
    Io(io::Error),
}

impl RepoError {
    /// Returns the underlying `io::ErrorKind` for environment failures.
    pub fn io_kind(&self) -> Option<io::ErrorKind> {
        match self {
            Self::Io(err) => Some(err.kind()),
            _ => None,
        }
    }
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound(name) => write!(f, "no save found for `{name}`"),
            Self::Corrupted { name, source } => {
                write!(f, "save file for `{name}` is corrupted: {source}")
            }
            Self::InvalidData(err) => write!(f, "invalid character data: {err}"),
            Self::Io(err) => write!(f, "{err}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::NotFound(_) => None,
            Self::Corrupted { source, .. } => Some(source),
            Self::InvalidData(err) => Some(err),
            Self::Io(err) => Some(err),
        }
    }
}

impl From<SaveDataError> for RepoError {
    fn from(value: SaveDataError) -> Self {
        Self::InvalidData(value)
    }
}

impl From<io::Error> for RepoError {
    fn from(value: io::Error) -> Self {
        Self::Io(value)
    }
}

/// Repository interface for character save operations.
pub trait CharacterRepository {
    /// Writes the full record, replacing any existing save for its name.
    fn save(&self, character: &Character) -> RepoResult<PathBuf>;
    /// Reads and validates the save for `name`.
    fn load(&self, name: &str) -> RepoResult<Character>;
    /// Lists sanitized names of all saves, sorted ascending.
    fn list(&self) -> RepoResult<Vec<String>>;
    /// Removes the save for `name`.
    fn delete(&self, name: &str) -> RepoResult<()>;
}

/// Keeps alphanumerics, spaces, underscores and hyphens, then trims trailing
/// whitespace.
pub fn sanitize_name(name: &str) -> String {
    let kept = name
        .chars()
        .filter(|ch| ch.is_alphanumeric() || matches!(ch, ' ' | '_' | '-'))
        .collect::<String>();
    kept.trim_end().to_string()
}

/// Returns the save file name (no directory) for a display name.
pub fn save_file_name(name: &str) -> String {
    format!("{}{SAVE_FILE_SUFFIX}", sanitize_name(name))
}

/// Save-directory backed repository writing one pretty-printed JSON file
/// per character.
#[derive(Debug, Clone)]
pub struct JsonFileCharacterRepository {
    save_dir: PathBuf,
}

impl JsonFileCharacterRepository {
    /// Creates a repository rooted at `save_dir`.
    ///
    /// The directory is created lazily on first save.
    pub fn new(save_dir: impl Into<PathBuf>) -> Self {
        Self {
            save_dir: save_dir.into(),
        }
    }

    /// Creates a repository rooted at [`DEFAULT_SAVE_DIR`].
    pub fn with_default_dir() -> Self {
        Self::new(DEFAULT_SAVE_DIR)
    }

    pub fn save_dir(&self) -> &Path {
        &self.save_dir
    }

    /// Full path of the save file for `name`.
    pub fn save_path(&self, name: &str) -> PathBuf {
        self.save_dir.join(save_file_name(name))
    }

    /// Saves an untyped record.
    ///
    /// Only requires an object with a string `name`; the rest is written as
    /// given. Use this for records that did not come from [`Character`].
    ///
    /// # Errors
    /// - `RepoError::InvalidData` when `record` is not an object with a name.
    /// - `RepoError::Io` when the directory or file cannot be written.
    pub fn save_record(&self, record: &Value) -> RepoResult<PathBuf> {
        let object = record.as_object().ok_or(SaveDataError::NotAnObject)?;
        let name = match object.get("name") {
            Some(Value::String(name)) => name.as_str(),
            Some(_) => {
                return Err(RepoError::InvalidData(SaveDataError::Schema(
                    "name must be a string".to_string(),
                )))
            }
            None => return Err(RepoError::InvalidData(SaveDataError::MissingField("name"))),
        };
        self.write_record(name, record)
    }

    fn write_record<T>(&self, name: &str, record: &T) -> RepoResult<PathBuf>
    where
        T: Serialize + ?Sized,
    {
        let path = self.save_path(name);
        let stem = sanitize_name(name);

        let result = serde_json::to_vec_pretty(record)
            .map_err(|err| RepoError::InvalidData(SaveDataError::Schema(err.to_string())))
            .and_then(|bytes| {
                fs::create_dir_all(&self.save_dir)?;
                fs::write(&path, bytes)?;
                Ok(())
            });

        match result {
            Ok(()) => {
                info!("event=character_save module=repo status=ok name={stem}");
                Ok(path)
            }
            Err(err) => {
                error!(
                    "event=character_save module=repo status=error name={} error={}",
                    stem, err
                );
                Err(err)
            }
        }
    }
}

impl CharacterRepository for JsonFileCharacterRepository {
    fn save(&self, character: &Character) -> RepoResult<PathBuf> {
        self.write_record(&character.name, character)
    }

    fn load(&self, name: &str) -> RepoResult<Character> {
        let path = self.save_path(name);
        let stem = sanitize_name(name);

        let bytes = match fs::read(&path) {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                info!("event=character_load module=repo status=not_found name={stem}");
                return Err(RepoError::NotFound(name.to_string()));
            }
            Err(err) => return Err(err.into()),
        };

        let record = serde_json::from_slice::<Value>(&bytes).map_err(|source| {
            warn!("event=character_load module=repo status=corrupted name={stem}");
            RepoError::Corrupted {
                name: name.to_string(),
                source,
            }
        })?;

        let character = character_from_record(record).map_err(|err| {
            warn!(
                "event=character_load module=repo status=invalid name={} error={}",
                stem, err
            );
            RepoError::InvalidData(err)
        })?;

        info!("event=character_load module=repo status=ok name={stem}");
        Ok(character)
    }

    fn list(&self) -> RepoResult<Vec<String>> {
        let entries = match fs::read_dir(&self.save_dir) {
            Ok(entries) => entries,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(err) => return Err(err.into()),
        };

        let mut names = Vec::new();
        for entry in entries {
            let entry = entry?;
            let file_name = entry.file_name();
            let Some(file_name) = file_name.to_str() else {
                continue;
            };
            if let Some(captures) = SAVE_FILE_RE.captures(file_name) {
                names.push(captures[1].to_string());
            }
        }
        names.sort();
        Ok(names)
    }

    fn delete(&self, name: &str) -> RepoResult<()> {
        let path = self.save_path(name);
        match fs::remove_file(&path) {
            Ok(()) => {
                info!(
                    "event=character_delete module=repo status=ok name={}",
                    sanitize_name(name)
                );
                Ok(())
            }
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                Err(RepoError::NotFound(name.to_string()))
            }
            Err(err) => Err(err.into()),
        }
    }
}
