//! Character domain model.
//!
//! # Responsibility
//! - Define the canonical character record persisted to save files.
//! - Own the immutable class template table used at creation time.
//! - Provide structural validation for externally sourced (loaded) records.
//!
//! # Invariants
//! - `class` is fixed at creation and never reassigned by core operations.
//! - A freshly created record has `health == max_health` of its template.
//! - Validation checks shape and types only, never value ranges.
//!
//! # See also
//! - `service::progression` for mutations applied to a live record.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Gold granted to every new character.
pub const STARTING_GOLD: i64 = 100;
/// Level assigned to every new character.
pub const STARTING_LEVEL: i64 = 1;

/// Fields every persisted record must carry.
pub const REQUIRED_FIELDS: &[&str] = &[
    "name",
    "class",
    "level",
    "health",
    "max_health",
    "strength",
    "magic",
    "experience",
    "gold",
    "inventory",
    "active_quests",
    "completed_quests",
];

const INTEGER_FIELDS: &[&str] = &[
    "level",
    "health",
    "max_health",
    "strength",
    "magic",
    "experience",
    "gold",
];

const SEQUENCE_FIELDS: &[&str] = &["inventory", "active_quests", "completed_quests"];

static STANDARD_CLASSES: Lazy<ClassTable> = Lazy::new(ClassTable::standard);

/// Returns the process-wide standard class table.
pub fn standard_classes() -> &'static ClassTable {
    &STANDARD_CLASSES
}

/// Playable character class. Serialized by its display name (`"Warrior"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum CharacterClass {
    Warrior,
    Mage,
    Rogue,
    Cleric,
}

impl CharacterClass {
    /// Every supported class, in table order.
    pub const ALL: [CharacterClass; 4] = [Self::Warrior, Self::Mage, Self::Rogue, Self::Cleric];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Warrior => "Warrior",
            Self::Mage => "Mage",
            Self::Rogue => "Rogue",
            Self::Cleric => "Cleric",
        }
    }
}

impl Display for CharacterClass {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CharacterClass {
    type Err = CharacterError;

    /// Class keys are case-sensitive, matching the save-file spelling.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|class| class.as_str() == value)
            .ok_or_else(|| CharacterError::InvalidClass(value.to_string()))
    }
}

/// Base stat bundle applied when a character of a class is created.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClassTemplate {
    pub max_health: i64,
    pub strength: i64,
    pub magic: i64,
}

/// Immutable mapping from class to its base template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassTable {
    entries: Vec<(CharacterClass, ClassTemplate)>,
}

impl ClassTable {
    /// Builds the standard four-class table.
    pub fn standard() -> Self {
        Self {
            entries: vec![
                (
                    CharacterClass::Warrior,
                    ClassTemplate {
                        max_health: 120,
                        strength: 15,
                        magic: 5,
                    },
                ),
                (
                    CharacterClass::Mage,
                    ClassTemplate {
                        max_health: 80,
                        strength: 8,
                        magic: 20,
                    },
                ),
                (
                    CharacterClass::Rogue,
                    ClassTemplate {
                        max_health: 90,
                        strength: 12,
                        magic: 10,
                    },
                ),
                (
                    CharacterClass::Cleric,
                    ClassTemplate {
                        max_health: 100,
                        strength: 10,
                        magic: 15,
                    },
                ),
            ],
        }
    }

    /// Returns the template for `class`, or `None` when the table omits it.
    pub fn template(&self, class: CharacterClass) -> Option<ClassTemplate> {
        self.entries
            .iter()
            .find(|(candidate, _)| *candidate == class)
            .map(|(_, template)| *template)
    }

    /// Resolves a class key to its class and template.
    ///
    /// # Errors
    /// - `CharacterError::InvalidClass` when `class_name` is not a table key.
    pub fn lookup(
        &self,
        class_name: &str,
    ) -> Result<(CharacterClass, ClassTemplate), CharacterError> {
        let class = CharacterClass::from_str(class_name)?;
        self.template(class)
            .map(|template| (class, template))
            .ok_or_else(|| CharacterError::InvalidClass(class_name.to_string()))
    }

    /// Class keys in table order.
    pub fn class_names(&self) -> Vec<&'static str> {
        self.entries.iter().map(|(class, _)| class.as_str()).collect()
    }
}

/// Canonical character record.
///
/// Inventory, quest and equipment entries belong to other subsystems and are
/// carried as opaque JSON values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Character {
    pub name: String,
    pub class: CharacterClass,
    pub level: i64,
    /// Zero or below means the character is dead.
    pub health: i64,
    pub max_health: i64,
    pub strength: i64,
    pub magic: i64,
    /// Kept below `level * 100` by the leveling loop.
    pub experience: i64,
    pub gold: i64,
    pub inventory: Vec<Value>,
    pub active_quests: Vec<Value>,
    pub completed_quests: Vec<Value>,
    #[serde(default)]
    pub equipped_weapon: Option<Value>,
    #[serde(default)]
    pub equipped_armor: Option<Value>,
}

impl Character {
    /// Builds a level-1 character from a class template.
    ///
    /// # Invariants
    /// - `health` starts at `template.max_health`.
    /// - Sequences start empty and equipment slots start unset.
    pub fn from_template(
        name: impl Into<String>,
        class: CharacterClass,
        template: ClassTemplate,
    ) -> Self {
        Self {
            name: name.into(),
            class,
            level: STARTING_LEVEL,
            health: template.max_health,
            max_health: template.max_health,
            strength: template.strength,
            magic: template.magic,
            experience: 0,
            gold: STARTING_GOLD,
            inventory: Vec::new(),
            active_quests: Vec::new(),
            completed_quests: Vec::new(),
            equipped_weapon: None,
            equipped_armor: None,
        }
    }

    /// Returns whether health has dropped to zero or below.
    pub fn is_dead(&self) -> bool {
        self.health <= 0
    }
}

/// Creates a new in-memory character from `classes`.
///
/// Pure construction; nothing is persisted.
///
/// # Errors
/// - `CharacterError::InvalidClass` when `class_name` is not a table key.
pub fn create_character(
    classes: &ClassTable,
    name: impl Into<String>,
    class_name: &str,
) -> Result<Character, CharacterError> {
    let (class, template) = classes.lookup(class_name)?;
    Ok(Character::from_template(name, class, template))
}

/// Structural check for an untyped save record.
///
/// The record must be a JSON object holding every field in
/// [`REQUIRED_FIELDS`], with whole-number integer fields and array sequence
/// fields. Ranges are not checked, so negative gold passes.
pub fn validate_record(record: &Value) -> Result<(), SaveDataError> {
    let object = record.as_object().ok_or(SaveDataError::NotAnObject)?;

    for field in REQUIRED_FIELDS.iter().copied() {
        if !object.contains_key(field) {
            return Err(SaveDataError::MissingField(field));
        }
    }
    for field in INTEGER_FIELDS.iter().copied() {
        if !is_whole_number(object, field) {
            return Err(SaveDataError::NotAnInteger(field));
        }
    }
    for field in SEQUENCE_FIELDS.iter().copied() {
        if !object.get(field).is_some_and(Value::is_array) {
            return Err(SaveDataError::NotASequence(field));
        }
    }

    Ok(())
}

/// Validates and converts an untyped record into a typed [`Character`].
///
/// Records that are structurally valid but still cannot be typed (an unknown
/// class key, an integer beyond `i64`) fail with `SaveDataError::Schema`.
pub fn character_from_record(record: Value) -> Result<Character, SaveDataError> {
    validate_record(&record)?;
    serde_json::from_value(record).map_err(|err| SaveDataError::Schema(err.to_string()))
}

fn is_whole_number(object: &Map<String, Value>, field: &str) -> bool {
    match object.get(field) {
        Some(Value::Number(number)) => number.is_i64() || number.is_u64(),
        _ => false,
    }
}

/// Error raised when constructing a character.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CharacterError {
    /// Class key is not part of the class table.
    InvalidClass(String),
}

impl Display for CharacterError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidClass(value) => write!(f, "invalid character class: `{value}`"),
        }
    }
}

impl Error for CharacterError {}

/// Structural validation failure for save data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveDataError {
    /// Record is not a JSON object.
    NotAnObject,
    /// A required field is absent.
    MissingField(&'static str),
    /// An integer field holds a non-integer value.
    NotAnInteger(&'static str),
    /// A sequence field is not an array.
    NotASequence(&'static str),
    /// Record has the right shape but does not fit the typed model.
    Schema(String),
}

impl Display for SaveDataError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotAnObject => write!(f, "character record must be an object"),
            Self::MissingField(field) => write!(f, "missing field: {field}"),
            Self::NotAnInteger(field) => write!(f, "field {field} must be an integer"),
            Self::NotASequence(field) => write!(f, "field {field} must be a list"),
            Self::Schema(details) => write!(f, "character record does not match schema: {details}"),
        }
    }
}

impl Error for SaveDataError {}
