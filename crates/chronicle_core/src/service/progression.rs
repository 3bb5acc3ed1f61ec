//! Character progression operations.
//!
//! # Responsibility
//! - Apply experience, gold, healing and revival to an in-memory record.
//! - Keep storage out of the mutation path; callers persist afterwards.
//!
//! # Invariants
//! - After a successful XP gain, `experience < level_threshold(level)`.
//! - `gold` never becomes negative; a rejected change leaves it untouched.
//! - Healing never raises `health` above `max_health`.
//! - Dead characters (`health <= 0`) cannot gain experience.

use crate::model::character::Character;
use log::{debug, info};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Experience needed per level step.
pub const XP_PER_LEVEL: i64 = 100;
/// Max health gained on each level up.
pub const MAX_HEALTH_PER_LEVEL: i64 = 10;
/// Strength gained on each level up.
pub const STRENGTH_PER_LEVEL: i64 = 2;
/// Magic gained on each level up.
pub const MAGIC_PER_LEVEL: i64 = 2;

/// Error raised by progression operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProgressionError {
    /// Experience gain attempted while `health <= 0`.
    CharacterDead,
    /// Gold change would leave a negative balance.
    InsufficientGold { gold: i64, amount: i64 },
    /// Gold change does not fit the balance type.
    GoldOverflow { gold: i64, amount: i64 },
}

impl Display for ProgressionError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::CharacterDead => write!(f, "cannot gain experience while dead"),
            Self::InsufficientGold { gold, amount } => {
                write!(f, "not enough gold: balance {gold}, change {amount}")
            }
            Self::GoldOverflow { gold, amount } => {
                write!(f, "gold out of range: balance {gold}, change {amount}")
            }
        }
    }
}

impl Error for ProgressionError {}

/// Experience required to advance past `level`.
pub fn level_threshold(level: i64) -> i64 {
    level.saturating_mul(XP_PER_LEVEL)
}

/// Adds experience and applies every level up it pays for.
///
/// Returns how many levels were gained. Amounts `<= 0` are a no-op.
///
/// # Errors
/// - `ProgressionError::CharacterDead` when `health <= 0`.
pub fn gain_experience(character: &mut Character, amount: i64) -> Result<u32, ProgressionError> {
    if is_dead(character) {
        return Err(ProgressionError::CharacterDead);
    }
    if amount <= 0 {
        return Ok(0);
    }

    character.experience = character.experience.saturating_add(amount);

    let mut levels_gained = 0u32;
    while character.experience >= level_threshold(character.level) {
        character.experience = character
            .experience
            .saturating_sub(level_threshold(character.level));
        character.level = character.level.saturating_add(1);
        character.max_health = character.max_health.saturating_add(MAX_HEALTH_PER_LEVEL);
        character.strength = character.strength.saturating_add(STRENGTH_PER_LEVEL);
        character.magic = character.magic.saturating_add(MAGIC_PER_LEVEL);
        character.health = character.max_health;
        levels_gained = levels_gained.saturating_add(1);
    }

    if levels_gained > 0 {
        info!(
            "event=level_up module=progression status=ok levels_gained={} level={}",
            levels_gained, character.level
        );
    }
    Ok(levels_gained)
}

/// Adds `amount` gold (negative amounts spend) and returns the new balance.
///
/// # Errors
/// - `ProgressionError::InsufficientGold` when the result would be negative.
/// - `ProgressionError::GoldOverflow` when the result does not fit in `i64`.
pub fn add_gold(character: &mut Character, amount: i64) -> Result<i64, ProgressionError> {
    let gold = character.gold;
    let updated = gold
        .checked_add(amount)
        .ok_or(ProgressionError::GoldOverflow { gold, amount })?;
    if updated < 0 {
        return Err(ProgressionError::InsufficientGold { gold, amount });
    }
    character.gold = updated;
    Ok(updated)
}

/// Restores up to `amount` health, capped at `max_health`.
///
/// Returns the delta actually applied; `0` when `amount <= 0`.
pub fn heal(character: &mut Character, amount: i64) -> i64 {
    if amount <= 0 {
        return 0;
    }
    let before = character.health;
    character.health = before.saturating_add(amount).min(character.max_health);
    let healed = character.health.saturating_sub(before);
    debug!("event=heal module=progression status=ok requested={amount} healed={healed}");
    healed
}

/// True when `health <= 0`.
pub fn is_dead(character: &Character) -> bool {
    character.is_dead()
}

/// Brings a dead character back at half max health (at least 1).
///
/// Returns `false` and changes nothing when the character is alive.
pub fn revive(character: &mut Character) -> bool {
    if !is_dead(character) {
        return false;
    }
    character.health = character.max_health.div_euclid(2).max(1);
    info!(
        "event=revive module=progression status=ok health={}",
        character.health
    );
    true
}
