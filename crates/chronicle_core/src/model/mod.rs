//! Character domain model.
//!
//! # Responsibility
//! - Define canonical data structures used by core business logic.
//! - Keep class templates as immutable configuration values.
//!
//! # Invariants
//! - Every record carries the full save-file field set.
//! - Alive/dead is derived from `health`, never stored separately.

pub mod character;
