//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define save-file data access contracts.
//! - Isolate filesystem and JSON details from service logic.
//!
//! # Invariants
//! - Loaded records pass structural validation before they are returned.
//! - Repository APIs return semantic errors (`NotFound`, `Corrupted`) in
//!   addition to IO errors.

pub mod character_repo;
