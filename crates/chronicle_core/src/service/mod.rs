//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate creation and repository calls into use-case level APIs.
//! - Hold the storage-independent progression rules.

pub mod character_service;
pub mod progression;
