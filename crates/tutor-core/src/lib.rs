//! Tutor Core - Shared types for the adaptive tutor
//!
//! This crate provides the error type, the proficiency/difficulty vocabulary
//! and the scenario definitions used across all tutor components.

// Clippy pedantic allows - these are intentional design choices
#![allow(clippy::doc_markdown)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::return_self_not_must_use)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod scenario;
pub mod types;

pub use error::{Result, TutorError};
pub use scenario::Scenario;
pub use types::{Difficulty, ProficiencyLevel};
