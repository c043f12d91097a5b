//! Domain models for requirement extraction.
//!
//! This module contains the core domain types including requirement records,
//! their categories and identifiers, the editable collection and
//! configuration.

/// Requirement records and their provenance.
pub mod requirement;
pub use requirement::{Candidate, Requirement, Source};

mod category;
pub use category::{Category, CategoryLabel, UnrecognisedCategory};

mod collection;
pub use collection::Collection;

mod config;
pub use config::{Config, SegmenterMode};

/// Requirement identifier types and parsing.
pub mod id;
pub use id::{Error as IdError, RequirementId};
