//! Requirement extraction from plain-text documents
//!
//! Documents are split into sentences, and sentences containing requirement
//! keywords are classified as functional or non-functional and numbered. The
//! resulting collection can be reviewed, edited and exported as CSV.

pub mod domain;
pub use domain::{
    Category, CategoryLabel, Collection, Config, Requirement, RequirementId, SegmenterMode,
};

pub mod pipeline;
pub use pipeline::Pipeline;

/// Per-session persistence of requirement collections.
pub mod storage;
pub use storage::{Directory, MemoryStore, Session, SessionKey, SessionStore};

pub mod interface;
pub use interface::{EditSubmission, Upload};
