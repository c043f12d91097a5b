use std::{fmt, str::FromStr};

use chrono::{DateTime, Utc};
use non_empty_string::NonEmptyString;
use serde::{Deserialize, Serialize};

use crate::{Collection, Requirement, interface::EditSubmission, pipeline::Pipeline};

/// The key a session is stored under.
///
/// Keys are non-empty and contain only ASCII letters, digits, `-` and `_`,
/// so they can be used directly as file names.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SessionKey(NonEmptyString);

impl SessionKey {
    /// Creates a new `SessionKey` from a string.
    ///
    /// # Errors
    ///
    /// Returns `InvalidSessionKey` if the string is empty or contains
    /// characters other than ASCII letters, digits, `-` and `_`.
    pub fn new(s: String) -> Result<Self, InvalidSessionKey> {
        if !s
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        {
            return Err(InvalidSessionKey(s));
        }

        NonEmptyString::new(s).map(Self).map_err(InvalidSessionKey)
    }

    /// Returns the string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl Default for SessionKey {
    fn default() -> Self {
        Self(NonEmptyString::new("default".to_string()).expect("'default' is non-empty"))
    }
}

impl FromStr for SessionKey {
    type Err = InvalidSessionKey;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s.to_string())
    }
}

impl fmt::Display for SessionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string is not a valid session key.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error(
    "Invalid session key '{0}': must be non-empty and contain only ASCII letters, digits, '-' and '_'"
)]
pub struct InvalidSessionKey(String);

/// The state of one user session: its requirement collection, and what
/// produced it.
///
/// A session that has never been stored behaves exactly like
/// [`Session::default`], an empty collection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Versions", into = "Versions")]
pub struct Session {
    collection: Collection,
    document: Option<String>,
    updated: Option<DateTime<Utc>>,
}

impl Session {
    /// The session's requirements.
    #[must_use]
    pub const fn collection(&self) -> &Collection {
        &self.collection
    }

    /// The label of the document the requirements were last extracted from.
    #[must_use]
    pub fn document(&self) -> Option<&str> {
        self.document.as_deref()
    }

    /// When the collection was last replaced.
    #[must_use]
    pub const fn updated(&self) -> Option<DateTime<Utc>> {
        self.updated
    }

    /// Replace the collection with the requirements extracted from a
    /// document.
    ///
    /// Returns the number of requirements extracted.
    pub fn extract(&mut self, pipeline: &Pipeline, document: &str, label: &str) -> usize {
        let count = pipeline.extract_into(&mut self.collection, document, label);
        self.document = Some(label.to_string());
        self.touch();
        count
    }

    /// Replace the collection with an edited set of requirements.
    ///
    /// The document label is kept; edits do not change where the
    /// requirements came from.
    pub fn replace_all(&mut self, records: Vec<Requirement>) {
        self.collection.replace_all(records);
        self.touch();
    }

    /// Replace the collection with the records of an edit submission.
    pub fn apply(&mut self, submission: EditSubmission) {
        self.replace_all(submission.into_records());
    }

    /// Empty the collection and forget its document.
    pub fn clear(&mut self) {
        self.collection.clear();
        self.document = None;
        self.touch();
    }

    fn touch(&mut self) {
        self.updated = Some(Utc::now());
    }
}

/// The serialized versions of a session.
#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "_version")]
enum Versions {
    #[serde(rename = "1")]
    V1 {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        document: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        updated: Option<DateTime<Utc>>,
        #[serde(default)]
        requirements: Collection,
    },
}

impl From<Versions> for Session {
    fn from(versions: Versions) -> Self {
        match versions {
            Versions::V1 {
                document,
                updated,
                requirements,
            } => Self {
                collection: requirements,
                document,
                updated,
            },
        }
    }
}

impl From<Session> for Versions {
    fn from(session: Session) -> Self {
        Self::V1 {
            document: session.document,
            updated: session.updated,
            requirements: session.collection,
        }
    }
}
