//! The ordered, user-editable set of extracted requirements.

use serde::{Deserialize, Serialize};

use crate::Requirement;

/// An ordered collection of requirements belonging to one session.
///
/// Order is the order of extraction, or the order of the last edit
/// submission. Every mutation replaces the whole contents; there is no
/// per-record update.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Collection {
    records: Vec<Requirement>,
}

impl Collection {
    /// Create an empty collection.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            records: Vec::new(),
        }
    }

    /// Discard the current contents and store `records` in the given order.
    pub fn replace_all(&mut self, records: Vec<Requirement>) {
        tracing::debug!(
            previous = self.records.len(),
            next = records.len(),
            "replacing collection"
        );
        self.records = records;
    }

    /// Discard all contents.
    pub fn clear(&mut self) {
        self.records.clear();
    }

    /// The current contents, in order.
    #[must_use]
    pub fn read(&self) -> &[Requirement] {
        &self.records
    }

    /// The number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the collection holds no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Iterate over the records in order.
    pub fn iter(&self) -> std::slice::Iter<'_, Requirement> {
        self.records.iter()
    }
}

impl From<Vec<Requirement>> for Collection {
    fn from(records: Vec<Requirement>) -> Self {
        Self { records }
    }
}

impl<'a> IntoIterator for &'a Collection {
    type Item = &'a Requirement;
    type IntoIter = std::slice::Iter<'a, Requirement>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

impl IntoIterator for Collection {
    type Item = Requirement;
    type IntoIter = std::vec::IntoIter<Requirement>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.into_iter()
    }
}
