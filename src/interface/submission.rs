//! Rebuilding a requirement collection from an edit form.
//!
//! An edit form carries a `row-count` field and, for each row `i` in
//! `0..row-count`, the fields `id-{i}`, `text-{i}`, `category-{i}` and
//! `source-{i}`. The submission is the complete new contents of the
//! collection.
//!
//! Rows are trusted: a missing field becomes an empty string, and no field is
//! validated. Category strings that are not a known label are kept as
//! opaque labels.

use std::collections::HashMap;

use crate::{Requirement, domain::CategoryLabel};

/// The form field holding the number of rows.
pub const ROW_COUNT_FIELD: &str = "row-count";

/// A complete replacement set of requirements, as parallel field arrays.
///
/// Row `i` is built from `ids[i]`, `texts[i]`, `categories[i]` and
/// `sources[i]`; an array shorter than `row_count` contributes empty strings
/// for the missing rows, and entries beyond `row_count` are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditSubmission {
    /// The number of rows submitted.
    pub row_count: usize,
    /// Identifier of each row.
    pub ids: Vec<Option<String>>,
    /// Requirement text of each row.
    pub texts: Vec<Option<String>>,
    /// Category label of each row.
    pub categories: Vec<Option<String>>,
    /// Source of each row.
    pub sources: Vec<Option<String>>,
}

/// Errors that can occur while reading an edit form.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum SubmissionError {
    /// The row count is not an integer.
    #[error("Invalid row count '{0}': expected an integer")]
    RowCount(String),
}

impl EditSubmission {
    /// Read a submission from flat form fields.
    ///
    /// A missing or negative `row-count` means zero rows.
    ///
    /// # Errors
    ///
    /// Returns an error if `row-count` is present but is not an integer.
    pub fn from_form(fields: &HashMap<String, String>) -> Result<Self, SubmissionError> {
        let row_count = fields
            .get(ROW_COUNT_FIELD)
            .map_or(Ok(0), |value| parse_row_count(value))?;

        let column = |name: &str| -> Vec<Option<String>> {
            (0..row_count)
                .map(|i| fields.get(&format!("{name}-{i}")).cloned())
                .collect()
        };

        Ok(Self {
            row_count,
            ids: column("id"),
            texts: column("text"),
            categories: column("category"),
            sources: column("source"),
        })
    }

    /// Build the submission that reproduces `records`.
    #[must_use]
    pub fn from_records(records: &[Requirement]) -> Self {
        Self {
            row_count: records.len(),
            ids: records.iter().map(|r| Some(r.id.clone())).collect(),
            texts: records.iter().map(|r| Some(r.text.clone())).collect(),
            categories: records
                .iter()
                .map(|r| Some(r.category.to_string()))
                .collect(),
            sources: records.iter().map(|r| Some(r.source.clone())).collect(),
        }
    }

    /// The flat form fields of this submission.
    ///
    /// Absent entries produce no field.
    #[must_use]
    pub fn to_form(&self) -> HashMap<String, String> {
        let mut fields = HashMap::new();
        fields.insert(ROW_COUNT_FIELD.to_string(), self.row_count.to_string());

        let columns = [
            ("id", &self.ids),
            ("text", &self.texts),
            ("category", &self.categories),
            ("source", &self.sources),
        ];
        for (name, values) in columns {
            for (i, value) in values.iter().take(self.row_count).enumerate() {
                if let Some(value) = value {
                    fields.insert(format!("{name}-{i}"), value.clone());
                }
            }
        }

        fields
    }

    /// The records of this submission, in row order.
    #[must_use]
    pub fn into_records(self) -> Vec<Requirement> {
        let mut ids = self.ids.into_iter();
        let mut texts = self.texts.into_iter();
        let mut categories = self.categories.into_iter();
        let mut sources = self.sources.into_iter();

        let next = |values: &mut std::vec::IntoIter<Option<String>>| {
            values.next().flatten().unwrap_or_default()
        };

        let records: Vec<Requirement> = (0..self.row_count)
            .map(|_| Requirement {
                id: next(&mut ids),
                text: next(&mut texts),
                category: CategoryLabel::from(next(&mut categories)),
                source: next(&mut sources),
            })
            .collect();

        let incomplete = records
            .iter()
            .filter(|r| r.id.is_empty() || r.text.is_empty() || r.source.is_empty())
            .count();
        if incomplete > 0 {
            tracing::debug!(incomplete, "accepted rows with empty fields");
        }

        records
    }
}

/// Parse a row count, treating negative counts as zero.
fn parse_row_count(value: &str) -> Result<usize, SubmissionError> {
    let count: i64 = value
        .trim()
        .parse()
        .map_err(|_| SubmissionError::RowCount(value.to_string()))?;
    usize::try_from(count.max(0)).map_err(|_| SubmissionError::RowCount(value.to_string()))
}
