use std::{fmt, num::NonZeroUsize, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::domain::{Category, CategoryLabel, RequirementId};

/// A requirement extracted from a document.
///
/// Records produced by extraction always have a non-empty `text`, a known
/// category and a well-formed `source`. Records rebuilt from an edit
/// submission carry whatever was submitted, so none of these are guaranteed
/// for them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Requirement {
    /// The identifier, unique within a collection.
    pub id: String,
    /// The sentence, trimmed, in its original casing.
    pub text: String,
    /// The category.
    pub category: CategoryLabel,
    /// Where the sentence came from, rendered as a [`Source`].
    pub source: String,
}

impl Requirement {
    /// Stamp a candidate with its identifier.
    #[must_use]
    pub fn from_candidate(id: &RequirementId, digits: usize, candidate: Candidate) -> Self {
        Self {
            id: id.display(digits).to_string(),
            text: candidate.text,
            category: candidate.category.into(),
            source: candidate.source.to_string(),
        }
    }
}

/// A sentence that passed the keyword filter, prior to identifier assignment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    /// The sentence, trimmed, in its original casing.
    pub text: String,
    /// The category the classifier assigned.
    pub category: Category,
    /// The document and sentence position the candidate came from.
    pub source: Source,
}

/// Provenance of an extracted requirement.
///
/// Renders as `"{document} | sentence {position}"`. The position is 1-based
/// and counts every sentence of the document, not only the candidates.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Source {
    document: String,
    sentence: NonZeroUsize,
}

const SENTENCE_SEPARATOR: &str = " | sentence ";

impl Source {
    /// Create a source from a document label and a 1-based sentence position.
    #[must_use]
    pub const fn new(document: String, sentence: NonZeroUsize) -> Self {
        Self { document, sentence }
    }

    /// The label of the originating document.
    #[must_use]
    pub fn document(&self) -> &str {
        &self.document
    }

    /// The 1-based position of the sentence within the document.
    #[must_use]
    pub const fn sentence(&self) -> NonZeroUsize {
        self.sentence
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{SENTENCE_SEPARATOR}{}", self.document, self.sentence)
    }
}

/// Error returned when a string is not a well-formed source.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("Invalid source '{0}': expected '<document> | sentence <position>'")]
pub struct InvalidSourceError(String);

impl FromStr for Source {
    type Err = InvalidSourceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // Document labels may themselves contain the separator, so split on
        // the last occurrence.
        let (document, position) = s
            .rsplit_once(SENTENCE_SEPARATOR)
            .ok_or_else(|| InvalidSourceError(s.to_string()))?;
        let sentence = position
            .parse::<NonZeroUsize>()
            .map_err(|_| InvalidSourceError(s.to_string()))?;

        Ok(Self::new(document.to_string(), sentence))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn position(n: usize) -> NonZeroUsize {
        NonZeroUsize::new(n).unwrap()
    }

    #[test]
    fn source_display() {
        let source = Source::new("spec.txt".to_string(), position(14));
        assert_eq!(source.to_string(), "spec.txt | sentence 14");
    }

    #[test]
    fn source_parses_its_display() {
        let source = Source::new("notes | draft.txt".to_string(), position(3));
        let parsed: Source = source.to_string().parse().unwrap();
        assert_eq!(parsed, source);
        assert_eq!(parsed.document(), "notes | draft.txt");
    }

    #[test]
    fn malformed_sources_are_rejected() {
        assert!("spec.txt".parse::<Source>().is_err());
        assert!("spec.txt | sentence 0".parse::<Source>().is_err());
        assert!("spec.txt | sentence two".parse::<Source>().is_err());
    }

    #[test]
    fn from_candidate_renders_fields() {
        let candidate = Candidate {
            text: "The system must log errors.".to_string(),
            category: Category::Functional,
            source: Source::new("spec.txt".to_string(), position(1)),
        };
        let id = RequirementId::try_from("FR1").unwrap();

        let requirement = Requirement::from_candidate(&id, 1, candidate);

        assert_eq!(requirement.id, "FR1");
        assert_eq!(requirement.text, "The system must log errors.");
        assert_eq!(requirement.category, CategoryLabel::Known(Category::Functional));
        assert_eq!(requirement.source, "spec.txt | sentence 1");
        assert_eq!(
            requirement.source.parse::<Source>().unwrap().sentence(),
            position(1)
        );
    }
}
