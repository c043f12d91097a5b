//! The extraction pipeline.
//!
//! Text flows through the [`SentenceSegmenter`], each sentence is filtered
//! and categorised by the [`Classifier`], and the surviving candidates are
//! stamped with identifiers by the [`IdScheme`].

mod assign;
mod classifier;
mod extract;
/// Sentence segmentation strategies.
pub mod segmenter;

use std::path::Path;

pub use assign::IdScheme;
pub use classifier::{Classifier, Matching};
pub use extract::Extractor;
pub use segmenter::{
    LinguisticSegmenter, ModelError, PunctuationSegmenter, SegmentationModel, SentenceSegmenter,
};

use crate::{Collection, Requirement, domain::Config};

/// A configured pipeline, from document text to identified requirements.
///
/// The segmenter is chosen once when the pipeline is built and reused for
/// every document.
#[derive(Debug)]
pub struct Pipeline {
    segmenter: Box<dyn SentenceSegmenter>,
    classifier: Classifier,
    scheme: IdScheme,
}

impl Pipeline {
    /// Assemble a pipeline from its parts.
    #[must_use]
    pub const fn new(
        segmenter: Box<dyn SentenceSegmenter>,
        classifier: Classifier,
        scheme: IdScheme,
    ) -> Self {
        Self {
            segmenter,
            classifier,
            scheme,
        }
    }

    /// Build the pipeline described by the configuration.
    ///
    /// A segmentation model that cannot be loaded is logged and replaced by
    /// the punctuation fallback; see [`segmenter::initialise`].
    #[must_use]
    pub fn from_config(config: &Config, root: &Path) -> Self {
        Self::new(
            segmenter::initialise(config, root),
            Classifier::from_config(config),
            IdScheme::from_config(config),
        )
    }

    /// The segmenter in use.
    #[must_use]
    pub fn segmenter(&self) -> &dyn SentenceSegmenter {
        self.segmenter.as_ref()
    }

    /// Extract and identify the requirements in a document.
    #[must_use]
    pub fn run(&self, document: &str, label: &str) -> Vec<Requirement> {
        let candidates =
            Extractor::new(self.segmenter(), &self.classifier).extract(document, label);
        self.scheme.assign_ids(candidates)
    }

    /// Extract the requirements in a document and replace the contents of
    /// `collection` with them.
    ///
    /// Returns the number of requirements extracted.
    pub fn extract_into(&self, collection: &mut Collection, document: &str, label: &str) -> usize {
        let requirements = self.run(document, label);
        let count = requirements.len();
        collection.replace_all(requirements);
        tracing::info!(document = label, requirements = count, "extracted requirements");
        count
    }
}

impl Default for Pipeline {
    /// The punctuation segmenter with the default keywords and `FR` numbering.
    fn default() -> Self {
        Self::new(
            Box::new(PunctuationSegmenter),
            Classifier::default(),
            IdScheme::default(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Category, CategoryLabel};

    const DOCUMENT: &str = "The system must log errors. Response time should be fast. This is fine.";

    #[test]
    fn three_sentence_scenario() {
        let requirements = Pipeline::default().run(DOCUMENT, "spec.txt");

        assert_eq!(
            requirements,
            vec![
                Requirement {
                    id: "FR1".to_string(),
                    text: "The system must log errors.".to_string(),
                    category: CategoryLabel::Known(Category::Functional),
                    source: "spec.txt | sentence 1".to_string(),
                },
                Requirement {
                    id: "FR2".to_string(),
                    text: "Response time should be fast.".to_string(),
                    category: CategoryLabel::Known(Category::NonFunctional),
                    source: "spec.txt | sentence 2".to_string(),
                },
            ]
        );
    }

    #[test]
    fn re_extraction_is_idempotent() {
        let pipeline = Pipeline::from_config(&Config::default(), Path::new("."));
        assert_eq!(
            pipeline.run(DOCUMENT, "spec.txt"),
            pipeline.run(DOCUMENT, "spec.txt")
        );
    }

    #[test]
    fn extract_into_replaces_collection() {
        let pipeline = Pipeline::default();
        let mut collection = Collection::new();
        pipeline.extract_into(&mut collection, "Old must go. Old should go.", "old.txt");

        let count = pipeline.extract_into(&mut collection, DOCUMENT, "spec.txt");

        assert_eq!(count, 2);
        assert!(collection.iter().all(|r| r.source.starts_with("spec.txt")));
        assert_eq!(collection.read()[0].id, "FR1");
    }

    #[test]
    fn empty_document_empties_collection() {
        let pipeline = Pipeline::default();
        let mut collection = Collection::new();
        pipeline.extract_into(&mut collection, DOCUMENT, "spec.txt");

        let count = pipeline.extract_into(&mut collection, "", "empty.txt");

        assert_eq!(count, 0);
        assert!(collection.is_empty());
    }
}
