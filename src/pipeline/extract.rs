//! Segmentation and classification of a document into candidates.

use std::num::NonZeroUsize;

use rayon::iter::{IndexedParallelIterator, IntoParallelRefIterator, ParallelIterator};

use crate::{
    domain::{Candidate, Source},
    pipeline::{Classifier, SentenceSegmenter},
};

/// Turns a document into an ordered list of requirement candidates.
#[derive(Debug, Clone, Copy)]
pub struct Extractor<'a> {
    segmenter: &'a dyn SentenceSegmenter,
    classifier: &'a Classifier,
}

impl<'a> Extractor<'a> {
    /// Create an extractor from a segmenter and a classifier.
    #[must_use]
    pub const fn new(segmenter: &'a dyn SentenceSegmenter, classifier: &'a Classifier) -> Self {
        Self {
            segmenter,
            classifier,
        }
    }

    /// Extract the requirement candidates from a document.
    ///
    /// Each sentence keeps its 1-based position in the full sentence
    /// sequence, so positions in the output may have gaps where sentences
    /// were filtered out. Candidates are returned in document order; an
    /// empty document yields no candidates.
    #[must_use]
    pub fn extract(&self, document: &str, label: &str) -> Vec<Candidate> {
        let sentences = self.segmenter.segment(document);
        tracing::debug!(
            sentences = sentences.len(),
            segmenter = self.segmenter.name(),
            "segmented document"
        );

        let candidates: Vec<_> = sentences
            .par_iter()
            .enumerate()
            .filter_map(|(index, sentence)| {
                let category = self.classifier.classify(sentence)?;
                Some(Candidate {
                    text: sentence.trim().to_string(),
                    category,
                    source: Source::new(
                        label.to_string(),
                        NonZeroUsize::MIN.saturating_add(index),
                    ),
                })
            })
            .collect();

        tracing::debug!(candidates = candidates.len(), "classified sentences");
        candidates
    }
}
