//! Sentence segmentation.
//!
//! A [`SentenceSegmenter`] splits decoded document text into an ordered
//! sequence of trimmed, non-empty sentences. Two strategies are provided:
//!
//! - [`LinguisticSegmenter`], driven by a [`SegmentationModel`] of
//!   abbreviations and closing punctuation
//! - [`PunctuationSegmenter`], which splits on whitespace following `.`, `!`
//!   or `?`
//!
//! The strategy is chosen once, by [`initialise`], and then shared read-only
//! for the lifetime of the process.

use std::{fmt, path::Path, sync::LazyLock};

use regex::Regex;

use crate::domain::{Config, SegmenterMode};

mod linguistic;
pub use linguistic::{LinguisticSegmenter, ModelError, SegmentationModel};

/// Splits text into sentences.
///
/// Implementations must be total: any input, including the empty string,
/// yields a (possibly empty) sequence of trimmed, non-empty sentences in
/// order of appearance.
pub trait SentenceSegmenter: fmt::Debug + Send + Sync {
    /// Split `text` into sentences.
    fn segment(&self, text: &str) -> Vec<String>;

    /// A short name for the strategy, used in logs and status output.
    fn name(&self) -> &'static str;
}

/// Splits after `.`, `!` or `?` wherever whitespace follows.
///
/// Abbreviations such as "e.g." and "Dr." end a sentence under this
/// strategy.
#[derive(Debug, Clone, Copy, Default)]
pub struct PunctuationSegmenter;

static TERMINAL_PUNCTUATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[.!?]\s+").expect("this regex is valid"));

impl SentenceSegmenter for PunctuationSegmenter {
    fn segment(&self, text: &str) -> Vec<String> {
        let mut sentences = Vec::new();
        let mut start = 0;

        for boundary in TERMINAL_PUNCTUATION.find_iter(text) {
            // The punctuation mark is a single byte and stays with the sentence
            let end = boundary.start() + 1;
            push_trimmed(&mut sentences, &text[start..end]);
            start = boundary.end();
        }
        push_trimmed(&mut sentences, &text[start..]);

        sentences
    }

    fn name(&self) -> &'static str {
        "punctuation"
    }
}

fn push_trimmed(sentences: &mut Vec<String>, fragment: &str) {
    let fragment = fragment.trim();
    if !fragment.is_empty() {
        sentences.push(fragment.to_string());
    }
}

/// Choose the segmenter for this process.
///
/// With [`SegmenterMode::Linguistic`] the configured model is loaded
/// (relative paths are resolved against `root`), or the built-in English
/// model if none is configured. If the model cannot be loaded a warning is
/// logged and the punctuation fallback is returned instead; this function
/// never fails.
#[must_use]
pub fn initialise(config: &Config, root: &Path) -> Box<dyn SentenceSegmenter> {
    if config.segmenter == SegmenterMode::Fallback {
        tracing::debug!("using punctuation segmenter");
        return Box::new(PunctuationSegmenter);
    }

    let model = config.model.as_ref().map_or_else(SegmentationModel::builtin, |path| {
        SegmentationModel::load(&root.join(path))
    });

    match model {
        Ok(model) => {
            tracing::debug!(language = model.language(), "loaded segmentation model");
            Box::new(LinguisticSegmenter::new(model))
        }
        Err(e) => {
            tracing::warn!("Segmentation model not loaded, using punctuation fallback: {e}");
            Box::new(PunctuationSegmenter)
        }
    }
}
