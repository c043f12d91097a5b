//! Keyword classification of sentences.

use nonempty::NonEmpty;

use crate::domain::{Category, Config};

/// How keywords are matched against a sentence.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Matching {
    /// A keyword matches anywhere, including inside longer words ("shoulder"
    /// matches "should").
    #[default]
    Substring,
    /// A keyword only matches when it is not adjacent to another letter or
    /// digit.
    WholeWord,
}

/// Decides whether a sentence is a requirement and, if so, its category.
///
/// Matching is case-insensitive. A sentence containing any functional keyword
/// is [`Category::Functional`]; otherwise one containing any non-functional
/// keyword is [`Category::NonFunctional`]; otherwise it is not a requirement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classifier {
    functional: NonEmpty<String>,
    non_functional: NonEmpty<String>,
    matching: Matching,
}

impl Default for Classifier {
    /// `must` and `shall` are functional, `should` is non-functional, matched
    /// as substrings.
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

impl Classifier {
    /// Build a classifier from keyword lists.
    ///
    /// Keywords are lowercased.
    #[must_use]
    pub fn new(
        functional: NonEmpty<String>,
        non_functional: NonEmpty<String>,
        matching: Matching,
    ) -> Self {
        Self {
            functional: functional.map(|keyword| keyword.to_lowercase()),
            non_functional: non_functional.map(|keyword| keyword.to_lowercase()),
            matching,
        }
    }

    /// Build a classifier from the configured keywords and matching mode.
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        let matching = if config.whole_words {
            Matching::WholeWord
        } else {
            Matching::Substring
        };
        Self::new(
            config.functional_keywords().clone(),
            config.non_functional_keywords().clone(),
            matching,
        )
    }

    /// Classify a sentence.
    ///
    /// Returns `None` if the sentence contains none of the keywords.
    #[must_use]
    pub fn classify(&self, sentence: &str) -> Option<Category> {
        let lowered = sentence.to_lowercase();

        if self.contains_any(&lowered, &self.functional) {
            Some(Category::Functional)
        } else if self.contains_any(&lowered, &self.non_functional) {
            Some(Category::NonFunctional)
        } else {
            None
        }
    }

    fn contains_any(&self, sentence: &str, keywords: &NonEmpty<String>) -> bool {
        keywords.iter().any(|keyword| match self.matching {
            Matching::Substring => sentence.contains(keyword.as_str()),
            Matching::WholeWord => contains_word(sentence, keyword),
        })
    }
}

fn contains_word(sentence: &str, keyword: &str) -> bool {
    let is_word_char = |c: char| c.is_alphanumeric();

    sentence.match_indices(keyword).any(|(start, matched)| {
        let before = sentence[..start].chars().next_back();
        let after = sentence[start + matched.len()..].chars().next();
        !before.is_some_and(is_word_char) && !after.is_some_and(is_word_char)
    })
}
