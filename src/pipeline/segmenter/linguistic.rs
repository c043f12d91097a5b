use std::{collections::HashSet, io, path::Path};

use serde::Deserialize;

use super::{SentenceSegmenter, push_trimmed};

const BUILTIN_MODEL: &str = include_str!("../../../models/en.toml");

const TERMINATORS: [char; 4] = ['.', '!', '?', '…'];

const OPENING: [char; 7] = ['(', '[', '{', '"', '\'', '“', '‘'];

/// Knowledge used by the [`LinguisticSegmenter`] to decide whether a period
/// ends a sentence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SegmentationModel {
    language: String,
    non_terminal: HashSet<String>,
    abbreviations: HashSet<String>,
    closing: HashSet<char>,
}

/// Errors that can occur while loading a [`SegmentationModel`].
#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    /// The model file could not be read.
    #[error("failed to read segmentation model: {0}")]
    Io(#[from] io::Error),

    /// The model file is not a valid model.
    #[error("failed to parse segmentation model: {0}")]
    Parse(#[from] toml::de::Error),
}

#[derive(Debug, Deserialize)]
#[serde(tag = "_version")]
enum Versions {
    #[serde(rename = "1")]
    V1 {
        language: String,
        #[serde(default)]
        non_terminal: Vec<String>,
        #[serde(default)]
        abbreviations: Vec<String>,
        #[serde(default)]
        closing: Vec<char>,
    },
}

impl From<Versions> for SegmentationModel {
    fn from(versions: Versions) -> Self {
        match versions {
            Versions::V1 {
                language,
                non_terminal,
                abbreviations,
                closing,
            } => Self {
                language,
                non_terminal: non_terminal.iter().map(|w| w.to_lowercase()).collect(),
                abbreviations: abbreviations.iter().map(|w| w.to_lowercase()).collect(),
                closing: closing.into_iter().collect(),
            },
        }
    }
}

impl SegmentationModel {
    /// Load a model from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not a valid model.
    pub fn load(path: &Path) -> Result<Self, ModelError> {
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// The English model compiled into the binary.
    ///
    /// # Errors
    ///
    /// Returns an error if the embedded model is not valid.
    pub fn builtin() -> Result<Self, ModelError> {
        Self::parse(BUILTIN_MODEL)
    }

    fn parse(content: &str) -> Result<Self, ModelError> {
        Ok(toml::from_str::<Versions>(content)?.into())
    }

    /// The language the model describes.
    #[must_use]
    pub fn language(&self) -> &str {
        &self.language
    }

    fn is_closing(&self, c: char) -> bool {
        self.closing.contains(&c)
    }
}

/// Model-driven sentence segmentation.
///
/// A sentence ends at a run of terminal punctuation (`.`, `!`, `?`, `…`,
/// optionally followed by closing quotes or brackets) that is followed by
/// whitespace or the end of the text, and at paragraph breaks (a blank line).
///
/// A run made only of periods does not end the sentence when:
/// - the word before it is a non-terminal abbreviation ("Dr.", "e.g.")
/// - the word before it is an initial: a single capital letter that does
///   not follow a lowercase word ("J. Smith", but not "plan B.")
/// - the next word is entirely lowercase ("etc. and", but not `iOS`)
/// - the next word starts with a digit and the word before it is an
///   abbreviation ("no. 5")
///
/// Periods not followed by whitespace (decimals, version numbers, domain
/// names) never end a sentence.
#[derive(Debug, Clone)]
pub struct LinguisticSegmenter {
    model: SegmentationModel,
}

impl LinguisticSegmenter {
    /// Create a segmenter using the given model.
    #[must_use]
    pub const fn new(model: SegmentationModel) -> Self {
        Self { model }
    }

    /// Byte offsets at which sentences end, in increasing order.
    fn boundaries(&self, text: &str) -> Vec<usize> {
        let chars: Vec<(usize, char)> = text.char_indices().collect();
        let offset = |i: usize| chars.get(i).map_or(text.len(), |&(o, _)| o);

        let mut ends = Vec::new();
        let mut i = 0;

        while let Some(&(_, c)) = chars.get(i) {
            if c.is_whitespace() {
                let start = i;
                let mut newlines = 0;
                while let Some(&(_, c)) = chars.get(i).filter(|(_, c)| c.is_whitespace()) {
                    if c == '\n' {
                        newlines += 1;
                    }
                    i += 1;
                }
                if newlines >= 2 {
                    ends.push(offset(start));
                }
                continue;
            }

            if TERMINATORS.contains(&c) {
                let start = i;
                while chars
                    .get(i)
                    .is_some_and(|&(_, c)| TERMINATORS.contains(&c) || self.model.is_closing(c))
                {
                    i += 1;
                }

                let ends_sentence = match chars.get(i) {
                    None => true,
                    Some((_, next)) if next.is_whitespace() => {
                        self.run_ends_sentence(&chars, start, i)
                    }
                    Some(_) => false,
                };

                if ends_sentence {
                    ends.push(offset(i));
                }
                continue;
            }

            i += 1;
        }

        ends
    }

    /// Decide whether the terminator run `chars[start..end]`, which is
    /// followed by whitespace, ends a sentence.
    fn run_ends_sentence(&self, chars: &[(usize, char)], start: usize, end: usize) -> bool {
        let periods_only = chars
            .get(start..end)
            .unwrap_or_default()
            .iter()
            .all(|&(_, c)| c == '.' || self.model.is_closing(c));
        if !periods_only {
            return true;
        }

        let previous = previous_word(chars, start);
        if self.model.non_terminal.contains(&previous) {
            return false;
        }

        if is_initial(chars, start) {
            return false;
        }

        let following = next_word(chars, end);
        match following.chars().next() {
            Some(c) if c.is_lowercase() && !following.chars().any(char::is_uppercase) => false,
            Some(c) if c.is_ascii_digit() => !self.model.abbreviations.contains(&previous),
            _ => true,
        }
    }
}

/// The index of the first character of the word that ends at `index`.
fn word_start(chars: &[(usize, char)], index: usize) -> usize {
    let mut start = index;
    while start > 0 && chars.get(start - 1).is_some_and(|&(_, c)| !c.is_whitespace()) {
        start -= 1;
    }
    start
}

/// The word immediately before `index`, without leading opening punctuation.
fn word_before(chars: &[(usize, char)], index: usize) -> String {
    chars
        .get(word_start(chars, index)..index)
        .unwrap_or_default()
        .iter()
        .map(|&(_, c)| c)
        .skip_while(|c| OPENING.contains(c))
        .collect()
}

/// The lowercased word immediately before `index`, without leading opening
/// punctuation.
fn previous_word(chars: &[(usize, char)], index: usize) -> String {
    word_before(chars, index).to_lowercase()
}

/// The first word at or after `index`.
fn next_word(chars: &[(usize, char)], index: usize) -> String {
    chars
        .get(index..)
        .unwrap_or_default()
        .iter()
        .map(|&(_, c)| c)
        .skip_while(|c| c.is_whitespace())
        .take_while(|c| !c.is_whitespace())
        .collect()
}

/// Whether the word ending at `index` is an initial: a single capital letter
/// that starts the text or follows a word that doesn't start lowercase
/// ("J. Smith", "J. R. Tolkien", but not "plan B.").
fn is_initial(chars: &[(usize, char)], index: usize) -> bool {
    let word = word_before(chars, index);
    let mut letters = word.chars();
    let single_capital = matches!(
        (letters.next(), letters.next()),
        (Some(c), None) if c.is_uppercase()
    );
    if !single_capital {
        return false;
    }

    let mut before = word_start(chars, index);
    while before > 0 && chars.get(before - 1).is_some_and(|&(_, c)| c.is_whitespace()) {
        before -= 1;
    }

    word_before(chars, before)
        .chars()
        .next()
        .is_none_or(|c| !c.is_lowercase())
}

impl SentenceSegmenter for LinguisticSegmenter {
    fn segment(&self, text: &str) -> Vec<String> {
        let mut sentences = Vec::new();
        let mut start = 0;

        for end in self.boundaries(text) {
            push_trimmed(&mut sentences, &text[start..end]);
            start = end;
        }
        push_trimmed(&mut sentences, &text[start..]);

        sentences
    }

    fn name(&self) -> &'static str {
        "linguistic"
    }
}
