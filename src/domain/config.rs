use std::path::{Path, PathBuf};

use nonempty::NonEmpty;
use serde::{Deserialize, Serialize};

use crate::domain::id::Prefix;

/// Configuration for requirement extraction.
///
/// This struct holds settings that control how sentences are segmented and
/// classified, and how extracted requirements are identified.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Versions", into = "Versions")]
pub struct Config {
    /// The prefix of every assigned identifier.
    ///
    /// Functional and non-functional requirements share one numbering
    /// sequence under this prefix.
    id_prefix: Prefix,

    /// The minimum number of digits in an identifier.
    ///
    /// Numbers are padded to this width with leading zeros. The default of 1
    /// gives `FR1`, `FR2`, ...
    digits: usize,

    /// Keywords that make a sentence a functional requirement.
    functional_keywords: NonEmpty<String>,

    /// Keywords that make a sentence a non-functional requirement, unless a
    /// functional keyword is also present.
    non_functional_keywords: NonEmpty<String>,

    /// Whether keywords only match whole words.
    ///
    /// When `false` (default) keywords match anywhere, so "shoulder" matches
    /// "should".
    pub whole_words: bool,

    /// Which sentence segmenter to use.
    pub segmenter: SegmenterMode,

    /// Path to a segmentation model.
    ///
    /// When absent, the built-in English model is used.
    pub model: Option<PathBuf>,
}

/// The sentence segmentation strategy requested by the configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SegmenterMode {
    /// Model-driven segmentation, degrading to the fallback if the model
    /// cannot be loaded.
    #[default]
    Linguistic,
    /// Split after terminal punctuation followed by whitespace.
    Fallback,
}

impl SegmenterMode {
    /// The name used for this mode in configuration files.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Linguistic => "linguistic",
            Self::Fallback => "fallback",
        }
    }
}

impl std::fmt::Display for SegmenterMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            id_prefix: Prefix::default(),
            digits: default_digits(),
            functional_keywords: default_functional_keywords(),
            non_functional_keywords: default_non_functional_keywords(),
            whole_words: false,
            segmenter: SegmenterMode::default(),
            model: None,
        }
    }
}

impl Config {
    /// Loads the configuration from a TOML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or if the TOML content is
    /// invalid.
    pub fn load(path: &Path) -> Result<Self, String> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config file: {e}"))?;
        toml::from_str(&content).map_err(|e| format!("Failed to parse config file: {e}"))
    }

    /// Loads the configuration, or the default if it cannot be loaded.
    #[must_use]
    pub fn load_or_default(path: &Path) -> Self {
        Self::load(path).unwrap_or_else(|e| {
            tracing::debug!("Failed to load config: {e}");
            Self::default()
        })
    }

    /// Saves the configuration to a TOML file at the given path.
    ///
    /// Parent directories are created if they don't exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be serialized to TOML or if
    /// the file cannot be written.
    pub fn save(&self, path: &Path) -> Result<(), String> {
        let content =
            toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize config: {e}"))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create config directory: {e}"))?;
        }
        std::fs::write(path, content).map_err(|e| format!("Failed to write config file: {e}"))
    }

    /// Returns the identifier prefix.
    #[must_use]
    pub const fn id_prefix(&self) -> &Prefix {
        &self.id_prefix
    }

    /// Returns the number of digits for padding identifier numbers.
    #[must_use]
    pub const fn digits(&self) -> usize {
        self.digits
    }

    /// Returns the functional keywords, lowercased.
    #[must_use]
    pub const fn functional_keywords(&self) -> &NonEmpty<String> {
        &self.functional_keywords
    }

    /// Returns the non-functional keywords, lowercased.
    #[must_use]
    pub const fn non_functional_keywords(&self) -> &NonEmpty<String> {
        &self.non_functional_keywords
    }

    /// Sets a configuration value from its string form.
    ///
    /// Settable keys: `id_prefix`, `digits`, `functional_keywords`,
    /// `non_functional_keywords` (comma-separated), `whole_words`,
    /// `segmenter`, `model` (an empty value clears it).
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown or the value is invalid for it.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), String> {
        match key {
            "id_prefix" => {
                self.id_prefix = Prefix::new(value.to_string()).map_err(|e| e.to_string())?;
            }
            "digits" => {
                self.digits = parse_digits(value)?;
            }
            "functional_keywords" => {
                self.functional_keywords = parse_keywords(split_list(value))?;
            }
            "non_functional_keywords" => {
                self.non_functional_keywords = parse_keywords(split_list(value))?;
            }
            "whole_words" => {
                self.whole_words = value
                    .parse()
                    .map_err(|_| format!("Invalid value for whole_words: '{value}'"))?;
            }
            "segmenter" => {
                self.segmenter = match value {
                    "linguistic" => SegmenterMode::Linguistic,
                    "fallback" => SegmenterMode::Fallback,
                    _ => return Err(format!("Invalid value for segmenter: '{value}'")),
                };
            }
            "model" => {
                self.model = (!value.is_empty()).then(|| PathBuf::from(value));
            }
            _ => return Err(format!("Unknown configuration key: '{key}'")),
        }
        Ok(())
    }
}

fn split_list(value: &str) -> Vec<String> {
    value.split(',').map(str::to_string).collect()
}

fn parse_digits(value: &str) -> Result<usize, String> {
    value
        .parse::<usize>()
        .map_err(|_| format!("Invalid value for digits: '{value}' (expected a positive integer)"))
        .and_then(check_digits)
}

fn check_digits(digits: usize) -> Result<usize, String> {
    if digits == 0 {
        Err("Invalid value for digits: '0' (expected a positive integer)".to_string())
    } else {
        Ok(digits)
    }
}

/// Normalizes keywords to trimmed lowercase, rejecting empty lists and empty
/// keywords (an empty keyword would match every sentence).
fn parse_keywords(keywords: Vec<String>) -> Result<NonEmpty<String>, String> {
    let keywords = keywords
        .into_iter()
        .map(|keyword| keyword.trim().to_lowercase())
        .map(|keyword| {
            if keyword.is_empty() {
                Err("Keywords must not be empty".to_string())
            } else {
                Ok(keyword)
            }
        })
        .collect::<Result<Vec<_>, _>>()?;

    NonEmpty::from_vec(keywords).ok_or_else(|| "Keyword lists must not be empty".to_string())
}

const fn default_digits() -> usize {
    1
}

fn default_prefix() -> String {
    Prefix::default().to_string()
}

fn default_functional_keywords() -> NonEmpty<String> {
    NonEmpty::from(("must".to_string(), vec!["shall".to_string()]))
}

fn default_non_functional_keywords() -> NonEmpty<String> {
    NonEmpty::new("should".to_string())
}

fn default_functional_list() -> Vec<String> {
    default_functional_keywords().into()
}

fn default_non_functional_list() -> Vec<String> {
    default_non_functional_keywords().into()
}

/// The serialized versions of the configuration.
/// This allows for future changes to the configuration format and to the domain
/// type without breaking compatibility.
#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "_version")]
enum Versions {
    #[serde(rename = "1")]
    V1 {
        #[serde(default = "default_prefix")]
        id_prefix: String,

        /// The minimum number of digits in an identifier.
        #[serde(default = "default_digits")]
        digits: usize,

        #[serde(default = "default_functional_list")]
        functional_keywords: Vec<String>,

        #[serde(default = "default_non_functional_list")]
        non_functional_keywords: Vec<String>,

        #[serde(default)]
        whole_words: bool,

        #[serde(default)]
        segmenter: SegmenterMode,

        #[serde(default, skip_serializing_if = "Option::is_none")]
        model: Option<PathBuf>,
    },
}

impl TryFrom<Versions> for Config {
    type Error = String;

    fn try_from(versions: Versions) -> Result<Self, Self::Error> {
        match versions {
            Versions::V1 {
                id_prefix,
                digits,
                functional_keywords,
                non_functional_keywords,
                whole_words,
                segmenter,
                model,
            } => Ok(Self {
                id_prefix: Prefix::new(id_prefix).map_err(|e| e.to_string())?,
                digits: check_digits(digits)?,
                functional_keywords: parse_keywords(functional_keywords)?,
                non_functional_keywords: parse_keywords(non_functional_keywords)?,
                whole_words,
                segmenter,
                model,
            }),
        }
    }
}

impl From<Config> for Versions {
    fn from(config: Config) -> Self {
        Self::V1 {
            id_prefix: config.id_prefix.to_string(),
            digits: config.digits,
            functional_keywords: config.functional_keywords.into(),
            non_functional_keywords: config.non_functional_keywords.into(),
            whole_words: config.whole_words,
            segmenter: config.segmenter,
            model: config.model,
        }
    }
}
