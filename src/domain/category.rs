use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// The category assigned to an extracted requirement.
///
/// This is a closed enumeration. The classifier only ever produces one of
/// these two values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    /// Behaviour the system must or shall exhibit.
    Functional,
    /// Qualities the system should have.
    NonFunctional,
}

impl Category {
    /// All categories, in display order.
    pub const ALL: [Self; 2] = [Self::Functional, Self::NonFunctional];

    /// The label used in tables and exports.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Functional => "Functional",
            Self::NonFunctional => "Non-Functional",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Error returned when a string is not one of the category labels.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("Unrecognised category '{0}': expected 'Functional' or 'Non-Functional'")]
pub struct UnrecognisedCategory(String);

impl FromStr for Category {
    type Err = UnrecognisedCategory;

    /// Parses a category label exactly as [`Category::label`] renders it.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|category| category.label() == s)
            .ok_or_else(|| UnrecognisedCategory(s.to_string()))
    }
}

/// The category stored on a requirement record.
///
/// Records produced by extraction always carry a [`Category`]. Records
/// rebuilt from an edit submission may carry any string; strings that are not
/// a category label are kept verbatim and are only ever displayed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum CategoryLabel {
    /// One of the known categories.
    Known(Category),
    /// An unrecognised label, kept as submitted.
    Opaque(String),
}

impl CategoryLabel {
    /// The known category, if this label is one.
    #[must_use]
    pub const fn category(&self) -> Option<Category> {
        match self {
            Self::Known(category) => Some(*category),
            Self::Opaque(_) => None,
        }
    }

    /// The label as it is displayed and exported.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Known(category) => category.label(),
            Self::Opaque(label) => label,
        }
    }
}

impl From<Category> for CategoryLabel {
    fn from(category: Category) -> Self {
        Self::Known(category)
    }
}

impl From<String> for CategoryLabel {
    fn from(label: String) -> Self {
        label
            .parse()
            .map_or_else(|_| Self::Opaque(label), Self::Known)
    }
}

impl From<&str> for CategoryLabel {
    fn from(label: &str) -> Self {
        Self::from(label.to_string())
    }
}

impl From<CategoryLabel> for String {
    fn from(label: CategoryLabel) -> Self {
        match label {
            CategoryLabel::Known(category) => category.label().to_string(),
            CategoryLabel::Opaque(label) => label,
        }
    }
}

impl fmt::Display for CategoryLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
