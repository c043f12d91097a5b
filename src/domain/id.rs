use std::{fmt, num::NonZeroUsize, ops::Deref, str::FromStr};

use non_empty_string::NonEmptyString;

/// A validated string containing only uppercase alphabetic characters ([A-Z]+).
///
/// Used as the prefix of a [`RequirementId`], for example `FR`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Prefix(NonEmptyString);

impl Prefix {
    /// Creates a new `Prefix` from a string.
    ///
    /// # Errors
    ///
    /// Returns `InvalidPrefixError` if the string is empty or contains
    /// characters other than uppercase letters (A-Z).
    pub fn new(s: String) -> Result<Self, InvalidPrefixError> {
        if !s.chars().all(|c| c.is_ascii_uppercase()) {
            return Err(InvalidPrefixError(s));
        }

        NonEmptyString::new(s)
            .map(Self)
            .map_err(InvalidPrefixError)
    }

    /// Returns the string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl Default for Prefix {
    /// The flat `FR` prefix every extracted requirement receives.
    fn default() -> Self {
        Self(NonEmptyString::new("FR".to_string()).expect("'FR' is non-empty"))
    }
}

impl TryFrom<String> for Prefix {
    type Error = InvalidPrefixError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&str> for Prefix {
    type Error = InvalidPrefixError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value.to_string())
    }
}

impl AsRef<str> for Prefix {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl Deref for Prefix {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        self.0.as_str()
    }
}

impl fmt::Display for Prefix {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Prefix {
    type Err = InvalidPrefixError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s.to_string())
    }
}

/// Error returned when a string doesn't match the required pattern [A-Z]+.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("Invalid prefix '{0}': must be non-empty and contain only uppercase letters (A-Z)")]
pub struct InvalidPrefixError(String);

/// The identifier assigned to an extracted requirement.
///
/// Format: `{PREFIX}{NUMBER}`, where:
/// - `PREFIX` is an uppercase alphabetic string (e.g. `FR`)
/// - `NUMBER` is a positive non-zero integer, optionally zero-padded
///
/// Examples: `FR1`, `FR12`, `FR007`
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequirementId {
    prefix: Prefix,
    number: NonZeroUsize,
}

impl RequirementId {
    /// Create an identifier from pre-validated parts.
    #[must_use]
    pub const fn new(prefix: Prefix, number: NonZeroUsize) -> Self {
        Self { prefix, number }
    }

    /// Returns a displayable representation with the specified digit width.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::num::NonZeroUsize;
    ///
    /// use reqtract::domain::id::{Prefix, RequirementId};
    ///
    /// let prefix = Prefix::new("FR".to_string()).unwrap();
    /// let id = RequirementId::new(prefix, NonZeroUsize::new(7).unwrap());
    ///
    /// assert_eq!(id.display(1).to_string(), "FR7");
    /// assert_eq!(id.display(3).to_string(), "FR007");
    /// ```
    #[must_use]
    pub const fn display(&self, digits: usize) -> FormattedId<'_> {
        FormattedId { id: self, digits }
    }
}

impl fmt::Display for RequirementId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.display(1))
    }
}

/// A wrapper type that formats an identifier with a specified digit width.
///
/// This type is returned by [`RequirementId::display`].
#[derive(Debug, Clone, Copy)]
pub struct FormattedId<'a> {
    id: &'a RequirementId,
    digits: usize,
}

impl fmt::Display for FormattedId<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{}{:0width$}",
            self.id.prefix,
            self.id.number,
            width = self.digits
        )
    }
}

/// Errors that can occur while parsing an identifier.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum Error {
    /// The identifier is not a prefix followed by digits.
    #[error("Invalid requirement ID format: {0}")]
    Syntax(String),

    /// The numeric part is zero or too large.
    #[error("Invalid number in requirement ID '{0}': expected a non-zero integer, got {1}")]
    Number(String, String),

    /// The prefix is not uppercase alphabetic.
    #[error(transparent)]
    Prefix(#[from] InvalidPrefixError),
}

impl FromStr for RequirementId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let split = s
            .find(|c: char| c.is_ascii_digit())
            .ok_or_else(|| Error::Syntax(s.to_string()))?;
        let (prefix_str, number_str) = s.split_at(split);

        if prefix_str.is_empty() || !number_str.chars().all(|c| c.is_ascii_digit()) {
            return Err(Error::Syntax(s.to_string()));
        }

        let prefix = Prefix::new(prefix_str.to_string())?;
        let number = number_str
            .parse::<usize>()
            .ok()
            .and_then(NonZeroUsize::new)
            .ok_or_else(|| Error::Number(s.to_string(), number_str.to_string()))?;

        Ok(Self::new(prefix, number))
    }
}

impl TryFrom<&str> for RequirementId {
    type Error = Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::from_str(value)
    }
}

#[cfg(test)]
mod tests {
    use test_case::test_case;

    use super::*;

    fn id(prefix: &str, number: usize) -> RequirementId {
        RequirementId::new(
            Prefix::new(prefix.to_string()).unwrap(),
            NonZeroUsize::new(number).unwrap(),
        )
    }

    #[test]
    fn default_prefix_is_fr() {
        assert_eq!(Prefix::default().as_str(), "FR");
    }

    #[test]
    fn prefix_rejects_empty_and_lowercase() {
        assert!(Prefix::new(String::new()).is_err());
        assert!(Prefix::new("fr".to_string()).is_err());
        assert!(Prefix::new("F1".to_string()).is_err());
    }

    #[test_case(1, 1, "FR1"; "no padding")]
    #[test_case(1, 42, "FR42"; "no padding two digits")]
    #[test_case(3, 7, "FR007"; "three digits")]
    #[test_case(3, 999, "FR999"; "three digits at boundary")]
    #[test_case(3, 1000, "FR1000"; "three digits expansion")]
    fn display_with_digits(digits: usize, number: usize, expected: &str) {
        assert_eq!(id("FR", number).display(digits).to_string(), expected);
    }

    #[test]
    fn display_defaults_to_no_padding() {
        assert_eq!(id("NFR", 12).to_string(), "NFR12");
    }

    #[test]
    fn parse_valid() {
        let parsed = RequirementId::try_from("FR12").unwrap();
        assert_eq!(parsed, id("FR", 12));

        let padded = RequirementId::try_from("FR007").unwrap();
        assert_eq!(padded, id("FR", 7));
    }

    #[test_case(""; "empty")]
    #[test_case("FR"; "no number")]
    #[test_case("12"; "no prefix")]
    #[test_case("FR1A"; "trailing letters")]
    fn parse_syntax_errors(input: &str) {
        assert!(matches!(
            RequirementId::try_from(input),
            Err(Error::Syntax(_))
        ));
    }

    #[test]
    fn parse_zero_is_rejected() {
        assert!(matches!(
            RequirementId::try_from("FR0"),
            Err(Error::Number(_, _))
        ));
    }

    #[test]
    fn parse_lowercase_prefix_is_rejected() {
        assert!(matches!(
            RequirementId::try_from("fr1"),
            Err(Error::Prefix(_))
        ));
        assert!(matches!(
            RequirementId::try_from("FR-1"),
            Err(Error::Prefix(_))
        ));
    }

    #[test]
    fn error_display() {
        let error = Error::Number("FR0".to_string(), "0".to_string());
        assert_eq!(
            error.to_string(),
            "Invalid number in requirement ID 'FR0': expected a non-zero integer, got 0"
        );
    }
}
