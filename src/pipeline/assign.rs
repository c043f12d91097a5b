//! Identifier assignment for extracted candidates.

use std::num::NonZeroUsize;

use crate::{
    Requirement,
    domain::{Candidate, Config, RequirementId, id::Prefix},
};

/// How identifiers are rendered.
///
/// Every candidate draws from one sequence regardless of its category, so a
/// non-functional requirement following one functional requirement is `FR2`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdScheme {
    prefix: Prefix,
    digits: usize,
}

impl IdScheme {
    /// Create a scheme from a prefix and a minimum digit width.
    #[must_use]
    pub const fn new(prefix: Prefix, digits: usize) -> Self {
        Self { prefix, digits }
    }

    /// The scheme described by the configuration.
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        Self::new(config.id_prefix().clone(), config.digits())
    }

    /// Stamp each candidate with the next identifier, starting at 1, in
    /// input order.
    #[must_use]
    pub fn assign_ids(&self, candidates: Vec<Candidate>) -> Vec<Requirement> {
        candidates
            .into_iter()
            .zip(numbers())
            .map(|(candidate, number)| {
                let id = RequirementId::new(self.prefix.clone(), number);
                Requirement::from_candidate(&id, self.digits, candidate)
            })
            .collect()
    }
}

impl Default for IdScheme {
    /// `FR` numbering with the default digit width.
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

fn numbers() -> impl Iterator<Item = NonZeroUsize> {
    std::iter::successors(Some(NonZeroUsize::MIN), |n| n.checked_add(1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Category, Source};

    fn candidate(category: Category, sentence: usize) -> Candidate {
        Candidate {
            text: format!("Sentence {sentence} must or should."),
            category,
            source: Source::new("doc.txt".to_string(), NonZeroUsize::new(sentence).unwrap()),
        }
    }

    #[test]
    fn ids_are_sequential_and_category_blind() {
        let candidates = vec![
            candidate(Category::Functional, 1),
            candidate(Category::NonFunctional, 4),
            candidate(Category::NonFunctional, 5),
            candidate(Category::Functional, 9),
        ];

        let ids: Vec<String> = IdScheme::default()
            .assign_ids(candidates)
            .into_iter()
            .map(|requirement| requirement.id)
            .collect();

        assert_eq!(ids, ["FR1", "FR2", "FR3", "FR4"]);
    }

    #[test]
    fn assignment_preserves_order_and_content() {
        let candidates = vec![
            candidate(Category::NonFunctional, 7),
            candidate(Category::Functional, 2),
        ];

        let requirements = IdScheme::default().assign_ids(candidates.clone());

        for (requirement, candidate) in requirements.iter().zip(&candidates) {
            assert_eq!(requirement.text, candidate.text);
            assert_eq!(requirement.category.category(), Some(candidate.category));
            assert_eq!(requirement.source, candidate.source.to_string());
        }
    }

    #[test]
    fn no_candidates_no_ids() {
        assert!(IdScheme::default().assign_ids(Vec::new()).is_empty());
    }

    #[test]
    fn default_scheme_matches_default_config() {
        let config = Config::default();
        assert_eq!(IdScheme::default(), IdScheme::from_config(&config));
        assert_eq!(IdScheme::default().digits, config.digits());
    }

    #[test]
    fn custom_prefix_and_padding() {
        let scheme = IdScheme::new(Prefix::new("REQ".to_string()).unwrap(), 3);
        let requirements = scheme.assign_ids(vec![candidate(Category::Functional, 1)]);
        assert_eq!(requirements[0].id, "REQ001");
    }

    #[test]
    fn k_candidates_get_exactly_fr1_to_frk() {
        let k = 250;
        let candidates = (1..=k).map(|i| candidate(Category::Functional, i)).collect();

        let requirements = IdScheme::default().assign_ids(candidates);

        let expected: Vec<String> = (1..=k).map(|i| format!("FR{i}")).collect();
        let actual: Vec<String> = requirements.into_iter().map(|r| r.id).collect();
        assert_eq!(actual, expected);
    }
}
