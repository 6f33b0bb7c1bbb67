//! Free text → canonical symptom set.
//!
//! Two passes over the lower-cased input:
//! 1. synonym phrases, matched anywhere in the full text
//! 2. vocabulary names, matched per clause by substring or fuzzy score
//!
//! See `extractor::SymptomExtractor` for the composition.

pub mod extractor;
pub mod similarity;
pub mod synonyms;
pub mod vocabulary;

pub use extractor::{ExtractorConfig, SymptomExtractor};
pub use similarity::{PartialRatio, SimilarityScorer};
pub use synonyms::SynonymTable;
pub use vocabulary::Vocabulary;

use std::collections::BTreeSet;

use serde::Serialize;

/// Canonical symptom names recognised in one input. Duplicates collapse.
///
/// Backed by a `BTreeSet` so iteration (and therefore the serialised list
/// and the stored history) is deterministic for identical input.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct SymptomSet(BTreeSet<String>);

impl SymptomSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, symptom: impl Into<String>) -> bool {
        self.0.insert(symptom.into())
    }

    pub fn contains(&self, symptom: &str) -> bool {
        self.0.contains(symptom)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn is_subset(&self, other: &SymptomSet) -> bool {
        self.0.is_subset(&other.0)
    }

    pub fn to_vec(&self) -> Vec<String> {
        self.0.iter().cloned().collect()
    }
}

impl FromIterator<String> for SymptomSet {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> FromIterator<&'a str> for SymptomSet {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        Self(iter.into_iter().map(str::to_string).collect())
    }
}
