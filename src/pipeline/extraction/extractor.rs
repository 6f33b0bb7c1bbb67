use std::sync::Arc;

use regex::Regex;
use serde::{Deserialize, Serialize};

use super::similarity::{PartialRatio, SimilarityScorer};
use super::synonyms::SynonymTable;
use super::vocabulary::Vocabulary;
use super::SymptomSet;

pub const DEFAULT_FUZZY_THRESHOLD: u8 = 80;
pub const DEFAULT_CHUNK_DELIMITERS: &str = ".,!?;";

/// Tunables for the vocabulary pass. Both values are empirical.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractorConfig {
    /// Minimum partial-ratio score (0-100) for a fuzzy vocabulary hit.
    pub fuzzy_threshold: u8,
    /// Characters that end a clause. Fuzzy matching never spans two clauses.
    pub chunk_delimiters: String,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            fuzzy_threshold: DEFAULT_FUZZY_THRESHOLD,
            chunk_delimiters: DEFAULT_CHUNK_DELIMITERS.to_string(),
        }
    }
}

pub struct SymptomExtractor {
    vocabulary: Arc<Vocabulary>,
    synonyms: SynonymTable,
    scorer: Box<dyn SimilarityScorer>,
    fuzzy_threshold: u8,
    splitter: Option<Regex>,
}

impl SymptomExtractor {
    pub fn new(
        vocabulary: Arc<Vocabulary>,
        synonyms: SynonymTable,
        config: &ExtractorConfig,
    ) -> Result<Self, regex::Error> {
        Ok(Self {
            vocabulary,
            synonyms,
            scorer: Box::new(PartialRatio),
            fuzzy_threshold: config.fuzzy_threshold,
            splitter: chunk_splitter(&config.chunk_delimiters)?,
        })
    }

    /// Swap the similarity scorer (default: `PartialRatio`).
    pub fn with_scorer(mut self, scorer: impl SimilarityScorer + 'static) -> Self {
        self.scorer = Box::new(scorer);
        self
    }

    /// Recognise canonical symptoms in free text. Never fails: input the
    /// extractor cannot make sense of yields an empty set.
    pub fn extract(&self, raw_text: &str) -> SymptomSet {
        let lowered = raw_text.to_lowercase();
        let mut matched = SymptomSet::new();

        if lowered.trim().is_empty() {
            return matched;
        }

        // Synonyms see the whole text: short idioms must match across punctuation.
        for symptom in self.synonyms.matches(&lowered) {
            matched.insert(symptom);
        }

        for chunk in self.chunks(&lowered) {
            if chunk.trim().is_empty() {
                continue;
            }
            for (name, form) in self.vocabulary.entries() {
                if form.is_empty() || matched.contains(name) {
                    continue;
                }
                if chunk.contains(form) || self.scorer.score(form, chunk) >= self.fuzzy_threshold {
                    matched.insert(name);
                }
            }
        }

        matched
    }

    fn chunks<'t>(&self, lowered: &'t str) -> Vec<&'t str> {
        match &self.splitter {
            Some(re) => re.split(lowered).collect(),
            None => vec![lowered],
        }
    }
}

/// Character class over the configured delimiters; `None` when there are
/// none, in which case the whole text is one chunk.
fn chunk_splitter(delimiters: &str) -> Result<Option<Regex>, regex::Error> {
    if delimiters.is_empty() {
        return Ok(None);
    }
    Regex::new(&format!("[{}]", regex::escape(delimiters))).map(Some)
}
