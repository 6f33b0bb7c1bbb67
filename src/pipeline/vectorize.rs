//! Symptom set → fixed-order binary feature vector.

use super::extraction::{SymptomSet, Vocabulary};

/// One row of classifier input: `1 × |vocabulary|`, every entry 0 or 1.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeatureVector {
    bits: Vec<u8>,
}

impl FeatureVector {
    pub fn zeros(len: usize) -> Self {
        Self { bits: vec![0; len] }
    }

    /// Build from raw bits. Non-zero entries are clamped to 1.
    pub fn from_bits(bits: Vec<u8>) -> Self {
        Self {
            bits: bits.into_iter().map(|b| u8::from(b != 0)).collect(),
        }
    }

    pub fn get(&self, idx: usize) -> Option<u8> {
        self.bits.get(idx).copied()
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.bits
    }

    pub fn len(&self) -> usize {
        self.bits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    /// Number of positions set to 1.
    pub fn active_count(&self) -> usize {
        self.bits.iter().filter(|b| **b == 1).count()
    }
}

/// Set position `i` for every symptom equal to `vocabulary[i]`.
///
/// Symptoms the vocabulary does not know are dropped: the classifier has no
/// column for them.
pub fn vectorize(symptoms: &SymptomSet, vocabulary: &Vocabulary) -> FeatureVector {
    let mut vector = FeatureVector::zeros(vocabulary.len());
    for symptom in symptoms.iter() {
        if let Some(idx) = vocabulary.index_of(symptom) {
            vector.bits[idx] = 1;
        }
    }
    vector
}
