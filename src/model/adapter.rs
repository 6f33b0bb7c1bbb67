use super::{Classifier, LabelDecoder, ModelError};
use crate::pipeline::vectorize::FeatureVector;

/// Tolerance on the probability sum returned by the classifier.
const DISTRIBUTION_TOLERANCE: f64 = 1e-6;

/// Pairs a frozen classifier with its label decoder.
///
/// Shapes are cross-checked in `new`, so a vocabulary/model mismatch is a
/// startup failure rather than a per-request one.
pub struct ClassifierAdapter {
    classifier: Box<dyn Classifier>,
    decoder: LabelDecoder,
}

impl ClassifierAdapter {
    pub fn new(
        classifier: Box<dyn Classifier>,
        decoder: LabelDecoder,
        vocabulary_len: usize,
    ) -> Result<Self, ModelError> {
        if classifier.num_features() != vocabulary_len {
            return Err(ModelError::FeatureCountMismatch {
                vocabulary: vocabulary_len,
                classifier: classifier.num_features(),
            });
        }
        if classifier.num_classes() != decoder.len() {
            return Err(ModelError::LabelCountMismatch {
                decoder: decoder.len(),
                classifier: classifier.num_classes(),
            });
        }
        Ok(Self { classifier, decoder })
    }

    pub fn decoder(&self) -> &LabelDecoder {
        &self.decoder
    }

    pub fn num_features(&self) -> usize {
        self.classifier.num_features()
    }

    /// Most likely disease. Ties go to the lower class code.
    pub fn predict(&self, vector: &FeatureVector) -> Result<&str, ModelError> {
        let proba = self.predict_probabilities(vector)?;
        let mut best = 0;
        for (code, p) in proba.iter().enumerate() {
            if *p > proba[best] {
                best = code;
            }
        }
        // Length was checked against the decoder in `predict_probabilities`.
        self.decoder
            .decode(best)
            .ok_or(ModelError::DistributionLength {
                expected: self.decoder.len(),
                actual: proba.len(),
            })
    }

    /// One probability per decoder class, in class-code order.
    pub fn predict_probabilities(&self, vector: &FeatureVector) -> Result<Vec<f64>, ModelError> {
        if vector.len() != self.classifier.num_features() {
            return Err(ModelError::VectorLength {
                expected: self.classifier.num_features(),
                actual: vector.len(),
            });
        }

        let proba = self.classifier.predict_proba(vector)?;

        if proba.len() != self.decoder.len() {
            return Err(ModelError::DistributionLength {
                expected: self.decoder.len(),
                actual: proba.len(),
            });
        }

        let sum: f64 = proba.iter().sum();
        let valid = proba.iter().all(|p| p.is_finite() && *p >= 0.0);
        if !valid || (sum - 1.0).abs() > DISTRIBUTION_TOLERANCE {
            return Err(ModelError::InvalidDistribution { sum });
        }

        Ok(proba)
    }
}
