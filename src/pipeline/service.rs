//! Prediction orchestration: extract → vectorize → classify → rank.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::Serialize;
use thiserror::Error;

use super::extraction::{ExtractorConfig, SymptomExtractor, SymptomSet, SynonymTable, Vocabulary};
use super::vectorize::vectorize;
use crate::model::{ClassifierAdapter, ModelBundle, ModelError};

pub const DEFAULT_TOP_K: usize = 5;

#[derive(Error, Debug)]
pub enum PredictionError {
    #[error("No recognizable symptoms found")]
    NoSymptoms,

    #[error("Inference failed: {0}")]
    Inference(#[from] ModelError),
}

/// One label with its probability (0-1).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedLabel {
    pub label: String,
    pub probability: f64,
}

impl RankedLabel {
    pub fn percentage(&self) -> f64 {
        to_percentage(self.probability)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PredictionResult {
    pub symptoms: SymptomSet,
    pub predicted_disease: String,
    /// Every label, in decoder class order.
    pub distribution: Vec<RankedLabel>,
    /// Highest probabilities first; ties keep decoder class order.
    pub top: Vec<RankedLabel>,
}

impl PredictionResult {
    /// Label → percentage (0-100, two decimals) for every known label.
    pub fn percentages(&self) -> BTreeMap<String, f64> {
        self.distribution
            .iter()
            .map(|r| (r.label.clone(), r.percentage()))
            .collect()
    }

    /// Top-k `(label, percentage)` pairs in rank order.
    pub fn top_percentages(&self) -> Vec<(String, f64)> {
        self.top
            .iter()
            .map(|r| (r.label.clone(), r.percentage()))
            .collect()
    }
}

/// Probability (0-1) → percentage rounded to two decimals.
pub fn to_percentage(probability: f64) -> f64 {
    (probability * 10_000.0).round() / 100.0
}

/// Built once at startup and shared by reference across requests.
///
/// Holds only immutable state, so `predict` can run on any number of
/// threads at once.
pub struct PredictionService {
    vocabulary: Arc<Vocabulary>,
    extractor: SymptomExtractor,
    adapter: ClassifierAdapter,
    top_k: usize,
}

impl PredictionService {
    pub fn new(
        vocabulary: Arc<Vocabulary>,
        extractor: SymptomExtractor,
        adapter: ClassifierAdapter,
        top_k: usize,
    ) -> Self {
        Self {
            vocabulary,
            extractor,
            adapter,
            top_k,
        }
    }

    /// Wire a loaded bundle into a ready service.
    pub fn from_bundle(
        bundle: ModelBundle,
        synonyms: SynonymTable,
        config: &ExtractorConfig,
        top_k: usize,
    ) -> Result<Self, ServiceBuildError> {
        let vocabulary = Arc::new(bundle.vocabulary);
        let adapter =
            ClassifierAdapter::new(Box::new(bundle.classifier), bundle.decoder, vocabulary.len())?;
        let extractor = SymptomExtractor::new(Arc::clone(&vocabulary), synonyms, config)?;
        Ok(Self::new(vocabulary, extractor, adapter, top_k))
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    pub fn labels(&self) -> &[String] {
        self.adapter.decoder().classes()
    }

    pub fn predict(&self, raw_text: &str) -> Result<PredictionResult, PredictionError> {
        let symptoms = self.extractor.extract(raw_text);
        if symptoms.is_empty() {
            tracing::debug!("No symptoms recognised");
            return Err(PredictionError::NoSymptoms);
        }

        let vector = vectorize(&symptoms, &self.vocabulary);

        let proba = match self.adapter.predict_probabilities(&vector) {
            Ok(p) => p,
            Err(e) => {
                tracing::error!(
                    raw_input = raw_text,
                    symptoms = ?symptoms,
                    vector_len = vector.len(),
                    error = %e,
                    "Classifier inference failed"
                );
                return Err(PredictionError::Inference(e));
            }
        };

        let distribution: Vec<RankedLabel> = self
            .labels()
            .iter()
            .zip(proba)
            .map(|(label, probability)| RankedLabel {
                label: label.clone(),
                probability,
            })
            .collect();

        let top = rank(&distribution, self.top_k);
        // `rank` keeps at least one entry: the decoder is never empty.
        let predicted_disease = top
            .first()
            .map(|r| r.label.clone())
            .ok_or(PredictionError::Inference(ModelError::EmptyLabels))?;

        tracing::info!(
            symptoms = symptoms.len(),
            active_features = vector.active_count(),
            predicted = %predicted_disease,
            "Prediction complete"
        );

        Ok(PredictionResult {
            symptoms,
            predicted_disease,
            distribution,
            top,
        })
    }
}

#[derive(Error, Debug)]
pub enum ServiceBuildError {
    #[error(transparent)]
    Model(#[from] ModelError),

    #[error("Invalid chunk delimiters: {0}")]
    Delimiters(#[from] regex::Error),
}

/// Sort descending by probability and keep `k`. The sort is stable, so
/// equal probabilities stay in decoder class order.
fn rank(distribution: &[RankedLabel], k: usize) -> Vec<RankedLabel> {
    let mut ranked = distribution.to_vec();
    ranked.sort_by(|a, b| b.probability.total_cmp(&a.probability));
    ranked.truncate(k.max(1));
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::adapter::tests::Fixed;
    use crate::model::trees::{BoostedTrees, BoostedTreesArtifact, Node, Tree};
    use crate::model::LabelDecoder;

    const FEATURES: &[&str] = &[
        "itching",
        "skin_rash",
        "chills",
        "vomiting",
        "fatigue",
        "cough",
        "fever",
        "high_fever",
        "headache",
        "nausea",
        "chest_pain",
        "breathlessness",
    ];

    const LABELS: &[&str] = &[
        "Common Cold",
        "Fungal infection",
        "Heart attack",
        "Malaria",
        "Migraine",
        "Typhoid",
    ];

    fn feature(name: &str) -> usize {
        FEATURES.iter().position(|f| *f == name).unwrap()
    }

    fn stump(class: usize, name: &str, weight: f64) -> Tree {
        Tree {
            class,
            nodes: vec![
                Node::Split {
                    feature: feature(name),
                    threshold: 0.5,
                    yes: 1,
                    no: 2,
                },
                Node::Leaf { leaf: 0.0 },
                Node::Leaf { leaf: weight },
            ],
        }
    }

    fn service_with_top_k(top_k: usize) -> PredictionService {
        let trees = vec![
            stump(0, "cough", 1.5),
            stump(0, "fever", 1.0),
            stump(1, "itching", 2.0),
            stump(1, "skin_rash", 1.5),
            stump(2, "chest_pain", 2.5),
            stump(2, "breathlessness", 1.0),
            stump(3, "chills", 1.5),
            stump(3, "high_fever", 1.5),
            stump(4, "headache", 2.0),
            stump(4, "nausea", 0.5),
            stump(5, "high_fever", 1.0),
            stump(5, "fatigue", 1.0),
        ];
        let classifier = BoostedTrees::from_artifact(BoostedTreesArtifact {
            num_features: FEATURES.len(),
            num_classes: LABELS.len(),
            base_score: 0.0,
            trees,
        })
        .unwrap();

        let bundle = ModelBundle {
            vocabulary: Vocabulary::new(FEATURES.iter().map(|s| s.to_string()).collect()).unwrap(),
            decoder: LabelDecoder::new(LABELS.iter().map(|s| s.to_string()).collect()).unwrap(),
            classifier,
        };
        PredictionService::from_bundle(
            bundle,
            SynonymTable::default(),
            &ExtractorConfig::default(),
            top_k,
        )
        .unwrap()
    }

    fn service() -> PredictionService {
        service_with_top_k(DEFAULT_TOP_K)
    }

    #[test]
    fn predicts_from_free_text() {
        let result = service().predict("Itchy skin with a rash on my arms").unwrap();
        assert_eq!(result.predicted_disease, "Fungal infection");
        assert!(result.symptoms.contains("itching"));
        assert!(result.symptoms.contains("skin_rash"));
    }

    #[test]
    fn empty_input_is_no_symptoms() {
        assert!(matches!(service().predict(""), Err(PredictionError::NoSymptoms)));
    }

    #[test]
    fn unrelated_input_is_no_symptoms() {
        assert!(matches!(
            service().predict("purple elephant"),
            Err(PredictionError::NoSymptoms)
        ));
    }

    #[test]
    fn distribution_covers_every_label_and_sums_to_one() {
        let result = service().predict("I have a high fever and dry cough").unwrap();
        assert_eq!(result.distribution.len(), LABELS.len());
        let sum: f64 = result.distribution.iter().map(|r| r.probability).sum();
        assert!((sum - 1.0).abs() < 1e-6);
        let labels: Vec<_> = result.distribution.iter().map(|r| r.label.as_str()).collect();
        assert_eq!(labels, LABELS);
    }

    #[test]
    fn top_is_sorted_descending_and_capped() {
        let result = service().predict("chest pain and trouble breathing").unwrap();
        assert_eq!(result.top.len(), DEFAULT_TOP_K);
        for pair in result.top.windows(2) {
            assert!(pair[0].probability >= pair[1].probability);
        }
        assert_eq!(result.top[0].label, "Heart attack");
        assert_eq!(result.predicted_disease, result.top[0].label);
    }

    #[test]
    fn ties_keep_decoder_order() {
        // Only "fatigue" fires: Typhoid gets 1.0, the other five classes tie at 0.
        let result = service_with_top_k(6).predict("so tired").unwrap();
        assert_eq!(result.top[0].label, "Typhoid");
        let rest: Vec<_> = result.top[1..].iter().map(|r| r.label.as_str()).collect();
        assert_eq!(
            rest,
            vec!["Common Cold", "Fungal infection", "Heart attack", "Malaria", "Migraine"]
        );
    }

    #[test]
    fn predict_is_idempotent() {
        let svc = service();
        let input = "Chills, high fever and a headache. So tired.";
        assert_eq!(svc.predict(input).unwrap(), svc.predict(input).unwrap());
    }

    #[test]
    fn percentages_have_two_decimals() {
        let result = service().predict("cough").unwrap();
        for (_, pct) in result.percentages() {
            assert!((0.0..=100.0).contains(&pct));
            assert!(((pct * 100.0).round() - pct * 100.0).abs() < 1e-6);
        }
        assert_eq!(result.top_percentages().len(), DEFAULT_TOP_K);
    }

    #[test]
    fn to_percentage_rounds() {
        assert_eq!(to_percentage(0.123456), 12.35);
        assert_eq!(to_percentage(1.0), 100.0);
        assert_eq!(to_percentage(0.0), 0.0);
    }

    #[test]
    fn symptoms_outside_vocabulary_still_reach_classifier_as_zero_vector() {
        // "sore_throat" comes from the synonym table but has no feature column.
        let result = service().predict("sore throat").unwrap();
        assert!(result.symptoms.contains("sore_throat"));
        assert_eq!(result.distribution.len(), LABELS.len());
    }

    #[test]
    fn invalid_distribution_is_an_inference_error() {
        let vocabulary =
            Arc::new(Vocabulary::new(FEATURES.iter().map(|s| s.to_string()).collect()).unwrap());
        let decoder = LabelDecoder::new(LABELS.iter().map(|s| s.to_string()).collect()).unwrap();
        // Sums to 6 * 0.7, not 1.
        let classifier = Fixed(vec![0.7; LABELS.len()], FEATURES.len());
        let adapter =
            ClassifierAdapter::new(Box::new(classifier), decoder, vocabulary.len()).unwrap();
        let extractor = SymptomExtractor::new(
            Arc::clone(&vocabulary),
            SynonymTable::default(),
            &ExtractorConfig::default(),
        )
        .unwrap();
        let svc = PredictionService::new(vocabulary, extractor, adapter, DEFAULT_TOP_K);

        let err = svc.predict("dry cough and a headache").unwrap_err();
        assert!(matches!(
            err,
            PredictionError::Inference(ModelError::InvalidDistribution { .. })
        ));
    }

    #[test]
    fn mismatched_bundle_fails_to_build() {
        let classifier = BoostedTrees::from_artifact(BoostedTreesArtifact {
            num_features: 3,
            num_classes: 1,
            base_score: 0.0,
            trees: vec![],
        })
        .unwrap();
        let bundle = ModelBundle {
            vocabulary: Vocabulary::new(vec!["cough".into(), "fever".into()]).unwrap(),
            decoder: LabelDecoder::new(vec!["Common Cold".into()]).unwrap(),
            classifier,
        };
        let err = PredictionService::from_bundle(
            bundle,
            SynonymTable::default(),
            &ExtractorConfig::default(),
            DEFAULT_TOP_K,
        )
        .err()
        .unwrap();
        assert!(matches!(
            err,
            ServiceBuildError::Model(ModelError::FeatureCountMismatch { .. })
        ));
    }
}
