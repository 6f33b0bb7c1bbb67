//! Frozen classifier artifacts: label decoder, tree ensemble, loader, adapter.
//!
//! Nothing in here trains or updates a model. The offline trainer writes
//! three JSON artifacts into one directory; `artifacts::load_bundle` reads
//! them once at startup and refuses to continue when they disagree.

pub mod adapter;
pub mod artifacts;
pub mod labels;
pub mod trees;

pub use adapter::ClassifierAdapter;
pub use artifacts::{load_bundle, ModelBundle};
pub use labels::LabelDecoder;
pub use trees::BoostedTrees;

use std::path::PathBuf;

use thiserror::Error;

use crate::pipeline::vectorize::FeatureVector;

/// A trained, immutable classifier over binary feature vectors.
///
/// Implementations must be reentrant: `predict_proba` takes `&self` and is
/// called concurrently from request handlers without a lock.
pub trait Classifier: Send + Sync {
    /// Number of input features the model was trained on.
    fn num_features(&self) -> usize;

    /// Number of classes the model scores.
    fn num_classes(&self) -> usize;

    /// One probability per class code, in class-code order.
    fn predict_proba(&self, features: &FeatureVector) -> Result<Vec<f64>, ModelError>;
}

#[derive(Error, Debug)]
pub enum ModelError {
    #[error("Cannot read model artifact {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Cannot parse model artifact {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Vocabulary is empty")]
    EmptyVocabulary,

    #[error("Label set is empty")]
    EmptyLabels,

    #[error("Duplicate feature name in vocabulary: {0}")]
    DuplicateFeature(String),

    #[error("Duplicate disease label: {0}")]
    DuplicateLabel(String),

    #[error("Feature count mismatch: vocabulary has {vocabulary}, classifier expects {classifier}")]
    FeatureCountMismatch { vocabulary: usize, classifier: usize },

    #[error("Label count mismatch: decoder has {decoder}, classifier scores {classifier}")]
    LabelCountMismatch { decoder: usize, classifier: usize },

    #[error("Tree {tree} has no nodes")]
    EmptyTree { tree: usize },

    #[error("Tree {tree} targets class {class}, but the model has {num_classes} classes")]
    ClassOutOfRange {
        tree: usize,
        class: usize,
        num_classes: usize,
    },

    #[error("Tree {tree} node {node} reads feature {feature}, but the model has {num_features} features")]
    FeatureOutOfRange {
        tree: usize,
        node: usize,
        feature: usize,
        num_features: usize,
    },

    #[error("Tree {tree} node {node} points to invalid child {child}")]
    InvalidChild { tree: usize, node: usize, child: usize },

    #[error("Input vector has {actual} features, classifier expects {expected}")]
    VectorLength { expected: usize, actual: usize },

    #[error("Classifier returned {actual} probabilities, expected {expected}")]
    DistributionLength { expected: usize, actual: usize },

    #[error("Classifier returned an invalid probability distribution (sum {sum})")]
    InvalidDistribution { sum: f64 },
}
