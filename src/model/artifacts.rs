//! Startup loader for the three frozen model artifacts.

use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;

use super::trees::{BoostedTrees, BoostedTreesArtifact};
use super::{Classifier, LabelDecoder, ModelError};
use crate::pipeline::extraction::Vocabulary;

pub const FEATURES_FILE: &str = "features.json";
pub const LABELS_FILE: &str = "labels.json";
pub const MODEL_FILE: &str = "model.json";

/// Vocabulary, decoder and classifier, already checked against each other.
#[derive(Debug)]
pub struct ModelBundle {
    pub vocabulary: Vocabulary,
    pub decoder: LabelDecoder,
    pub classifier: BoostedTrees,
}

/// Load `features.json`, `labels.json` and `model.json` from `dir`.
///
/// Fails on the first missing file, parse error, or inconsistency between
/// the three (feature count, class count, tree indices).
pub fn load_bundle(dir: &Path) -> Result<ModelBundle, ModelError> {
    let features: Vec<String> = read_json(&dir.join(FEATURES_FILE))?;
    let labels: Vec<String> = read_json(&dir.join(LABELS_FILE))?;
    let artifact: BoostedTreesArtifact = read_json(&dir.join(MODEL_FILE))?;

    let bundle = ModelBundle {
        vocabulary: Vocabulary::new(features)?,
        decoder: LabelDecoder::new(labels)?,
        classifier: BoostedTrees::from_artifact(artifact)?,
    };
    validate_bundle(&bundle)?;

    tracing::info!(
        dir = %dir.display(),
        features = bundle.vocabulary.len(),
        labels = bundle.decoder.len(),
        trees = bundle.classifier.tree_count(),
        "Model artifacts loaded"
    );

    Ok(bundle)
}

fn validate_bundle(bundle: &ModelBundle) -> Result<(), ModelError> {
    if bundle.classifier.num_features() != bundle.vocabulary.len() {
        return Err(ModelError::FeatureCountMismatch {
            vocabulary: bundle.vocabulary.len(),
            classifier: bundle.classifier.num_features(),
        });
    }
    if bundle.classifier.num_classes() != bundle.decoder.len() {
        return Err(ModelError::LabelCountMismatch {
            decoder: bundle.decoder.len(),
            classifier: bundle.classifier.num_classes(),
        });
    }
    Ok(())
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, ModelError> {
    let bytes = std::fs::read(path).map_err(|source| ModelError::Io {
        path: PathBuf::from(path),
        source,
    })?;
    serde_json::from_slice(&bytes).map_err(|source| ModelError::Parse {
        path: PathBuf::from(path),
        source,
    })
}
