//! Multiclass gradient-boosted tree ensemble.
//!
//! Artifact layout (`model.json`):
//!
//! ```json
//! {
//!   "num_features": 131,
//!   "num_classes": 10,
//!   "base_score": 0.0,
//!   "trees": [
//!     { "class": 3, "nodes": [
//!         { "feature": 0, "threshold": 0.5, "yes": 1, "no": 2 },
//!         { "leaf": -0.2 },
//!         { "leaf": 1.6 }
//!     ] }
//!   ]
//! }
//! ```
//!
//! A split routes to `yes` when `x[feature] < threshold`. Each class margin
//! is `base_score` plus the leaves reached in that class's trees; the
//! distribution is the softmax over margins.

use serde::{Deserialize, Serialize};

use super::{Classifier, ModelError};
use crate::pipeline::vectorize::FeatureVector;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Node {
    Split {
        feature: usize,
        threshold: f32,
        yes: usize,
        no: usize,
    },
    Leaf {
        leaf: f64,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tree {
    pub class: usize,
    pub nodes: Vec<Node>,
}

/// On-disk shape of `model.json`, before validation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoostedTreesArtifact {
    pub num_features: usize,
    pub num_classes: usize,
    #[serde(default)]
    pub base_score: f64,
    pub trees: Vec<Tree>,
}

/// Validated tree ensemble. Construction guarantees every split points
/// forward to an existing node, so traversal always terminates on a leaf.
#[derive(Debug, Clone)]
pub struct BoostedTrees {
    num_features: usize,
    num_classes: usize,
    base_score: f64,
    trees: Vec<Tree>,
}

impl BoostedTrees {
    pub fn from_artifact(artifact: BoostedTreesArtifact) -> Result<Self, ModelError> {
        for (t, tree) in artifact.trees.iter().enumerate() {
            validate_tree(t, tree, artifact.num_features, artifact.num_classes)?;
        }

        Ok(Self {
            num_features: artifact.num_features,
            num_classes: artifact.num_classes,
            base_score: artifact.base_score,
            trees: artifact.trees,
        })
    }

    pub fn tree_count(&self) -> usize {
        self.trees.len()
    }

    /// Raw per-class scores before softmax.
    pub fn margins(&self, features: &FeatureVector) -> Vec<f64> {
        let mut margins = vec![self.base_score; self.num_classes];
        for tree in &self.trees {
            margins[tree.class] += leaf_value(tree, features);
        }
        margins
    }
}

fn validate_tree(
    t: usize,
    tree: &Tree,
    num_features: usize,
    num_classes: usize,
) -> Result<(), ModelError> {
    if tree.nodes.is_empty() {
        return Err(ModelError::EmptyTree { tree: t });
    }
    if tree.class >= num_classes {
        return Err(ModelError::ClassOutOfRange {
            tree: t,
            class: tree.class,
            num_classes,
        });
    }

    for (n, node) in tree.nodes.iter().enumerate() {
        if let Node::Split { feature, yes, no, .. } = *node {
            if feature >= num_features {
                return Err(ModelError::FeatureOutOfRange {
                    tree: t,
                    node: n,
                    feature,
                    num_features,
                });
            }
            for child in [yes, no] {
                // Children must point forward, otherwise a malformed artifact could loop.
                if child <= n || child >= tree.nodes.len() {
                    return Err(ModelError::InvalidChild { tree: t, node: n, child });
                }
            }
        }
    }

    Ok(())
}

fn leaf_value(tree: &Tree, features: &FeatureVector) -> f64 {
    let mut idx = 0;
    loop {
        match tree.nodes[idx] {
            Node::Leaf { leaf } => return leaf,
            Node::Split {
                feature,
                threshold,
                yes,
                no,
            } => {
                let value = features.get(feature).map(f32::from).unwrap_or(0.0);
                idx = if value < threshold { yes } else { no };
            }
        }
    }
}

fn softmax(margins: &[f64]) -> Vec<f64> {
    let max = margins.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let exps: Vec<f64> = margins.iter().map(|m| (m - max).exp()).collect();
    let total: f64 = exps.iter().sum();
    exps.into_iter().map(|e| e / total).collect()
}

impl Classifier for BoostedTrees {
    fn num_features(&self) -> usize {
        self.num_features
    }

    fn num_classes(&self) -> usize {
        self.num_classes
    }

    fn predict_proba(&self, features: &FeatureVector) -> Result<Vec<f64>, ModelError> {
        if features.len() != self.num_features {
            return Err(ModelError::VectorLength {
                expected: self.num_features,
                actual: features.len(),
            });
        }
        Ok(softmax(&self.margins(features)))
    }
}
