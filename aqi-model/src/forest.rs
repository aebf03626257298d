//! Random forest classifier stored as flat per-tree node arrays.
//!
//! Each tree is a vector of nodes where node 0 is the root. A split node
//! sends a row left when `x[feature] <= threshold`. A leaf node holds the
//! per-class sample weights seen during training. The forest prediction is
//! the argmax of the averaged, normalised leaf distributions (lowest class
//! index wins ties).

use crate::error::{ModelError, Result};
use crate::Model;
use aqi_core::AqiError;
use serde::{Deserialize, Serialize};

#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Node {
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
    Leaf {
        value: Vec<f64>,
    },
}

#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct DecisionTree {
    pub nodes: Vec<Node>,
}

impl DecisionTree {
    fn validate(&self, tree_idx: usize, n_features: usize, n_classes: usize) -> Result<()> {
        if self.nodes.is_empty() {
            return Err(ModelError::InvalidArtifact(format!("tree {} has no nodes", tree_idx)));
        }
        let len = self.nodes.len();
        for (idx, node) in self.nodes.iter().enumerate() {
            match node {
                Node::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    if *feature >= n_features {
                        return Err(ModelError::InvalidArtifact(format!(
                            "tree {} node {} splits on feature {} but the model has {} features",
                            tree_idx, idx, feature, n_features
                        )));
                    }
                    if !threshold.is_finite() {
                        return Err(ModelError::InvalidArtifact(format!(
                            "tree {} node {} has a non-finite threshold",
                            tree_idx, idx
                        )));
                    }
                    // Children must point forward so traversal always terminates
                    for child in [*left, *right] {
                        if child <= idx || child >= len {
                            return Err(ModelError::InvalidArtifact(format!(
                                "tree {} node {} has invalid child {}",
                                tree_idx, idx, child
                            )));
                        }
                    }
                }
                Node::Leaf { value } => {
                    if value.len() != n_classes {
                        return Err(ModelError::InvalidArtifact(format!(
                            "tree {} leaf {} has {} class weights, expected {}",
                            tree_idx,
                            idx,
                            value.len(),
                            n_classes
                        )));
                    }
                    let total: f64 = value.iter().sum();
                    if value.iter().any(|w| !w.is_finite() || *w < 0.0) || total <= 0.0 {
                        return Err(ModelError::InvalidArtifact(format!(
                            "tree {} leaf {} has invalid class weights",
                            tree_idx, idx
                        )));
                    }
                }
            }
        }
        Ok(())
    }

    /// Walk from the root to the leaf reached by `x`.
    fn leaf(&self, x: &[f64]) -> aqi_core::Result<&[f64]> {
        let mut idx = 0;
        loop {
            match self.nodes.get(idx) {
                Some(Node::Leaf { value }) => return Ok(value.as_slice()),
                Some(Node::Split {
                    feature,
                    threshold,
                    left,
                    right,
                }) => {
                    let v = x.get(*feature).copied().ok_or_else(|| {
                        AqiError::Prediction(format!("split on missing feature {}", feature))
                    })?;
                    idx = if v <= *threshold { *left } else { *right };
                }
                None => {
                    return Err(AqiError::Prediction(format!("dangling node index {}", idx)));
                }
            }
        }
    }
}

#[derive(Debug, Deserialize)]
struct RawForest {
    n_features: usize,
    n_classes: usize,
    trees: Vec<DecisionTree>,
    #[serde(default)]
    feature_importances: Option<Vec<f64>>,
}

#[derive(Debug, PartialEq, Clone)]
pub struct RandomForest {
    n_features: usize,
    n_classes: usize,
    trees: Vec<DecisionTree>,
    feature_importances: Option<Vec<f64>>,
}

impl RandomForest {
    /// Build a forest, validating every tree against the declared shape.
    pub fn new(
        n_features: usize,
        n_classes: usize,
        trees: Vec<DecisionTree>,
        feature_importances: Option<Vec<f64>>,
    ) -> Result<Self> {
        if n_classes == 0 {
            return Err(ModelError::InvalidArtifact("model has no classes".to_string()));
        }
        if trees.is_empty() {
            return Err(ModelError::InvalidArtifact("forest has no trees".to_string()));
        }
        for (i, tree) in trees.iter().enumerate() {
            tree.validate(i, n_features, n_classes)?;
        }
        if let Some(imp) = &feature_importances {
            if imp.len() != n_features {
                return Err(ModelError::InvalidArtifact(format!(
                    "{} feature importances for {} features",
                    imp.len(),
                    n_features
                )));
            }
        }
        Ok(Self {
            n_features,
            n_classes,
            trees,
            feature_importances,
        })
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let raw: RawForest = serde_json::from_str(json).map_err(|source| ModelError::Json {
            artifact: crate::MODEL_FILE.to_string(),
            source,
        })?;
        RandomForest::new(raw.n_features, raw.n_classes, raw.trees, raw.feature_importances)
    }

    pub fn n_trees(&self) -> usize {
        self.trees.len()
    }

    /// Averaged class probabilities for one row.
    pub fn predict_proba(&self, x: &[f64]) -> aqi_core::Result<Vec<f64>> {
        if x.len() != self.n_features {
            return Err(AqiError::FeatureCountMismatch {
                expected: self.n_features,
                got: x.len(),
            });
        }
        let mut proba = vec![0.0; self.n_classes];
        for tree in &self.trees {
            let leaf = tree.leaf(x)?;
            let total: f64 = leaf.iter().sum();
            for (p, w) in proba.iter_mut().zip(leaf) {
                *p += w / total;
            }
        }
        let n = self.trees.len() as f64;
        proba.iter_mut().for_each(|p| *p /= n);
        Ok(proba)
    }
}

impl Model for RandomForest {
    fn predict(&self, features: &[f64]) -> aqi_core::Result<usize> {
        let proba = self.predict_proba(features)?;
        let mut best = 0;
        for (i, p) in proba.iter().enumerate() {
            if *p > proba[best] {
                best = i;
            }
        }
        Ok(best)
    }

    fn n_features(&self) -> usize {
        self.n_features
    }

    fn n_classes(&self) -> usize {
        self.n_classes
    }

    fn feature_importances(&self) -> Option<&[f64]> {
        self.feature_importances.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaf(value: &[f64]) -> Node {
        Node::Leaf {
            value: value.to_vec(),
        }
    }

    fn stump(feature: usize, threshold: f64, low: &[f64], high: &[f64]) -> DecisionTree {
        DecisionTree {
            nodes: vec![
                Node::Split {
                    feature,
                    threshold,
                    left: 1,
                    right: 2,
                },
                leaf(low),
                leaf(high),
            ],
        }
    }

    #[test]
    fn stump_splits_on_threshold_inclusive_left() {
        let forest = RandomForest::new(2, 2, vec![stump(1, 70.0, &[3.0, 1.0], &[0.0, 4.0])], None).unwrap();
        assert_eq!(forest.predict(&[0.0, 69.9]).unwrap(), 0);
        assert_eq!(forest.predict(&[0.0, 70.0]).unwrap(), 0);
        assert_eq!(forest.predict(&[0.0, 70.1]).unwrap(), 1);
    }

    #[test]
    fn forest_averages_normalised_leaves() {
        let trees = vec![
            stump(0, 10.0, &[9.0, 1.0], &[1.0, 9.0]),
            // a heavily weighted leaf must not dominate after normalisation
            stump(0, 10.0, &[0.0, 100.0], &[100.0, 0.0]),
            stump(0, 10.0, &[4.0, 6.0], &[6.0, 4.0]),
        ];
        let forest = RandomForest::new(1, 2, trees, None).unwrap();
        let proba = forest.predict_proba(&[5.0]).unwrap();
        assert!((proba[0] - (0.9 + 0.0 + 0.4) / 3.0).abs() < 0.001);
        assert!((proba[0] + proba[1] - 1.0).abs() < 0.001);
        assert_eq!(forest.predict(&[5.0]).unwrap(), 1);
    }

    #[test]
    fn ties_go_to_lowest_class() {
        let forest = RandomForest::new(1, 3, vec![DecisionTree { nodes: vec![leaf(&[0.0, 1.0, 1.0])] }], None).unwrap();
        assert_eq!(forest.predict(&[0.0]).unwrap(), 1);
    }

    #[test]
    fn wrong_row_width_is_rejected() {
        let forest = RandomForest::new(2, 2, vec![stump(0, 1.0, &[1.0, 0.0], &[0.0, 1.0])], None).unwrap();
        assert_eq!(
            forest.predict(&[1.0]),
            Err(AqiError::FeatureCountMismatch { expected: 2, got: 1 })
        );
    }

    #[test]
    fn backward_child_is_invalid() {
        let tree = DecisionTree {
            nodes: vec![
                leaf(&[1.0, 0.0]),
                Node::Split {
                    feature: 0,
                    threshold: 0.0,
                    left: 0,
                    right: 0,
                },
            ],
        };
        let err = RandomForest::new(1, 2, vec![tree], None).unwrap_err();
        assert!(matches!(err, ModelError::InvalidArtifact(_)));
    }

    #[test]
    fn leaf_width_and_feature_range_are_checked() {
        let err = RandomForest::new(1, 3, vec![stump(0, 1.0, &[1.0, 0.0], &[0.0, 1.0])], None).unwrap_err();
        assert!(matches!(err, ModelError::InvalidArtifact(_)));

        let err = RandomForest::new(1, 2, vec![stump(4, 1.0, &[1.0, 0.0], &[0.0, 1.0])], None).unwrap_err();
        assert!(matches!(err, ModelError::InvalidArtifact(_)));

        let err = RandomForest::new(1, 2, vec![stump(0, 1.0, &[0.0, 0.0], &[0.0, 1.0])], None).unwrap_err();
        assert!(matches!(err, ModelError::InvalidArtifact(_)));
    }

    #[test]
    fn importances_must_cover_every_feature() {
        let trees = vec![stump(0, 1.0, &[1.0, 0.0], &[0.0, 1.0])];
        let err = RandomForest::new(2, 2, trees.clone(), Some(vec![1.0])).unwrap_err();
        assert!(matches!(err, ModelError::InvalidArtifact(_)));
        let forest = RandomForest::new(2, 2, trees, Some(vec![0.75, 0.25])).unwrap();
        assert_eq!(forest.feature_importances(), Some(&[0.75, 0.25][..]));
    }

    #[test]
    fn from_json_parses_tagged_nodes() {
        let json = r#"{
            "n_features": 1,
            "n_classes": 2,
            "trees": [{"nodes": [
                {"kind": "split", "feature": 0, "threshold": 5.0, "left": 1, "right": 2},
                {"kind": "leaf", "value": [1, 0]},
                {"kind": "leaf", "value": [0, 1]}
            ]}]
        }"#;
        let forest = RandomForest::from_json(json).unwrap();
        assert_eq!(forest.n_trees(), 1);
        assert_eq!(forest.feature_importances(), None);
        assert_eq!(forest.predict(&[7.0]).unwrap(), 1);

        let err = RandomForest::from_json("{\"n_features\": 1}").unwrap_err();
        assert!(matches!(err, ModelError::Json { .. }));
    }
}
