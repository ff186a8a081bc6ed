//! Final predictor — a majority-vote ensemble of decision trees behind the
//! `Classifier` trait.

use serde::{Deserialize, Serialize};

use crate::error::{ArtifactError, PredictError};
use crate::model::tree::TreeNodes;

/// The black-box seam for the final predictor.
///
/// Given a structurally complete row in `feature_names()` order, returns an
/// integer class id. Implementations must be read-only: the same row always
/// yields the same id.
pub trait Classifier: Send + Sync {
    /// The ordered feature vocabulary the classifier was trained on.
    fn feature_names(&self) -> &[String];

    /// Predict the class id for one complete row.
    fn predict(&self, row: &[f64]) -> Result<i64, PredictError>;
}

/// One tree of the ensemble: node arrays plus the class id stored at each
/// node (read at leaves only).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForestTree {
    #[serde(flatten)]
    pub nodes: TreeNodes,
    /// Majority class id per node.
    pub class: Vec<i64>,
}

/// The pretrained ensemble classifier artifact.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Forest {
    pub trees: Vec<ForestTree>,
    /// Feature names, in the order the ensemble was trained on. Node feature
    /// indices in every tree refer to this list.
    pub feature_names: Vec<String>,
}

impl Forest {
    pub fn validate(&self) -> Result<(), ArtifactError> {
        if self.trees.is_empty() {
            return Err(ArtifactError::Invalid {
                name: "forest".to_string(),
                reason: "ensemble has no trees".to_string(),
            });
        }
        for (i, tree) in self.trees.iter().enumerate() {
            tree.nodes
                .validate(&format!("forest tree {i}"), self.feature_names.len())?;
            if tree.class.len() != tree.nodes.len() {
                return Err(ArtifactError::Invalid {
                    name: format!("forest tree {i}"),
                    reason: format!(
                        "class array length {} does not match node count {}",
                        tree.class.len(),
                        tree.nodes.len()
                    ),
                });
            }
        }
        Ok(())
    }

    /// Walk one tree from the root to a leaf and return its class id.
    fn vote(tree: &ForestTree, row: &[f64]) -> Result<i64, PredictError> {
        let mut node = 0usize;
        while let Some(split) = tree.nodes.split(node) {
            let value = *row
                .get(split.feature_index)
                .ok_or(PredictError::FeatureIndexOutOfRange {
                    index: split.feature_index,
                    len: row.len(),
                })?;
            // Ties route left, matching the surrogate traversal.
            node = if value <= split.threshold {
                split.left
            } else {
                split.right
            };
        }
        Ok(tree.class[node])
    }
}

impl Classifier for Forest {
    fn feature_names(&self) -> &[String] {
        &self.feature_names
    }

    fn predict(&self, row: &[f64]) -> Result<i64, PredictError> {
        if row.len() != self.feature_names.len() {
            return Err(PredictError::RowLength {
                got: row.len(),
                expected: self.feature_names.len(),
            });
        }
        if self.trees.is_empty() {
            return Err(PredictError::EmptyEnsemble);
        }

        let mut votes: std::collections::BTreeMap<i64, usize> = std::collections::BTreeMap::new();
        for tree in &self.trees {
            *votes.entry(Self::vote(tree, row)?).or_default() += 1;
        }
        // Majority vote; ties break toward the smallest class id so that
        // prediction is deterministic.
        let (winner, _) = votes
            .into_iter()
            .max_by(|(id_a, n_a), (id_b, n_b)| n_a.cmp(n_b).then(id_b.cmp(id_a)))
            .expect("at least one tree voted");
        Ok(winner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::tree::NO_CHILD;

    /// A stump voting `low_class` when feature 0 <= threshold, else `high_class`.
    fn stump(threshold: f64, low_class: i64, high_class: i64) -> ForestTree {
        ForestTree {
            nodes: TreeNodes {
                feature: vec![0, -2, -2],
                threshold: vec![threshold, -2.0, -2.0],
                children_left: vec![1, NO_CHILD, NO_CHILD],
                children_right: vec![2, NO_CHILD, NO_CHILD],
            },
            class: vec![-1, low_class, high_class],
        }
    }

    fn two_feature_forest() -> Forest {
        Forest {
            trees: vec![stump(10.0, 0, 1), stump(20.0, 0, 1), stump(30.0, 0, 2)],
            feature_names: vec!["age".to_string(), "weight".to_string()],
        }
    }

    #[test]
    fn majority_vote_wins() {
        let forest = two_feature_forest();
        // age 15: trees vote [1, 0, 0] -> class 0.
        assert_eq!(forest.predict(&[15.0, 0.0]).unwrap(), 0);
        // age 25: trees vote [1, 1, 0] -> class 1.
        assert_eq!(forest.predict(&[25.0, 0.0]).unwrap(), 1);
    }

    #[test]
    fn tie_breaks_toward_smallest_class_id() {
        let forest = Forest {
            trees: vec![stump(10.0, 0, 1), stump(10.0, 2, 2)],
            feature_names: vec!["age".to_string()],
        };
        // age 5: votes are {0: 1, 2: 1} -> class 0.
        assert_eq!(forest.predict(&[5.0]).unwrap(), 0);
    }

    #[test]
    fn threshold_tie_routes_left() {
        let forest = Forest {
            trees: vec![stump(10.0, 7, 8)],
            feature_names: vec!["age".to_string()],
        };
        assert_eq!(forest.predict(&[10.0]).unwrap(), 7);
        assert_eq!(forest.predict(&[10.000001]).unwrap(), 8);
    }

    #[test]
    fn wrong_row_length_is_an_error() {
        let forest = two_feature_forest();
        assert!(matches!(
            forest.predict(&[1.0]),
            Err(PredictError::RowLength { got: 1, expected: 2 })
        ));
    }

    #[test]
    fn empty_ensemble_rejected_by_validate() {
        let forest = Forest {
            trees: vec![],
            feature_names: vec!["age".to_string()],
        };
        assert!(forest.validate().is_err());
    }

    #[test]
    fn class_array_must_cover_all_nodes() {
        let mut forest = two_feature_forest();
        forest.trees[0].class.pop();
        assert!(forest.validate().is_err());
    }

    #[test]
    fn same_row_same_prediction() {
        let forest = two_feature_forest();
        let row = [22.0, 55.0];
        let first = forest.predict(&row).unwrap();
        for _ in 0..5 {
            assert_eq!(forest.predict(&row).unwrap(), first);
        }
    }
}
