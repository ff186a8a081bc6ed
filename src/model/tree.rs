//! Surrogate decision tree — sklearn-style parallel node arrays.

use serde::{Deserialize, Serialize};

use crate::error::ArtifactError;

/// Child-index sentinel marking "no child". A node with no children is a leaf.
pub const NO_CHILD: i64 = -1;

/// Parallel node arrays for one binary decision tree.
///
/// Node 0 is the root. Internal nodes have exactly two children and both
/// child indices are strictly greater than the parent index, so any walk
/// from the root terminates.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TreeNodes {
    /// Split feature index per node (ignored for leaves).
    pub feature: Vec<i64>,
    /// Split threshold per node (ignored for leaves).
    pub threshold: Vec<f64>,
    /// Left child index per node, `-1` for none.
    pub children_left: Vec<i64>,
    /// Right child index per node, `-1` for none.
    pub children_right: Vec<i64>,
}

/// A resolved internal-node split.
#[derive(Debug, Clone, Copy)]
pub struct NodeSplit {
    pub feature_index: usize,
    pub threshold: f64,
    pub left: usize,
    pub right: usize,
}

impl TreeNodes {
    pub fn len(&self) -> usize {
        self.feature.len()
    }

    pub fn is_empty(&self) -> bool {
        self.feature.is_empty()
    }

    /// Whether `node` is a leaf (no children on either side).
    pub fn is_leaf(&self, node: usize) -> bool {
        self.children_left[node] == NO_CHILD && self.children_right[node] == NO_CHILD
    }

    /// The split stored at `node`, or `None` if it is a leaf.
    pub fn split(&self, node: usize) -> Option<NodeSplit> {
        if self.is_leaf(node) {
            return None;
        }
        Some(NodeSplit {
            feature_index: self.feature[node] as usize,
            threshold: self.threshold[node],
            left: self.children_left[node] as usize,
            right: self.children_right[node] as usize,
        })
    }

    /// Structural validation: parallel arrays agree in length, internal nodes
    /// have exactly two forward-pointing children, and split feature indices
    /// are within the vocabulary.
    pub fn validate(&self, name: &str, n_features: usize) -> Result<(), ArtifactError> {
        let invalid = |reason: String| ArtifactError::Invalid {
            name: name.to_string(),
            reason,
        };

        let n = self.feature.len();
        if n == 0 {
            return Err(invalid("tree has no nodes".to_string()));
        }
        if self.threshold.len() != n
            || self.children_left.len() != n
            || self.children_right.len() != n
        {
            return Err(invalid(format!(
                "node arrays disagree in length: feature={}, threshold={}, left={}, right={}",
                n,
                self.threshold.len(),
                self.children_left.len(),
                self.children_right.len()
            )));
        }

        for node in 0..n {
            let left = self.children_left[node];
            let right = self.children_right[node];
            match (left, right) {
                (NO_CHILD, NO_CHILD) => {}
                (NO_CHILD, _) | (_, NO_CHILD) => {
                    return Err(invalid(format!("node {node} has exactly one child")));
                }
                (l, r) => {
                    for child in [l, r] {
                        if child <= node as i64 || child >= n as i64 {
                            return Err(invalid(format!(
                                "node {node} has out-of-range child {child}"
                            )));
                        }
                    }
                    let fi = self.feature[node];
                    if fi < 0 || fi >= n_features as i64 {
                        return Err(invalid(format!(
                            "node {node} splits on out-of-range feature index {fi}"
                        )));
                    }
                }
            }
        }
        Ok(())
    }
}

/// The pretrained surrogate tree artifact: node arrays plus the ordered
/// feature-name list aligned to the node feature indices.
///
/// The surrogate only drives question order — its leaf classifications are
/// never used at serving time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SurrogateTree {
    #[serde(flatten)]
    pub nodes: TreeNodes,
    /// Feature names, indexed by the node `feature` array.
    pub feature_names: Vec<String>,
    /// Agreement of the surrogate with the final classifier on a holdout
    /// set, as recorded by the offline training job. Display only.
    #[serde(default)]
    pub fidelity: Option<f64>,
}

/// An internal-node split with its feature name resolved.
#[derive(Debug, Clone, Copy)]
pub struct Split<'a> {
    pub feature: &'a str,
    pub threshold: f64,
    pub left: usize,
    pub right: usize,
}

impl SurrogateTree {
    /// The root node index.
    pub const ROOT: usize = 0;

    pub fn validate(&self) -> Result<(), ArtifactError> {
        self.nodes.validate("surrogate tree", self.feature_names.len())
    }

    pub fn is_leaf(&self, node: usize) -> bool {
        self.nodes.is_leaf(node)
    }

    /// The split at `node` with its feature name, or `None` for leaves.
    pub fn split_of(&self, node: usize) -> Option<Split<'_>> {
        self.nodes.split(node).map(|s| Split {
            feature: &self.feature_names[s.feature_index],
            threshold: s.threshold,
            left: s.left,
            right: s.right,
        })
    }
}
