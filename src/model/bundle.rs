//! Artifact bundle — loads the pretrained tree, ensemble, and label map.

use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;

use crate::error::ArtifactError;
use crate::model::forest::Forest;
use crate::model::labels::LabelMap;
use crate::model::tree::SurrogateTree;

/// File names expected inside the artifact directory.
pub mod artifact_files {
    pub const SURROGATE_TREE: &str = "surrogate_tree.json";
    pub const FOREST: &str = "forest.json";
    pub const LABELS: &str = "labels.json";
}

/// All pretrained artifacts, loaded once at startup and shared read-only
/// across sessions for the lifetime of the process.
#[derive(Debug)]
pub struct ModelBundle {
    /// Surrogate decision tree driving question order.
    pub surrogate: SurrogateTree,
    /// Final ensemble classifier.
    pub forest: Forest,
    /// Class id to name mapping for the classifier output.
    pub labels: LabelMap,
}

impl ModelBundle {
    /// Load and validate every artifact from `dir`.
    ///
    /// Any missing or structurally invalid file is fatal — the caller is
    /// expected to exit rather than serve without a complete bundle.
    pub fn load(dir: &Path) -> Result<Self, ArtifactError> {
        let surrogate: SurrogateTree = read_json(dir.join(artifact_files::SURROGATE_TREE))?;
        surrogate.validate()?;

        let forest: Forest = read_json(dir.join(artifact_files::FOREST))?;
        forest.validate()?;

        let mut labels: LabelMap = read_json(dir.join(artifact_files::LABELS))?;
        labels.rebuild_index();
        if labels.is_empty() {
            return Err(ArtifactError::Invalid {
                name: artifact_files::LABELS.to_string(),
                reason: "label map is empty".to_string(),
            });
        }

        tracing::info!(
            tree_nodes = surrogate.nodes.len(),
            trees = forest.trees.len(),
            classes = labels.len(),
            fidelity = surrogate.fidelity,
            "model bundle loaded"
        );
        Ok(Self {
            surrogate,
            forest,
            labels,
        })
    }
}

fn read_json<T: DeserializeOwned>(path: PathBuf) -> Result<T, ArtifactError> {
    if !path.exists() {
        return Err(ArtifactError::Missing { path });
    }
    let raw = std::fs::read_to_string(&path).map_err(|source| ArtifactError::Io {
        path: path.clone(),
        source,
    })?;
    serde_json::from_str(&raw).map_err(|source| ArtifactError::Parse { path, source })
}
