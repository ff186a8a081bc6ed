//! Answer set and the recognized feature vocabulary.

use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::error::InterviewError;
use crate::model::ModelBundle;

/// The recognized feature vocabulary: every name either model knows.
///
/// Ordered by the final classifier's feature list (the order predictions are
/// sensitive to), followed by any surrogate-tree-only features. Lookup is by
/// name, never by position.
#[derive(Debug, Clone)]
pub struct Vocabulary {
    names: Vec<String>,
    index: HashSet<String>,
}

impl Vocabulary {
    pub fn new(names: Vec<String>) -> Self {
        let index = names.iter().cloned().collect();
        Self { names, index }
    }

    /// Union of the classifier vocabulary and the surrogate tree's features,
    /// classifier order first.
    pub fn unified(bundle: &ModelBundle) -> Self {
        let mut names: Vec<String> = bundle.forest.feature_names.clone();
        let mut seen: HashSet<&str> = bundle
            .forest
            .feature_names
            .iter()
            .map(String::as_str)
            .collect();
        for f in &bundle.surrogate.feature_names {
            if !seen.contains(f.as_str()) {
                names.push(f.clone());
                seen.insert(f.as_str());
            }
        }
        drop(seen);
        Self::new(names)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains(name)
    }

    /// Names in vocabulary order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// Collected answers: feature name → numeric value.
///
/// Grows monotonically during an interview — features are only added or
/// overwritten, never removed before a reset. Keys are validated against the
/// vocabulary at insertion time.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnswerSet {
    values: BTreeMap<String, f64>,
}

impl AnswerSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, feature: &str) -> bool {
        self.values.contains_key(feature)
    }

    pub fn get(&self, feature: &str) -> Option<f64> {
        self.values.get(feature).copied()
    }

    /// Record an answer. Rejects feature names outside the vocabulary.
    pub fn insert(
        &mut self,
        vocab: &Vocabulary,
        feature: &str,
        value: f64,
    ) -> Result<(), InterviewError> {
        if !vocab.contains(feature) {
            return Err(InterviewError::FeatureNotInVocabulary {
                feature: feature.to_string(),
            });
        }
        self.values.insert(feature.to_string(), value);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.values.iter().map(|(k, v)| (k.as_str(), *v))
    }
}
