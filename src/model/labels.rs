//! Label encoding — classifier class ids to human-readable names.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// The designated label returned for class ids that have no entry.
pub const UNKNOWN_LABEL: &str = "Unknown";

/// Mapping between classifier-internal integer ids and class names.
///
/// Loaded once from the label-encoding artifact and immutable thereafter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LabelMap {
    classes: Vec<LabelEntry>,
    #[serde(skip)]
    by_id: BTreeMap<i64, usize>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LabelEntry {
    pub id: i64,
    pub name: String,
}

impl LabelMap {
    pub fn new(entries: Vec<(i64, String)>) -> Self {
        let classes = entries
            .into_iter()
            .map(|(id, name)| LabelEntry { id, name })
            .collect();
        let mut map = Self {
            classes,
            by_id: BTreeMap::new(),
        };
        map.rebuild_index();
        map
    }

    /// Rebuild the id index. Must be called after deserialization.
    pub fn rebuild_index(&mut self) {
        self.by_id = self
            .classes
            .iter()
            .enumerate()
            .map(|(i, e)| (e.id, i))
            .collect();
    }

    /// The class name for `id`, or `None` if the id is not in the table.
    pub fn name_of(&self, id: i64) -> Option<&str> {
        self.by_id.get(&id).map(|&i| self.classes[i].name.as_str())
    }

    /// Inverse lookup: the id for a class name.
    pub fn id_of(&self, name: &str) -> Option<i64> {
        self.classes.iter().find(|e| e.name == name).map(|e| e.id)
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn obesity_labels() -> LabelMap {
        LabelMap::new(vec![
            (0, "Insufficient Weight".to_string()),
            (1, "Normal Weight".to_string()),
            (2, "Obesity Type_I".to_string()),
            (3, "Obesity Type_II".to_string()),
            (4, "Obesity Type_III".to_string()),
            (5, "Overweight Level_I".to_string()),
            (6, "Overweight Level_II".to_string()),
        ])
    }

    #[test]
    fn name_lookup() {
        let labels = obesity_labels();
        assert_eq!(labels.name_of(2), Some("Obesity Type_I"));
        assert_eq!(labels.name_of(6), Some("Overweight Level_II"));
        assert_eq!(labels.name_of(99), None);
    }

    #[test]
    fn inverse_lookup() {
        let labels = obesity_labels();
        assert_eq!(labels.id_of("Normal Weight"), Some(1));
        assert_eq!(labels.id_of("nope"), None);
    }

    #[test]
    fn index_survives_serde() {
        let labels = obesity_labels();
        let json = serde_json::to_string(&labels).unwrap();
        let mut parsed: LabelMap = serde_json::from_str(&json).unwrap();
        parsed.rebuild_index();
        assert_eq!(parsed.name_of(4), Some("Obesity Type_III"));
        assert_eq!(parsed.len(), 7);
    }
}
