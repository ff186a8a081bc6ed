//! Decision path navigator — walks the surrogate tree over collected answers.

use serde::{Deserialize, Serialize};

use crate::interview::answers::AnswerSet;
use crate::model::SurrogateTree;

/// One traversal step: the split that was applied and the value it saw.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraversalStep {
    pub feature: String,
    pub threshold: f64,
    pub value: f64,
}

/// Position in the surrogate tree plus the ordered log of steps taken.
///
/// The log is kept for explanation; traversal correctness depends only on
/// `node`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Cursor {
    pub node: usize,
    pub steps: Vec<TraversalStep>,
}

impl Cursor {
    pub fn new() -> Self {
        Self {
            node: SurrogateTree::ROOT,
            steps: Vec::new(),
        }
    }

    pub fn depth(&self) -> usize {
        self.steps.len()
    }

    /// Render the path taken so far as a human-readable explanation.
    pub fn explain(&self) -> String {
        let mut out = format!("Decision path (depth={}):\n", self.depth());
        for (i, step) in self.steps.iter().enumerate() {
            let went_left = step.value <= step.threshold;
            let comparison = if went_left { "<=" } else { ">" };
            out.push_str(&format!(
                "  Step {i}: {} = {:.2} {comparison} {:.2} -> {}\n",
                step.feature,
                step.value,
                step.threshold,
                if went_left { "left" } else { "right" }
            ));
        }
        out
    }
}

/// Outcome of advancing the navigator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigatorResult {
    /// Traversal stopped at a split whose feature has no answer yet.
    NeedsFeature(String),
    /// Traversal reached a leaf; the tree-driven questioning is finished.
    AtLeaf,
}

/// Advance the cursor as far as the collected answers allow.
///
/// Stops at the first split whose feature is unanswered, or at a leaf. The
/// comparison is `value <= threshold` routes left, ties left — preserved
/// exactly for reproducibility against the pretrained artifacts. The cursor
/// moves and the step log grows in the same operation, so repeating the call
/// with unchanged answers neither moves the cursor nor double-appends steps.
pub fn advance(tree: &SurrogateTree, answers: &AnswerSet, cursor: &mut Cursor) -> NavigatorResult {
    loop {
        let Some(split) = tree.split_of(cursor.node) else {
            return NavigatorResult::AtLeaf;
        };
        let Some(value) = answers.get(split.feature) else {
            return NavigatorResult::NeedsFeature(split.feature.to_string());
        };
        let next = if value <= split.threshold {
            split.left
        } else {
            split.right
        };
        cursor.steps.push(TraversalStep {
            feature: split.feature.to_string(),
            threshold: split.threshold,
            value,
        });
        cursor.node = next;
    }
}
