//! Pretrained model artifacts: surrogate tree, ensemble classifier, labels.

pub mod bundle;
pub mod forest;
pub mod labels;
pub mod tree;

pub use bundle::ModelBundle;
pub use forest::{Classifier, Forest};
pub use labels::{LabelMap, UNKNOWN_LABEL};
pub use tree::SurrogateTree;
