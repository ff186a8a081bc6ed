//! Final predictor adapter — assembles the full row and maps the output.

use serde::{Deserialize, Serialize};

use crate::error::PredictError;
use crate::interview::answers::AnswerSet;
use crate::model::labels::{LabelMap, UNKNOWN_LABEL};
use crate::model::Classifier;

/// The classifier's categorical output, translated to a class name.
/// Immutable once computed for a given answer set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Prediction {
    pub class_id: i64,
    pub label: String,
}

/// Invoke the classifier once over a structurally complete row.
///
/// Every feature in the classifier's vocabulary is present, in vocabulary
/// order, defaulting to `0.0` when unanswered. An unrecognized class id maps
/// to the designated unknown label rather than failing; an error from the
/// classifier itself propagates for the caller to surface as a plain
/// "prediction failed" message.
pub fn finalize(
    answers: &AnswerSet,
    classifier: &dyn Classifier,
    labels: &LabelMap,
) -> Result<Prediction, PredictError> {
    let row: Vec<f64> = classifier
        .feature_names()
        .iter()
        .map(|f| answers.get(f).unwrap_or(0.0))
        .collect();

    let class_id = classifier.predict(&row)?;
    let label = match labels.name_of(class_id) {
        Some(name) => name.to_string(),
        None => {
            tracing::warn!(class_id, "classifier returned an unmapped class id");
            UNKNOWN_LABEL.to_string()
        }
    };
    Ok(Prediction { class_id, label })
}
