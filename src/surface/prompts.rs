//! Question metadata — prompt text, input kind, bounds, and defaults per
//! feature, so a surface can render a topic without hard-coding feature
//! semantics.

use crate::interview::topic::{OneHotGroup, SnackingFrequency, TopicAnswers, TransportMode, feature};

/// How a question is answered.
#[derive(Debug, Clone, PartialEq)]
pub enum QuestionKind {
    /// Yes/no, recorded as 1.0/0.0.
    YesNo { default: bool },
    /// Free numeric input within bounds.
    Number {
        min: f64,
        max: f64,
        step: f64,
        default: f64,
    },
    /// Small integer scale.
    Scale { min: i64, max: i64, default: i64 },
    /// Snacking single choice (expands to the `caec_*` members).
    Snacking { default: SnackingFrequency },
    /// Transport single choice (expands to the `mtrans_*` members).
    Transport { default: TransportMode },
}

/// What a question writes into the submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuestionTarget {
    Feature(String),
    Group(OneHotGroup),
}

/// One renderable question.
#[derive(Debug, Clone, PartialEq)]
pub struct QuestionSpec {
    pub prompt: String,
    pub target: QuestionTarget,
    pub kind: QuestionKind,
}

fn scalar(name: &str, prompt: &str, kind: QuestionKind) -> QuestionSpec {
    QuestionSpec {
        prompt: prompt.to_string(),
        target: QuestionTarget::Feature(name.to_string()),
        kind,
    }
}

/// The question for a scalar feature. Unrecognized features get a generic
/// numeric prompt so the interview can still collect them.
fn question_for_feature(name: &str) -> QuestionSpec {
    use QuestionKind::*;
    match name {
        feature::AGE => scalar(name, "Age (years)", Scale { min: 14, max: 18, default: 16 }),
        feature::HEIGHT => scalar(
            name,
            "Height (meters)",
            Number { min: 1.0, max: 2.2, step: 0.01, default: 1.45 },
        ),
        feature::WEIGHT => scalar(
            name,
            "Weight (kg)",
            Number { min: 10.0, max: 200.0, step: 0.5, default: 45.0 },
        ),
        feature::GENDER_MALE => scalar(
            name,
            "Gender: Male? (Yes for Male, No for Female)",
            YesNo { default: false },
        ),
        feature::FAVC => scalar(
            name,
            "Do you often eat high-calorie foods (FAVC)?",
            YesNo { default: false },
        ),
        feature::FCVC => scalar(
            name,
            "Vegetable intake (1 = rarely, 3 = daily)",
            Scale { min: 1, max: 3, default: 2 },
        ),
        feature::NCP => scalar(
            name,
            "Main meals per day (NCP)",
            Scale { min: 1, max: 6, default: 3 },
        ),
        feature::CH2O => scalar(
            name,
            "Daily water (liters)",
            Scale { min: 1, max: 5, default: 2 },
        ),
        feature::SCC => scalar(
            name,
            "Do you monitor calorie intake (SCC)?",
            YesNo { default: false },
        ),
        feature::FAF => scalar(
            name,
            "Physical activity frequency (0 none - 3 high)",
            Scale { min: 0, max: 3, default: 1 },
        ),
        feature::TUE => scalar(
            name,
            "Tech use per day (0 low - 3 high)",
            Scale { min: 0, max: 3, default: 2 },
        ),
        feature::FAMILY_HISTORY => scalar(
            name,
            "Family history of overweight?",
            YesNo { default: false },
        ),
        other => scalar(
            other,
            &format!("Provide {other}"),
            Number { min: -1e6, max: 1e6, step: 0.1, default: 0.0 },
        ),
    }
}

fn question_for_group(group: OneHotGroup) -> QuestionSpec {
    match group {
        OneHotGroup::Snacking => QuestionSpec {
            prompt: "Snacking between meals (CAEC)".to_string(),
            target: QuestionTarget::Group(group),
            kind: QuestionKind::Snacking {
                default: SnackingFrequency::Frequently,
            },
        },
        OneHotGroup::Transport => QuestionSpec {
            prompt: "Primary transport mode (MTRANS)".to_string(),
            target: QuestionTarget::Group(group),
            kind: QuestionKind::Transport {
                default: TransportMode::PublicTransportation,
            },
        },
    }
}

/// Build the renderable question list for a set of unresolved features.
///
/// One-hot members collapse into a single choice question per group,
/// regardless of how many of them are unresolved.
pub fn questions_for(features: &[String]) -> Vec<QuestionSpec> {
    let mut out = Vec::with_capacity(features.len());
    let mut groups_seen = Vec::new();
    for name in features {
        match OneHotGroup::of_feature(name) {
            Some(group) => {
                if !groups_seen.contains(&group) {
                    groups_seen.push(group);
                    out.push(question_for_group(group));
                }
            }
            None => out.push(question_for_feature(name)),
        }
    }
    out
}

/// Answer every question with its default. Used by scripted surfaces and
/// tests; also the "just press Enter" path of the terminal surface.
pub fn answers_from_defaults(questions: &[QuestionSpec]) -> TopicAnswers {
    let mut answers = TopicAnswers::default();
    for q in questions {
        match (&q.target, &q.kind) {
            (QuestionTarget::Feature(name), QuestionKind::YesNo { default }) => {
                answers
                    .values
                    .insert(name.clone(), if *default { 1.0 } else { 0.0 });
            }
            (QuestionTarget::Feature(name), QuestionKind::Number { default, .. }) => {
                answers.values.insert(name.clone(), *default);
            }
            (QuestionTarget::Feature(name), QuestionKind::Scale { default, .. }) => {
                answers.values.insert(name.clone(), *default as f64);
            }
            (QuestionTarget::Group(_), QuestionKind::Snacking { default }) => {
                answers.snacking = Some(*default);
            }
            (QuestionTarget::Group(_), QuestionKind::Transport { default }) => {
                answers.transport = Some(*default);
            }
            (target, kind) => {
                tracing::warn!(?target, ?kind, "mismatched question target and kind");
            }
        }
    }
    answers
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn group_members_collapse_to_one_question() {
        let features: Vec<String> = [
            feature::FAF,
            feature::MTRANS_BIKE,
            feature::MTRANS_MOTORBIKE,
            feature::MTRANS_PUBLIC,
            feature::MTRANS_WALKING,
        ]
        .iter()
        .map(|s| s.to_string())
        .collect();

        let questions = questions_for(&features);
        assert_eq!(questions.len(), 2);
        assert_eq!(questions[0].target, QuestionTarget::Feature(feature::FAF.to_string()));
        assert_eq!(
            questions[1].target,
            QuestionTarget::Group(OneHotGroup::Transport)
        );
    }

    #[test]
    fn unknown_feature_gets_generic_prompt() {
        let questions = questions_for(&["mystery".to_string()]);
        assert_eq!(questions.len(), 1);
        assert!(questions[0].prompt.contains("mystery"));
        assert!(matches!(questions[0].kind, QuestionKind::Number { .. }));
    }

    #[test]
    fn defaults_answer_every_question() {
        let features: Vec<String> = [
            feature::AGE,
            feature::FAVC,
            feature::CAEC_ALWAYS,
            feature::CAEC_FREQUENTLY,
            feature::CAEC_SOMETIMES,
        ]
        .iter()
        .map(|s| s.to_string())
        .collect();
        let questions = questions_for(&features);
        let answers = answers_from_defaults(&questions);

        assert_eq!(answers.values.get(feature::AGE), Some(&16.0));
        assert_eq!(answers.values.get(feature::FAVC), Some(&0.0));
        assert_eq!(answers.snacking, Some(SnackingFrequency::Frequently));
        // Expansion covers all three caec members.
        assert_eq!(answers.expand().len(), 2 + 3);
    }
}
