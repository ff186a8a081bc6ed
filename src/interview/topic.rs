//! Topics — doctor-style clusters of related features, presented together.

use serde::{Deserialize, Serialize};

use crate::interview::answers::{AnswerSet, Vocabulary};

/// Canonical feature names shared by the artifacts and the topic tables.
pub mod feature {
    pub const AGE: &str = "age";
    pub const HEIGHT: &str = "height";
    pub const WEIGHT: &str = "weight";
    pub const GENDER_MALE: &str = "gender_Male";
    pub const FAVC: &str = "favc";
    pub const FCVC: &str = "fcvc";
    pub const NCP: &str = "ncp";
    pub const CH2O: &str = "ch2o";
    pub const SCC: &str = "scc";
    pub const CAEC_ALWAYS: &str = "caec_Always";
    pub const CAEC_FREQUENTLY: &str = "caec_Frequently";
    pub const CAEC_SOMETIMES: &str = "caec_Sometimes";
    pub const FAF: &str = "faf";
    pub const MTRANS_BIKE: &str = "mtrans_Bike";
    pub const MTRANS_MOTORBIKE: &str = "mtrans_Motorbike";
    pub const MTRANS_PUBLIC: &str = "mtrans_Public_Transportation";
    pub const MTRANS_WALKING: &str = "mtrans_Walking";
    pub const TUE: &str = "tue";
    pub const FAMILY_HISTORY: &str = "family_history_with_overweight";
}

/// A doctor-style question cluster.
///
/// Each variant carries an ordered feature list; adding a topic is a
/// compile-time-checked change because every dispatch site matches
/// exhaustively.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Topic {
    Vitals,
    Diet,
    Activity,
    ScreenTime,
    Family,
}

impl Topic {
    /// All topics, in presentation order. The first entry doubles as the
    /// fallback for features with no topic assignment.
    pub const ALL: [Topic; 5] = [
        Topic::Vitals,
        Topic::Diet,
        Topic::Activity,
        Topic::ScreenTime,
        Topic::Family,
    ];

    /// The ordered features belonging to this topic.
    pub fn features(&self) -> &'static [&'static str] {
        use feature::*;
        match self {
            Topic::Vitals => &[AGE, HEIGHT, WEIGHT, GENDER_MALE],
            Topic::Diet => &[
                FAVC,
                FCVC,
                NCP,
                CH2O,
                SCC,
                CAEC_ALWAYS,
                CAEC_FREQUENTLY,
                CAEC_SOMETIMES,
            ],
            Topic::Activity => &[
                FAF,
                MTRANS_BIKE,
                MTRANS_MOTORBIKE,
                MTRANS_PUBLIC,
                MTRANS_WALKING,
            ],
            Topic::ScreenTime => &[TUE],
            Topic::Family => &[FAMILY_HISTORY],
        }
    }

    /// Reverse lookup: the topic a feature belongs to.
    ///
    /// Features with no topic assignment fall back to the first-declared
    /// topic rather than failing, so the interview can always make progress.
    /// Changing this fallback would change question order against existing
    /// artifacts.
    pub fn of_feature(name: &str) -> Topic {
        for topic in Topic::ALL {
            if topic.features().contains(&name) {
                return topic;
            }
        }
        tracing::warn!(feature = name, "feature has no topic; falling back to {}", Topic::ALL[0]);
        Topic::ALL[0]
    }

    /// Every feature of this topic that is in the recognized vocabulary and
    /// has no answer yet, in declared order. Pure function.
    pub fn unresolved(&self, answers: &AnswerSet, vocab: &Vocabulary) -> Vec<&'static str> {
        self.features()
            .iter()
            .copied()
            .filter(|f| vocab.contains(f) && !answers.contains(f))
            .collect()
    }
}

impl std::fmt::Display for Topic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Topic::Vitals => "Vitals",
            Topic::Diet => "Diet",
            Topic::Activity => "Activity",
            Topic::ScreenTime => "Screen Time",
            Topic::Family => "Family",
        };
        write!(f, "{s}")
    }
}

/// A single categorical choice fanned out into mutually-exclusive binary
/// features in the model vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OneHotGroup {
    /// Snacking between meals (CAEC).
    Snacking,
    /// Primary transport mode (MTRANS).
    Transport,
}

impl OneHotGroup {
    /// The underlying binary features, in artifact order.
    pub fn members(&self) -> &'static [&'static str] {
        use feature::*;
        match self {
            OneHotGroup::Snacking => &[CAEC_ALWAYS, CAEC_FREQUENTLY, CAEC_SOMETIMES],
            OneHotGroup::Transport => &[
                MTRANS_BIKE,
                MTRANS_MOTORBIKE,
                MTRANS_PUBLIC,
                MTRANS_WALKING,
            ],
        }
    }

    /// The group a binary feature belongs to, if any.
    pub fn of_feature(name: &str) -> Option<OneHotGroup> {
        [OneHotGroup::Snacking, OneHotGroup::Transport]
            .into_iter()
            .find(|g| g.members().contains(&name))
    }
}

/// Snacking-between-meals choice (expands to the `caec_*` features).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SnackingFrequency {
    Always,
    Frequently,
    Sometimes,
}

impl SnackingFrequency {
    pub const ALL: [SnackingFrequency; 3] = [Self::Always, Self::Frequently, Self::Sometimes];

    /// The binary feature set to `1.0` for this choice.
    pub fn active_feature(&self) -> &'static str {
        match self {
            Self::Always => feature::CAEC_ALWAYS,
            Self::Frequently => feature::CAEC_FREQUENTLY,
            Self::Sometimes => feature::CAEC_SOMETIMES,
        }
    }
}

impl std::fmt::Display for SnackingFrequency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Always => "Always",
            Self::Frequently => "Frequently",
            Self::Sometimes => "Sometimes",
        };
        write!(f, "{s}")
    }
}

/// Primary transport mode choice (expands to the `mtrans_*` features).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransportMode {
    Bike,
    Motorbike,
    PublicTransportation,
    Walking,
}

impl TransportMode {
    pub const ALL: [TransportMode; 4] = [
        Self::Bike,
        Self::Motorbike,
        Self::PublicTransportation,
        Self::Walking,
    ];

    /// The binary feature set to `1.0` for this choice.
    pub fn active_feature(&self) -> &'static str {
        match self {
            Self::Bike => feature::MTRANS_BIKE,
            Self::Motorbike => feature::MTRANS_MOTORBIKE,
            Self::PublicTransportation => feature::MTRANS_PUBLIC,
            Self::Walking => feature::MTRANS_WALKING,
        }
    }
}

impl std::fmt::Display for TransportMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Bike => "Bike",
            Self::Motorbike => "Motorbike",
            Self::PublicTransportation => "Public Transportation",
            Self::Walking => "Walking",
        };
        write!(f, "{s}")
    }
}

/// Answers submitted for one presented topic.
///
/// Scalar features arrive as name/value pairs; one-hot groups arrive as the
/// single-choice enums and are expanded to their binary members only when the
/// submission is merged, which makes "exactly one member set" a type-level
/// guarantee rather than a surface convention.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TopicAnswers {
    #[serde(default)]
    pub values: std::collections::BTreeMap<String, f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub snacking: Option<SnackingFrequency>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transport: Option<TransportMode>,
}

impl TopicAnswers {
    /// Flatten the submission to feature/value pairs.
    ///
    /// Scalar entries naming a one-hot member are dropped — group members may
    /// only be set through their choice enum.
    pub fn expand(&self) -> Vec<(String, f64)> {
        let mut out = Vec::with_capacity(self.values.len() + 8);
        for (name, value) in &self.values {
            if OneHotGroup::of_feature(name).is_some() {
                tracing::warn!(
                    feature = %name,
                    "one-hot member submitted as a scalar; ignored"
                );
                continue;
            }
            out.push((name.clone(), *value));
        }
        if let Some(choice) = self.snacking {
            let active = choice.active_feature();
            for member in OneHotGroup::Snacking.members() {
                out.push(((*member).to_string(), if *member == active { 1.0 } else { 0.0 }));
            }
        }
        if let Some(choice) = self.transport {
            let active = choice.active_feature();
            for member in OneHotGroup::Transport.members() {
                out.push(((*member).to_string(), if *member == active { 1.0 } else { 0.0 }));
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vocab_of(names: &[&str]) -> Vocabulary {
        Vocabulary::new(names.iter().map(|s| s.to_string()).collect())
    }

    #[test]
    fn every_feature_maps_back_to_its_topic() {
        for topic in Topic::ALL {
            for f in topic.features() {
                assert_eq!(Topic::of_feature(f), topic, "feature {f}");
            }
        }
    }

    #[test]
    fn topics_partition_their_features() {
        // A feature belongs to at most one topic.
        let mut seen = std::collections::HashSet::new();
        for topic in Topic::ALL {
            for f in topic.features() {
                assert!(seen.insert(*f), "feature {f} appears in two topics");
            }
        }
    }

    #[test]
    fn unknown_feature_falls_back_to_first_topic() {
        assert_eq!(Topic::of_feature("no_such_feature"), Topic::Vitals);
    }

    #[test]
    fn unresolved_respects_order_answers_and_vocabulary() {
        let vocab = vocab_of(&[feature::AGE, feature::WEIGHT, feature::GENDER_MALE]);
        let mut answers = AnswerSet::new();
        answers.insert(&vocab, feature::WEIGHT, 45.0).unwrap();

        // height is not in the vocabulary, weight is answered.
        let unresolved = Topic::Vitals.unresolved(&answers, &vocab);
        assert_eq!(unresolved, vec![feature::AGE, feature::GENDER_MALE]);
    }

    #[test]
    fn answered_feature_never_reappears() {
        let vocab = vocab_of(Topic::Vitals.features());
        let mut answers = AnswerSet::new();
        for f in Topic::Vitals.features() {
            answers.insert(&vocab, f, 1.0).unwrap();
            assert!(!Topic::Vitals.unresolved(&answers, &vocab).contains(f));
        }
        assert!(Topic::Vitals.unresolved(&answers, &vocab).is_empty());
    }

    #[test]
    fn one_hot_groups_cover_expected_members() {
        assert_eq!(OneHotGroup::of_feature(feature::CAEC_ALWAYS), Some(OneHotGroup::Snacking));
        assert_eq!(OneHotGroup::of_feature(feature::MTRANS_WALKING), Some(OneHotGroup::Transport));
        assert_eq!(OneHotGroup::of_feature(feature::AGE), None);
    }

    #[test]
    fn expansion_is_exactly_one_hot() {
        let answers = TopicAnswers {
            transport: Some(TransportMode::Walking),
            ..Default::default()
        };
        let expanded = answers.expand();
        let ones: Vec<_> = expanded.iter().filter(|(_, v)| *v == 1.0).collect();
        let zeros: Vec<_> = expanded.iter().filter(|(_, v)| *v == 0.0).collect();
        assert_eq!(ones.len(), 1);
        assert_eq!(ones[0].0, feature::MTRANS_WALKING);
        assert_eq!(zeros.len(), OneHotGroup::Transport.members().len() - 1);
    }

    #[test]
    fn every_choice_expands_one_hot() {
        for choice in SnackingFrequency::ALL {
            let answers = TopicAnswers {
                snacking: Some(choice),
                ..Default::default()
            };
            let expanded = answers.expand();
            assert_eq!(expanded.len(), OneHotGroup::Snacking.members().len());
            assert_eq!(expanded.iter().filter(|(_, v)| *v == 1.0).count(), 1);
        }
        for choice in TransportMode::ALL {
            let answers = TopicAnswers {
                transport: Some(choice),
                ..Default::default()
            };
            let expanded = answers.expand();
            assert_eq!(expanded.iter().filter(|(_, v)| *v == 1.0).count(), 1);
        }
    }

    #[test]
    fn scalar_submission_of_group_member_is_ignored() {
        let mut values = std::collections::BTreeMap::new();
        values.insert(feature::CAEC_ALWAYS.to_string(), 1.0);
        values.insert(feature::FAVC.to_string(), 1.0);
        let answers = TopicAnswers {
            values,
            ..Default::default()
        };
        let expanded = answers.expand();
        assert_eq!(expanded.len(), 1);
        assert_eq!(expanded[0].0, feature::FAVC);
    }
}
