//! Per-session interview state machine.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::error::{Error, InterviewError};
use crate::interview::answers::{AnswerSet, Vocabulary};
use crate::interview::finalize::{finalize, Prediction};
use crate::interview::navigator::{advance, Cursor, NavigatorResult};
use crate::interview::phase::InterviewPhase;
use crate::interview::topic::{feature, Topic, TopicAnswers};

/// What the interview wants next.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Step {
    /// Present `topic`, collecting answers for `features`.
    Ask { topic: Topic, features: Vec<String> },
    /// Nothing left to ask; the session is ready for the final prediction.
    Finished,
}

/// One interview session.
///
/// Owns all mutable per-session state exclusively; the model artifacts are
/// shared read-only. Never shared across sessions.
pub struct Session {
    id: Uuid,
    created_at: DateTime<Utc>,
    bundle: Arc<crate::model::ModelBundle>,
    vocab: Arc<Vocabulary>,
    answers: AnswerSet,
    cursor: Cursor,
    phase: InterviewPhase,
    last_topic: Option<Topic>,
    prediction: Option<Prediction>,
}

/// Snapshot of a session for status reporting.
#[derive(Debug, Clone, Serialize)]
pub struct SessionStatus {
    pub id: Uuid,
    pub phase: InterviewPhase,
    pub answered: usize,
    pub vocabulary_size: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_topic: Option<Topic>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bmi: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub surrogate_fidelity: Option<f64>,
    pub created_at: DateTime<Utc>,
}

impl Session {
    pub fn new(bundle: Arc<crate::model::ModelBundle>, vocab: Arc<Vocabulary>) -> Self {
        Self {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            bundle,
            vocab,
            answers: AnswerSet::new(),
            cursor: Cursor::new(),
            phase: InterviewPhase::Interview,
            last_topic: None,
            prediction: None,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn phase(&self) -> InterviewPhase {
        self.phase
    }

    pub fn answers(&self) -> &AnswerSet {
        &self.answers
    }

    pub fn cursor(&self) -> &Cursor {
        &self.cursor
    }

    pub fn last_topic(&self) -> Option<Topic> {
        self.last_topic
    }

    /// Discard every per-session datum and start over. Explicit user action
    /// only — never triggered automatically.
    pub fn reset(&mut self) {
        tracing::info!(session = %self.id, "interview reset");
        self.answers = AnswerSet::new();
        self.cursor = Cursor::new();
        self.phase = InterviewPhase::Interview;
        self.last_topic = None;
        self.prediction = None;
    }

    /// Decide what to present next, advancing the phase machine as needed.
    pub fn next_step(&mut self) -> Step {
        loop {
            match self.phase {
                InterviewPhase::Interview => {
                    match advance(&self.bundle.surrogate, &self.answers, &mut self.cursor) {
                        NavigatorResult::NeedsFeature(f) => {
                            return self.ask_for(&f);
                        }
                        NavigatorResult::AtLeaf => {
                            self.transition(InterviewPhase::Complete);
                        }
                    }
                }
                InterviewPhase::Complete => {
                    // The tree is done, but the final classifier may require
                    // features it never asked about.
                    let remaining = self.remaining();
                    match remaining.first() {
                        Some(f) => {
                            let f = f.clone();
                            return self.ask_for(&f);
                        }
                        None => {
                            self.transition(InterviewPhase::Done);
                        }
                    }
                }
                InterviewPhase::Done => return Step::Finished,
            }
        }
    }

    /// Merge a topic submission into the answer set.
    pub fn submit(&mut self, submission: TopicAnswers) -> Result<(), InterviewError> {
        for (name, value) in submission.expand() {
            self.answers.insert(&self.vocab, &name, value)?;
        }
        tracing::debug!(
            session = %self.id,
            answered = self.answers.len(),
            phase = %self.phase,
            "submission merged"
        );
        Ok(())
    }

    /// Run the final classifier. Only valid once the phase is Done; the
    /// result is computed once and cached, so repeated calls are stable.
    ///
    /// A classifier failure leaves the phase at Done — the caller surfaces a
    /// plain failure message and the user can still reset.
    pub fn finalize(&mut self) -> Result<Prediction, Error> {
        if self.phase != InterviewPhase::Done {
            return Err(InterviewError::NotFinished {
                phase: self.phase.to_string(),
            }
            .into());
        }
        if let Some(p) = &self.prediction {
            return Ok(p.clone());
        }
        let prediction = finalize(&self.answers, &self.bundle.forest, &self.bundle.labels)?;
        tracing::info!(
            session = %self.id,
            class_id = prediction.class_id,
            label = %prediction.label,
            "final prediction"
        );
        self.prediction = Some(prediction.clone());
        Ok(prediction)
    }

    /// Provisional BMI once height and weight are known. Clinician-style
    /// context only; the model never sees it.
    pub fn bmi_preview(&self) -> Option<f64> {
        let height = self.answers.get(feature::HEIGHT)?;
        let weight = self.answers.get(feature::WEIGHT)?;
        (height > 0.0).then(|| weight / (height * height))
    }

    pub fn status(&self) -> SessionStatus {
        SessionStatus {
            id: self.id,
            phase: self.phase,
            answered: self.answers.len(),
            vocabulary_size: self.vocab.len(),
            last_topic: self.last_topic,
            bmi: self.bmi_preview(),
            surrogate_fidelity: self.bundle.surrogate.fidelity,
            created_at: self.created_at,
        }
    }

    /// Classifier-vocabulary features still unanswered, in vocabulary order.
    fn remaining(&self) -> Vec<String> {
        self.vocab
            .iter()
            .filter(|f| !self.answers.contains(f))
            .map(String::from)
            .collect()
    }

    /// Build the Ask step for the topic containing `needed`.
    ///
    /// The whole unresolved topic is presented, not just the single feature,
    /// so related questions are asked together. A feature outside every
    /// topic's list still gets asked: it is appended to its fallback topic's
    /// unresolved set.
    fn ask_for(&mut self, needed: &str) -> Step {
        let topic = Topic::of_feature(needed);
        let mut features: Vec<String> = topic
            .unresolved(&self.answers, &self.vocab)
            .into_iter()
            .map(String::from)
            .collect();
        if !features.iter().any(|f| f == needed) {
            features.push(needed.to_string());
        }
        self.last_topic = Some(topic);
        Step::Ask { topic, features }
    }

    fn transition(&mut self, next: InterviewPhase) {
        debug_assert!(self.phase.can_transition_to(next));
        tracing::debug!(session = %self.id, from = %self.phase, to = %next, "phase transition");
        self.phase = next;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::forest::{Forest, ForestTree};
    use crate::model::labels::LabelMap;
    use crate::model::tree::{SurrogateTree, TreeNodes, NO_CHILD};
    use crate::model::ModelBundle;

    /// Bundle whose surrogate splits on age <= 15 with two leaves, and whose
    /// forest is a single stump over [age, weight, tue] voting class 1 left,
    /// class 2 right.
    fn fixture_bundle() -> Arc<ModelBundle> {
        let surrogate = SurrogateTree {
            nodes: TreeNodes {
                feature: vec![0, -2, -2],
                threshold: vec![15.0, -2.0, -2.0],
                children_left: vec![1, NO_CHILD, NO_CHILD],
                children_right: vec![2, NO_CHILD, NO_CHILD],
            },
            feature_names: vec!["age".to_string()],
            fidelity: Some(0.9),
        };
        let forest = Forest {
            trees: vec![ForestTree {
                nodes: TreeNodes {
                    feature: vec![0, -2, -2],
                    threshold: vec![15.0, -2.0, -2.0],
                    children_left: vec![1, NO_CHILD, NO_CHILD],
                    children_right: vec![2, NO_CHILD, NO_CHILD],
                },
                class: vec![-1, 1, 2],
            }],
            feature_names: vec!["age".to_string(), "weight".to_string(), "tue".to_string()],
        };
        let labels = LabelMap::new(vec![
            (1, "Normal Weight".to_string()),
            (2, "Obesity Type_I".to_string()),
        ]);
        Arc::new(ModelBundle {
            surrogate,
            forest,
            labels,
        })
    }

    fn fixture_session() -> Session {
        let bundle = fixture_bundle();
        let vocab = Arc::new(Vocabulary::unified(&bundle));
        Session::new(bundle, vocab)
    }

    fn vitals_submission(age: f64, weight: f64) -> TopicAnswers {
        let mut values = std::collections::BTreeMap::new();
        values.insert("age".to_string(), age);
        values.insert("weight".to_string(), weight);
        TopicAnswers {
            values,
            ..Default::default()
        }
    }

    #[test]
    fn first_step_asks_vitals_for_age() {
        let mut session = fixture_session();
        match session.next_step() {
            Step::Ask { topic, features } => {
                assert_eq!(topic, Topic::Vitals);
                assert!(features.contains(&"age".to_string()));
                // weight is in the classifier vocabulary and unanswered, so
                // the whole topic comes along.
                assert!(features.contains(&"weight".to_string()));
            }
            Step::Finished => panic!("expected a question"),
        }
        assert_eq!(session.last_topic(), Some(Topic::Vitals));
    }

    #[test]
    fn age_sixteen_routes_right_to_complete() {
        let mut session = fixture_session();
        session.next_step();
        session.submit(vitals_submission(16.0, 60.0)).unwrap();

        // The right child is a leaf, so one submission finishes the
        // tree-driven phase; the sweep then wants `tue`.
        match session.next_step() {
            Step::Ask { topic, features } => {
                assert_eq!(session.phase(), InterviewPhase::Complete);
                assert_eq!(topic, Topic::ScreenTime);
                assert_eq!(features, vec!["tue".to_string()]);
            }
            Step::Finished => panic!("sweep should still need tue"),
        }
    }

    #[test]
    fn interview_terminates_within_topic_budget() {
        let mut session = fixture_session();
        let mut rounds = 0;
        loop {
            match session.next_step() {
                Step::Ask { features, .. } => {
                    rounds += 1;
                    assert!(
                        rounds <= Topic::ALL.len() + 1,
                        "interview exceeded the round budget"
                    );
                    let mut values = std::collections::BTreeMap::new();
                    for f in features {
                        values.insert(f, 1.0);
                    }
                    session
                        .submit(TopicAnswers {
                            values,
                            ..Default::default()
                        })
                        .unwrap();
                }
                Step::Finished => break,
            }
        }
        assert_eq!(session.phase(), InterviewPhase::Done);
    }

    #[test]
    fn answered_features_are_never_asked_again() {
        let mut session = fixture_session();
        let mut seen = std::collections::HashSet::new();
        loop {
            match session.next_step() {
                Step::Ask { features, .. } => {
                    for f in &features {
                        assert!(seen.insert(f.clone()), "feature {f} asked twice");
                    }
                    let mut values = std::collections::BTreeMap::new();
                    for f in features {
                        values.insert(f, 0.0);
                    }
                    session
                        .submit(TopicAnswers {
                            values,
                            ..Default::default()
                        })
                        .unwrap();
                }
                Step::Finished => break,
            }
        }
    }

    #[test]
    fn finalize_requires_done_phase() {
        let mut session = fixture_session();
        assert!(session.finalize().is_err());
    }

    #[test]
    fn finalize_matches_direct_classifier_call() {
        use crate::model::Classifier;

        let mut session = fixture_session();
        loop {
            match session.next_step() {
                Step::Ask { features, .. } => {
                    let mut values = std::collections::BTreeMap::new();
                    for f in features {
                        let v = if f == "age" { 20.0 } else { 1.0 };
                        values.insert(f, v);
                    }
                    session
                        .submit(TopicAnswers {
                            values,
                            ..Default::default()
                        })
                        .unwrap();
                }
                Step::Finished => break,
            }
        }
        let prediction = session.finalize().unwrap();

        let bundle = fixture_bundle();
        let row: Vec<f64> = bundle
            .forest
            .feature_names()
            .iter()
            .map(|f| session.answers().get(f).unwrap_or(0.0))
            .collect();
        let direct = bundle.forest.predict(&row).unwrap();
        assert_eq!(prediction.class_id, direct);
        assert_eq!(prediction.label, "Obesity Type_I");

        // Immutable once computed.
        assert_eq!(session.finalize().unwrap(), prediction);
    }

    #[test]
    fn reset_restores_fresh_state_at_any_phase() {
        let mut session = fixture_session();
        session.next_step();
        session.submit(vitals_submission(16.0, 60.0)).unwrap();
        session.next_step();
        assert_eq!(session.phase(), InterviewPhase::Complete);

        session.reset();
        assert_eq!(session.phase(), InterviewPhase::Interview);
        assert!(session.answers().is_empty());
        assert_eq!(session.cursor().node, SurrogateTree::ROOT);
        assert!(session.cursor().steps.is_empty());
        assert_eq!(session.last_topic(), None);

        // The interview restarts from the root question.
        match session.next_step() {
            Step::Ask { topic, .. } => assert_eq!(topic, Topic::Vitals),
            Step::Finished => panic!("reset session should ask again"),
        }
    }

    #[test]
    fn bmi_preview_needs_both_vitals() {
        let mut session = fixture_session();
        assert_eq!(session.bmi_preview(), None);
        // weight alone is not enough; height is not even in this fixture's
        // vocabulary, so the preview stays unavailable.
        session.next_step();
        session.submit(vitals_submission(16.0, 60.0)).unwrap();
        assert_eq!(session.bmi_preview(), None);
    }

    #[test]
    fn status_reflects_progress() {
        let mut session = fixture_session();
        let before = session.status();
        assert_eq!(before.answered, 0);
        assert_eq!(before.surrogate_fidelity, Some(0.9));

        session.next_step();
        session.submit(vitals_submission(16.0, 60.0)).unwrap();
        let after = session.status();
        assert_eq!(after.answered, 2);
        assert_eq!(after.last_topic, Some(Topic::Vitals));
    }
}
