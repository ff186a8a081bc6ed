//! InterviewManager — session registry over the shared model bundle.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::{Error, InterviewError};
use crate::interview::answers::Vocabulary;
use crate::interview::finalize::Prediction;
use crate::interview::session::{Session, SessionStatus, Step};
use crate::interview::topic::TopicAnswers;
use crate::model::ModelBundle;
use crate::recommend::{self, Advisory};

/// Final outcome of a session: the prediction and its advisory record.
#[derive(Debug, Clone, serde::Serialize)]
pub struct InterviewOutcome {
    pub prediction: Prediction,
    pub recommendations: Advisory,
}

/// Coordinates concurrent interview sessions.
///
/// The bundle and vocabulary are loaded once and shared read-only; every
/// session owns its mutable state exclusively, so sessions never observe one
/// another.
pub struct InterviewManager {
    bundle: Arc<ModelBundle>,
    vocab: Arc<Vocabulary>,
    sessions: RwLock<HashMap<Uuid, Session>>,
}

impl InterviewManager {
    pub fn new(bundle: Arc<ModelBundle>) -> Self {
        let vocab = Arc::new(Vocabulary::unified(&bundle));
        Self {
            bundle,
            vocab,
            sessions: RwLock::new(HashMap::new()),
        }
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocab
    }

    /// Create a fresh session and return its id.
    pub async fn create_session(&self) -> Uuid {
        let session = Session::new(Arc::clone(&self.bundle), Arc::clone(&self.vocab));
        let id = session.id();
        self.sessions.write().await.insert(id, session);
        tracing::info!(session = %id, "session created");
        id
    }

    /// Build a standalone session without registering it (CLI mode).
    pub fn detached_session(&self) -> Session {
        Session::new(Arc::clone(&self.bundle), Arc::clone(&self.vocab))
    }

    pub async fn status(&self, id: Uuid) -> Result<SessionStatus, InterviewError> {
        let sessions = self.sessions.read().await;
        let session = sessions
            .get(&id)
            .ok_or(InterviewError::SessionNotFound { id })?;
        Ok(session.status())
    }

    /// Advance the session and return what it wants next.
    pub async fn next_step(&self, id: Uuid) -> Result<Step, InterviewError> {
        let mut sessions = self.sessions.write().await;
        let session = sessions
            .get_mut(&id)
            .ok_or(InterviewError::SessionNotFound { id })?;
        Ok(session.next_step())
    }

    /// Merge a topic submission and report the following step.
    pub async fn submit(&self, id: Uuid, answers: TopicAnswers) -> Result<Step, InterviewError> {
        let mut sessions = self.sessions.write().await;
        let session = sessions
            .get_mut(&id)
            .ok_or(InterviewError::SessionNotFound { id })?;
        session.submit(answers)?;
        Ok(session.next_step())
    }

    /// Explicit reset back to a fresh interview.
    pub async fn reset(&self, id: Uuid) -> Result<SessionStatus, InterviewError> {
        let mut sessions = self.sessions.write().await;
        let session = sessions
            .get_mut(&id)
            .ok_or(InterviewError::SessionNotFound { id })?;
        session.reset();
        Ok(session.status())
    }

    /// Final prediction plus recommendations for a finished session.
    pub async fn outcome(&self, id: Uuid) -> Result<InterviewOutcome, Error> {
        let mut sessions = self.sessions.write().await;
        let session = sessions
            .get_mut(&id)
            .ok_or(InterviewError::SessionNotFound { id })?;
        let prediction = session.finalize()?;
        let recommendations = recommend::recommend(&prediction.label);
        Ok(InterviewOutcome {
            prediction,
            recommendations,
        })
    }

    /// The decision-path explanation for a session.
    pub async fn explain(&self, id: Uuid) -> Result<String, InterviewError> {
        let sessions = self.sessions.read().await;
        let session = sessions
            .get(&id)
            .ok_or(InterviewError::SessionNotFound { id })?;
        Ok(session.cursor().explain())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interview::phase::InterviewPhase;
    use crate::model::forest::{Forest, ForestTree};
    use crate::model::labels::LabelMap;
    use crate::model::tree::{SurrogateTree, TreeNodes, NO_CHILD};

    fn manager() -> InterviewManager {
        let nodes = TreeNodes {
            feature: vec![0, -2, -2],
            threshold: vec![15.0, -2.0, -2.0],
            children_left: vec![1, NO_CHILD, NO_CHILD],
            children_right: vec![2, NO_CHILD, NO_CHILD],
        };
        let bundle = ModelBundle {
            surrogate: SurrogateTree {
                nodes: nodes.clone(),
                feature_names: vec!["age".to_string()],
                fidelity: None,
            },
            forest: Forest {
                trees: vec![ForestTree {
                    nodes,
                    class: vec![-1, 1, 2],
                }],
                feature_names: vec!["age".to_string()],
            },
            labels: LabelMap::new(vec![
                (1, "Normal Weight".to_string()),
                (2, "Obesity Type_I".to_string()),
            ]),
        };
        InterviewManager::new(Arc::new(bundle))
    }

    fn age_submission(age: f64) -> TopicAnswers {
        let mut values = std::collections::BTreeMap::new();
        values.insert("age".to_string(), age);
        TopicAnswers {
            values,
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn full_session_through_manager() {
        let manager = manager();
        let id = manager.create_session().await;

        let step = manager.next_step(id).await.unwrap();
        assert!(matches!(step, Step::Ask { .. }));

        let step = manager.submit(id, age_submission(16.0)).await.unwrap();
        assert_eq!(step, Step::Finished);

        let outcome = manager.outcome(id).await.unwrap();
        assert_eq!(outcome.prediction.label, "Obesity Type_I");
        assert!(!outcome.recommendations.exercise.is_empty());
    }

    #[tokio::test]
    async fn sessions_are_isolated() {
        let manager = manager();
        let a = manager.create_session().await;
        let b = manager.create_session().await;

        manager.next_step(a).await.unwrap();
        manager.submit(a, age_submission(16.0)).await.unwrap();

        let status_a = manager.status(a).await.unwrap();
        let status_b = manager.status(b).await.unwrap();
        assert_eq!(status_a.answered, 1);
        assert_eq!(status_b.answered, 0);
        assert_eq!(status_b.phase, InterviewPhase::Interview);
    }

    #[tokio::test]
    async fn unknown_session_is_reported() {
        let manager = manager();
        let missing = Uuid::new_v4();
        assert!(matches!(
            manager.status(missing).await,
            Err(InterviewError::SessionNotFound { .. })
        ));
    }

    #[tokio::test]
    async fn reset_through_manager() {
        let manager = manager();
        let id = manager.create_session().await;
        manager.next_step(id).await.unwrap();
        manager.submit(id, age_submission(16.0)).await.unwrap();

        let status = manager.reset(id).await.unwrap();
        assert_eq!(status.phase, InterviewPhase::Interview);
        assert_eq!(status.answered, 0);
    }
}
