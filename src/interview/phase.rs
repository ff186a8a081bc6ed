//! Interview phase machine — tracks how far a session has progressed.

use serde::{Deserialize, Serialize};

/// The phases of one interview session.
///
/// Progresses strictly forward: Interview → Complete → Done. No phase is
/// revisited once departed; the only way back is an explicit reset, which
/// recreates the whole session state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InterviewPhase {
    /// Surrogate-tree-driven questioning.
    Interview,
    /// Leaf reached; sweeping up features the tree never asked about.
    Complete,
    /// Every classifier-vocabulary feature answered; ready to predict.
    Done,
}

impl InterviewPhase {
    /// Check if a transition from `self` to `target` is valid.
    pub fn can_transition_to(&self, target: InterviewPhase) -> bool {
        use InterviewPhase::*;
        matches!((self, target), (Interview, Complete) | (Complete, Done))
    }

    /// Whether this phase is terminal.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Done)
    }

    /// The next phase in the linear progression, if any.
    pub fn next(&self) -> Option<InterviewPhase> {
        match self {
            Self::Interview => Some(Self::Complete),
            Self::Complete => Some(Self::Done),
            Self::Done => None,
        }
    }
}

impl Default for InterviewPhase {
    fn default() -> Self {
        Self::Interview
    }
}

impl std::fmt::Display for InterviewPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Interview => "interview",
            Self::Complete => "complete",
            Self::Done => "done",
        };
        write!(f, "{s}")
    }
}
