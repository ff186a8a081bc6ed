//! The adaptive interview: navigator, topics, state machine, finalization.

pub mod answers;
pub mod finalize;
pub mod manager;
pub mod navigator;
pub mod phase;
pub mod routes;
pub mod session;
pub mod topic;

pub use answers::{AnswerSet, Vocabulary};
pub use finalize::Prediction;
pub use manager::InterviewManager;
pub use navigator::{advance, Cursor, NavigatorResult};
pub use phase::InterviewPhase;
pub use session::{Session, Step};
pub use topic::{Topic, TopicAnswers};
