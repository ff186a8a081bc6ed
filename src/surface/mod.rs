//! Answer-collecting surfaces.
//!
//! A surface is the capability "present a topic's unresolved questions and
//! return answers". How values are collected is up to the implementation;
//! one-hot groups always come back as their single-choice enums, so a
//! submission is all-or-nothing by construction.

pub mod cli;
pub mod prompts;

use async_trait::async_trait;

use crate::error::{Error, SurfaceError};
use crate::interview::manager::InterviewOutcome;
use crate::interview::session::{Session, Step};
use crate::interview::topic::{Topic, TopicAnswers};
use crate::recommend;
use prompts::QuestionSpec;

pub use cli::TerminalSurface;

/// Capability to collect answers for one presented topic.
#[async_trait]
pub trait RenderSurface: Send {
    /// Present `questions` for `topic` and return the collected answers.
    async fn collect(
        &mut self,
        topic: Topic,
        questions: &[QuestionSpec],
    ) -> Result<TopicAnswers, SurfaceError>;
}

/// Drive one session to completion against a surface.
///
/// Loops (navigate → present topic → merge answers) until the session is
/// Done, then finalizes and returns the outcome.
pub async fn run_interview(
    session: &mut Session,
    surface: &mut dyn RenderSurface,
) -> Result<InterviewOutcome, Error> {
    loop {
        match session.next_step() {
            Step::Ask { topic, features } => {
                let questions = prompts::questions_for(&features);
                let answers = surface.collect(topic, &questions).await?;
                session.submit(answers)?;
            }
            Step::Finished => break,
        }
    }
    let prediction = session.finalize()?;
    let recommendations = recommend::recommend(&prediction.label);
    Ok(InterviewOutcome {
        prediction,
        recommendations,
    })
}
