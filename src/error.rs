//! Error types for the triage interview.

use std::path::PathBuf;

use uuid::Uuid;

/// Top-level error type.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Artifact error: {0}")]
    Artifact(#[from] ArtifactError),

    #[error("Interview error: {0}")]
    Interview(#[from] InterviewError),

    #[error("Prediction error: {0}")]
    Predict(#[from] PredictError),

    #[error("Surface error: {0}")]
    Surface(#[from] SurfaceError),
}

/// Errors loading the pretrained model artifacts.
///
/// All of these are fatal at startup — no session can be created without a
/// complete, structurally valid bundle.
#[derive(Debug, thiserror::Error)]
pub enum ArtifactError {
    #[error("Missing artifact: {}", path.display())]
    Missing { path: PathBuf },

    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("Invalid artifact {name}: {reason}")]
    Invalid { name: String, reason: String },
}

/// Errors from the interview state machine and session registry.
#[derive(Debug, thiserror::Error)]
pub enum InterviewError {
    #[error("Feature {feature} is not in the model vocabulary")]
    FeatureNotInVocabulary { feature: String },

    #[error("Session {id} not found")]
    SessionNotFound { id: Uuid },

    #[error("Interview is not finished yet (phase: {phase})")]
    NotFinished { phase: String },
}

/// Errors from the final classifier invocation.
#[derive(Debug, thiserror::Error)]
pub enum PredictError {
    #[error("Row has {got} features, classifier expects {expected}")]
    RowLength { got: usize, expected: usize },

    #[error("Feature index {index} out of range for row of length {len}")]
    FeatureIndexOutOfRange { index: usize, len: usize },

    #[error("Classifier has no trees")]
    EmptyEnsemble,
}

/// Errors from an answer-collecting surface.
#[derive(Debug, thiserror::Error)]
pub enum SurfaceError {
    #[error("Input stream closed")]
    Closed,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for the crate.
pub type Result<T> = std::result::Result<T, Error>;
