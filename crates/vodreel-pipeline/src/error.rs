//! Pipeline error types.

use std::path::PathBuf;

use thiserror::Error;

pub type PipelineResult<T> = Result<T, PipelineError>;

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("Missing required input: {path}")]
    MissingInput { path: PathBuf },

    #[error("Stage '{stage}' failed: {message}")]
    StageFailed { stage: String, message: String },

    #[error("Unknown preset: {0}")]
    UnknownPreset(String),

    #[error("Engine error: {0}")]
    Engine(#[from] vodreel_engine::EngineError),

    #[error("Timeline error: {0}")]
    Timeline(#[from] vodreel_models::TimelineError),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl PipelineError {
    pub fn missing_input(path: impl Into<PathBuf>) -> Self {
        Self::MissingInput { path: path.into() }
    }

    pub fn stage_failed(stage: impl Into<String>, message: impl Into<String>) -> Self {
        Self::StageFailed {
            stage: stage.into(),
            message: message.into(),
        }
    }

    /// Whether the error names an absent upstream artifact. These abort the
    /// run before the stage writes anything; already-completed artifacts stay
    /// on disk for a resumed run.
    pub fn is_missing_input(&self) -> bool {
        matches!(self, PipelineError::MissingInput { .. })
    }
}
