//! Structured run logging utilities.
//!
//! Provides consistent, structured logging for pipeline runs with
//! tracing spans and contextual information.

use tracing::{error, info, warn, Span};
use uuid::Uuid;

/// Run logger for structured logging with consistent formatting.
///
/// Carries the run id and current stage so every log line from one run is
/// correlatable.
#[derive(Debug, Clone)]
pub struct RunLogger {
    run_id: String,
    stage: String,
}

impl RunLogger {
    /// Create a logger for a specific run and stage.
    pub fn new(run_id: Uuid, stage: &str) -> Self {
        Self {
            run_id: run_id.to_string(),
            stage: stage.to_string(),
        }
    }

    /// Same run, different stage.
    pub fn for_stage(&self, stage: &str) -> Self {
        Self {
            run_id: self.run_id.clone(),
            stage: stage.to_string(),
        }
    }

    pub fn log_start(&self, message: &str) {
        info!(
            run_id = %self.run_id,
            stage = %self.stage,
            "Stage started: {}", message
        );
    }

    pub fn log_progress(&self, message: &str) {
        info!(
            run_id = %self.run_id,
            stage = %self.stage,
            "Stage progress: {}", message
        );
    }

    pub fn log_warning(&self, message: &str) {
        warn!(
            run_id = %self.run_id,
            stage = %self.stage,
            "Stage warning: {}", message
        );
    }

    pub fn log_error(&self, message: &str) {
        error!(
            run_id = %self.run_id,
            stage = %self.stage,
            "Stage error: {}", message
        );
    }

    pub fn log_completion(&self, message: &str) {
        info!(
            run_id = %self.run_id,
            stage = %self.stage,
            "Stage completed: {}", message
        );
    }

    pub fn run_id(&self) -> &str {
        &self.run_id
    }

    pub fn stage(&self) -> &str {
        &self.stage
    }

    /// Create a tracing span for this run stage.
    pub fn create_span(&self) -> Span {
        tracing::info_span!(
            "run",
            run_id = %self.run_id,
            stage = %self.stage
        )
    }
}
