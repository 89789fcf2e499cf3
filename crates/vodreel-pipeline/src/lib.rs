#![deny(unreachable_patterns)]
//! Batch highlight pipeline runner.
//!
//! This crate provides:
//! - An artifact store with file-existence memoization and atomic writes
//! - Loaders for the upstream input artifacts (chunks, loudness, transcripts,
//!   chat replay, keyword/emote configuration)
//! - Sequential stage orchestration over the scoring engine
//! - Named preset save/load, derived-state reset, and score log export
//! - A worker-style binary reading its settings from the environment

pub mod artifacts;
pub mod config;
pub mod error;
pub mod inputs;
pub mod logging;
pub mod presets;
pub mod progress;
pub mod reset;
pub mod runner;
pub mod score_log;

pub use artifacts::{Artifact, ArtifactState, ArtifactStore};
pub use config::PipelineSettings;
pub use error::{PipelineError, PipelineResult};
pub use logging::RunLogger;
pub use progress::{ProgressObserver, TracingProgress};
pub use reset::reset_derived_state;
pub use runner::{load_scored_chunks, load_timeline, HighlightRunner};
pub use score_log::{build_score_log, ScoreLogRecord};
