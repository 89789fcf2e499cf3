//! Error types for the scoring engine.

use thiserror::Error;

/// Result type for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;

/// Errors that can occur during scoring.
///
/// Degenerate data (all chunks silent, all raw scores equal, empty chat
/// timeline) is handled with fallback values and never reaches here; these
/// variants cover genuinely missing input.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("no chunks to score")]
    NoChunks,
}
