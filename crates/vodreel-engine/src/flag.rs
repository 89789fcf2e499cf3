//! Highlight flagging.

use tracing::debug;

use vodreel_models::{Chunk, HighlightMark, HighlightReason};

use crate::config::EngineConfig;

/// Flag highlight chunks.
///
/// Three conditions, mutually exclusive by priority:
/// 1. phase-1 score clears the threshold -> `phase1`
/// 2. else final score clears the threshold -> `chat_boost`
/// 3. else, if chat-only highlighting is enabled and the chat boost clears
///    its own threshold -> `chat_only`
///
/// Raising `final_score` with other fields fixed can only flip a chunk from
/// non-highlight to highlight, never back. Returns the flagged count.
pub fn flag_highlights(chunks: &mut [Chunk], config: &EngineConfig) -> usize {
    let mut flagged = 0usize;

    for chunk in chunks.iter_mut() {
        let reason = if chunk.phase1_score >= config.highlight_threshold {
            Some(HighlightReason::Phase1)
        } else if chunk.final_score >= config.highlight_threshold {
            Some(HighlightReason::ChatBoost)
        } else if config.chat.enable_chat_only_highlights
            && chunk.chat_boost >= config.chat.chat_only_threshold
        {
            Some(HighlightReason::ChatOnly)
        } else {
            None
        };

        chunk.highlight = match reason {
            Some(reason) => {
                flagged += 1;
                HighlightMark::Flagged { reason }
            }
            None => HighlightMark::None,
        };
    }

    debug!(
        chunks = chunks.len(),
        flagged, "Highlight flagging complete"
    );

    flagged
}
