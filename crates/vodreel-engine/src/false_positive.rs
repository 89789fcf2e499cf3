//! False-positive suppression of flagged highlights.
//!
//! A best-effort heuristic pass over chunks already flagged as highlights.
//! It may downgrade a highlight but never promote one; each filter sets its
//! own rejection reason and short-circuits the rest for that chunk. The
//! filter ordering and the exact threshold semantics are load-bearing for
//! output stability across versions.

use tracing::debug;

use vodreel_models::{Chunk, FilterReason, HighlightReason};

use crate::config::EngineConfig;

/// Run the three false-positive filters over every flagged chunk.
///
/// 1. **Weak single-signal**: none of phase-1 score, chat boost, or text
///    score clears its own "strong" threshold.
/// 2. **Isolated spike**: neither immediate neighbor's final score reaches
///    `neighbor_support_ratio` of the highlight threshold.
/// 3. **Chat-only safety gate**: a chat-only highlight whose final score is
///    below the dedicated minimum.
///
/// Returns the number of downgraded chunks.
pub fn filter_false_positives(chunks: &mut [Chunk], config: &EngineConfig) -> usize {
    let neighbor_floor = config.highlight_threshold * config.filter.neighbor_support_ratio;
    let mut rejected = 0usize;

    for i in 0..chunks.len() {
        if !chunks[i].is_highlight() {
            continue;
        }

        let chunk = &chunks[i];

        // Filter 1: weak single-signal
        let strong_signals = [
            chunk.phase1_score >= config.filter.phase1_strong_threshold,
            chunk.chat_boost >= config.filter.chat_strong_threshold,
            chunk.text_score >= config.filter.text_strong_threshold,
        ]
        .into_iter()
        .filter(|&s| s)
        .count();

        if strong_signals == 0 {
            chunks[i].highlight = chunks[i].highlight.rejected(FilterReason::WeakSingleSignal);
            rejected += 1;
            continue;
        }

        // Filter 2: isolated spike. Immediate neighbors only, judged on
        // final score against a fraction of the highlight threshold.
        let prev_supports = i > 0 && chunks[i - 1].final_score >= neighbor_floor;
        let next_supports =
            i + 1 < chunks.len() && chunks[i + 1].final_score >= neighbor_floor;

        if !prev_supports && !next_supports {
            chunks[i].highlight = chunks[i].highlight.rejected(FilterReason::IsolatedSpike);
            rejected += 1;
            continue;
        }

        // Filter 3: chat-only safety gate
        if chunks[i].highlight.reason() == Some(HighlightReason::ChatOnly)
            && chunks[i].final_score < config.chat.chat_only_min_score
        {
            chunks[i].highlight = chunks[i].highlight.rejected(FilterReason::WeakChatOnly);
            rejected += 1;
        }
    }

    debug!(rejected, "False-positive filtering complete");

    rejected
}
