//! Flat per-chunk score export for threshold tuning.

use serde::{Deserialize, Serialize};

use vodreel_models::Chunk;

/// One flat score record per chunk. Kept deliberately denormalized so the
/// artifact can be inspected or plotted without joining other files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreLogRecord {
    pub chunk_id: u32,
    pub start_time: f64,
    pub end_time: f64,
    pub audio_score: f64,
    pub text_score: f64,
    pub phase1_score: f64,
    pub chat_boost: f64,
    pub chat_suppressed: bool,
    pub final_score: f64,
    pub is_highlight: bool,
    pub highlight_reason: Option<String>,
    pub filter_reason: Option<String>,
}

/// Build the score log from scored, flagged, filtered chunks.
pub fn build_score_log(chunks: &[Chunk]) -> Vec<ScoreLogRecord> {
    chunks
        .iter()
        .map(|chunk| ScoreLogRecord {
            chunk_id: chunk.chunk_id,
            start_time: chunk.start_time,
            end_time: chunk.end_time,
            audio_score: chunk.audio_score,
            text_score: chunk.text_score,
            phase1_score: chunk.phase1_score,
            chat_boost: chunk.chat_boost,
            chat_suppressed: chunk.chat_suppressed,
            final_score: chunk.final_score,
            is_highlight: chunk.is_highlight(),
            highlight_reason: chunk.highlight.reason().map(|r| r.label().to_string()),
            filter_reason: chunk
                .highlight
                .filter_reason()
                .map(|r| r.label().to_string()),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use vodreel_models::{FilterReason, HighlightMark, HighlightReason};

    #[test]
    fn test_score_log_covers_every_chunk() {
        let mut flagged = Chunk::new(0, "chunk_0000.mp4", 0.0, 45.0);
        flagged.final_score = 0.8;
        flagged.highlight = HighlightMark::Flagged {
            reason: HighlightReason::ChatBoost,
        };
        let quiet = Chunk::new(1, "chunk_0001.mp4", 45.0, 90.0);

        let log = build_score_log(&[flagged, quiet]);
        assert_eq!(log.len(), 2);
        assert!(log[0].is_highlight);
        assert_eq!(log[0].highlight_reason.as_deref(), Some("chat_boost"));
        assert!(log[1].highlight_reason.is_none());
    }

    #[test]
    fn test_rejected_chunk_keeps_both_reasons() {
        let mut chunk = Chunk::new(2, "chunk_0002.mp4", 90.0, 135.0);
        chunk.highlight = HighlightMark::Rejected {
            reason: HighlightReason::ChatOnly,
            filtered: FilterReason::WeakChatOnly,
        };

        let log = build_score_log(&[chunk]);
        assert!(!log[0].is_highlight);
        assert_eq!(log[0].highlight_reason.as_deref(), Some("chat_only"));
        assert_eq!(log[0].filter_reason.as_deref(), Some("weak_chat_only"));
    }
}
