//! Score aggregation: phase-1 weighted score and the gated chat boost.

use std::collections::BTreeMap;

use tracing::debug;

use vodreel_models::{AlignedChatSample, Chunk, MpsSample};

use crate::config::EngineConfig;
use crate::error::{EngineError, EngineResult};

/// Compute the phase-1 score for every chunk:
/// `audio_weight * audio_score + text_weight * text_score`.
///
/// Also seeds `final_score` with the phase-1 value so a run without chat
/// influence is complete after this stage.
pub fn apply_phase1_scores(chunks: &mut [Chunk], config: &EngineConfig) -> EngineResult<()> {
    if chunks.is_empty() {
        return Err(EngineError::NoChunks);
    }

    for chunk in chunks.iter_mut() {
        chunk.phase1_score =
            config.audio_weight * chunk.audio_score + config.text_weight * chunk.text_score;
        chunk.final_score = chunk.phase1_score;
    }

    Ok(())
}

/// Apply the chat boost to every chunk.
///
/// A chunk only qualifies when its window passes the significance gate;
/// otherwise the boost is forced to 0 and the chunk is marked suppressed.
/// When significant, the boost is the window's maximum aligned chat score
/// times `chat_weight`, capped at `chat_boost_max`, and
/// `final_score = min(1, phase1_score + boost)`. The boost can never lower
/// a score.
///
/// The window is the inclusive second range `[start, end]`, matching how
/// chat seconds have always been sampled against chunk bounds.
pub fn apply_chat_boost(
    chunks: &mut [Chunk],
    mps: &[MpsSample],
    aligned: &[AlignedChatSample],
    config: &EngineConfig,
) {
    if !config.chat.enable_chat_influence {
        debug!("Chat influence disabled, skipping chat boost");
        return;
    }

    let mps_by_sec: BTreeMap<i64, u32> = mps.iter().map(|s| (s.second, s.messages)).collect();
    let chat_by_sec: BTreeMap<i64, f64> =
        aligned.iter().map(|s| (s.video_second, s.score)).collect();

    let mut suppressed = 0usize;

    for chunk in chunks.iter_mut() {
        let start = chunk.start_time.floor() as i64;
        let end = chunk.end_time.floor() as i64;

        if !chat_is_significant(start, end, &mps_by_sec, config) {
            chunk.chat_boost = 0.0;
            chunk.chat_suppressed = true;
            chunk.final_score = chunk.phase1_score;
            suppressed += 1;
            continue;
        }

        let peak = (start..=end)
            .filter_map(|sec| chat_by_sec.get(&sec))
            .fold(0.0_f64, |a, &b| a.max(b));

        let boost = (config.chat.chat_weight * peak).min(config.chat.chat_boost_max);

        chunk.chat_boost = boost;
        chunk.chat_suppressed = false;
        chunk.final_score = (chunk.phase1_score + boost).min(1.0);

        debug!(
            chunk_id = chunk.chunk_id,
            phase1 = format!("{:.3}", chunk.phase1_score),
            chat_boost = format!("{boost:.3}"),
            final_score = format!("{:.3}", chunk.final_score),
            "Chat boost applied"
        );
    }

    debug!(
        chunks = chunks.len(),
        suppressed, "Chat boost stage complete"
    );
}

/// Significance gate: the window must contain at least the configured number
/// of active seconds (non-zero message count) AND total messages. This keeps
/// a single lucky spike-second in an otherwise dead window from boosting a
/// chunk.
fn chat_is_significant(
    start: i64,
    end: i64,
    mps_by_sec: &BTreeMap<i64, u32>,
    config: &EngineConfig,
) -> bool {
    let mut total_messages = 0u32;
    let mut active_seconds = 0u32;

    for sec in start..=end {
        let count = mps_by_sec.get(&sec).copied().unwrap_or(0);
        if count > 0 {
            active_seconds += 1;
            total_messages += count;
        }
    }

    total_messages >= config.chat.min_chat_messages_per_chunk
        && active_seconds >= config.chat.min_chat_active_seconds_per_chunk
}
