//! Engine configuration.
//!
//! One immutable value passed into every stage entry point. Preset loading
//! builds a fresh `EngineConfig`; nothing here is global or mutable across
//! stages, so repeated runs with different presets cannot interfere.

use serde::{Deserialize, Serialize};

/// Audio anomaly scoring parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AudioConfig {
    /// RMS floor below which a chunk is marked silent and scores 0.
    ///
    /// Raw RMS from 16-bit PCM normalized to [-1, 1]; 1e-4 is effectively
    /// dead air with encoder noise.
    pub silence_rms_threshold: f64,

    /// Ratio to the corpus median at which a chunk counts as a volume spike.
    ///
    /// - 1.3: sensitive, flags sustained loud play
    /// - 1.5: balanced default
    /// - 2.0+: only screams and raid noise
    pub spike_multiplier: f64,
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            silence_rms_threshold: 1e-4,
            spike_multiplier: 1.5,
        }
    }
}

/// Chat signal pipeline parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatConfig {
    /// Master switch for chat influence on scoring.
    pub enable_chat_influence: bool,

    /// Multiplier applied to the aligned chat score before capping.
    pub chat_weight: f64,

    /// Hard cap on the additive chat boost.
    pub chat_boost_max: f64,

    /// Trailing window for the rolling message-count baseline, in seconds.
    pub baseline_window_secs: usize,

    /// Count/baseline ratio at which a second counts as an activity spike.
    pub spike_ratio_threshold: f64,

    /// Minimum baseline for spike detection. Prevents divide-by-near-zero
    /// amplification when overall chat volume is tiny.
    pub min_baseline: f64,

    /// Saturation scale for the emote score (`tanh(raw / scale)`).
    pub emote_score_scale: f64,

    /// Saturation scale for the keyword-density score.
    pub keyword_score_scale: f64,

    /// Sub-signal weights for the combined chat score. They need not sum
    /// to 1; emote and keyword are meant to dominate.
    pub activity_weight: f64,
    pub emote_weight: f64,
    pub keyword_weight: f64,

    /// Trailing smoothing window over the combined score, in seconds.
    pub smoothing_window_secs: usize,

    /// Fixed chat-to-video offset in seconds. Chat second `s` maps to video
    /// second `s - offset`; out-of-range samples are dropped.
    pub chat_to_video_offset_secs: i64,

    /// Whether a strong chat boost alone can flag a highlight.
    pub enable_chat_only_highlights: bool,

    /// Minimum chat boost for a chat-only highlight.
    pub chat_only_threshold: f64,

    /// Minimum final score a chat-only highlight must still reach to survive
    /// the false-positive filter.
    pub chat_only_min_score: f64,

    /// Significance gate: minimum total messages in a chunk window.
    pub min_chat_messages_per_chunk: u32,

    /// Significance gate: minimum seconds with any message in a chunk window.
    pub min_chat_active_seconds_per_chunk: u32,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            enable_chat_influence: true,
            chat_weight: 0.5,
            chat_boost_max: 0.25,
            baseline_window_secs: 60,
            spike_ratio_threshold: 3.0,
            min_baseline: 0.2,
            emote_score_scale: 5.0,
            keyword_score_scale: 0.5,
            activity_weight: 0.15,
            emote_weight: 0.5,
            keyword_weight: 0.35,
            smoothing_window_secs: 5,
            chat_to_video_offset_secs: 0,
            enable_chat_only_highlights: true,
            chat_only_threshold: 0.15,
            chat_only_min_score: 0.45,
            min_chat_messages_per_chunk: 3,
            min_chat_active_seconds_per_chunk: 2,
        }
    }
}

/// False-positive filter thresholds.
///
/// "Strong" thresholds apply to the phase-1, chat-boost, and text signals
/// individually, never to the final score. The isolated-spike rule inspects
/// immediate neighbors only. Both asymmetries are load-bearing for output
/// stability; do not widen them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilterConfig {
    pub phase1_strong_threshold: f64,
    pub chat_strong_threshold: f64,
    pub text_strong_threshold: f64,

    /// Fraction of the highlight threshold a neighbor's final score must
    /// reach to reinforce a highlight.
    pub neighbor_support_ratio: f64,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            phase1_strong_threshold: 0.55,
            chat_strong_threshold: 0.15,
            text_strong_threshold: 0.5,
            neighbor_support_ratio: 0.9,
        }
    }
}

/// Interval segmentation parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SegmentConfig {
    /// Gap between highlight chunks that still merges into one interval.
    pub merge_gap_secs: f64,

    /// Padding subtracted from interval starts (clamped at 0).
    pub pre_buffer_secs: f64,

    /// Padding added to interval ends (unclamped).
    pub post_buffer_secs: f64,

    /// Minimum buffered interval duration; shorter intervals are dropped.
    pub min_highlight_duration_secs: f64,
}

impl Default for SegmentConfig {
    fn default() -> Self {
        Self {
            merge_gap_secs: 5.0,
            pre_buffer_secs: 5.0,
            post_buffer_secs: 5.0,
            min_highlight_duration_secs: 10.0,
        }
    }
}

/// Complete engine configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Weight of the audio score in the phase-1 score.
    pub audio_weight: f64,

    /// Weight of the text score in the phase-1 score.
    ///
    /// Intended to sum to 1 with `audio_weight`; not enforced.
    pub text_weight: f64,

    /// Final/phase-1 score at which a chunk flags as a highlight.
    pub highlight_threshold: f64,

    pub audio: AudioConfig,
    pub chat: ChatConfig,
    pub filter: FilterConfig,
    pub segment: SegmentConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::balanced()
    }
}

impl EngineConfig {
    /// Balanced defaults tuned for streamer VODs.
    pub fn balanced() -> Self {
        Self {
            audio_weight: 0.7,
            text_weight: 0.3,
            highlight_threshold: 0.65,
            audio: AudioConfig::default(),
            chat: ChatConfig::default(),
            filter: FilterConfig::default(),
            segment: SegmentConfig::default(),
        }
    }

    /// Chat-heavy preset: louder chat influence, easier chat-only flags.
    pub fn chat_heavy() -> Self {
        let mut config = Self::balanced();
        config.chat.chat_weight = 0.7;
        config.chat.chat_only_threshold = 0.12;
        config.chat.chat_only_min_score = 0.4;
        config
    }

    /// Strict preset: higher bar everywhere, chat-only disabled.
    pub fn strict() -> Self {
        let mut config = Self::balanced();
        config.highlight_threshold = 0.75;
        config.chat.enable_chat_only_highlights = false;
        config.segment.min_highlight_duration_secs = 15.0;
        config
    }

    /// Builder-style setter for the highlight threshold.
    pub fn with_highlight_threshold(mut self, threshold: f64) -> Self {
        self.highlight_threshold = threshold.clamp(0.0, 1.0);
        self
    }

    /// Builder-style setter for the audio/text weights.
    pub fn with_weights(mut self, audio_weight: f64, text_weight: f64) -> Self {
        self.audio_weight = audio_weight;
        self.text_weight = text_weight;
        self
    }

    /// Builder-style setter for the merge gap.
    pub fn with_merge_gap_secs(mut self, gap: f64) -> Self {
        self.segment.merge_gap_secs = gap.max(0.0);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_balanced_matches_tuned_defaults() {
        let config = EngineConfig::balanced();
        assert!((config.audio_weight - 0.7).abs() < f64::EPSILON);
        assert!((config.highlight_threshold - 0.65).abs() < f64::EPSILON);
        assert!((config.chat.chat_boost_max - 0.25).abs() < f64::EPSILON);
        assert_eq!(config.segment.merge_gap_secs, 5.0);
    }

    #[test]
    fn test_strict_disables_chat_only() {
        let config = EngineConfig::strict();
        assert!(!config.chat.enable_chat_only_highlights);
        assert!(config.highlight_threshold > EngineConfig::balanced().highlight_threshold);
    }

    #[test]
    fn test_threshold_clamping() {
        let config = EngineConfig::balanced().with_highlight_threshold(1.4);
        assert!((config.highlight_threshold - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_default_is_balanced() {
        let config = EngineConfig::default();
        assert!((config.text_weight - 0.3).abs() < f64::EPSILON);
    }
}
