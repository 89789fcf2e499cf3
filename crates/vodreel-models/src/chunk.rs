//! Chunk models.
//!
//! A chunk is one fixed-duration slice of the source recording. Chunks are
//! created once by segmentation and annotated in place by each scoring stage;
//! they are never deleted until the run is reset.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Why a chunk was flagged as a highlight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum HighlightReason {
    /// Audio+text weighted score cleared the threshold on its own.
    Phase1,
    /// Chat boost pushed the final score over the threshold.
    ChatBoost,
    /// Chat boost alone qualified (phase-1 score too weak).
    ChatOnly,
}

impl HighlightReason {
    /// Stable snake_case label, matching the serialized form.
    pub fn label(&self) -> &'static str {
        match self {
            HighlightReason::Phase1 => "phase1",
            HighlightReason::ChatBoost => "chat_boost",
            HighlightReason::ChatOnly => "chat_only",
        }
    }
}

/// Why a flagged chunk was later rejected by the false-positive filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum FilterReason {
    /// No individual signal cleared its "strong" threshold.
    WeakSingleSignal,
    /// No immediate neighbor reinforced the highlight.
    IsolatedSpike,
    /// Chat-only highlight below the dedicated minimum score.
    WeakChatOnly,
}

impl FilterReason {
    /// Stable snake_case label, matching the serialized form.
    pub fn label(&self) -> &'static str {
        match self {
            FilterReason::WeakSingleSignal => "weak_single_signal",
            FilterReason::IsolatedSpike => "isolated_spike",
            FilterReason::WeakChatOnly => "weak_chat_only",
        }
    }
}

/// Highlight state of a chunk.
///
/// Transitions are one-way: `None -> Flagged -> Rejected`. The false-positive
/// filter may downgrade a flagged chunk but can never promote one, so the only
/// mutation offered is [`HighlightMark::rejected`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema, Default)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum HighlightMark {
    /// Not a highlight.
    #[default]
    None,
    /// Flagged as a highlight with a qualifying reason.
    Flagged { reason: HighlightReason },
    /// Previously flagged, then rejected by the false-positive filter.
    Rejected {
        reason: HighlightReason,
        filtered: FilterReason,
    },
}

impl HighlightMark {
    /// Whether the chunk currently counts as a highlight.
    pub fn is_highlight(&self) -> bool {
        matches!(self, HighlightMark::Flagged { .. })
    }

    /// Qualifying reason, if the chunk is (or was) flagged.
    pub fn reason(&self) -> Option<HighlightReason> {
        match self {
            HighlightMark::None => None,
            HighlightMark::Flagged { reason } | HighlightMark::Rejected { reason, .. } => {
                Some(*reason)
            }
        }
    }

    /// Rejection reason, if the chunk was downgraded.
    pub fn filter_reason(&self) -> Option<FilterReason> {
        match self {
            HighlightMark::Rejected { filtered, .. } => Some(*filtered),
            _ => None,
        }
    }

    /// Downgrade a flagged mark. `None` and already-rejected marks pass
    /// through unchanged, so re-promotion is impossible by construction.
    #[must_use]
    pub fn rejected(self, filtered: FilterReason) -> Self {
        match self {
            HighlightMark::Flagged { reason } => HighlightMark::Rejected { reason, filtered },
            other => other,
        }
    }
}

/// Sentiment hit counts for a chunk transcript.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct SentimentCounts {
    pub positive_hits: u32,
    pub negative_hits: u32,
}

impl SentimentCounts {
    /// Positive minus negative hits.
    pub fn raw(&self) -> i64 {
        self.positive_hits as i64 - self.negative_hits as i64
    }
}

/// One fixed-duration slice of the source recording, with the score fields
/// each pipeline stage accumulates onto it.
///
/// Invariant: chunks are contiguous and non-overlapping, ordered by start
/// time; `start_time` of chunk *i*+1 equals `end_time` of chunk *i* except
/// possibly for the final chunk. Times are half-open `[start, end)` seconds.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct Chunk {
    /// Chunk index within the recording (0-based).
    pub chunk_id: u32,

    /// Source file or handle for this chunk, as produced by segmentation.
    pub file: String,

    /// Start time in seconds.
    pub start_time: f64,

    /// End time in seconds.
    pub end_time: f64,

    /// Raw RMS loudness from the loudness provider.
    #[serde(default)]
    pub audio_rms: f64,

    /// Whether loudness fell below the silence floor.
    #[serde(default)]
    pub is_silent: bool,

    /// Loudness ratio to the corpus median (0 for silent chunks).
    #[serde(default)]
    pub audio_spike_ratio: f64,

    /// Whether the spike ratio cleared the configured multiplier.
    #[serde(default)]
    pub is_volume_spike: bool,

    /// Min-max normalized audio score in [0, 1].
    #[serde(default)]
    pub audio_score: f64,

    /// Transcript text for this chunk, merged from the transcript provider.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transcript: Option<String>,

    /// Keyword hits per category.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub keyword_counts: BTreeMap<String, u32>,

    /// Sentiment hits for the transcript.
    #[serde(default)]
    pub sentiment: SentimentCounts,

    /// Raw text score: total keyword hits plus sentiment raw score.
    #[serde(default)]
    pub raw_text_score: f64,

    /// Min-max normalized text score in [0, 1].
    #[serde(default)]
    pub text_score: f64,

    /// Weighted audio+text score, before any chat influence.
    #[serde(default)]
    pub phase1_score: f64,

    /// Bounded additive chat contribution in [0, chat_boost_max].
    #[serde(default)]
    pub chat_boost: f64,

    /// Whether the chat significance gate forced the boost to zero.
    #[serde(default)]
    pub chat_suppressed: bool,

    /// Final score in [0, 1]: `min(1, phase1_score + chat_boost)`.
    #[serde(default)]
    pub final_score: f64,

    /// Highlight state (one-way: none -> flagged -> rejected).
    #[serde(default)]
    pub highlight: HighlightMark,
}

impl Chunk {
    /// Create a chunk straight from the segmentation record; score fields
    /// start at their zero values.
    pub fn new(chunk_id: u32, file: impl Into<String>, start_time: f64, end_time: f64) -> Self {
        Self {
            chunk_id,
            file: file.into(),
            start_time,
            end_time,
            audio_rms: 0.0,
            is_silent: false,
            audio_spike_ratio: 0.0,
            is_volume_spike: false,
            audio_score: 0.0,
            transcript: None,
            keyword_counts: BTreeMap::new(),
            sentiment: SentimentCounts::default(),
            raw_text_score: 0.0,
            text_score: 0.0,
            phase1_score: 0.0,
            chat_boost: 0.0,
            chat_suppressed: false,
            final_score: 0.0,
            highlight: HighlightMark::None,
        }
    }

    /// Duration in seconds.
    pub fn duration_secs(&self) -> f64 {
        (self.end_time - self.start_time).max(0.0)
    }

    /// Whether the chunk currently counts as a highlight.
    pub fn is_highlight(&self) -> bool {
        self.highlight.is_highlight()
    }
}
