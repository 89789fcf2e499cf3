#![deny(unreachable_patterns)]
//! Scoring and highlight segmentation engine.
//!
//! This crate provides:
//! - Audio loudness spike scoring relative to the recording's median RMS
//! - Transcript keyword and sentiment scoring
//! - Chat replay signal pipeline (activity spikes, emotes, keywords)
//! - Multimodal score aggregation with a capped chat boost
//! - Highlight flagging with a false-positive downgrade pass
//! - Interval merging, buffering, and minimum-duration filtering
//!
//! All stages operate on in-memory data and take an immutable
//! [`EngineConfig`]; loading inputs and persisting artifacts is the
//! pipeline's concern.

pub mod aggregate;
pub mod audio;
pub mod buffer;
pub mod chat;
pub mod config;
pub mod duration;
pub mod error;
pub mod false_positive;
pub mod flag;
pub mod merge;
pub mod text;

pub use aggregate::{apply_chat_boost, apply_phase1_scores};
pub use audio::score_audio;
pub use buffer::apply_buffers;
pub use chat::{
    align_to_video, combine_chat_scores, detect_spikes, emote_density, emote_scores,
    keyword_hits, keyword_scores, log_chat_metrics_summary, messages_per_second,
    repeated_emotes, rolling_baseline, smooth_chat_scores,
};
pub use config::{AudioConfig, ChatConfig, EngineConfig, FilterConfig, SegmentConfig};
pub use duration::filter_short_intervals;
pub use error::{EngineError, EngineResult};
pub use false_positive::filter_false_positives;
pub use flag::flag_highlights;
pub use merge::merge_adjacent_highlights;
pub use text::score_text;
