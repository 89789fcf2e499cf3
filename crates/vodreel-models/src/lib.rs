//! Shared data models for the vodreel highlight engine.
//!
//! This crate provides Serde-serializable types for:
//! - Chunks and their accumulating score fields
//! - Per-second chat metric samples
//! - Highlight intervals and the versioned timeline artifact
//! - Keyword, sentiment, and hype-emote configuration

pub mod chat;
pub mod chunk;
pub mod interval;
pub mod keywords;
pub mod timeline;

// Re-export common types
pub use chat::{
    AlignedChatSample, BaselineSample, ChatMessage, ChatReplay, ChatScoreSample,
    EmoteDensitySample, EmoteScoreSample, KeywordHitsSample, KeywordScoreSample, MpsSample,
    RepeatedEmoteSample, SmoothedChatSample, SpikeSample,
};
pub use chunk::{Chunk, FilterReason, HighlightMark, HighlightReason, SentimentCounts};
pub use interval::HighlightInterval;
pub use keywords::{ChatKeywords, HypeEmotes, KeywordConfig, SentimentLexicon};
pub use timeline::{Timeline, TimelineError, SCHEMA_VERSION};
