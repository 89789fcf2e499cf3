//! Chat replay and per-second chat metric samples.
//!
//! Chat metrics are keyed by integer second since chat-replay start and stay
//! independent of chunk boundaries until alignment. Each sample keeps the raw
//! inputs that produced its score so a run can be audited after the fact.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// One normalized chat message, anchored to recording start.
///
/// Timestamp/text normalization, username stripping, and spam filtering all
/// happen upstream; this is the post-normalization contract.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ChatMessage {
    /// Offset from recording start in seconds.
    pub offset_secs: f64,

    /// Message text (lowercased by normalization).
    pub text: String,

    /// Emote tokens extracted from the message.
    #[serde(default)]
    pub emote_tokens: Vec<String>,
}

/// A complete normalized chat replay for one recording.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ChatReplay {
    /// Source VOD identifier, if known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vod_id: Option<String>,

    pub messages: Vec<ChatMessage>,
}

/// Message count for one second.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct MpsSample {
    pub second: i64,
    pub messages: u32,
}

/// Message count plus trailing rolling-average baseline for one second.
///
/// The baseline window is dense: silent seconds count as zero.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct BaselineSample {
    pub second: i64,
    pub messages: u32,
    pub baseline: f64,
}

/// A detected chat activity spike.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct SpikeSample {
    pub second: i64,
    /// Ratio of message count to baseline at this second.
    pub magnitude: f64,
    pub messages: u32,
    pub baseline: f64,
}

/// Emote counts for one second.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct EmoteDensitySample {
    pub second: i64,
    pub emotes: u32,
    pub messages: u32,
    pub emotes_per_message: f64,
}

/// Most-repeated emote for one second.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct RepeatedEmoteSample {
    pub second: i64,
    pub total_emotes: u32,
    pub unique_emotes: u32,
    pub top_emote: String,
    pub top_emote_count: u32,
}

/// Saturating emote-intensity score for one second.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct EmoteScoreSample {
    pub second: i64,
    pub score: f64,

    // scoring inputs
    pub top_emote: String,
    pub top_emote_count: u32,
    pub total_emotes: u32,
    pub repeat_strength: f64,
    pub hype_emote_count: u32,
}

/// Chat keyword hits for one second.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct KeywordHitsSample {
    pub second: i64,
    pub messages: u32,
    pub keyword_hits: u32,
    /// Distinct keywords that hit this second, sorted.
    pub keywords: Vec<String>,
}

/// Saturating keyword-density score for one second.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct KeywordScoreSample {
    pub second: i64,
    pub score: f64,

    pub keyword_hits: u32,
    pub messages: u32,
    pub keywords: Vec<String>,
}

/// Combined per-second chat score with its sub-signal components.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ChatScoreSample {
    pub second: i64,
    pub score: f64,

    pub activity: f64,
    pub emote: f64,
    pub keyword: f64,
}

/// Temporally smoothed chat score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct SmoothedChatSample {
    pub second: i64,
    pub score: f64,

    pub raw_score: f64,
    pub activity: f64,
    pub emote: f64,
    pub keyword: f64,
}

/// Smoothed chat score mapped onto video time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct AlignedChatSample {
    pub video_second: i64,
    pub chat_second: i64,
    pub score: f64,

    pub activity: f64,
    pub emote: f64,
    pub keyword: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_replay_roundtrip() {
        let replay = ChatReplay {
            vod_id: Some("v123".into()),
            messages: vec![ChatMessage {
                offset_secs: 12.7,
                text: "lets gooo".into(),
                emote_tokens: vec!["PogChamp".into()],
            }],
        };

        let json = serde_json::to_string(&replay).unwrap();
        let back: ChatReplay = serde_json::from_str(&json).unwrap();
        assert_eq!(back.messages.len(), 1);
        assert_eq!(back.messages[0].emote_tokens[0], "PogChamp");
    }

    #[test]
    fn test_message_emote_tokens_default_empty() {
        let msg: ChatMessage =
            serde_json::from_str(r#"{"offset_secs": 4.0, "text": "hi"}"#).unwrap();
        assert!(msg.emote_tokens.is_empty());
    }
}
