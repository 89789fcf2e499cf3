//! Keyword, sentiment, and hype-emote configuration.
//!
//! These are static per-run lists loaded once and treated read-only. Maps are
//! `BTreeMap` so category iteration order is stable across runs.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Positive/negative sentiment phrase lists.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct SentimentLexicon {
    #[serde(default)]
    pub positive: Vec<String>,
    #[serde(default)]
    pub negative: Vec<String>,
}

/// Transcript keyword configuration: category -> phrases, plus an optional
/// sentiment lexicon under its own key.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct KeywordConfig {
    /// Keyword phrases grouped by category.
    #[serde(default)]
    pub categories: BTreeMap<String, Vec<String>>,

    /// Sentiment phrase lists.
    #[serde(default)]
    pub sentiment: SentimentLexicon,
}

/// Chat keyword configuration: grouped phrase lists, matched flat and
/// lowercase against message text.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct ChatKeywords {
    #[serde(flatten)]
    pub groups: BTreeMap<String, Vec<String>>,
}

impl ChatKeywords {
    /// Flatten all groups into a sorted set of lowercase phrases.
    pub fn flattened(&self) -> BTreeSet<String> {
        self.groups
            .values()
            .flatten()
            .map(|kw| kw.to_lowercase())
            .collect()
    }
}

/// Hype-emote configuration: grouped emote name lists.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct HypeEmotes {
    #[serde(flatten)]
    pub groups: BTreeMap<String, Vec<String>>,
}

impl HypeEmotes {
    /// Flatten all groups into a set of emote names. Emote names are matched
    /// exactly, not case-folded.
    pub fn flattened(&self) -> BTreeSet<String> {
        self.groups.values().flatten().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chat_keywords_flatten_lowercases() {
        let json = r#"{"hype": ["LETS GO", "clip it"], "laughter": ["lul"]}"#;
        let keywords: ChatKeywords = serde_json::from_str(json).unwrap();
        let flat = keywords.flattened();

        assert!(flat.contains("lets go"));
        assert!(flat.contains("lul"));
        assert_eq!(flat.len(), 3);
    }

    #[test]
    fn test_hype_emotes_preserve_case() {
        let json = r#"{"global": ["PogChamp", "KEKW"]}"#;
        let emotes: HypeEmotes = serde_json::from_str(json).unwrap();
        let flat = emotes.flattened();

        assert!(flat.contains("PogChamp"));
        assert!(!flat.contains("pogchamp"));
    }

    #[test]
    fn test_keyword_config_missing_sentiment_defaults() {
        let json = r#"{"categories": {"combat": ["head shot"]}}"#;
        let config: KeywordConfig = serde_json::from_str(json).unwrap();
        assert!(config.sentiment.positive.is_empty());
        assert_eq!(config.categories["combat"].len(), 1);
    }
}
