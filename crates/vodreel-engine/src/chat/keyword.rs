//! Chat keyword metrics and scoring.

use std::collections::{BTreeMap, BTreeSet};

use tracing::debug;

use vodreel_models::{ChatMessage, KeywordHitsSample, KeywordScoreSample};

/// Keyword hits per second.
///
/// Each configured phrase counts at most once per message; hits are summed
/// over the second. Keywords are pre-lowercased by config flattening and the
/// message text is lowercased by upstream normalization, so matching is a
/// plain substring test.
pub fn keyword_hits(
    messages: &[ChatMessage],
    keywords: &BTreeSet<String>,
) -> Vec<KeywordHitsSample> {
    let mut messages_per_sec: BTreeMap<i64, u32> = BTreeMap::new();
    let mut hits_per_sec: BTreeMap<i64, u32> = BTreeMap::new();
    let mut keywords_per_sec: BTreeMap<i64, BTreeSet<&str>> = BTreeMap::new();

    for msg in messages {
        if msg.text.is_empty() {
            continue;
        }

        let second = msg.offset_secs.floor() as i64;
        *messages_per_sec.entry(second).or_default() += 1;

        for kw in keywords {
            if msg.text.contains(kw.as_str()) {
                *hits_per_sec.entry(second).or_default() += 1;
                keywords_per_sec.entry(second).or_default().insert(kw);
            }
        }
    }

    messages_per_sec
        .iter()
        .map(|(&second, &msgs)| KeywordHitsSample {
            second,
            messages: msgs,
            keyword_hits: hits_per_sec.get(&second).copied().unwrap_or(0),
            keywords: keywords_per_sec
                .get(&second)
                .map(|set| set.iter().map(|s| s.to_string()).collect())
                .unwrap_or_default(),
        })
        .collect()
}

/// Saturating keyword-density score per second.
///
/// Density is hits per message; `tanh(density / scale)` bounds the score.
/// Seconds with no messages or no hits are omitted.
pub fn keyword_scores(hits: &[KeywordHitsSample], scale: f64) -> Vec<KeywordScoreSample> {
    let timeline: Vec<KeywordScoreSample> = hits
        .iter()
        .filter(|sample| sample.messages > 0 && sample.keyword_hits > 0)
        .map(|sample| {
            let density = sample.keyword_hits as f64 / sample.messages as f64;
            KeywordScoreSample {
                second: sample.second,
                score: (density / scale).tanh(),
                keyword_hits: sample.keyword_hits,
                messages: sample.messages,
                keywords: sample.keywords.clone(),
            }
        })
        .collect();

    debug!(seconds = timeline.len(), "Chat keyword score computed");

    timeline
}

#[cfg(test)]
mod tests {
    use super::*;

    fn msg(offset: f64, text: &str) -> ChatMessage {
        ChatMessage {
            offset_secs: offset,
            text: text.into(),
            emote_tokens: Vec::new(),
        }
    }

    fn keywords(words: &[&str]) -> BTreeSet<String> {
        words.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_hits_count_each_keyword_once_per_message() {
        let hits = keyword_hits(
            &[msg(1.0, "clip it clip it clip it"), msg(1.2, "no way")],
            &keywords(&["clip it", "no way"]),
        );

        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].messages, 2);
        assert_eq!(hits[0].keyword_hits, 2);
        assert_eq!(hits[0].keywords, vec!["clip it", "no way"]);
    }

    #[test]
    fn test_empty_text_messages_skipped() {
        let hits = keyword_hits(&[msg(2.0, "")], &keywords(&["gg"]));
        assert!(hits.is_empty());
    }

    #[test]
    fn test_scores_omit_hitless_seconds() {
        let hits = vec![
            KeywordHitsSample {
                second: 0,
                messages: 4,
                keyword_hits: 0,
                keywords: Vec::new(),
            },
            KeywordHitsSample {
                second: 1,
                messages: 4,
                keyword_hits: 2,
                keywords: vec!["gg".into()],
            },
        ];

        let scores = keyword_scores(&hits, 0.5);
        assert_eq!(scores.len(), 1);
        assert_eq!(scores[0].second, 1);
        // density 0.5, tanh(1.0) ~ 0.7616
        assert!((scores[0].score - 1.0_f64.tanh()).abs() < 1e-12);
    }

    #[test]
    fn test_score_bounded_below_one() {
        let hits = vec![KeywordHitsSample {
            second: 0,
            messages: 1,
            keyword_hits: 30,
            keywords: Vec::new(),
        }];
        let scores = keyword_scores(&hits, 0.5);
        assert!(scores[0].score < 1.0);
        assert!(scores[0].score > 0.99);
    }
}
