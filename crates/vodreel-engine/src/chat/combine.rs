//! Chat sub-signal combination.

use std::collections::BTreeMap;

use tracing::debug;

use vodreel_models::{ChatScoreSample, EmoteScoreSample, KeywordScoreSample, SpikeSample};

use crate::config::ChatConfig;

/// Spike magnitudes are ratios with no upper bound; divide by this before
/// clamping into [0, 1] so typical spikes (3x-9x baseline) spread the range.
const SPIKE_MAGNITUDE_NORM: f64 = 3.0;

/// Weighted combination of activity, emote, and keyword scores into one
/// per-second chat score.
///
/// Operates over the union of seconds present in any sub-signal; a missing
/// sub-signal contributes 0 at that second. The weights need not sum to 1.
pub fn combine_chat_scores(
    spikes: &[SpikeSample],
    emotes: &[EmoteScoreSample],
    keywords: &[KeywordScoreSample],
    config: &ChatConfig,
) -> Vec<ChatScoreSample> {
    let activity_by_sec: BTreeMap<i64, f64> = spikes
        .iter()
        .map(|s| (s.second, (s.magnitude / SPIKE_MAGNITUDE_NORM).min(1.0)))
        .collect();
    let emote_by_sec: BTreeMap<i64, f64> = emotes.iter().map(|e| (e.second, e.score)).collect();
    let keyword_by_sec: BTreeMap<i64, f64> = keywords.iter().map(|k| (k.second, k.score)).collect();

    let mut all_seconds: Vec<i64> = activity_by_sec
        .keys()
        .chain(emote_by_sec.keys())
        .chain(keyword_by_sec.keys())
        .copied()
        .collect();
    all_seconds.sort_unstable();
    all_seconds.dedup();

    let timeline: Vec<ChatScoreSample> = all_seconds
        .into_iter()
        .map(|second| {
            let activity = activity_by_sec.get(&second).copied().unwrap_or(0.0);
            let emote = emote_by_sec.get(&second).copied().unwrap_or(0.0);
            let keyword = keyword_by_sec.get(&second).copied().unwrap_or(0.0);

            ChatScoreSample {
                second,
                score: config.activity_weight * activity
                    + config.emote_weight * emote
                    + config.keyword_weight * keyword,
                activity,
                emote,
                keyword,
            }
        })
        .collect();

    debug!(seconds = timeline.len(), "Chat score aggregated");

    timeline
}
