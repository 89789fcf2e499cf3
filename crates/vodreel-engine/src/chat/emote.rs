//! Emote-intensity metrics and scoring.
//!
//! A second scores from repetition of a single hype emote: density says how
//! emote-heavy chat is, repetition strength says how focused it is on one
//! emote, and the hype list gates which emotes count at all. The raw product
//! goes through `tanh` so bursts saturate near 1 without a hard cap.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use tracing::debug;

use vodreel_models::{ChatMessage, EmoteDensitySample, EmoteScoreSample, RepeatedEmoteSample};

/// Emote and message counts per second.
pub fn emote_density(messages: &[ChatMessage]) -> Vec<EmoteDensitySample> {
    let mut emotes_per_sec: BTreeMap<i64, u32> = BTreeMap::new();
    let mut messages_per_sec: BTreeMap<i64, u32> = BTreeMap::new();

    for msg in messages {
        let second = msg.offset_secs.floor() as i64;
        *emotes_per_sec.entry(second).or_default() += msg.emote_tokens.len() as u32;
        *messages_per_sec.entry(second).or_default() += 1;
    }

    messages_per_sec
        .iter()
        .map(|(&second, &msgs)| {
            let emotes = emotes_per_sec.get(&second).copied().unwrap_or(0);
            EmoteDensitySample {
                second,
                emotes,
                messages: msgs,
                emotes_per_message: if msgs > 0 {
                    emotes as f64 / msgs as f64
                } else {
                    0.0
                },
            }
        })
        .collect()
}

/// Most-repeated emote per second, for seconds with any emotes.
///
/// Ties break toward the lexicographically smallest emote name so runs are
/// deterministic.
pub fn repeated_emotes(messages: &[ChatMessage]) -> Vec<RepeatedEmoteSample> {
    let mut by_second: BTreeMap<i64, Vec<&str>> = BTreeMap::new();

    for msg in messages {
        let second = msg.offset_secs.floor() as i64;
        by_second
            .entry(second)
            .or_default()
            .extend(msg.emote_tokens.iter().map(String::as_str));
    }

    let mut timeline = Vec::new();

    for (second, tokens) in by_second {
        if tokens.is_empty() {
            continue;
        }

        let mut counts: HashMap<&str, u32> = HashMap::new();
        for token in &tokens {
            *counts.entry(token).or_default() += 1;
        }

        let (top_emote, top_emote_count) = counts
            .iter()
            .map(|(&emote, &count)| (emote, count))
            .max_by(|a, b| a.1.cmp(&b.1).then_with(|| b.0.cmp(a.0)))
            .expect("non-empty token list");

        timeline.push(RepeatedEmoteSample {
            second,
            total_emotes: tokens.len() as u32,
            unique_emotes: counts.len() as u32,
            top_emote: top_emote.to_string(),
            top_emote_count,
        });
    }

    timeline
}

/// Saturating emote score per second.
///
/// Raw intensity is the top emote's count (only if it is on the hype list)
/// times its repetition strength; `tanh(raw / scale)` bounds the score.
pub fn emote_scores(
    density: &[EmoteDensitySample],
    repeats: &[RepeatedEmoteSample],
    hype_emotes: &BTreeSet<String>,
    scale: f64,
) -> Vec<EmoteScoreSample> {
    let repeats_by_sec: BTreeMap<i64, &RepeatedEmoteSample> =
        repeats.iter().map(|r| (r.second, r)).collect();

    let mut timeline = Vec::new();

    for sample in density {
        if sample.emotes == 0 {
            continue;
        }

        let Some(rep) = repeats_by_sec.get(&sample.second) else {
            continue;
        };

        let hype_emote_count = if hype_emotes.contains(&rep.top_emote) {
            rep.top_emote_count
        } else {
            0
        };
        let repeat_strength = rep.top_emote_count as f64 / sample.emotes as f64;

        let raw = hype_emote_count as f64 * repeat_strength;
        let score = (raw / scale).tanh();

        timeline.push(EmoteScoreSample {
            second: sample.second,
            score,
            top_emote: rep.top_emote.clone(),
            top_emote_count: rep.top_emote_count,
            total_emotes: sample.emotes,
            repeat_strength,
            hype_emote_count,
        });
    }

    debug!(seconds = timeline.len(), "Emote score computed");

    timeline
}
