//! Messages-per-second metric.

use std::collections::BTreeMap;

use tracing::debug;

use vodreel_models::{ChatMessage, MpsSample};

/// Count messages per whole second of chat-replay time.
///
/// Output is sorted by second and sparse: silent seconds are absent here and
/// zero-filled later by the baseline stage.
pub fn messages_per_second(messages: &[ChatMessage]) -> Vec<MpsSample> {
    let mut counts: BTreeMap<i64, u32> = BTreeMap::new();

    for msg in messages {
        let second = msg.offset_secs.floor() as i64;
        *counts.entry(second).or_default() += 1;
    }

    let timeline: Vec<MpsSample> = counts
        .into_iter()
        .map(|(second, messages)| MpsSample { second, messages })
        .collect();

    debug!(
        messages = messages.len(),
        seconds = timeline.len(),
        "Messages-per-second computed"
    );

    timeline
}

#[cfg(test)]
mod tests {
    use super::*;

    fn msg(offset: f64) -> ChatMessage {
        ChatMessage {
            offset_secs: offset,
            text: "hi".into(),
            emote_tokens: Vec::new(),
        }
    }

    #[test]
    fn test_counts_floor_to_seconds() {
        let timeline = messages_per_second(&[msg(3.1), msg(3.9), msg(5.0)]);

        assert_eq!(timeline.len(), 2);
        assert_eq!(timeline[0], MpsSample { second: 3, messages: 2 });
        assert_eq!(timeline[1], MpsSample { second: 5, messages: 1 });
    }

    #[test]
    fn test_empty_replay_yields_empty_timeline() {
        assert!(messages_per_second(&[]).is_empty());
    }
}
