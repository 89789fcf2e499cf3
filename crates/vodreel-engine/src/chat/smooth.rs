//! Temporal smoothing of the combined chat score.

use std::collections::VecDeque;

use tracing::debug;

use vodreel_models::{ChatScoreSample, SmoothedChatSample};

/// Trailing rolling-average smoothing over the combined chat score.
///
/// Same shrinking-window rule as the baseline: the divisor is the number of
/// samples actually in the window. Input is sorted by second before
/// smoothing; sub-signal components are carried through unchanged.
pub fn smooth_chat_scores(
    timeline: &[ChatScoreSample],
    window_secs: usize,
) -> Vec<SmoothedChatSample> {
    let mut sorted: Vec<&ChatScoreSample> = timeline.iter().collect();
    sorted.sort_by_key(|s| s.second);

    let window_secs = window_secs.max(1);
    let mut window: VecDeque<f64> = VecDeque::with_capacity(window_secs);
    let mut window_sum = 0.0;

    let smoothed: Vec<SmoothedChatSample> = sorted
        .into_iter()
        .map(|sample| {
            window.push_back(sample.score);
            window_sum += sample.score;

            if window.len() > window_secs {
                if let Some(evicted) = window.pop_front() {
                    window_sum -= evicted;
                }
            }

            SmoothedChatSample {
                second: sample.second,
                score: window_sum / window.len() as f64,
                raw_score: sample.score,
                activity: sample.activity,
                emote: sample.emote,
                keyword: sample.keyword,
            }
        })
        .collect();

    debug!(
        window_secs,
        seconds = smoothed.len(),
        "Chat score smoothing complete"
    );

    smoothed
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(second: i64, score: f64) -> ChatScoreSample {
        ChatScoreSample {
            second,
            score,
            activity: 0.0,
            emote: score,
            keyword: 0.0,
        }
    }

    #[test]
    fn test_trailing_average_with_shrinking_window() {
        let smoothed = smooth_chat_scores(
            &[sample(0, 0.9), sample(1, 0.3), sample(2, 0.6)],
            2,
        );

        assert!((smoothed[0].score - 0.9).abs() < 1e-12);
        assert!((smoothed[1].score - 0.6).abs() < 1e-12);
        // Window [0.3, 0.6] once full
        assert!((smoothed[2].score - 0.45).abs() < 1e-12);
        assert!((smoothed[2].raw_score - 0.6).abs() < 1e-12);
    }

    #[test]
    fn test_unsorted_input_is_sorted_first() {
        let smoothed = smooth_chat_scores(&[sample(5, 1.0), sample(3, 0.0)], 2);
        assert_eq!(smoothed[0].second, 3);
        assert_eq!(smoothed[1].second, 5);
        assert!((smoothed[1].score - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_empty_timeline() {
        assert!(smooth_chat_scores(&[], 5).is_empty());
    }
}
