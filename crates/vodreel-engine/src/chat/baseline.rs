//! Rolling message-count baseline.

use std::collections::{BTreeMap, VecDeque};

use tracing::debug;

use vodreel_models::{BaselineSample, MpsSample};

/// Trailing rolling-average baseline over a dense per-second series.
///
/// The series is densified from the sparse MPS timeline: every second from
/// the first to the last observed gets a sample, zero-filled when silent.
/// The window holds at most `window_secs` samples and shrinks at the start
/// of the series, so the divisor is the count actually in the window.
/// An empty timeline yields an empty baseline (degenerate data, not an
/// error).
pub fn rolling_baseline(mps: &[MpsSample], window_secs: usize) -> Vec<BaselineSample> {
    let counts: BTreeMap<i64, u32> = mps.iter().map(|s| (s.second, s.messages)).collect();

    let (Some(&min_sec), Some(&max_sec)) = (
        counts.keys().next(),
        counts.keys().next_back(),
    ) else {
        return Vec::new();
    };

    let window_secs = window_secs.max(1);
    let mut window: VecDeque<u32> = VecDeque::with_capacity(window_secs);
    let mut window_sum = 0.0;

    let mut timeline = Vec::with_capacity((max_sec - min_sec + 1) as usize);

    for second in min_sec..=max_sec {
        let messages = counts.get(&second).copied().unwrap_or(0);

        window.push_back(messages);
        window_sum += messages as f64;

        if window.len() > window_secs {
            if let Some(evicted) = window.pop_front() {
                window_sum -= evicted as f64;
            }
        }

        timeline.push(BaselineSample {
            second,
            messages,
            baseline: window_sum / window.len() as f64,
        });
    }

    debug!(
        window_secs,
        seconds = timeline.len(),
        "Rolling baseline computed"
    );

    timeline
}
